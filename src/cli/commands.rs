use std::time::Instant;

use crate::app::{AppContext, Result, VitrinaError};
use crate::domain::ScrapeRequest;
use crate::output::{process_text, TextMode};
use crate::wiki::article_url;

pub async fn scrape_retail(ctx: &AppContext, term: &str, site: &str, pages: u32) -> Result<()> {
    let request = ScrapeRequest::new(term, site, pages)?;

    println!("Searching \"{}\" on {}...", request.search_term(), request.site_key());
    let start = Instant::now();
    let records = match ctx.orchestrator.try_scrape(&request).await {
        Ok(records) => records,
        Err(e @ VitrinaError::UnsupportedSite { .. }) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("Found {} products", records.len());
    println!("Search time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

pub fn list_sites(ctx: &AppContext) {
    for key in ctx.orchestrator.site_keys() {
        println!("{}", key);
    }
}

pub async fn wiki(
    ctx: &AppContext,
    term: &str,
    section: Option<usize>,
    name: Option<&str>,
    summary: bool,
) -> Result<()> {
    let start = Instant::now();
    let url = article_url(term);

    match (section, name) {
        (_, Some(name)) => {
            let text = ctx.wiki.section_text(term, name).await?;
            println!("Section: {}\n", name);
            export(ctx, &url, name, &text, summary).await?;
        }
        (Some(n), None) => {
            let lookup = ctx.wiki.lookup(term, Some(n)).await?;
            if let Some((name, text)) = lookup.selected {
                println!("Section: {}\n", name);
                export(ctx, &lookup.url, &name, &text, summary).await?;
            }
        }
        (None, None) => {
            let sections = ctx.wiki.sections(term).await?;
            if sections.is_empty() {
                println!("No sections found at {}", url);
                return Ok(());
            }
            println!("Sections of {}:", url);
            for (i, name) in sections.iter().enumerate() {
                println!("{:>3}. {}", i + 1, name);
            }
            println!("\nExport one with --section <N> or --name <SECTION>");
        }
    }

    println!("Search time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

pub async fn news_search(ctx: &AppContext, keyword: &str) -> Result<()> {
    let headlines = ctx.news.search(keyword).await?;
    if headlines.is_empty() {
        println!("No news found for \"{}\"", keyword);
        return Ok(());
    }

    let mut current_site = "";
    for headline in &headlines {
        if headline.site != current_site {
            println!("\n{} results for: {}", headline.site, keyword);
            current_site = &headline.site;
        }
        println!("  {}", headline.title);
        println!("    {}", headline.url);
    }
    Ok(())
}

pub async fn news_read(ctx: &AppContext, url: &str, summary: bool) -> Result<()> {
    let article = ctx.news.read(url).await?;
    println!("{}\n", article.title);
    export(ctx, &article.url, "Article", &article.text, summary).await
}

async fn export(ctx: &AppContext, url: &str, section: &str, text: &str, summary: bool) -> Result<()> {
    let mode = if summary { TextMode::Summary } else { TextMode::Raw };

    match process_text(url, section, text, mode, ctx.summarizer.as_ref(), &ctx.exporter).await? {
        Some(content) => {
            println!("{}\n", content);
            println!("Exported to {}", ctx.exporter.dir().display());
        }
        None => println!("Nothing to export"),
    }
    Ok(())
}
