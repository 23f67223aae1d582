pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(about = "Scrape Colombian retail, Wikipedia and news sites", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/vitrina/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search products on a retail site and save CSV/JSON reports
    Retail {
        /// Product to search for
        term: String,
        /// Site key (see `vitrina sites`)
        #[arg(short, long)]
        site: String,
        /// Result pages to walk
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=5))]
        pages: u32,
    },
    /// List the supported retail sites
    Sites,
    /// List an article's sections, or export one of them
    Wiki {
        /// Article title
        term: String,
        /// Section number to export, as listed
        #[arg(short, long, conflicts_with = "name")]
        section: Option<usize>,
        /// Section heading to export, e.g. "Historia"
        #[arg(short, long)]
        name: Option<String>,
        /// Export an AI summary instead of the text
        #[arg(long)]
        summary: bool,
    },
    /// Colombian news headlines and articles
    News {
        #[command(subcommand)]
        action: NewsAction,
    },
}

#[derive(Subcommand)]
pub enum NewsAction {
    /// Headlines matching a keyword on every outlet
    Search {
        keyword: String,
    },
    /// Read and export one article
    Read {
        url: String,
        /// Export an AI summary instead of the text
        #[arg(long)]
        summary: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_retail_defaults_to_one_page() {
        let cli = Cli::try_parse_from(["vitrina", "retail", "laptop", "--site", "exito"]).unwrap();
        match cli.command {
            Commands::Retail { term, site, pages } => {
                assert_eq!(term, "laptop");
                assert_eq!(site, "exito");
                assert_eq!(pages, 1);
            }
            _ => panic!("expected retail command"),
        }
    }

    #[test]
    fn test_page_count_bounded() {
        assert!(Cli::try_parse_from(["vitrina", "retail", "tv", "-s", "exito", "-p", "6"]).is_err());
        assert!(Cli::try_parse_from(["vitrina", "retail", "tv", "-s", "exito", "-p", "0"]).is_err());
        assert!(Cli::try_parse_from(["vitrina", "retail", "tv", "-s", "exito", "-p", "5"]).is_ok());
    }

    #[test]
    fn test_wiki_section_by_number_or_name() {
        let cli = Cli::try_parse_from(["vitrina", "wiki", "Bogotá", "--name", "Historia"]).unwrap();
        match cli.command {
            Commands::Wiki { section, name, .. } => {
                assert_eq!(section, None);
                assert_eq!(name.as_deref(), Some("Historia"));
            }
            _ => panic!("expected wiki command"),
        }
        assert!(Cli::try_parse_from(["vitrina", "wiki", "Bogotá", "-s", "2", "-n", "Historia"]).is_err());
    }

    #[test]
    fn test_news_read_with_global_config() {
        let cli = Cli::try_parse_from([
            "vitrina",
            "news",
            "read",
            "https://www.semana.com/x/",
            "--summary",
            "--config",
            "/tmp/vitrina.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vitrina.toml")));
        assert!(matches!(
            cli.command,
            Commands::News {
                action: NewsAction::Read { summary: true, .. }
            }
        ));
    }
}
