//! Selector lists with Playwright's `:has-text("...")` pseudo-class.
//!
//! Site selectors such as `button:has-text("Aceptar cookies"), button#accept`
//! are not valid for `querySelectorAll`. They are split into plain CSS plus an
//! optional text filter that is applied after the DOM query.

const HAS_TEXT: &str = ":has-text(";

/// One comma-separated alternative of a selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPart {
    /// Plain CSS understood by the browser
    pub css: String,
    /// Substring the element's inner text must contain
    pub text: Option<String>,
}

impl SelectorPart {
    pub fn matches_text(&self, inner_text: &str) -> bool {
        self.text
            .as_deref()
            .is_none_or(|needle| inner_text.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    raw: String,
    parts: Vec<SelectorPart>,
}

impl SelectorList {
    pub fn parse(selector: &str) -> Self {
        let parts = split_top_level(selector)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_part)
            .collect();

        Self {
            raw: selector.to_string(),
            parts,
        }
    }

    /// Whether any alternative needs text filtering after the query
    pub fn has_text_filters(&self) -> bool {
        self.parts.iter().any(|p| p.text.is_some())
    }

    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn parse_part(part: &str) -> SelectorPart {
    let Some(start) = part.find(HAS_TEXT) else {
        return SelectorPart {
            css: part.to_string(),
            text: None,
        };
    };

    let arg_start = start + HAS_TEXT.len();
    let arg_len = closing_paren(&part[arg_start..]).unwrap_or(part.len() - arg_start);
    let arg = part[arg_start..arg_start + arg_len].trim();
    let rest = part.get(arg_start + arg_len + 1..).unwrap_or("");

    let mut css = format!("{}{}", &part[..start], rest).trim().to_string();
    if css.is_empty() {
        css = "*".to_string();
    }

    SelectorPart {
        css,
        text: Some(unquote(arg).to_string()),
    }
}

/// Byte offset of the `)` closing an argument that starts at offset 0
fn closing_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') if depth == 0 => return Some(i),
            (None, ')') => depth -= 1,
            _ => {}
        }
    }
    None
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn unquote(s: &str) -> &str {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
