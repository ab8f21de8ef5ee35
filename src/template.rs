//! The two-line document template.
//!
//! The file starts as a Pandoc title block:
//!
//! ```text
//! % <title>
//! % <author>
//! ```
//!
//! The title is built from a [`TitleFormat`], a small pattern language with
//! `{label}`, `{prefix}` and `{author}` placeholders. A placeholder can pipe
//! its value through filters, e.g. `{label|strip,slugify}`.

use std::str::FromStr;

use anyhow::{Result, anyhow, bail};

/// Render the template written into the source file.
pub fn render(title: &str, author: &str) -> String {
    format!("% {}\n% {}\n", title, author)
}

/// Reject values that would break the two-line layout.
pub fn ensure_single_line(what: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        bail!("{} must fit on a single line, got {:?}", what, value);
    }
    Ok(())
}

/// Values available to placeholders.
#[derive(Debug, Clone, Copy)]
pub struct TitleContext<'a> {
    pub label: &'a str,
    pub prefix: &'a str,
    pub author: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Label,
    Prefix,
    Author,
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "label" => Ok(Field::Label),
            "prefix" => Ok(Field::Prefix),
            "author" => Ok(Field::Author),
            other => Err(anyhow!(
                "unknown placeholder '{{{}}}' (expected label, prefix or author)",
                other
            )),
        }
    }
}

/// String transformations usable after `|` in a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Strip,
    Lower,
    Upper,
    Dashed,
    Slugify,
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "strip" => Ok(Filter::Strip),
            "lower" => Ok(Filter::Lower),
            "upper" => Ok(Filter::Upper),
            "dashed" => Ok(Filter::Dashed),
            "slugify" => Ok(Filter::Slugify),
            other => Err(anyhow!(
                "unknown filter '{}' (expected strip, lower, upper, dashed or slugify)",
                other
            )),
        }
    }
}

impl Filter {
    pub fn apply(self, value: &str) -> String {
        match self {
            Filter::Strip => value.trim().to_string(),
            Filter::Lower => value.to_lowercase(),
            Filter::Upper => value.to_uppercase(),
            Filter::Dashed => value.split_whitespace().collect::<Vec<_>>().join("-"),
            Filter::Slugify => slugify(value),
        }
    }
}

/// Lowercase, split on anything that is not a word character, and join the
/// non-empty pieces with dashes. Non-ASCII letters are kept.
pub fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { field: Field, filters: Vec<Filter> },
}

/// A parsed title pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFormat {
    source: String,
    segments: Vec<Segment>,
}

impl TitleFormat {
    pub fn parse(source: &str) -> Result<Self> {
        ensure_single_line("title format", source)?;

        let token_re = regex::Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]")?;
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for captures in token_re.captures_iter(source) {
            let whole = captures.get(0).ok_or_else(|| anyhow!("empty match"))?;
            literal.push_str(&source[last..whole.start()]);
            last = whole.end();

            match (whole.as_str(), captures.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(inner)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(inner.as_str())?);
                }
                (brace, None) => bail!(
                    "unbalanced '{}' at byte {} in title format {:?}",
                    brace,
                    whole.start(),
                    source
                ),
            }
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn expand(&self, context: &TitleContext<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { field, filters } => {
                    let value = match field {
                        Field::Label => context.label,
                        Field::Prefix => context.prefix,
                        Field::Author => context.author,
                    };
                    let value = filters
                        .iter()
                        .fold(value.to_string(), |acc, filter| filter.apply(&acc));
                    out.push_str(&value);
                }
            }
        }
        out
    }
}

impl Default for TitleFormat {
    fn default() -> Self {
        Self {
            source: "{label}".to_string(),
            segments: vec![Segment::Placeholder {
                field: Field::Label,
                filters: Vec::new(),
            }],
        }
    }
}

fn parse_placeholder(inner: &str) -> Result<Segment> {
    let (name, filters) = match inner.split_once('|') {
        Some((name, filters)) => (name, filters),
        None => (inner, ""),
    };

    let field = name.parse()?;
    let filters = filters
        .split(',')
        .filter(|f| !f.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Filter>>>()?;

    Ok(Segment::Placeholder { field, filters })
}
