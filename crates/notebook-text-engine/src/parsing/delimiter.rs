//! # Cell Delimiters
//!
//! Recognizes the lines that open a new cell, in both textual dialects:
//!
//! ```text
//! current  := comment_prefix space* percent_run metadata_marker header_tail
//! legacy   := percent_run space+ type_token (space+ flag)*
//! ```
//!
//! - `comment_prefix` is exactly one `#` or exactly two `/` at column 0
//!   (`##` and `///` are not prefixes).
//! - `percent_run` is two or more consecutive `%`.
//! - `metadata_marker` is a run of zero or more `-`. A non-empty run means a
//!   YAML metadata block follows the header.
//! - `header_tail` is either empty (type `""`), `title? [type]`, or
//!   `title? type` without brackets. The title is ignored in both forms.
//!
//! Only the legacy dialect carries flags.
//!
//! The legacy dialect has no comment prefix and requires a type. Legacy
//! headers are read but never written.
//!
//! A metadata block is closed by `comment_prefix space* -+ %%+`, e.g. `# ---%%`.

/// Which textual dialect a delimiter line was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `%% type flag...`
    Legacy,
    /// `# %% [type]`, `// %%--- [type]`, ...
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPrefix {
    Hash,
    Slashes,
}

impl CommentPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentPrefix::Hash => "#",
            CommentPrefix::Slashes => "//",
        }
    }
}

/// A recognized cell delimiter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    pub dialect: Dialect,
    /// Normalized cell type; empty when the header names none.
    pub cell_type: String,
    /// True when a YAML metadata block follows (`# %%--- [type]`).
    pub opens_metadata: bool,
    /// Legacy property flags (`%% js autoRun`), each becomes `flag: true`.
    pub flags: Vec<String>,
}

pub struct CellDelimiter;

impl CellDelimiter {
    pub const LEGACY_ALIASES: &'static [(&'static str, &'static str)] = &[("js", "javascript")];

    /// True if `line` opens a new cell.
    pub fn matches(line: &str) -> bool {
        Self::parse(line).is_some()
    }

    /// Parses a delimiter line. Never fails: anything that is not a
    /// delimiter is simply `None` and stays body or front matter text.
    pub fn parse(line: &str) -> Option<Delimiter> {
        let line = line.trim_end();
        match comment_prefix(line) {
            Prefix::Comment(_, rest) => current_header(rest),
            Prefix::Invalid => None,
            Prefix::None => legacy_header(line),
        }
    }

    /// True if `line` closes a cell metadata block (`# ---%%`).
    pub fn closes_metadata(line: &str) -> bool {
        let Prefix::Comment(_, rest) = comment_prefix(line.trim_end()) else {
            return false;
        };
        let rest = skip_spaces(rest);
        let after_dashes = rest.trim_start_matches('-');
        if after_dashes.len() == rest.len() {
            return false;
        }
        matches!(percent_run(after_dashes), Some(tail) if tail.is_empty())
    }

    /// Strips the comment prefix and one following space from a metadata
    /// block line. Lines without a prefix are returned unchanged.
    pub fn strip_comment(line: &str) -> &str {
        let rest = line
            .strip_prefix(CommentPrefix::Slashes.as_str())
            .or_else(|| line.strip_prefix(CommentPrefix::Hash.as_str()));
        match rest {
            Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
            None => line,
        }
    }
}

enum Prefix<'a> {
    Comment(CommentPrefix, &'a str),
    /// `##` or `///`: looks like a comment but can never start a delimiter.
    Invalid,
    None,
}

fn comment_prefix(line: &str) -> Prefix<'_> {
    if let Some(rest) = line.strip_prefix("//") {
        if rest.starts_with('/') {
            return Prefix::Invalid;
        }
        return Prefix::Comment(CommentPrefix::Slashes, rest);
    }
    if let Some(rest) = line.strip_prefix('#') {
        if rest.starts_with('#') {
            return Prefix::Invalid;
        }
        return Prefix::Comment(CommentPrefix::Hash, rest);
    }
    Prefix::None
}

fn skip_spaces(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Consumes a run of at least two `%`, returning what follows.
fn percent_run(s: &str) -> Option<&str> {
    let rest = s.trim_start_matches('%');
    (s.len() - rest.len() >= 2).then_some(rest)
}

/// Consumes a (possibly empty) run of `-`, returning whether one was present.
fn metadata_marker(s: &str) -> (bool, &str) {
    let rest = s.trim_start_matches('-');
    (rest.len() != s.len(), rest)
}

fn current_header(after_prefix: &str) -> Option<Delimiter> {
    let rest = percent_run(skip_spaces(after_prefix))?;
    let (opens_metadata, rest) = metadata_marker(rest);

    // The markers must end at a word boundary: `# %%a` is not a delimiter.
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('[')) {
        return None;
    }

    Some(Delimiter {
        dialect: Dialect::Current,
        cell_type: header_tail(rest.trim()),
        opens_metadata,
        flags: vec![],
    })
}

/// `title? [type]` or `title? type`: the bracketed or last token is the type.
fn header_tail(tail: &str) -> String {
    if let Some(inner) = tail.strip_suffix(']')
        && let Some(open) = inner.rfind('[')
    {
        return inner[open + 1..].trim().to_string();
    }
    tail.split_whitespace()
        .next_back()
        .unwrap_or_default()
        .to_string()
}

fn legacy_header(line: &str) -> Option<Delimiter> {
    let rest = percent_run(line)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = rest.split_whitespace();
    let cell_type = tokens.next().filter(|t| is_type_token(t))?;
    Some(Delimiter {
        dialect: Dialect::Legacy,
        cell_type: normalize_legacy_type(cell_type),
        opens_metadata: false,
        flags: tokens.map(str::to_string).collect(),
    })
}

fn is_type_token(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn normalize_legacy_type(cell_type: &str) -> String {
    CellDelimiter::LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == cell_type)
        .map_or(cell_type, |&(_, name)| name)
        .to_string()
}
