use thiserror::Error;

use super::metadata::MetadataError;

/// Fatal, document-level parse failures.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document contains no recognizable structure")]
    NoStructure,
    #[error("invalid front matter at line {line}")]
    FrontMatter {
        /// 1-based line of the opening fence.
        line: usize,
        #[source]
        source: MetadataError,
    },
}
