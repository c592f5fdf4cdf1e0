/// Failures while setting up a highlighter backend.
///
/// Highlighting itself never fails: a block whose grammar is missing renders as plain text.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[cfg(feature = "syntect")]
    #[error("failed to load theme from {}", path.display())]
    ThemeLoad {
        path: std::path::PathBuf,
        #[source]
        source: ::syntect::LoadingError,
    },

    #[cfg(feature = "treesitter")]
    #[error("invalid highlight query for `{language}`")]
    Query {
        language: String,
        #[source]
        source: ::tree_sitter::QueryError,
    },
}
