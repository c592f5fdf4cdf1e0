/// What a caller asks a code block to show.
///
/// Built fresh for every render:
///
/// ```
/// use ratatui_code_block_core::request::RenderRequest;
///
/// let req = RenderRequest::new("  echo hi  ", "bash").title("install.sh");
/// assert_eq!(req.display_code(), "echo hi");
/// assert!(req.show_line_numbers);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    /// Raw source text. Surrounding whitespace is stripped before display.
    pub code: String,
    /// Grammar selector such as `"typescript"` or `"bash"`. Not validated.
    pub language: String,
    pub title: Option<String>,
    pub show_line_numbers: bool,
}

impl RenderRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            title: None,
            show_line_numbers: true,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// The code as it is displayed. A leading byte order mark counts as whitespace.
    pub fn display_code(&self) -> &str {
        self.code.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
    }

    /// The header label, if one should be shown.
    pub fn header(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
