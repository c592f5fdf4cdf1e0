/// Languages with a registered grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Bash,
    Json,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::TypeScript,
        Language::Tsx,
        Language::JavaScript,
        Language::Jsx,
        Language::Bash,
        Language::Json,
    ];

    /// Resolves a language tag (`"typescript"`, `"ts"`, `"sh"` ...). Case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let lang = match tag.as_str() {
            "typescript" | "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "javascript" | "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "bash" | "sh" | "shell" | "zsh" => Language::Bash,
            "json" => Language::Json,
            _ => return None,
        };
        Some(lang)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
            Language::Jsx => "jsx",
            Language::Bash => "bash",
            Language::Json => "json",
        }
    }

    /// Tags that resolve to this language.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["typescript", "ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::JavaScript => &["javascript", "js", "mjs", "cjs"],
            Language::Jsx => &["jsx"],
            Language::Bash => &["bash", "sh", "shell", "zsh"],
            Language::Json => &["json"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_round_trips() {
        for lang in Language::ALL {
            for tag in lang.tags() {
                assert_eq!(Language::from_tag(tag), Some(lang), "tag {tag}");
            }
            assert_eq!(Language::from_tag(lang.name()), Some(lang));
        }
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(Language::from_tag("TypeScript"), Some(Language::TypeScript));
        assert_eq!(Language::from_tag(" JSON "), Some(Language::Json));
    }

    #[test]
    fn unknown_tags_resolve_to_none() {
        assert_eq!(Language::from_tag("cobol"), None);
        assert_eq!(Language::from_tag(""), None);
    }
}
