use serde::{Deserialize, Serialize};

pub const TITLE_FONT_SIZE: &str = "text-5xl";
pub const TITLE_FONT_FAMILY: &str = "font-display";
pub const BULLET_FONT_SIZE: &str = "text-2xl";
pub const BULLET_FONT_FAMILY: &str = "font-sans";
pub const PROMPT_FONT_SIZE: &str = "text-sm";
pub const PROMPT_FONT_FAMILY: &str = "font-sans";

/// User-editable text plus its display tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    #[serde(rename = "fontSize")]
    pub font_size: String,
    #[serde(rename = "fontFamily")]
    pub font_family: String,
}

impl StyledText {
    pub fn new(
        text: impl Into<String>,
        font_size: impl Into<String>,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            font_size: font_size.into(),
            font_family: font_family.into(),
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(text, TITLE_FONT_SIZE, TITLE_FONT_FAMILY)
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(text, BULLET_FONT_SIZE, BULLET_FONT_FAMILY)
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Self::new(text, PROMPT_FONT_SIZE, PROMPT_FONT_FAMILY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOption {
    pub token: String,
    pub label: String,
}

impl FontOption {
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            label: label.into(),
        }
    }
}

/// The finite token sets a text field offers in its style toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub sizes: Vec<String>,
    pub families: Vec<FontOption>,
}

impl StyleOptions {
    pub fn new(sizes: &[&str], families: Vec<FontOption>) -> Self {
        Self {
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
            families,
        }
    }

    pub fn for_title() -> Self {
        Self::new(
            &["text-4xl", "text-5xl", "text-6xl"],
            vec![
                FontOption::new("font-display", "Display"),
                FontOption::new("font-sans", "Sans"),
            ],
        )
    }

    pub fn for_bullet() -> Self {
        Self::new(
            &["text-xl", "text-2xl", "text-3xl"],
            vec![
                FontOption::new("font-sans", "Sans"),
                FontOption::new("font-display", "Display"),
            ],
        )
    }

    pub fn for_prompt() -> Self {
        Self::new(
            &["text-xs", "text-sm", "text-base"],
            vec![
                FontOption::new("font-sans", "Sans"),
                FontOption::new("font-display", "Display"),
            ],
        )
    }

    pub fn has_size(&self, token: &str) -> bool {
        self.sizes.iter().any(|s| s == token)
    }

    pub fn has_family(&self, token: &str) -> bool {
        self.families.iter().any(|f| f.token == token)
    }

    pub fn family_label<'a>(&'a self, token: &'a str) -> &'a str {
        self.families
            .iter()
            .find(|f| f.token == token)
            .map(|f| f.label.as_str())
            .unwrap_or(token)
    }

    /// The size after `current` in option order, wrapping around. Unknown
    /// tokens start from the first option.
    pub fn next_size(&self, current: &str) -> Option<&str> {
        cycle(&self.sizes, current)
    }

    pub fn next_family(&self, current: &str) -> Option<&str> {
        let tokens: Vec<String> = self.families.iter().map(|f| f.token.clone()).collect();
        let next = cycle(&tokens, current)?;
        self.families
            .iter()
            .find(|f| f.token == next)
            .map(|f| f.token.as_str())
    }
}

fn cycle<'a>(tokens: &'a [String], current: &str) -> Option<&'a str> {
    if tokens.is_empty() {
        return None;
    }
    let next = match tokens.iter().position(|t| t == current) {
        Some(i) => (i + 1) % tokens.len(),
        None => 0,
    };
    tokens.get(next).map(|s| s.as_str())
}

/// Short toolbar label for a size token: `text-2xl` -> `2XL`, `text-sm` -> `SM`.
pub fn size_label(token: &str) -> String {
    let size = token.rsplit('-').next().unwrap_or(token);
    size.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label() {
        assert_eq!(size_label("text-2xl"), "2XL");
        assert_eq!(size_label("text-sm"), "SM");
        assert_eq!(size_label("text-base"), "BASE");
    }

    #[test]
    fn test_cycle_sizes_wraps() {
        let opts = StyleOptions::for_title();
        assert_eq!(opts.next_size("text-5xl"), Some("text-6xl"));
        assert_eq!(opts.next_size("text-6xl"), Some("text-4xl"));
        assert_eq!(opts.next_size("bogus"), Some("text-4xl"));
        assert_eq!(opts.next_family("font-display"), Some("font-sans"));
    }

    #[test]
    fn test_default_tokens() {
        let t = StyledText::bullet("x");
        assert_eq!(t.font_size, "text-2xl");
        assert_eq!(t.font_family, "font-sans");
        assert!(StyleOptions::for_bullet().has_size(&t.font_size));
        assert_eq!(StyleOptions::for_title().family_label("font-display"), "Display");
    }
}
