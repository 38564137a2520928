//! Focus-scoped editing of one [`StyledText`] field.
//!
//! A session snapshots the value it was opened on and edits a private draft.
//! Style changes from the toolbar apply to the draft immediately; nothing is
//! emitted until the session commits. Cancel restores the snapshot. Commit
//! emits only when the trimmed draft differs from the snapshot.

use slidesmith_common::{StyleOptions, StyledText};

use crate::error::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Confirm commits.
    SingleLine,
    /// Confirm inserts a newline; commit happens on focus loss.
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Confirm,
    Cancel,
    /// Focus moved to something outside the session's field and toolbar.
    FocusLost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Still editing.
    Open,
    /// Closed with a changed value to apply downstream.
    Committed(StyledText),
    /// Closed with nothing to apply.
    Closed,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: StyledText,
    draft: StyledText,
    options: StyleOptions,
    mode: EditMode,
}

impl EditSession {
    pub fn begin(value: &StyledText, options: StyleOptions, mode: EditMode) -> Self {
        Self {
            original: value.clone(),
            draft: value.clone(),
            options,
            mode,
        }
    }

    pub fn original(&self) -> &StyledText {
        &self.original
    }

    pub fn draft(&self) -> &StyledText {
        &self.draft
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.draft.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.text.pop();
    }

    pub fn set_font_size(&mut self, token: &str) -> Result<(), EditError> {
        if !self.options.has_size(token) {
            return Err(EditError::UnknownStyleToken {
                token: token.to_string(),
            });
        }
        self.draft.font_size = token.to_string();
        Ok(())
    }

    pub fn set_font_family(&mut self, token: &str) -> Result<(), EditError> {
        if !self.options.has_family(token) {
            return Err(EditError::UnknownStyleToken {
                token: token.to_string(),
            });
        }
        self.draft.font_family = token.to_string();
        Ok(())
    }

    pub fn cycle_font_size(&mut self) {
        if let Some(next) = self.options.next_size(&self.draft.font_size) {
            self.draft.font_size = next.to_string();
        }
    }

    pub fn cycle_font_family(&mut self) {
        if let Some(next) = self.options.next_family(&self.draft.font_family) {
            self.draft.font_family = next.to_string();
        }
    }

    pub fn handle(&mut self, key: EditKey) -> SessionOutcome {
        match (key, self.mode) {
            (EditKey::Confirm, EditMode::MultiLine) => {
                self.draft.text.push('\n');
                SessionOutcome::Open
            }
            (EditKey::Confirm, EditMode::SingleLine) | (EditKey::FocusLost, _) => self.commit(),
            (EditKey::Cancel, _) => {
                self.cancel();
                SessionOutcome::Closed
            }
        }
    }

    /// The value to apply, or `None` when nothing changed.
    pub fn commit(&self) -> SessionOutcome {
        let trimmed = StyledText {
            text: self.draft.text.trim().to_string(),
            ..self.draft.clone()
        };
        if trimmed == self.original {
            SessionOutcome::Closed
        } else {
            SessionOutcome::Committed(trimmed)
        }
    }

    pub fn cancel(&mut self) -> StyledText {
        self.draft = self.original.clone();
        self.original.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: EditMode) -> EditSession {
        EditSession::begin(&StyledText::title("Hello"), StyleOptions::for_title(), mode)
    }

    #[test]
    fn test_unchanged_commit_emits_nothing() {
        let mut s = session(EditMode::SingleLine);
        assert_eq!(s.handle(EditKey::Confirm), SessionOutcome::Closed);

        let mut s = session(EditMode::SingleLine);
        s.set_text("  Hello  ");
        assert_eq!(s.handle(EditKey::FocusLost), SessionOutcome::Closed);
    }

    #[test]
    fn test_style_change_commits_trimmed_text() {
        let mut s = session(EditMode::SingleLine);
        s.set_font_size("text-6xl").unwrap();
        s.insert_char(' ');
        let expected = StyledText::new("Hello", "text-6xl", "font-display");
        assert_eq!(s.handle(EditKey::Confirm), SessionOutcome::Committed(expected));
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut s = session(EditMode::SingleLine);
        s.set_text("Other");
        s.set_font_family("font-sans").unwrap();
        assert_eq!(s.handle(EditKey::Cancel), SessionOutcome::Closed);
        assert_eq!(s.draft(), &StyledText::title("Hello"));
    }

    #[test]
    fn test_foreign_tokens_rejected() {
        let mut s = session(EditMode::SingleLine);
        assert!(s.set_font_size("text-xs").is_err());
        assert!(s.set_font_family("font-mono").is_err());
        assert_eq!(s.draft().font_size, "text-5xl");
    }

    #[test]
    fn test_multiline_confirm_inserts_newline() {
        let mut s = session(EditMode::MultiLine);
        assert_eq!(s.handle(EditKey::Confirm), SessionOutcome::Open);
        s.insert_char('x');
        assert_eq!(s.draft().text, "Hello\nx");
        assert!(matches!(s.handle(EditKey::FocusLost), SessionOutcome::Committed(_)));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session(EditMode::SingleLine);
        let b = session(EditMode::SingleLine);
        a.backspace();
        assert_eq!(a.draft().text, "Hell");
        assert_eq!(b.draft().text, "Hello");
    }
}
