use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use slidesmith_common::{size_label, Slide, StyledText};
use slidesmith_core::chart;
use slidesmith_core::edit_session::EditSession;

use crate::widgets::chart_lines;

/// A slide field the cursor can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Bullet(usize),
    Prompt,
}

impl Field {
    /// Fields of `slide` in tab order.
    pub fn all(slide: &Slide) -> Vec<Field> {
        let mut fields = vec![Field::Title];
        if let Some(content) = slide.content() {
            fields.extend((0..content.len()).map(Field::Bullet));
        }
        fields.push(Field::Prompt);
        fields
    }
}

pub struct SlideView<'a> {
    pub slide: &'a Slide,
    pub focus: Option<Field>,
    pub editing: Option<(Field, &'a EditSession)>,
    pub regenerating: bool,
}

fn style_tag(text: &StyledText) -> String {
    format!("[{} {}]", size_label(&text.font_size), text.font_family.trim_start_matches("font-"))
}

impl<'a> SlideView<'a> {
    pub fn new(slide: &'a Slide) -> Self {
        Self {
            slide,
            focus: None,
            editing: None,
            regenerating: false,
        }
    }

    fn field_style(&self, field: Field, base: Style) -> Style {
        match (self.editing, self.focus) {
            (Some((f, _)), _) if f == field => base.fg(Color::Black).bg(Color::LightCyan),
            (None, Some(f)) if f == field => base.add_modifier(Modifier::REVERSED),
            _ => base,
        }
    }

    /// The text to show for a field: the live draft while it is being edited.
    fn shown<'b>(&'b self, field: Field, committed: &'b StyledText) -> (&'b StyledText, bool) {
        match self.editing {
            Some((f, session)) if f == field => (session.draft(), true),
            _ => (committed, false),
        }
    }

    fn text_lines(&self, field: Field, value: &StyledText, prefix: &str, base: Style) -> Vec<Line<'static>> {
        let (shown, editing) = self.shown(field, value);
        let style = self.field_style(field, base);
        let mut text = if shown.text.is_empty() && !editing {
            "Click to edit".to_string()
        } else {
            shown.text.clone()
        };
        if editing {
            text.push('▏');
        }
        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, part) in text.split('\n').enumerate() {
            let lead = if i == 0 { prefix.to_string() } else { " ".repeat(prefix.chars().count()) };
            lines.push(Line::from(vec![Span::raw(lead), Span::styled(part.to_string(), style)]));
        }
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(
                format!("  {}", style_tag(shown)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let slide = self.slide;
        let mut lines = self.text_lines(
            Field::Title,
            &slide.title,
            "",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
        lines.push(Line::from(""));

        if let Some(content) = slide.content() {
            if content.is_empty() {
                lines.push(Line::styled("(no bullet points)", Style::default().fg(Color::DarkGray)));
            }
            for (i, item) in content.iter().enumerate() {
                lines.extend(self.text_lines(Field::Bullet(i), item, "• ", Style::default()));
            }
        }
        if let Some(infographic) = slide.infographic() {
            lines.push(Line::styled(
                format!("{} chart", infographic.kind.as_str()),
                Style::default().fg(Color::DarkGray),
            ));
            lines.extend(chart_lines(&chart::render(infographic), width.saturating_sub(4)));
        }

        lines.push(Line::from(""));
        let prompt = StyledText::prompt(slide.image_prompt.clone());
        lines.extend(self.text_lines(
            Field::Prompt,
            &prompt,
            "Image prompt: ",
            Style::default().fg(Color::Gray),
        ));
        let image = if self.regenerating {
            "Image: (regenerating…)".to_string()
        } else if slide.image_url.starts_with("data:") {
            "Image: (generated, embedded)".to_string()
        } else {
            format!("Image: {}", slide.image_url)
        };
        lines.push(Line::styled(image, Style::default().fg(Color::DarkGray)));
        lines
    }
}
