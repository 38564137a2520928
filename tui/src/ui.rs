use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use slidesmith_common::{size_label, Presentation};
use slidesmith_core::edit_session::{EditMode, EditSession};

use crate::app::{App, ChartColumn, ChartEditor, Mode, EXAMPLE_TOPICS};
use crate::slide_view::SlideView;
use crate::widgets::StatusBar;

const SIDEBAR_WIDTH: u16 = 28;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    match (app.mode(), app.session().presentation()) {
        (Mode::Topic, _) | (_, None) => draw_topic(f, app, chunks[1]),
        (_, Some(deck)) => draw_deck(f, app, &deck, chunks[1]),
    }
    draw_status(f, app, chunks[2]);

    if let Mode::Chart(editor) = app.mode() {
        draw_chart_editor(f, editor, f.area());
    }
    if let Mode::RenameDeck(session) = app.mode() {
        draw_rename(f, session, f.area());
    }
    if app.session().is_generating() {
        draw_busy(f, "Generating your presentation...", f.area());
    } else if app.session().is_exporting() {
        draw_busy(f, "Exporting your presentation...", f.area());
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " slidesmith ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(deck) = app.session().presentation() {
        spans.push(Span::raw(format!("  {}", deck.title)));
    }
    if let Some(user) = app.user() {
        spans.push(Span::styled(
            format!("  [{} <{}>]", user.name, user.email),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_topic(f: &mut Frame, app: &App, area: Rect) {
    let area = centered(area, 70, 14);
    let mut lines = vec![
        Line::styled(
            "What would you like to present?",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(format!("{}▏", app.topic()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::styled("Try one of these (Tab):", Style::default().fg(Color::DarkGray)),
    ];
    for (i, topic) in EXAMPLE_TOPICS.iter().enumerate() {
        let style = if app.example() == Some(i) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::styled(format!("  • {topic}"), style));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("New presentation").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_deck(f: &mut Frame, app: &App, deck: &Presentation, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);
    let current = app.session().store().map_or(0, |s| s.current_index());

    let items: Vec<ListItem> = deck
        .slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let marker = if slide.infographic().is_some() { "▤" } else { " " };
            ListItem::new(format!("{:>2}. {marker} {}", i + 1, slide.title.text))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(current));
    let list = List::new(items)
        .block(Block::default().title("Slides").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let Some(slide) = deck.slides.get(current) else {
        return;
    };
    let mut view = SlideView::new(slide);
    view.regenerating = app.session().is_regenerating(&slide.id);
    match app.mode() {
        Mode::Browse => view.focus = Some(app.focus()),
        Mode::EditText { field, session } => view.editing = Some((*field, session)),
        _ => {}
    }

    let main = if let Mode::EditText { session, .. } = app.mode() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(chunks[1]);
        draw_toolbar(f, session, split[0]);
        split[1]
    } else {
        chunks[1]
    };

    let title = format!(
        "Slide {}/{} ({})",
        current + 1,
        deck.len(),
        slide.slide_type().as_str()
    );
    let paragraph = Paragraph::new(view.lines(main.width.saturating_sub(2)))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, main);
}

/// Size and font pickers for the field being edited.
fn draw_toolbar(f: &mut Frame, session: &EditSession, area: Rect) {
    let draft = session.draft();
    let options = session.options();
    let mut spans = vec![Span::raw("Size: ")];
    for size in &options.sizes {
        spans.push(option_span(&size_label(size), *size == draft.font_size));
    }
    spans.push(Span::raw("   Font: "));
    for family in &options.families {
        spans.push(option_span(&family.label, family.token == draft.font_family));
    }
    let block = Block::default().title("Style").borders(Borders::ALL);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn option_span(label: &str, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(
            format!("[{label}] "),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )
    } else {
        Span::raw(format!(" {label}  "))
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let (mode, hints) = match app.mode() {
        Mode::Topic => ("TOPIC", "Enter generate · Tab example · Ctrl+Q quit"),
        Mode::Browse => (
            "BROWSE",
            "j/k select · J/K move · Tab field · e edit · a/d slide · b/x bullet · c chart · i image · E export · s save · r rename · n new · L log out · q quit",
        ),
        Mode::EditText { session, .. } if session.mode() == EditMode::MultiLine => (
            "EDIT",
            "F2 size · F3 font · Enter newline · Tab save · Esc cancel",
        ),
        Mode::EditText { .. } | Mode::RenameDeck(_) => {
            ("EDIT", "F2 size · F3 font · Enter save · Esc cancel")
        }
        Mode::Chart(_) => (
            "CHART",
            "↑/↓ row · Tab column · Ctrl+T type · Ctrl+N add · Ctrl+D delete · Enter save · Esc discard",
        ),
    };
    let (status, is_error) = match app.status() {
        Some(status) => (status.message.as_str(), status.is_error),
        None if app.session().is_exporting() => ("Exporting...", false),
        None => ("Ready", false),
    };
    f.render_widget(StatusBar::new(mode, status, hints).error(is_error), area);
}

fn draw_chart_editor(f: &mut Frame, editor: &ChartEditor, area: Rect) {
    let area = centered(area, 60, 16);
    f.render_widget(Clear, area);
    let chart = editor.draft.infographic();
    let mut lines = vec![
        Line::from(format!("Type: {} (Ctrl+T)", chart.kind.as_str())),
        Line::from(""),
    ];
    if chart.data.is_empty() {
        lines.push(Line::styled("(no data, Ctrl+N to add)", Style::default().fg(Color::DarkGray)));
    }
    for (i, point) in chart.data.iter().enumerate() {
        let selected = i == editor.row;
        let cell = |column: ChartColumn, text: String| {
            if selected && editor.column == column {
                Span::styled(
                    format!("{}▏", editor.input),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                )
            } else {
                Span::raw(text)
            }
        };
        lines.push(Line::from(vec![
            Span::raw(if selected { "> " } else { "  " }),
            cell(ChartColumn::Label, format!("{:<24}", point.label)),
            Span::raw("  "),
            cell(ChartColumn::Value, point.value.to_string()),
        ]));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Edit chart").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_rename(f: &mut Frame, session: &EditSession, area: Rect) {
    let area = centered(area, 60, 3);
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(format!("{}▏", session.draft().text))
        .block(Block::default().title("Presentation title").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_busy(f: &mut Frame, message: &str, area: Rect) {
    let area = centered(area, 44, 3);
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use slidesmith_core::DeckSession;
    use slidesmith_genai::{fallback_presentation, ImageGenerator, PresentationGenerator};
    use slidesmith_protocol::Op;
    use std::sync::Arc;

    struct Fallback;

    #[async_trait]
    impl PresentationGenerator for Fallback {
        async fn generate_presentation(&self, _topic: &str) -> Presentation {
            fallback_presentation()
        }
    }

    #[async_trait]
    impl ImageGenerator for Fallback {
        async fn generate_image(&self, _prompt: &str) -> String {
            String::new()
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let fallback = Arc::new(Fallback);
        App::new(DeckSession::new(fallback.clone(), fallback), None, std::env::temp_dir())
    }

    #[test]
    fn test_topic_screen_lists_examples() {
        let text = screen(&app());
        assert!(text.contains("What would you like to present?"));
        assert!(text.contains("Sustainable urban planning"));
    }

    #[tokio::test]
    async fn test_export_draws_busy_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.submit(Op::Load {
            presentation: fallback_presentation(),
        });
        assert!(!screen(&app).contains("Exporting your presentation..."));

        app.submit(Op::Export {
            out_dir: dir.path().to_path_buf(),
        });
        assert!(app.session().is_busy());
        assert!(screen(&app).contains("Exporting your presentation..."));
    }

    #[tokio::test]
    async fn test_deck_screen_shows_sidebar_and_chart() {
        let mut app = app();
        app.submit(Op::Load {
            presentation: fallback_presentation(),
        });
        app.submit(Op::SelectSlide { index: 1 });
        let text = screen(&app);
        assert!(text.contains("Slide 2/5 (infographic)"));
        assert!(text.contains(" 1.   The Future"));
        assert!(text.contains("■ Fossil Fuels (79%)"));
    }
}
