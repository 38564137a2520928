use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use slidesmith_common::Presentation;
use std::io;

use crate::slide_view::SlideView;

/// Read-only slideshow over a deck.
pub struct SlidePreview {
    presentation: Presentation,
    current_slide: usize,
    running: bool,
}

impl SlidePreview {
    pub fn new(presentation: Presentation) -> Self {
        Self {
            presentation,
            current_slide: 0,
            running: true,
        }
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        while self.running {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.previous_slide();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.next_slide();
            }
            KeyCode::Home => self.current_slide = 0,
            KeyCode::End => self.current_slide = self.presentation.len().saturating_sub(1),
            _ => {}
        }
    }

    fn draw(&self, f: &mut Frame) {
        let size = f.area();

        let title = format!(
            "{} ({}/{})",
            self.presentation.title,
            self.current_slide + 1,
            self.presentation.len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);

        let lines = match self.presentation.slides.get(self.current_slide) {
            Some(slide) => SlideView::new(slide).lines(size.width.saturating_sub(2)),
            None => vec![Line::from("No slide content")],
        };
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

        f.render_widget(paragraph, size);
    }

    fn next_slide(&mut self) {
        if self.current_slide < self.presentation.len().saturating_sub(1) {
            self.current_slide += 1;
        }
    }

    fn previous_slide(&mut self) {
        if self.current_slide > 0 {
            self.current_slide -= 1;
        }
    }
}
