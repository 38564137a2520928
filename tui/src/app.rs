use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use slidesmith_common::{Slide, SlidePatch, StyleOptions, StyledText};
use slidesmith_core::auth::{User, UserStore};
use slidesmith_core::deck_file::write_deck;
use slidesmith_core::edit_session::{EditKey, EditMode, EditSession, SessionOutcome};
use slidesmith_core::export::export_file_name;
use slidesmith_core::infographic_draft::InfographicDraft;
use slidesmith_core::DeckSession;
use slidesmith_protocol::{Event, Op, Submission};
use std::path::PathBuf;

use crate::slide_view::Field;

pub const EXAMPLE_TOPICS: [&str; 4] = [
    "The history of space exploration",
    "Introduction to quantum computing",
    "Sustainable urban planning",
    "The art of storytelling in marketing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartColumn {
    Label,
    Value,
}

/// The infographic editor modal. Edits stay in the draft until committed.
pub struct ChartEditor {
    pub draft: InfographicDraft,
    pub row: usize,
    pub column: ChartColumn,
    pub input: String,
}

impl ChartEditor {
    fn open(draft: InfographicDraft) -> Self {
        let mut editor = Self {
            draft,
            row: 0,
            column: ChartColumn::Label,
            input: String::new(),
        };
        editor.load_input();
        editor
    }

    fn load_input(&mut self) {
        self.input = match self.draft.infographic().data.get(self.row) {
            Some(point) => match self.column {
                ChartColumn::Label => point.label.clone(),
                ChartColumn::Value => point.value.to_string(),
            },
            None => String::new(),
        };
    }

    fn store_input(&mut self) {
        if self.row >= self.draft.infographic().data.len() {
            return;
        }
        match self.column {
            ChartColumn::Label => self.draft.set_label(self.row, self.input.clone()),
            ChartColumn::Value => self.draft.set_value(self.row, &self.input),
        }
    }

    fn move_row(&mut self, down: bool) {
        let rows = self.draft.infographic().data.len();
        if rows == 0 {
            return;
        }
        self.row = if down {
            (self.row + 1).min(rows - 1)
        } else {
            self.row.saturating_sub(1)
        };
        self.load_input();
    }
}

pub enum Mode {
    /// Topic prompt shown when no deck is open.
    Topic,
    Browse,
    EditText { field: Field, session: EditSession },
    RenameDeck(EditSession),
    Chart(ChartEditor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Save,
    Logout,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

pub struct App {
    session: DeckSession,
    user: Option<User>,
    users: Option<UserStore>,
    mode: Mode,
    focus: Field,
    topic: String,
    example: Option<usize>,
    status: Option<Status>,
    export_dir: PathBuf,
    save_path: Option<PathBuf>,
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Feed a key to an open edit session. Returns the value to apply once
/// the session commits a change.
fn edit_key(session: &mut EditSession, key: KeyEvent) -> Option<StyledText> {
    let outcome = match key.code {
        KeyCode::Enter => session.handle(EditKey::Confirm),
        KeyCode::Esc => session.handle(EditKey::Cancel),
        KeyCode::Tab => session.handle(EditKey::FocusLost),
        KeyCode::F(2) => {
            session.cycle_font_size();
            SessionOutcome::Open
        }
        KeyCode::F(3) => {
            session.cycle_font_family();
            SessionOutcome::Open
        }
        KeyCode::Backspace => {
            session.backspace();
            SessionOutcome::Open
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.insert_char(c);
            SessionOutcome::Open
        }
        _ => SessionOutcome::Open,
    };
    match outcome {
        SessionOutcome::Committed(value) => Some(value),
        SessionOutcome::Open | SessionOutcome::Closed => None,
    }
}

/// Whether the session stays open after `key`.
fn editing_open(session: &EditSession, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => false,
        KeyCode::Enter => session.mode() == EditMode::MultiLine,
        _ => true,
    }
}

impl App {
    pub fn new(session: DeckSession, user: Option<User>, export_dir: PathBuf) -> Self {
        let mode = if session.store().is_some() {
            Mode::Browse
        } else {
            Mode::Topic
        };
        Self {
            session,
            user,
            users: None,
            mode,
            focus: Field::Title,
            topic: String::new(),
            example: None,
            status: None,
            export_dir,
            save_path: None,
        }
    }

    /// File `s` writes to. Defaults to a file named after the deck in the
    /// export directory.
    pub fn with_save_path(mut self, path: Option<PathBuf>) -> Self {
        self.save_path = path;
        self
    }

    /// Where `L` signs the user out.
    pub fn with_user_store(mut self, users: UserStore) -> Self {
        self.users = Some(users);
        self
    }

    pub fn session(&self) -> &DeckSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DeckSession {
        &mut self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn example(&self) -> Option<usize> {
        self.example
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status = Some(Status {
            message: message.into(),
            is_error,
        });
    }

    fn current(&self) -> Option<(usize, Slide)> {
        let store = self.session.store()?;
        Some((store.current_index(), store.current_slide().clone()))
    }

    pub fn submit(&mut self, op: Op) {
        for event in self.session.submit_with_id(Submission::new(op)) {
            self.handle_session_event(event);
        }
    }

    /// Apply every background result that has already finished.
    pub fn drain_session_events(&mut self) {
        while let Some(event) = self.session.try_next_event() {
            self.handle_session_event(event);
        }
    }

    pub fn handle_session_event(&mut self, event: Event) {
        match event {
            Event::GenerationStarted { topic } => {
                self.set_status(format!("Generating a presentation about {topic}..."), false);
            }
            Event::PresentationReady { title, slides } => {
                self.mode = Mode::Browse;
                self.focus = Field::Title;
                self.set_status(format!("{title} ({slides} slides)"), false);
            }
            Event::PresentationCleared => {
                self.mode = Mode::Topic;
                self.topic.clear();
                self.example = None;
                self.set_status("Start a new presentation", false);
            }
            Event::DocumentChanged => self.clamp_focus(),
            Event::SelectionChanged { .. } => self.focus = Field::Title,
            Event::ImageRegenerationStarted { .. } => {
                self.set_status("Generating a new image...", false);
            }
            Event::ImageRegenerated { .. } => self.set_status("Image updated", false),
            Event::ExportStarted => self.set_status("Exporting...", false),
            Event::ExportComplete { path } => {
                self.set_status(format!("Exported to {}", path.display()), false);
            }
            Event::Notice { message } => self.set_status(message, false),
            Event::Error { message } => self.set_status(message, true),
            Event::ShutdownComplete => {}
        }
    }

    fn clamp_focus(&mut self) {
        if let Some((_, slide)) = self.current() {
            if !Field::all(&slide).contains(&self.focus) {
                self.focus = match slide.content() {
                    Some(content) if !content.is_empty() => Field::Bullet(content.len() - 1),
                    _ => Field::Title,
                };
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if is_ctrl(&key, 'q') || is_ctrl(&key, 'c') {
            return Action::Quit;
        }
        if self.session.is_busy() {
            return Action::None;
        }
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Topic => {
                self.mode = Mode::Topic;
                self.topic_key(key);
                Action::None
            }
            Mode::Browse => self.browse_key(key),
            Mode::EditText { field, mut session } => {
                if let Some(value) = edit_key(&mut session, key) {
                    self.apply_field(field, value);
                } else if editing_open(&session, key) {
                    self.mode = Mode::EditText { field, session };
                }
                Action::None
            }
            Mode::RenameDeck(mut session) => {
                if let Some(value) = edit_key(&mut session, key) {
                    self.submit(Op::RenamePresentation { title: value.text });
                } else if editing_open(&session, key) {
                    self.mode = Mode::RenameDeck(session);
                }
                Action::None
            }
            Mode::Chart(editor) => {
                self.chart_key(editor, key);
                Action::None
            }
        }
    }

    fn topic_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let topic = self.topic.clone();
                self.submit(Op::Generate { topic });
            }
            KeyCode::Tab => {
                let next = self.example.map_or(0, |i| (i + 1) % EXAMPLE_TOPICS.len());
                self.example = Some(next);
                self.topic = EXAMPLE_TOPICS[next].to_string();
            }
            KeyCode::Backspace => {
                self.topic.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.topic.push(c);
            }
            _ => {}
        }
    }

    fn browse_key(&mut self, key: KeyEvent) -> Action {
        let Some((index, slide)) = self.current() else {
            self.mode = Mode::Topic;
            return Action::None;
        };
        let len = self.session.store().map_or(0, |s| s.presentation().len());
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('s') => return Action::Save,
            KeyCode::Char('L') => return Action::Logout,
            KeyCode::Up | KeyCode::Char('k') if index > 0 => {
                self.submit(Op::SelectSlide { index: index - 1 });
            }
            KeyCode::Down | KeyCode::Char('j') if index + 1 < len => {
                self.submit(Op::SelectSlide { index: index + 1 });
            }
            KeyCode::Char('K') if index > 0 => {
                self.submit(Op::ReorderSlides {
                    from: index,
                    to: index - 1,
                });
            }
            KeyCode::Char('J') if index + 1 < len => {
                self.submit(Op::ReorderSlides {
                    from: index,
                    to: index + 1,
                });
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let fields = Field::all(&slide);
                let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
                let next = if key.code == KeyCode::Tab {
                    (at + 1) % fields.len()
                } else {
                    (at + fields.len() - 1) % fields.len()
                };
                self.focus = fields[next];
            }
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(&slide),
            KeyCode::Char('r') => {
                let title = self
                    .session
                    .store()
                    .map(|s| s.presentation().title.clone())
                    .unwrap_or_default();
                self.mode = Mode::RenameDeck(EditSession::begin(
                    &StyledText::title(title),
                    StyleOptions::for_title(),
                    EditMode::SingleLine,
                ));
                return Action::None;
            }
            KeyCode::Char('a') => self.submit(Op::AddSlide),
            KeyCode::Char('d') => self.submit(Op::DeleteSlide { index }),
            KeyCode::Char('b') => {
                self.submit(Op::AddContentItem { slide_index: index });
                if let Some(content) = self.current().and_then(|(_, s)| s.content().map(<[_]>::len)) {
                    self.focus = Field::Bullet(content.saturating_sub(1));
                }
            }
            KeyCode::Char('x') => match self.focus {
                Field::Bullet(item_index) => self.submit(Op::DeleteContentItem {
                    slide_index: index,
                    item_index,
                }),
                _ => self.set_status("Select a bullet point to delete", false),
            },
            KeyCode::Char('c') => match InfographicDraft::open(&slide) {
                Some(draft) => {
                    self.mode = Mode::Chart(ChartEditor::open(draft));
                    return Action::None;
                }
                None => self.set_status("This slide has no chart", false),
            },
            KeyCode::Char('i') => self.submit(Op::RegenerateImage { slide_id: slide.id }),
            KeyCode::Char('E') => {
                let out_dir = self.export_dir.clone();
                self.submit(Op::Export { out_dir });
            }
            KeyCode::Char('n') => self.submit(Op::NewPresentation),
            _ => {}
        }
        if matches!(self.mode, Mode::Browse) && self.session.store().is_none() {
            self.mode = Mode::Topic;
        }
        Action::None
    }

    fn begin_edit(&mut self, slide: &Slide) {
        let (value, options, mode) = match self.focus {
            Field::Title => (slide.title.clone(), StyleOptions::for_title(), EditMode::SingleLine),
            Field::Bullet(i) => match slide.content().and_then(|c| c.get(i)) {
                Some(item) => (item.clone(), StyleOptions::for_bullet(), EditMode::MultiLine),
                None => return,
            },
            Field::Prompt => (
                StyledText::prompt(slide.image_prompt.clone()),
                StyleOptions::for_prompt(),
                EditMode::SingleLine,
            ),
        };
        self.mode = Mode::EditText {
            field: self.focus,
            session: EditSession::begin(&value, options, mode),
        };
    }

    fn apply_field(&mut self, field: Field, value: StyledText) {
        let Some((index, _)) = self.current() else {
            return;
        };
        let op = match field {
            Field::Title => Op::UpdateSlide {
                index,
                patch: SlidePatch::title(value),
            },
            Field::Bullet(item_index) => Op::UpdateContentItem {
                slide_index: index,
                item_index,
                value,
            },
            Field::Prompt => Op::UpdateSlide {
                index,
                patch: SlidePatch::image_prompt(value.text),
            },
        };
        self.submit(op);
    }

    fn chart_key(&mut self, mut editor: ChartEditor, key: KeyEvent) {
        if is_ctrl(&key, 't') {
            let kind = editor.draft.infographic().kind.toggled();
            editor.draft.set_kind(kind);
        } else if is_ctrl(&key, 'n') {
            editor.row = editor.draft.add_point();
            editor.column = ChartColumn::Label;
            editor.load_input();
        } else if is_ctrl(&key, 'd') {
            editor.draft.remove_point(editor.row);
            editor.row = editor
                .row
                .min(editor.draft.infographic().data.len().saturating_sub(1));
            editor.load_input();
        } else {
            match key.code {
                KeyCode::Esc => {
                    editor.draft.discard();
                    self.set_status("Chart changes discarded", false);
                    return;
                }
                KeyCode::Enter => {
                    for event in self.session.commit_infographic(editor.draft) {
                        self.handle_session_event(event);
                    }
                    return;
                }
                KeyCode::Up => editor.move_row(false),
                KeyCode::Down => editor.move_row(true),
                KeyCode::Tab | KeyCode::BackTab => {
                    editor.column = match editor.column {
                        ChartColumn::Label => ChartColumn::Value,
                        ChartColumn::Value => ChartColumn::Label,
                    };
                    editor.load_input();
                }
                KeyCode::Backspace => {
                    editor.input.pop();
                    editor.store_input();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    editor.input.push(c);
                    editor.store_input();
                }
                _ => {}
            }
        }
        self.mode = Mode::Chart(editor);
    }

    /// Write the deck as JSON to the save path.
    pub async fn save(&mut self) -> Result<PathBuf> {
        let Some(presentation) = self.session.presentation() else {
            anyhow::bail!("No presentation is open.");
        };
        let path = match &self.save_path {
            Some(path) => path.clone(),
            None => self
                .export_dir
                .join(export_file_name(&presentation.title, "json")),
        };
        write_deck(&path, &presentation).await?;
        self.save_path = Some(path.clone());
        self.set_status(format!("Saved to {}", path.display()), false);
        Ok(path)
    }

    /// End the user's session and discard the open deck.
    pub fn log_out(&mut self) -> slidesmith_core::error::Result<()> {
        if let Some(users) = &self.users {
            users.log_out()?;
        }
        if let Some(user) = self.user.take() {
            tracing::info!("{} signed out", user.email);
        }
        self.submit(Op::NewPresentation);
        Ok(())
    }

    pub fn report_error(&mut self, error: &anyhow::Error) {
        tracing::error!("{error:#}");
        self.set_status(format!("{error:#}"), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use slidesmith_common::{ChartKind, Presentation};
    use slidesmith_genai::{
        fallback_presentation, ImageGenerator, PresentationGenerator,
    };
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
        async fn generate_image(&self, prompt: &str) -> String {
            format!("https://img.test/{}", prompt.len())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn loaded_app() -> App {
        let fallback = Arc::new(Fallback);
        let session = DeckSession::new(fallback.clone(), fallback);
        let mut app = App::new(session, None, std::env::temp_dir());
        app.submit(Op::Load {
            presentation: fallback_presentation(),
        });
        app
    }

    fn deck(app: &App) -> Arc<Presentation> {
        app.session().presentation().unwrap()
    }

    #[tokio::test]
    async fn test_topic_prompt_generates() {
        let fallback = Arc::new(Fallback);
        let mut app = App::new(DeckSession::new(fallback.clone(), fallback), None, std::env::temp_dir());
        assert!(matches!(app.mode(), Mode::Topic));

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.topic(), EXAMPLE_TOPICS[0]);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session().is_generating());
        // Keys other than quit are ignored while generating.
        assert_eq!(app.handle_key(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(app.handle_key(ctrl('q')), Action::Quit);

        let event = app.session_mut().next_event().await.unwrap();
        app.handle_session_event(event);
        assert!(matches!(app.mode(), Mode::Browse));
        assert_eq!(deck(&app).len(), 5);
    }

    #[tokio::test]
    async fn test_edit_title_with_style_cycle() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::EditText { field: Field::Title, .. }));
        type_text(&mut app, "!");
        app.handle_key(key(KeyCode::F(2)));
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Browse));

        let title = &deck(&app).slides[0].title;
        assert_eq!(title.text, "The Future of Renewable Energy!");
        assert_eq!(title.font_size, "text-6xl");
    }

    #[tokio::test]
    async fn test_escape_leaves_deck_unchanged() {
        let mut app = loaded_app();
        let before = deck(&app);
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "junk");
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.mode(), Mode::Browse));
        assert_eq!(*deck(&app), *before);
    }

    #[tokio::test]
    async fn test_bullet_enter_inserts_newline_until_tab() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Field::Bullet(0));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "more");
        assert!(matches!(app.mode(), Mode::EditText { .. }));
        app.handle_key(key(KeyCode::Tab));
        let first = deck(&app).slides[0].content().unwrap()[0].text.clone();
        assert!(first.ends_with("\nmore"));
    }

    #[tokio::test]
    async fn test_slide_management_keys() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('K')));
        assert_eq!(deck(&app).slide_ids(), vec!["2", "1", "3", "4", "5"]);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(deck(&app).len(), 6);
        assert_eq!(app.session().store().unwrap().current_index(), 5);

        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.focus(), Field::Bullet(1));
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.focus(), Field::Bullet(0));
        assert_eq!(deck(&app).slides[5].content().unwrap().len(), 1);

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(deck(&app).len(), 5);
        assert_eq!(app.session().store().unwrap().current_index(), 4);
    }

    #[tokio::test]
    async fn test_chart_editor_commits_or_discards() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('c')));
        assert!(matches!(app.mode(), Mode::Chart(_)));
        app.handle_key(ctrl('t'));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "50");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(deck(&app).slides[1].infographic().unwrap().kind, ChartKind::Pie);

        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(ctrl('t'));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "50");
        app.handle_key(key(KeyCode::Enter));
        let chart = deck(&app).slides[1].infographic().unwrap().clone();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.data[0].value, 50.0);
    }

    #[tokio::test]
    async fn test_last_slide_delete_shows_notice() {
        let mut app = loaded_app();
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Char('d')));
        }
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(deck(&app).len(), 1);
        assert_eq!(app.status().unwrap().message, "Cannot delete the last slide.");
    }

    #[tokio::test]
    async fn test_save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let mut app = loaded_app().with_save_path(Some(path.clone()));
        assert_eq!(app.handle_key(key(KeyCode::Char('s'))), Action::Save);
        app.save().await.unwrap();
        let saved = Presentation::from_json(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(saved, *deck(&app));
    }

    #[tokio::test]
    async fn test_finished_image_is_drained() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('i')));
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        app.drain_session_events();
        assert_eq!(app.status().unwrap().message, "Image updated");
        assert!(deck(&app).slides[0].image_url.starts_with("https://img.test/"));
        assert!(!app.session().is_regenerating("1"));
    }

    #[tokio::test]
    async fn test_logout_discards_deck() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserStore::open(dir.path()).unwrap();
        let user = users.log_in_with_profile("Ada", "ada@example.com", None).unwrap();
        let fallback = Arc::new(Fallback);
        let mut app = App::new(
            DeckSession::new(fallback.clone(), fallback),
            Some(user),
            std::env::temp_dir(),
        )
        .with_user_store(UserStore::open(dir.path()).unwrap());
        app.submit(Op::Load {
            presentation: fallback_presentation(),
        });

        assert_eq!(app.handle_key(key(KeyCode::Char('L'))), Action::Logout);
        app.log_out().unwrap();
        assert!(app.user().is_none());
        assert!(app.session().presentation().is_none());
        assert!(matches!(app.mode(), Mode::Topic));
        assert!(users.current_user().unwrap().is_none());
    }
}
