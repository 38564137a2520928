use slidesmith_common::{Presentation, StyleOptions};
use slidesmith_core::edit_session::{EditKey, EditMode, EditSession, SessionOutcome};
use slidesmith_core::{Config, DeckSession, DocumentStore};
use slidesmith_genai::fallback_presentation;
use slidesmith_protocol::{Event, Op};

fn offline_config() -> Config {
    Config {
        api_key: None,
        ..Config::default()
    }
}

#[tokio::test]
async fn topic_without_generation_service_yields_fallback_deck() {
    let mut session = DeckSession::from_config(&offline_config()).unwrap();
    session.submit(Op::Generate {
        topic: "Quantum computing".to_string(),
    });

    let event = session.next_event().await.unwrap();
    assert_eq!(
        event,
        Event::PresentationReady {
            title: "The Future of Renewable Energy".to_string(),
            slides: 5,
        }
    );
    let deck = session.presentation().unwrap();
    assert_eq!(deck.slide_ids(), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn adding_to_three_slide_deck_selects_new_last_slide() {
    let three = Presentation::new(
        "Three",
        fallback_presentation().slides.into_iter().take(3).collect(),
    );
    let mut store = DocumentStore::new(three).unwrap();
    store.add_slide();

    assert_eq!(store.presentation().len(), 4);
    assert_eq!(store.current_index(), 3);
    assert_eq!(store.current_slide().id, store.presentation().slides[3].id);
}

#[test]
fn no_op_text_session_leaves_deck_identical() {
    let mut store = DocumentStore::new(fallback_presentation()).unwrap();
    let before = store.snapshot();
    let title = store.current_slide().title.clone();

    let mut session = EditSession::begin(&title, StyleOptions::for_title(), EditMode::SingleLine);
    session.cycle_font_size();
    session.set_font_size(&title.font_size).unwrap();
    match session.handle(EditKey::FocusLost) {
        SessionOutcome::Committed(value) => {
            store
                .update_slide(0, &slidesmith_common::SlidePatch::title(value))
                .unwrap();
        }
        SessionOutcome::Closed | SessionOutcome::Open => {}
    }
    assert_eq!(*before, *store.presentation());
}
