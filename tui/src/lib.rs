//! Terminal front end: the deck editor and a read-only preview.

pub mod app;
pub mod interactive;
pub mod preview;
pub mod slide_view;
pub mod ui;
pub mod widgets;

use anyhow::Result;
use slidesmith_common::Presentation;

pub use app::App;
pub use interactive::run_interactive;
pub use preview::SlidePreview;

pub async fn run_preview(presentation: Presentation) -> Result<()> {
    let mut preview = SlidePreview::new(presentation);
    preview.run().await
}
