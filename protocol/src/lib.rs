use serde::{Deserialize, Serialize};
use slidesmith_common::{Infographic, Presentation, SlidePatch, StyledText};
use std::path::PathBuf;

/// Something the user asked the deck session to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    Generate { topic: String },
    Load { presentation: Presentation },
    NewPresentation,
    RenamePresentation { title: String },
    SelectSlide { index: usize },
    UpdateSlide { index: usize, patch: SlidePatch },
    AddSlide,
    DeleteSlide { index: usize },
    ReorderSlides { from: usize, to: usize },
    AddContentItem { slide_index: usize },
    DeleteContentItem { slide_index: usize, item_index: usize },
    UpdateContentItem {
        slide_index: usize,
        item_index: usize,
        value: StyledText,
    },
    UpdateInfographic {
        slide_index: usize,
        infographic: Infographic,
    },
    RegenerateImage { slide_id: String },
    Export { out_dir: PathBuf },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    GenerationStarted { topic: String },
    /// A new deck replaced the current one (generation finished or a file was loaded).
    PresentationReady { title: String, slides: usize },
    PresentationCleared,
    DocumentChanged,
    SelectionChanged { index: usize },
    ImageRegenerationStarted { slide_id: String },
    ImageRegenerated { slide_id: String },
    ExportStarted,
    ExportComplete { path: PathBuf },
    /// User-facing message for a rejected operation.
    Notice { message: String },
    Error { message: String },
    ShutdownComplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub op: Op,
}

impl Submission {
    pub fn new(op: Op) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            op,
        }
    }
}
