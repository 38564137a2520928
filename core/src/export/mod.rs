//! Deck export: one fixed-size 16:9 page per slide, rendered in deck order
//! and assembled into a single document named after the deck title.

mod html;
mod svg;

pub use html::HtmlDocumentWriter;
pub use svg::SvgPageRenderer;

use async_trait::async_trait;
use slidesmith_common::{ChartKind, Presentation, Slide, SlideBody, StyledText};
use std::path::{Path, PathBuf};

use crate::chart::{self, ChartGeometry};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
}

impl PageGeometry {
    pub const SLIDE: PageGeometry = PageGeometry {
        width: 1280,
        height: 720,
    };

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// Everything a page renderer needs to draw one slide, keyed by slide id.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSnapshot {
    pub slide_id: String,
    pub index: usize,
    pub title: StyledText,
    pub body: SnapshotBody,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotBody {
    Bullets(Vec<StyledText>),
    Chart {
        kind: ChartKind,
        geometry: ChartGeometry,
    },
}

impl SlideSnapshot {
    pub fn of(index: usize, slide: &Slide) -> Self {
        let body = match &slide.body {
            SlideBody::Content { content } => SnapshotBody::Bullets(content.clone()),
            SlideBody::Infographic { infographic } => SnapshotBody::Chart {
                kind: infographic.kind,
                geometry: chart::render(infographic),
            },
        };
        Self {
            slide_id: slide.id.clone(),
            index,
            title: slide.title.clone(),
            body,
            image_url: slide.image_url.clone(),
        }
    }
}

pub fn snapshots(presentation: &Presentation) -> Vec<SlideSnapshot> {
    presentation
        .slides
        .iter()
        .enumerate()
        .map(|(i, s)| SlideSnapshot::of(i, s))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub slide_id: String,
    pub markup: String,
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render_page(
        &self,
        snapshot: &SlideSnapshot,
        geometry: PageGeometry,
    ) -> Result<Page, ExportError>;
}

pub trait DocumentWriter: Send + Sync {
    fn extension(&self) -> &'static str;

    fn assemble(&self, title: &str, geometry: PageGeometry, pages: &[Page]) -> String;
}

/// File name for an exported deck: whitespace runs and path separators
/// become `_`; an empty title becomes `presentation`.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_gap {
                stem.push('_');
            }
            in_gap = true;
        } else {
            stem.push(if c == '/' || c == '\\' { '_' } else { c });
            in_gap = false;
        }
    }
    if stem.is_empty() {
        stem.push_str("presentation");
    }
    format!("{stem}.{extension}")
}

/// Render every slide in order, one at a time, then write the document.
pub async fn export_presentation(
    presentation: &Presentation,
    renderer: &dyn PageRenderer,
    writer: &dyn DocumentWriter,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    if presentation.slides.is_empty() {
        return Err(ExportError::Empty);
    }
    let geometry = PageGeometry::SLIDE;
    let mut pages = Vec::with_capacity(presentation.slides.len());
    for snapshot in snapshots(presentation) {
        tracing::debug!("rendering page {} ({})", snapshot.index + 1, snapshot.slide_id);
        pages.push(renderer.render_page(&snapshot, geometry).await?);
    }

    let document = writer.assemble(&presentation.title, geometry, &pages);
    tokio::fs::create_dir_all(out_dir).await?;
    let path = out_dir.join(export_file_name(&presentation.title, writer.extension()));
    tokio::fs::write(&path, document).await?;
    tracing::info!("exported {} pages to {}", pages.len(), path.display());
    Ok(path)
}
