use slidesmith_common::{Infographic, Presentation, Slide, SlidePatch, StyledText};
use std::sync::Arc;

use crate::editor::{self, EditResult};
use crate::error::EditError;

/// Owns the current deck and which slide is selected. Every edit swaps in a
/// freshly built deck, so a snapshot taken with [`DocumentStore::snapshot`]
/// never changes under its holder.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    document: Arc<Presentation>,
    current: usize,
}

impl DocumentStore {
    /// Returns `None` for a deck with no slides.
    pub fn new(presentation: Presentation) -> Option<Self> {
        if presentation.slides.is_empty() {
            return None;
        }
        Some(Self {
            document: Arc::new(presentation),
            current: 0,
        })
    }

    pub fn snapshot(&self) -> Arc<Presentation> {
        Arc::clone(&self.document)
    }

    pub fn presentation(&self) -> &Presentation {
        &self.document
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        // `current` is kept in range by every mutation below.
        &self.document.slides[self.current.min(self.document.slides.len() - 1)]
    }

    pub fn select(&mut self, index: usize) -> usize {
        self.current = index.min(self.document.slides.len() - 1);
        self.current
    }

    fn commit(&mut self, result: EditResult) -> Result<(), EditError> {
        match result {
            Ok(next) => {
                self.document = Arc::new(next);
                self.current = self.current.min(self.document.slides.len() - 1);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("edit rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn update_slide(&mut self, index: usize, patch: &SlidePatch) -> Result<(), EditError> {
        self.commit(editor::update_slide(&self.document, index, patch))
    }

    pub fn update_slide_by_id(&mut self, slide_id: &str, patch: &SlidePatch) -> Result<(), EditError> {
        self.commit(editor::update_slide_by_id(&self.document, slide_id, patch))
    }

    /// Append a slide and select it.
    pub fn add_slide(&mut self) -> usize {
        self.document = Arc::new(editor::add_slide(&self.document));
        self.current = self.document.slides.len() - 1;
        self.current
    }

    /// Delete a slide and select the one before it.
    pub fn delete_slide(&mut self, index: usize) -> Result<usize, EditError> {
        self.commit(editor::delete_slide(&self.document, index))?;
        self.current = index.saturating_sub(1).min(self.document.slides.len() - 1);
        Ok(self.current)
    }

    /// Move a slide; the selection follows the selected slide's id.
    pub fn reorder_slides(&mut self, from: usize, to: usize) -> Result<usize, EditError> {
        let selected_id = self.current_slide().id.clone();
        self.commit(editor::reorder_slides(&self.document, from, to))?;
        if let Some(index) = self.document.position_of(&selected_id) {
            self.current = index;
        }
        Ok(self.current)
    }

    pub fn add_content_item(&mut self, slide_index: usize) -> Result<(), EditError> {
        self.commit(editor::add_content_item(&self.document, slide_index))
    }

    pub fn delete_content_item(&mut self, slide_index: usize, item_index: usize) -> Result<(), EditError> {
        self.commit(editor::delete_content_item(
            &self.document,
            slide_index,
            item_index,
        ))
    }

    pub fn update_content_item(
        &mut self,
        slide_index: usize,
        item_index: usize,
        value: StyledText,
    ) -> Result<(), EditError> {
        self.commit(editor::update_content_item(
            &self.document,
            slide_index,
            item_index,
            value,
        ))
    }

    pub fn update_infographic(
        &mut self,
        slide_index: usize,
        infographic: Infographic,
    ) -> Result<(), EditError> {
        self.commit(editor::update_infographic(
            &self.document,
            slide_index,
            infographic,
        ))
    }

    pub fn rename(&mut self, title: &str) {
        self.document = Arc::new(editor::rename_presentation(&self.document, title));
    }
}
