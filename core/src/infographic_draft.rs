use slidesmith_common::{ChartKind, DataPoint, Infographic, Slide};

use crate::error::EditError;
use crate::store::DocumentStore;

pub const NEW_ENTRY_LABEL: &str = "New Entry";
pub const NEW_ENTRY_VALUE: f64 = 10.0;

/// A private copy of a slide's chart. Changes reach the deck only through
/// [`InfographicDraft::commit`]; dropping the draft discards them.
#[derive(Debug, Clone, PartialEq)]
pub struct InfographicDraft {
    slide_id: String,
    draft: Infographic,
}

impl InfographicDraft {
    /// `None` when the slide has no chart.
    pub fn open(slide: &Slide) -> Option<Self> {
        slide.infographic().map(|infographic| Self {
            slide_id: slide.id.clone(),
            draft: infographic.clone(),
        })
    }

    pub fn slide_id(&self) -> &str {
        &self.slide_id
    }

    pub fn infographic(&self) -> &Infographic {
        &self.draft
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.draft.kind = kind;
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) {
        if let Some(point) = self.draft.data.get_mut(index) {
            point.label = label.into();
        }
    }

    /// Takes raw field input; anything that does not parse as a number is 0.
    pub fn set_value(&mut self, index: usize, input: &str) {
        let value = input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        if let Some(point) = self.draft.data.get_mut(index) {
            point.value = value;
        }
    }

    pub fn add_point(&mut self) -> usize {
        self.draft
            .data
            .push(DataPoint::new(NEW_ENTRY_LABEL, NEW_ENTRY_VALUE));
        self.draft.data.len() - 1
    }

    pub fn remove_point(&mut self, index: usize) {
        if index < self.draft.data.len() {
            self.draft.data.remove(index);
        }
    }

    /// Write the draft back to its slide, wherever that slide now sits.
    pub fn commit(self, store: &mut DocumentStore) -> Result<(), EditError> {
        let index = store
            .presentation()
            .position_of(&self.slide_id)
            .ok_or(EditError::UnknownSlide { id: self.slide_id })?;
        store.update_infographic(index, self.draft)
    }

    pub fn discard(self) {
        tracing::debug!("discarded chart draft for slide {}", self.slide_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesmith_genai::fallback_presentation;

    #[test]
    fn test_open_only_on_chart_slides() {
        let deck = fallback_presentation();
        assert!(InfographicDraft::open(&deck.slides[0]).is_none());
        assert!(InfographicDraft::open(&deck.slides[1]).is_some());
    }

    #[test]
    fn test_draft_isolated_until_commit() {
        let mut store = DocumentStore::new(fallback_presentation()).unwrap();
        let mut draft = InfographicDraft::open(&store.presentation().slides[1]).unwrap();
        draft.set_kind(ChartKind::Bar);
        draft.set_value(0, "50");
        draft.add_point();

        let live = store.presentation().slides[1].infographic().unwrap();
        assert_eq!(live.kind, ChartKind::Pie);
        assert_eq!(live.data.len(), 3);

        draft.commit(&mut store).unwrap();
        let live = store.presentation().slides[1].infographic().unwrap();
        assert_eq!(live.kind, ChartKind::Bar);
        assert_eq!(live.data[0].value, 50.0);
        assert_eq!(live.data[3], DataPoint::new("New Entry", 10.0));
    }

    #[test]
    fn test_discard_leaves_deck_untouched() {
        let store = DocumentStore::new(fallback_presentation()).unwrap();
        let before = store.snapshot();
        let mut draft = InfographicDraft::open(&store.presentation().slides[3]).unwrap();
        draft.remove_point(0);
        draft.discard();
        assert_eq!(*before, *store.presentation());
    }

    #[test]
    fn test_non_numeric_value_becomes_zero() {
        let deck = fallback_presentation();
        let mut draft = InfographicDraft::open(&deck.slides[1]).unwrap();
        draft.set_value(1, "abc");
        draft.set_label(1, "Atomic");
        assert_eq!(draft.infographic().data[1], DataPoint::new("Atomic", 0.0));
    }

    #[test]
    fn test_commit_follows_reordered_slide() {
        let mut store = DocumentStore::new(fallback_presentation()).unwrap();
        let mut draft = InfographicDraft::open(&store.presentation().slides[1]).unwrap();
        draft.set_kind(ChartKind::Bar);
        store.reorder_slides(1, 4).unwrap();
        draft.commit(&mut store).unwrap();
        assert_eq!(store.presentation().slides[4].id, "2");
        assert_eq!(
            store.presentation().slides[4].infographic().unwrap().kind,
            ChartKind::Bar
        );
    }
}
