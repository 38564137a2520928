//! Slide edit operations. Every function borrows the current deck and
//! returns a new one; the argument is never modified.

use slidesmith_common::{
    new_slide_id, Infographic, Presentation, Slide, SlideBody, SlidePatch, StyledText,
};
use slidesmith_genai::placeholder_image_url;

use crate::error::EditError;

pub type EditResult = std::result::Result<Presentation, EditError>;

pub const NEW_SLIDE_TITLE: &str = "New Slide Title";
pub const NEW_SLIDE_BULLET: &str = "Add your content here.";
pub const NEW_SLIDE_PROMPT: &str = "abstract background";
pub const NEW_BULLET: &str = "New bullet point";

fn check_slide(p: &Presentation, index: usize) -> Result<&Slide, EditError> {
    p.slides.get(index).ok_or(EditError::SlideOutOfRange {
        index,
        len: p.slides.len(),
    })
}

fn with_slide(p: &Presentation, index: usize, slide: Slide) -> Presentation {
    let mut slides = p.slides.clone();
    slides[index] = slide;
    Presentation {
        title: p.title.clone(),
        slides,
    }
}

fn content_of(p: &Presentation, index: usize) -> Result<&[StyledText], EditError> {
    check_slide(p, index)?
        .content()
        .ok_or(EditError::NotAContentSlide { index })
}

fn with_content(p: &Presentation, index: usize, content: Vec<StyledText>) -> Presentation {
    let slide = SlidePatch::body(SlideBody::Content { content }).merged_into(&p.slides[index]);
    with_slide(p, index, slide)
}

/// Shallow-merge `patch` into the slide at `index`.
pub fn update_slide(p: &Presentation, index: usize, patch: &SlidePatch) -> EditResult {
    let slide = patch.merged_into(check_slide(p, index)?);
    Ok(with_slide(p, index, slide))
}

pub fn update_slide_by_id(p: &Presentation, slide_id: &str, patch: &SlidePatch) -> EditResult {
    let index = p.position_of(slide_id).ok_or_else(|| EditError::UnknownSlide {
        id: slide_id.to_string(),
    })?;
    update_slide(p, index, patch)
}

pub fn new_slide() -> Slide {
    let id = new_slide_id();
    Slide {
        image_url: placeholder_image_url(&id),
        id,
        title: StyledText::title(NEW_SLIDE_TITLE),
        body: SlideBody::Content {
            content: vec![StyledText::bullet(NEW_SLIDE_BULLET)],
        },
        image_prompt: NEW_SLIDE_PROMPT.to_string(),
    }
}

/// Append a fresh placeholder slide. The new slide is last.
pub fn add_slide(p: &Presentation) -> Presentation {
    let mut slides = p.slides.clone();
    slides.push(new_slide());
    Presentation {
        title: p.title.clone(),
        slides,
    }
}

/// Remove the slide at `index`. A deck never drops below one slide.
pub fn delete_slide(p: &Presentation, index: usize) -> EditResult {
    check_slide(p, index)?;
    if p.slides.len() <= 1 {
        return Err(EditError::LastSlide);
    }
    let slides = p
        .slides
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| s.clone())
        .collect();
    Ok(Presentation {
        title: p.title.clone(),
        slides,
    })
}

/// Move the slide at `from` so it ends up at `to`: removal first, then
/// insertion into the shortened list.
pub fn reorder_slides(p: &Presentation, from: usize, to: usize) -> EditResult {
    check_slide(p, from)?;
    check_slide(p, to)?;
    let mut slides = p.slides.clone();
    let moved = slides.remove(from);
    slides.insert(to, moved);
    Ok(Presentation {
        title: p.title.clone(),
        slides,
    })
}

pub fn add_content_item(p: &Presentation, slide_index: usize) -> EditResult {
    let mut content = content_of(p, slide_index)?.to_vec();
    content.push(StyledText::bullet(NEW_BULLET));
    Ok(with_content(p, slide_index, content))
}

pub fn delete_content_item(p: &Presentation, slide_index: usize, item_index: usize) -> EditResult {
    let content = content_of(p, slide_index)?;
    if item_index >= content.len() {
        return Err(EditError::ItemOutOfRange {
            index: item_index,
            len: content.len(),
        });
    }
    let content = content
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != item_index)
        .map(|(_, item)| item.clone())
        .collect();
    Ok(with_content(p, slide_index, content))
}

pub fn update_content_item(
    p: &Presentation,
    slide_index: usize,
    item_index: usize,
    value: StyledText,
) -> EditResult {
    let mut content = content_of(p, slide_index)?.to_vec();
    let len = content.len();
    let item = content.get_mut(item_index).ok_or(EditError::ItemOutOfRange {
        index: item_index,
        len,
    })?;
    *item = value;
    Ok(with_content(p, slide_index, content))
}

pub fn update_infographic(
    p: &Presentation,
    slide_index: usize,
    infographic: Infographic,
) -> EditResult {
    let slide = check_slide(p, slide_index)?;
    if slide.infographic().is_none() {
        return Err(EditError::NotAnInfographicSlide { index: slide_index });
    }
    let slide = SlidePatch::body(SlideBody::Infographic { infographic }).merged_into(slide);
    Ok(with_slide(p, slide_index, slide))
}

pub fn rename_presentation(p: &Presentation, title: &str) -> Presentation {
    Presentation {
        title: title.trim().to_string(),
        slides: p.slides.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesmith_common::{ChartKind, DataPoint};
    use slidesmith_genai::fallback_presentation;

    fn deck(n: usize) -> Presentation {
        let slides = (0..n)
            .map(|i| Slide {
                id: format!("s{i}"),
                title: StyledText::title(format!("Slide {i}")),
                body: SlideBody::Content {
                    content: vec![StyledText::bullet("a")],
                },
                image_prompt: String::new(),
                image_url: String::new(),
            })
            .collect();
        Presentation::new("Deck", slides)
    }

    #[test]
    fn test_update_slide_merges_and_leaves_input_alone() {
        let before = deck(3);
        let after = update_slide(&before, 1, &SlidePatch::image_url("img")).unwrap();
        assert_eq!(after.slides[1].image_url, "img");
        assert_eq!(after.slides[1].title, before.slides[1].title);
        assert_eq!(before.slides[1].image_url, "");
    }

    #[test]
    fn test_update_slide_out_of_range() {
        let err = update_slide(&deck(2), 5, &SlidePatch::default()).unwrap_err();
        assert_eq!(err, EditError::SlideOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn test_add_slide_appends_placeholder() {
        let after = add_slide(&deck(3));
        assert_eq!(after.len(), 4);
        let last = &after.slides[3];
        assert_eq!(last.title.text, NEW_SLIDE_TITLE);
        assert_eq!(last.content().unwrap(), [StyledText::bullet(NEW_SLIDE_BULLET)]);
        assert!(last.image_url.contains(&last.id));
        assert!(!["s0", "s1", "s2"].contains(&last.id.as_str()));
    }

    #[test]
    fn test_delete_never_empties_deck() {
        let one = deck(1);
        assert_eq!(delete_slide(&one, 0).unwrap_err(), EditError::LastSlide);

        let mut current = deck(4);
        while current.len() > 1 {
            current = delete_slide(&current, 0).unwrap();
        }
        assert_eq!(current.len(), 1);
        assert!(delete_slide(&current, 0).is_err());
    }

    #[test]
    fn test_reorder_splice_semantics() {
        let p = deck(4);
        let moved = reorder_slides(&p, 0, 2).unwrap();
        assert_eq!(moved.slide_ids(), vec!["s1", "s2", "s0", "s3"]);
        let back = reorder_slides(&p, 3, 0).unwrap();
        assert_eq!(back.slide_ids(), vec!["s3", "s0", "s1", "s2"]);
        assert!(reorder_slides(&p, 0, 4).is_err());
    }

    #[test]
    fn test_reorder_preserves_id_multiset() {
        let p = deck(5);
        for from in 0..5 {
            for to in 0..5 {
                let moved = reorder_slides(&p, from, to).unwrap();
                let mut ids = moved.slide_ids();
                ids.sort();
                assert_eq!(ids, vec!["s0", "s1", "s2", "s3", "s4"]);
            }
        }
    }

    #[test]
    fn test_content_item_crud() {
        let p = deck(2);
        let added = add_content_item(&p, 0).unwrap();
        let items = added.slides[0].content().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], StyledText::bullet(NEW_BULLET));

        let updated = update_content_item(&added, 0, 1, StyledText::bullet("b")).unwrap();
        assert_eq!(updated.slides[0].content().unwrap()[1].text, "b");

        let deleted = delete_content_item(&updated, 0, 0).unwrap();
        assert_eq!(deleted.slides[0].content().unwrap(), [StyledText::bullet("b")]);
        assert!(delete_content_item(&deleted, 0, 3).is_err());
    }

    #[test]
    fn test_content_ops_guard_infographic_slides() {
        let p = fallback_presentation();
        assert_eq!(
            add_content_item(&p, 1).unwrap_err(),
            EditError::NotAContentSlide { index: 1 }
        );
        let chart = Infographic {
            kind: ChartKind::Bar,
            data: vec![DataPoint::new("x", 1.0)],
        };
        assert_eq!(
            update_infographic(&p, 0, chart.clone()).unwrap_err(),
            EditError::NotAnInfographicSlide { index: 0 }
        );
        let updated = update_infographic(&p, 1, chart.clone()).unwrap();
        assert_eq!(updated.slides[1].infographic(), Some(&chart));
    }

    #[test]
    fn test_update_by_id_follows_slide() {
        let p = reorder_slides(&deck(3), 2, 0).unwrap();
        let after = update_slide_by_id(&p, "s2", &SlidePatch::image_url("late")).unwrap();
        assert_eq!(after.slides[0].image_url, "late");
        assert!(update_slide_by_id(&p, "gone", &SlidePatch::default()).is_err());
    }
}
