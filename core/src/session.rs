//! The deck session: applies [`Op`]s to the document store and runs the
//! slow collaborators (generation, image regeneration, export) on spawned
//! tasks whose results come back through [`DeckSession::next_event`].

use slidesmith_common::{Presentation, SlidePatch};
use slidesmith_genai::{
    fallback_presentation, GeminiClient, ImageGenerator, PresentationGenerator,
};
use slidesmith_protocol::{Event, Op, Submission};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::{EditError, ExportError};
use crate::export::{
    export_presentation, DocumentWriter, HtmlDocumentWriter, PageRenderer, SvgPageRenderer,
};
use crate::infographic_draft::InfographicDraft;
use crate::store::DocumentStore;

enum Completion {
    Generated {
        topic: String,
        presentation: Presentation,
    },
    Image {
        deck: u64,
        slide_id: String,
        image_url: String,
    },
    Exported(Result<PathBuf, ExportError>),
}

pub struct DeckSession {
    store: Option<DocumentStore>,
    generator: Arc<dyn PresentationGenerator>,
    images: Arc<dyn ImageGenerator>,
    renderer: Arc<dyn PageRenderer>,
    writer: Arc<dyn DocumentWriter>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    generating: bool,
    exporting: bool,
    /// Bumped whenever the open deck is replaced or closed, so results
    /// requested against an earlier deck can be told apart.
    deck: u64,
    regenerating: HashSet<(u64, String)>,
}

impl DeckSession {
    pub fn new(
        generator: Arc<dyn PresentationGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: None,
            generator,
            images,
            renderer: Arc::new(SvgPageRenderer),
            writer: Arc::new(HtmlDocumentWriter),
            tx,
            rx,
            generating: false,
            exporting: false,
            deck: 0,
            regenerating: HashSet::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Arc::new(GeminiClient::new(config.genai())?);
        Ok(Self::new(client.clone(), client))
    }

    pub fn with_exporter(
        mut self,
        renderer: Arc<dyn PageRenderer>,
        writer: Arc<dyn DocumentWriter>,
    ) -> Self {
        self.renderer = renderer;
        self.writer = writer;
        self
    }

    pub fn store(&self) -> Option<&DocumentStore> {
        self.store.as_ref()
    }

    pub fn presentation(&self) -> Option<Arc<Presentation>> {
        self.store.as_ref().map(DocumentStore::snapshot)
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn is_regenerating(&self, slide_id: &str) -> bool {
        self.regenerating
            .contains(&(self.deck, slide_id.to_string()))
    }

    /// True while an operation that blocks the UI is in flight.
    pub fn is_busy(&self) -> bool {
        self.generating || self.exporting
    }

    pub fn submit_with_id(&mut self, submission: Submission) -> Vec<Event> {
        tracing::debug!("submission {}: {:?}", submission.id, submission.op);
        self.submit(submission.op)
    }

    /// Apply `op` and return what happened right away. Slow work reports
    /// back later through [`DeckSession::next_event`].
    pub fn submit(&mut self, op: Op) -> Vec<Event> {
        match op {
            Op::Generate { topic } => self.start_generation(topic),
            Op::Load { presentation } => self.replace(presentation),
            Op::NewPresentation => {
                self.store = None;
                self.deck += 1;
                vec![Event::PresentationCleared]
            }
            Op::RegenerateImage { slide_id } => self.start_image(slide_id),
            Op::Export { out_dir } => self.start_export(out_dir),
            Op::Shutdown => vec![Event::ShutdownComplete],
            edit => self.apply_edit(edit),
        }
    }

    fn apply_edit(&mut self, op: Op) -> Vec<Event> {
        let Some(store) = self.store.as_mut() else {
            return vec![notice("No presentation is open.")];
        };
        let result: Result<Option<usize>, EditError> = match op {
            Op::RenamePresentation { title } => {
                let title = title.trim();
                if title.is_empty() {
                    return vec![notice("The presentation needs a title.")];
                }
                store.rename(title);
                Ok(None)
            }
            Op::SelectSlide { index } => {
                return vec![Event::SelectionChanged {
                    index: store.select(index),
                }]
            }
            Op::UpdateSlide { index, patch } => store.update_slide(index, &patch).map(|_| None),
            Op::AddSlide => Ok(Some(store.add_slide())),
            Op::DeleteSlide { index } => store.delete_slide(index).map(Some),
            Op::ReorderSlides { from, to } => store.reorder_slides(from, to).map(Some),
            Op::AddContentItem { slide_index } => store.add_content_item(slide_index).map(|_| None),
            Op::DeleteContentItem {
                slide_index,
                item_index,
            } => store
                .delete_content_item(slide_index, item_index)
                .map(|_| None),
            Op::UpdateContentItem {
                slide_index,
                item_index,
                value,
            } => store
                .update_content_item(slide_index, item_index, value)
                .map(|_| None),
            Op::UpdateInfographic {
                slide_index,
                infographic,
            } => store
                .update_infographic(slide_index, infographic)
                .map(|_| None),
            other => {
                tracing::warn!("not an edit: {other:?}");
                return Vec::new();
            }
        };

        match result {
            Ok(selection) => {
                let mut events = vec![Event::DocumentChanged];
                if let Some(index) = selection {
                    events.push(Event::SelectionChanged { index });
                }
                events
            }
            Err(e) => vec![notice(&e.to_string())],
        }
    }

    /// Write a closed chart editor's draft back to its slide.
    pub fn commit_infographic(&mut self, draft: InfographicDraft) -> Vec<Event> {
        let Some(store) = self.store.as_mut() else {
            return vec![notice("No presentation is open.")];
        };
        match draft.commit(store) {
            Ok(()) => vec![Event::DocumentChanged],
            Err(e) => vec![notice(&e.to_string())],
        }
    }

    fn replace(&mut self, presentation: Presentation) -> Vec<Event> {
        let store = DocumentStore::new(presentation).or_else(|| {
            tracing::warn!("received an empty deck, using the fallback deck");
            DocumentStore::new(fallback_presentation())
        });
        self.store = store;
        self.deck += 1;
        match &self.store {
            Some(store) => vec![Event::PresentationReady {
                title: store.presentation().title.clone(),
                slides: store.presentation().len(),
            }],
            None => vec![Event::Error {
                message: "No slides to show.".to_string(),
            }],
        }
    }

    fn start_generation(&mut self, topic: String) -> Vec<Event> {
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return vec![notice("Please enter a topic.")];
        }
        if self.generating {
            return vec![notice("A presentation is already being generated.")];
        }
        self.generating = true;
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        let task_topic = topic.clone();
        tokio::spawn(async move {
            let presentation = generator.generate_presentation(&task_topic).await;
            let _ = tx.send(Completion::Generated {
                topic: task_topic,
                presentation,
            });
        });
        vec![Event::GenerationStarted { topic }]
    }

    fn start_image(&mut self, slide_id: String) -> Vec<Event> {
        let Some(slide) = self
            .store
            .as_ref()
            .and_then(|s| s.presentation().slides.iter().find(|s| s.id == slide_id))
        else {
            return vec![notice("That slide no longer exists.")];
        };
        if !self.regenerating.insert((self.deck, slide_id.clone())) {
            return vec![notice("An image is already being generated for this slide.")];
        }
        let prompt = slide.image_prompt.clone();
        let images = Arc::clone(&self.images);
        let tx = self.tx.clone();
        let task_id = slide_id.clone();
        let deck = self.deck;
        tokio::spawn(async move {
            let image_url = images.generate_image(&prompt).await;
            let _ = tx.send(Completion::Image {
                deck,
                slide_id: task_id,
                image_url,
            });
        });
        vec![Event::ImageRegenerationStarted { slide_id }]
    }

    fn start_export(&mut self, out_dir: PathBuf) -> Vec<Event> {
        let Some(presentation) = self.presentation() else {
            return vec![notice("No presentation is open.")];
        };
        if self.exporting {
            return vec![notice("An export is already running.")];
        }
        self.exporting = true;
        let renderer = Arc::clone(&self.renderer);
        let writer = Arc::clone(&self.writer);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result =
                export_presentation(&presentation, renderer.as_ref(), writer.as_ref(), &out_dir)
                    .await;
            let _ = tx.send(Completion::Exported(result));
        });
        vec![Event::ExportStarted]
    }

    /// Wait for the next background result and apply it to the deck.
    pub async fn next_event(&mut self) -> Option<Event> {
        loop {
            let completion = self.rx.recv().await?;
            if let Some(event) = self.complete(completion) {
                return Some(event);
            }
        }
    }

    /// Like [`DeckSession::next_event`] but returns immediately when nothing
    /// has finished.
    pub fn try_next_event(&mut self) -> Option<Event> {
        loop {
            let completion = self.rx.try_recv().ok()?;
            if let Some(event) = self.complete(completion) {
                return Some(event);
            }
        }
    }

    /// Apply a finished task. Images for a deck that has since been
    /// replaced are dropped without an event.
    fn complete(&mut self, completion: Completion) -> Option<Event> {
        match completion {
            Completion::Generated {
                topic,
                presentation,
            } => {
                self.generating = false;
                tracing::info!("generation for {topic:?} finished");
                self.replace(presentation).into_iter().next()
            }
            Completion::Image {
                deck,
                slide_id,
                image_url,
            } => {
                self.regenerating.remove(&(deck, slide_id.clone()));
                if deck != self.deck {
                    tracing::debug!("dropping image for slide {slide_id} of a closed deck");
                    return None;
                }
                let applied = self
                    .store
                    .as_mut()
                    .map(|s| s.update_slide_by_id(&slide_id, &SlidePatch::image_url(image_url)));
                Some(match applied {
                    Some(Ok(())) => Event::ImageRegenerated { slide_id },
                    _ => {
                        tracing::warn!("slide {slide_id} is gone, dropping its new image");
                        notice("The slide was removed before its image arrived.")
                    }
                })
            }
            Completion::Exported(result) => {
                self.exporting = false;
                Some(match result {
                    Ok(path) => Event::ExportComplete { path },
                    Err(e) => {
                        tracing::error!("export failed: {e}");
                        Event::Error {
                            message: format!("Export failed: {e}"),
                        }
                    }
                })
            }
        }
    }
}

fn notice(message: &str) -> Event {
    Event::Notice {
        message: message.to_string(),
    }
}
