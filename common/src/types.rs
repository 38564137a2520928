use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::StyledText;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid presentation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("presentation has no slides")]
    NoSlides,
}

/// A whole deck. Once handed to the document store it always holds at least
/// one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            title: title.into(),
            slides,
        }
    }

    /// Parse a deck previously written with [`Presentation::to_json_pretty`].
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let presentation: Presentation = serde_json::from_str(json)?;
        if presentation.slides.is_empty() {
            return Err(ModelError::NoSlides);
        }
        Ok(presentation)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn position_of(&self, slide_id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == slide_id)
    }

    pub fn slide_ids(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub title: StyledText,
    #[serde(flatten)]
    pub body: SlideBody,
    pub image_prompt: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl Slide {
    pub fn slide_type(&self) -> SlideType {
        match self.body {
            SlideBody::Content { .. } => SlideType::Content,
            SlideBody::Infographic { .. } => SlideType::Infographic,
        }
    }

    pub fn content(&self) -> Option<&[StyledText]> {
        match &self.body {
            SlideBody::Content { content } => Some(content),
            SlideBody::Infographic { .. } => None,
        }
    }

    pub fn infographic(&self) -> Option<&Infographic> {
        match &self.body {
            SlideBody::Infographic { infographic } => Some(infographic),
            SlideBody::Content { .. } => None,
        }
    }
}

/// What a slide shows under its title. Serialized inline with the slide
/// under the `slideType` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slideType", rename_all = "lowercase")]
pub enum SlideBody {
    Content {
        #[serde(default)]
        content: Vec<StyledText>,
    },
    Infographic {
        infographic: Infographic,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Content,
    Infographic,
}

impl SlideType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Content => "content",
            SlideType::Infographic => "infographic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infographic {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Vec<DataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Pie => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Pie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Partial slide fields for a shallow merge. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlidePatch {
    pub title: Option<StyledText>,
    pub body: Option<SlideBody>,
    pub image_prompt: Option<String>,
    pub image_url: Option<String>,
}

impl SlidePatch {
    pub fn title(title: StyledText) -> Self {
        Self {
            title: Some(title),
            ..Default::default()
        }
    }

    pub fn body(body: SlideBody) -> Self {
        Self {
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn image_prompt(prompt: impl Into<String>) -> Self {
        Self {
            image_prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.image_prompt.is_none()
            && self.image_url.is_none()
    }

    pub fn merged_into(&self, slide: &Slide) -> Slide {
        Slide {
            id: slide.id.clone(),
            title: self.title.clone().unwrap_or_else(|| slide.title.clone()),
            body: self.body.clone().unwrap_or_else(|| slide.body.clone()),
            image_prompt: self
                .image_prompt
                .clone()
                .unwrap_or_else(|| slide.image_prompt.clone()),
            image_url: self
                .image_url
                .clone()
                .unwrap_or_else(|| slide.image_url.clone()),
        }
    }
}

pub fn new_slide_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
