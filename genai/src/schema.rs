use serde::Deserialize;
use serde_json::{json, Value};
use slidesmith_common::{
    new_slide_id, Infographic, Presentation, Slide, SlideBody, SlideType, StyledText,
};

/// JSON schema handed to the model so it answers with a deck we can parse.
pub fn presentation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A short, catchy title for the entire presentation. Max 10 words."
            },
            "slides": {
                "type": "ARRAY",
                "description": "An array of 5 to 8 slide objects for the presentation.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The title for this individual slide. Max 15 words."
                        },
                        "slideType": {
                            "type": "STRING",
                            "description": "Use 'content' for bullet points or 'infographic' for a chart.",
                            "enum": ["content", "infographic"]
                        },
                        "content": {
                            "type": "ARRAY",
                            "description": "Bullet points. Required for 'content' slides, omitted for 'infographic' slides.",
                            "items": { "type": "STRING" }
                        },
                        "infographic": {
                            "type": "OBJECT",
                            "description": "Chart data. Required for 'infographic' slides, omitted for 'content' slides.",
                            "properties": {
                                "type": {
                                    "type": "STRING",
                                    "description": "The type of chart.",
                                    "enum": ["pie", "bar"]
                                },
                                "data": {
                                    "type": "ARRAY",
                                    "description": "Data points for the chart.",
                                    "items": {
                                        "type": "OBJECT",
                                        "properties": {
                                            "label": { "type": "STRING", "description": "Label for a data point." },
                                            "value": { "type": "NUMBER", "description": "Numerical value for the data point." }
                                        },
                                        "required": ["label", "value"]
                                    }
                                }
                            },
                            "required": ["type", "data"]
                        },
                        "image_prompt": {
                            "type": "STRING",
                            "description": "A creative, specific prompt for a background image that represents the slide."
                        }
                    },
                    "required": ["title", "slideType", "image_prompt"]
                }
            }
        },
        "required": ["title", "slides"]
    })
}

pub fn presentation_prompt(topic: &str) -> String {
    format!(
        "Create a presentation about \"{topic}\". Keep the tone professional and engaging. \
         Generate between 5 and 8 slides. Mix content slides with bullet points and, when the \
         topic suits data visualization, 1 to 2 infographic slides (pie or bar charts) with \
         realistic data and slideType 'infographic'. Content slides carry 2 to 4 concise bullet \
         points and slideType 'content'. Every slide needs a creative, specific image_prompt \
         for its background."
    )
}

/// A deck as the model returns it: plain strings, no ids, no images.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPresentation {
    pub title: String,
    pub slides: Vec<RawSlide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSlide {
    pub title: String,
    #[serde(rename = "slideType")]
    pub slide_type: SlideType,
    #[serde(default)]
    pub content: Option<Vec<String>>,
    #[serde(default)]
    pub infographic: Option<Infographic>,
    #[serde(default)]
    pub image_prompt: String,
}

impl RawSlide {
    /// Apply default style tokens and pick the body variant. An infographic
    /// slide without chart data becomes an empty content slide.
    pub fn into_slide(self, image_url: String) -> Slide {
        let body = match (self.slide_type, self.infographic) {
            (SlideType::Infographic, Some(infographic)) => SlideBody::Infographic { infographic },
            (SlideType::Infographic, None) => {
                tracing::warn!("infographic slide {:?} has no chart data", self.title);
                SlideBody::Content {
                    content: Vec::new(),
                }
            }
            (SlideType::Content, _) => SlideBody::Content {
                content: self
                    .content
                    .unwrap_or_default()
                    .into_iter()
                    .map(StyledText::bullet)
                    .collect(),
            },
        };
        Slide {
            id: new_slide_id(),
            title: StyledText::title(self.title),
            body,
            image_prompt: self.image_prompt,
            image_url,
        }
    }
}

impl RawPresentation {
    pub fn into_presentation(self, image_urls: Vec<String>) -> Presentation {
        let slides = self
            .slides
            .into_iter()
            .zip(image_urls)
            .map(|(slide, url)| slide.into_slide(url))
            .collect();
        Presentation::new(self.title, slides)
    }
}
