use slidesmith_common::{
    ChartKind, DataPoint, Infographic, Presentation, Slide, SlideBody, StyledText,
};

const PLACEHOLDER_BASE: &str = "https://picsum.photos";

/// Deterministic placeholder image for a seed (usually the image prompt).
pub fn placeholder_image_url(seed: &str) -> String {
    match reqwest::Url::parse(PLACEHOLDER_BASE) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.clear().extend(["seed", seed, "1280", "720"]);
            }
            url.to_string()
        }
        Err(_) => format!("{PLACEHOLDER_BASE}/seed/{seed}/1280/720"),
    }
}

fn content_slide(id: &str, title: &str, bullets: &[&str], prompt: &str, seed: &str) -> Slide {
    Slide {
        id: id.to_string(),
        title: StyledText::title(title),
        body: SlideBody::Content {
            content: bullets.iter().map(|b| StyledText::bullet(*b)).collect(),
        },
        image_prompt: prompt.to_string(),
        image_url: placeholder_image_url(seed),
    }
}

fn chart_slide(
    id: &str,
    title: &str,
    kind: ChartKind,
    data: &[(&str, f64)],
    prompt: &str,
    seed: &str,
) -> Slide {
    Slide {
        id: id.to_string(),
        title: StyledText::title(title),
        body: SlideBody::Infographic {
            infographic: Infographic {
                kind,
                data: data
                    .iter()
                    .map(|(label, value)| DataPoint::new(*label, *value))
                    .collect(),
            },
        },
        image_prompt: prompt.to_string(),
        image_url: placeholder_image_url(seed),
    }
}

/// The built-in deck used whenever generation is unavailable or fails.
pub fn fallback_presentation() -> Presentation {
    Presentation::new(
        "The Future of Renewable Energy",
        vec![
            content_slide(
                "1",
                "The Dawn of a New Era",
                &[
                    "Transitioning to sustainable power",
                    "Harnessing wind, solar, and geothermal",
                    "Global impact on climate change",
                ],
                "Golden sun rising over a field of solar panels and wind turbines, optimistic, dawn",
                "solardawn",
            ),
            chart_slide(
                "2",
                "Global Energy Mix (2023)",
                ChartKind::Pie,
                &[("Fossil Fuels", 79.0), ("Nuclear", 9.0), ("Renewables", 12.0)],
                "Abstract globe with energy streams, data visualization style",
                "energymix",
            ),
            content_slide(
                "3",
                "Innovations in Solar Power",
                &[
                    "Next-generation photovoltaic cells",
                    "Transparent solar panels for windows",
                    "Space-based solar farms",
                ],
                "Close-up of a futuristic, glowing solar panel with intricate patterns, sci-fi",
                "solarpower",
            ),
            chart_slide(
                "4",
                "Renewable Growth (GW)",
                ChartKind::Bar,
                &[("2020", 260.0), ("2021", 295.0), ("2022", 340.0), ("2023", 440.0)],
                "Upward trending graph with green arrows, business, growth",
                "growth",
            ),
            content_slide(
                "5",
                "Challenges and Solutions",
                &[
                    "Energy storage and battery tech",
                    "Grid modernization",
                    "Policy and public adoption",
                ],
                "A complex, glowing grid of interconnected energy nodes, abstract, technology",
                "grid",
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_encodes_prompt() {
        assert_eq!(
            placeholder_image_url("solar panels"),
            "https://picsum.photos/seed/solar%20panels/1280/720"
        );
        assert_eq!(
            placeholder_image_url("grid"),
            "https://picsum.photos/seed/grid/1280/720"
        );
    }

    #[test]
    fn test_fallback_deck_shape() {
        let deck = fallback_presentation();
        assert_eq!(deck.title, "The Future of Renewable Energy");
        assert_eq!(deck.slide_ids(), vec!["1", "2", "3", "4", "5"]);
        assert!(deck.slides[1].infographic().is_some());
        assert_eq!(deck.slides[3].infographic().unwrap().kind, ChartKind::Bar);
    }
}
