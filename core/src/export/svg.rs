use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};
use slidesmith_common::StyledText;
use std::f64::consts::PI;
use std::fmt::Write;

use super::{Page, PageGeometry, PageRenderer, SlideSnapshot, SnapshotBody};
use crate::chart::{percent_label, Bar, ChartGeometry, PieSlice};
use crate::error::ExportError;

const MARGIN_X: f64 = 80.0;
const TITLE_Y: f64 = 140.0;

fn font_px(token: &str) -> f64 {
    match token {
        "text-xs" => 12.0,
        "text-sm" => 14.0,
        "text-base" => 16.0,
        "text-lg" => 18.0,
        "text-xl" => 20.0,
        "text-2xl" => 24.0,
        "text-3xl" => 30.0,
        "text-4xl" => 36.0,
        "text-5xl" => 48.0,
        "text-6xl" => 60.0,
        _ => 24.0,
    }
}

fn font_stack(token: &str) -> &'static str {
    match token {
        "font-display" => "Lexend, Poppins, sans-serif",
        _ => "Inter, Helvetica, Arial, sans-serif",
    }
}

fn text_attrs(style: &StyledText) -> String {
    format!(
        "font-size=\"{}\" font-family=\"{}\"",
        font_px(&style.font_size),
        font_stack(&style.font_family)
    )
}

/// Draws a slide as a standalone SVG page: background image under a dark
/// scrim, the title, then bullets or the chart.
pub struct SvgPageRenderer;

#[async_trait]
impl PageRenderer for SvgPageRenderer {
    async fn render_page(
        &self,
        snapshot: &SlideSnapshot,
        geometry: PageGeometry,
    ) -> Result<Page, ExportError> {
        let markup = render_svg(snapshot, geometry).map_err(|e| ExportError::Render {
            slide_id: snapshot.slide_id.clone(),
            reason: e.to_string(),
        })?;
        Ok(Page {
            slide_id: snapshot.slide_id.clone(),
            markup,
        })
    }
}

pub(crate) fn render_svg(snapshot: &SlideSnapshot, geometry: PageGeometry) -> Result<String, std::fmt::Error> {
    let (w, h) = (geometry.width, geometry.height);
    let mut out = String::new();
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    )?;
    writeln!(out, "<rect width=\"{w}\" height=\"{h}\" fill=\"#111827\"/>")?;
    if !snapshot.image_url.is_empty() {
        writeln!(
            out,
            "<image href=\"{}\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid slice\"/>",
            encode_double_quoted_attribute(&snapshot.image_url)
        )?;
    }
    writeln!(out, "<rect width=\"{w}\" height=\"{h}\" fill=\"#000000\" fill-opacity=\"0.55\"/>")?;
    writeln!(
        out,
        "<text x=\"{MARGIN_X}\" y=\"{TITLE_Y}\" fill=\"#FFFFFF\" font-weight=\"bold\" {}>{}</text>",
        text_attrs(&snapshot.title),
        encode_text(&snapshot.title.text)
    )?;

    match &snapshot.body {
        SnapshotBody::Bullets(items) => write_bullets(&mut out, items)?,
        SnapshotBody::Chart { geometry: chart, .. } => match chart {
            ChartGeometry::Pie(slices) => write_pie(&mut out, slices)?,
            ChartGeometry::Bar(bars) => write_bars(&mut out, bars, geometry)?,
        },
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_bullets(out: &mut String, items: &[StyledText]) -> std::fmt::Result {
    let mut y = TITLE_Y + 90.0;
    for item in items {
        let px = font_px(&item.font_size);
        writeln!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"5\" fill=\"#818CF8\"/>",
            MARGIN_X + 6.0,
            y - px * 0.35
        )?;
        for line in item.text.lines() {
            writeln!(
                out,
                "<text x=\"{}\" y=\"{y}\" fill=\"#E5E7EB\" {}>{}</text>",
                MARGIN_X + 28.0,
                text_attrs(item),
                encode_text(line)
            )?;
            y += px * 1.4;
        }
        y += px * 0.6;
    }
    Ok(())
}

fn point_on_circle(cx: f64, cy: f64, r: f64, fraction: f64) -> (f64, f64) {
    // Fraction 0 sits at twelve o'clock, increasing clockwise.
    let angle = fraction * 2.0 * PI - PI / 2.0;
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn write_pie(out: &mut String, slices: &[PieSlice]) -> std::fmt::Result {
    let (cx, cy, r) = (420.0, 430.0, 210.0);
    for slice in slices {
        let span = slice.span();
        if span <= 0.0 {
            continue;
        }
        if span >= 1.0 {
            writeln!(out, "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\"/>", slice.color)?;
            continue;
        }
        let (x0, y0) = point_on_circle(cx, cy, r, slice.start);
        let (x1, y1) = point_on_circle(cx, cy, r, slice.end);
        let large = if span > 0.5 { 1 } else { 0 };
        writeln!(
            out,
            "<path d=\"M {cx} {cy} L {x0:.2} {y0:.2} A {r} {r} 0 {large} 1 {x1:.2} {y1:.2} Z\" fill=\"{}\"/>",
            slice.color
        )?;
    }

    let mut y = 300.0;
    for slice in slices {
        writeln!(out, "<rect x=\"760\" y=\"{}\" width=\"20\" height=\"20\" rx=\"4\" fill=\"{}\"/>", y - 16.0, slice.color)?;
        writeln!(
            out,
            "<text x=\"792\" y=\"{y}\" fill=\"#E5E7EB\" font-size=\"22\" font-family=\"{}\">{} ({})</text>",
            font_stack("font-sans"),
            encode_text(&slice.label),
            percent_label(slice.span())
        )?;
        y += 40.0;
    }
    Ok(())
}

fn write_bars(out: &mut String, bars: &[Bar], geometry: PageGeometry) -> std::fmt::Result {
    if bars.is_empty() {
        return Ok(());
    }
    let left = MARGIN_X + 80.0;
    let right = f64::from(geometry.width) - MARGIN_X - 80.0;
    let baseline = f64::from(geometry.height) - 90.0;
    let max_height = 380.0;
    let slot = (right - left) / bars.len() as f64;
    let width = slot * 0.6;

    for (i, bar) in bars.iter().enumerate() {
        let height = bar.height * max_height;
        let x = left + slot * i as f64 + (slot - width) / 2.0;
        let center = x + width / 2.0;
        writeln!(
            out,
            "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"6\" fill=\"{}\"/>",
            baseline - height,
            bar.color
        )?;
        writeln!(
            out,
            "<text x=\"{center:.2}\" y=\"{:.2}\" fill=\"#FFFFFF\" font-size=\"20\" text-anchor=\"middle\">{}</text>",
            baseline - height - 10.0,
            bar.value
        )?;
        writeln!(
            out,
            "<text x=\"{center:.2}\" y=\"{:.2}\" fill=\"#D1D5DB\" font-size=\"20\" text-anchor=\"middle\">{}</text>",
            baseline + 30.0,
            encode_text(&bar.label)
        )?;
    }
    Ok(())
}
