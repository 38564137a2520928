use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use slidesmith_core::chart::{hex_to_rgb, percent_label, Bar, ChartGeometry, PieSlice};
use unicode_width::UnicodeWidthStr;

pub fn palette_color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Magenta)
}

/// Text rendering of a chart `width` cells wide.
pub fn chart_lines(geometry: &ChartGeometry, width: u16) -> Vec<Line<'static>> {
    match geometry {
        ChartGeometry::Pie(slices) => pie_lines(slices, width),
        ChartGeometry::Bar(bars) => bar_lines(bars, width),
    }
}

fn empty_chart() -> Vec<Line<'static>> {
    vec![Line::styled("(no data)", Style::default().fg(Color::DarkGray))]
}

/// A pie drawn as one proportional strip plus a legend.
fn pie_lines(slices: &[PieSlice], width: u16) -> Vec<Line<'static>> {
    if slices.is_empty() {
        return empty_chart();
    }
    let w = f64::from(width.max(1));
    let strip: Vec<Span<'static>> = slices
        .iter()
        .filter_map(|s| {
            let from = (s.start * w).round() as usize;
            let to = (s.end * w).round() as usize;
            (to > from).then(|| {
                Span::styled("█".repeat(to - from), Style::default().fg(palette_color(s.color)))
            })
        })
        .collect();

    let mut lines = vec![Line::from(strip), Line::from("")];
    lines.extend(slices.iter().map(|s| {
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(palette_color(s.color))),
            Span::raw(format!("{} ({})", s.label, percent_label(s.span()))),
        ])
    }));
    lines
}

fn bar_lines(bars: &[Bar], width: u16) -> Vec<Line<'static>> {
    if bars.is_empty() {
        return empty_chart();
    }
    let label_width = bars
        .iter()
        .map(|b| UnicodeWidthStr::width(b.label.as_str()))
        .max()
        .unwrap_or(0);
    let track = usize::from(width).saturating_sub(label_width + 12).max(1);
    bars.iter()
        .map(|b| {
            let pad = label_width.saturating_sub(UnicodeWidthStr::width(b.label.as_str()));
            let cells = (b.height * track as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!("{}{} ", b.label, " ".repeat(pad))),
                Span::styled("█".repeat(cells), Style::default().fg(palette_color(b.color))),
                Span::raw(format!(" {}", b.value)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesmith_common::DataPoint;
    use slidesmith_core::chart::{bars, pie_slices};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_pie_strip_fills_width() {
        let slices = pie_slices(&[DataPoint::new("A", 1.0), DataPoint::new("B", 3.0)]);
        let lines = chart_lines(&ChartGeometry::Pie(slices), 20);
        assert_eq!(text(&lines[0]).chars().count(), 20);
        assert_eq!(lines[0].spans[0].content.chars().count(), 5);
        assert_eq!(text(&lines[3]), "■ B (75%)");
    }

    #[test]
    fn test_bars_scale_to_track() {
        let data = [DataPoint::new("A", 10.0), DataPoint::new("BB", 20.0)];
        let lines = chart_lines(&ChartGeometry::Bar(bars(&data)), 34);
        // track = 34 - (2 + 12) = 20
        assert_eq!(lines[0].spans[1].content.chars().count(), 10);
        assert_eq!(lines[1].spans[1].content.chars().count(), 20);
        assert_eq!(lines[0].spans[0].content, "A  ");
    }

    #[test]
    fn test_empty_chart_placeholder() {
        let lines = chart_lines(&ChartGeometry::Bar(Vec::new()), 10);
        assert_eq!(text(&lines[0]), "(no data)");
    }
}
