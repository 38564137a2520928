//! Chart geometry for infographic slides.
//!
//! Negative or non-finite values draw as zero. A chart whose values sum
//! (pie) or peak (bar) at zero draws flat: zero-span arcs, zero-height bars.

use slidesmith_common::{ChartKind, DataPoint, Infographic};

pub const PALETTE: [&str; 6] = [
    "#6366F1", "#818CF8", "#A5B4FC", "#C7D2FE", "#E0E7FF", "#4F46E5",
];

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// `#RRGGBB` to components; `None` for anything else.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Fractions of the full circle, `0.0..=1.0`.
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Height relative to the tallest bar, `0.0..=1.0`.
    pub height: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Pie(Vec<PieSlice>),
    Bar(Vec<Bar>),
}

fn drawable(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub fn pie_slices(data: &[DataPoint]) -> Vec<PieSlice> {
    let total: f64 = data.iter().map(|d| drawable(d.value)).sum();
    let mut start = 0.0;
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let share = if total > 0.0 {
                drawable(d.value) / total
            } else {
                0.0
            };
            let end = (start + share).min(1.0);
            let slice = PieSlice {
                label: d.label.clone(),
                value: d.value,
                start,
                end,
                color: color_for(i),
            };
            start = end;
            slice
        })
        .collect()
}

pub fn bars(data: &[DataPoint]) -> Vec<Bar> {
    let max = data.iter().map(|d| drawable(d.value)).fold(0.0, f64::max);
    data.iter()
        .enumerate()
        .map(|(i, d)| Bar {
            label: d.label.clone(),
            value: d.value,
            height: if max > 0.0 {
                (drawable(d.value) / max).clamp(0.0, 1.0)
            } else {
                0.0
            },
            color: color_for(i),
        })
        .collect()
}

pub fn render(infographic: &Infographic) -> ChartGeometry {
    match infographic.kind {
        ChartKind::Pie => ChartGeometry::Pie(pie_slices(&infographic.data)),
        ChartKind::Bar => ChartGeometry::Bar(bars(&infographic.data)),
    }
}

/// Legend text for a fraction, e.g. `0.125` -> `12.5%`.
pub fn percent_label(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 0.05 {
        format!("{}%", pct.round() as i64)
    } else {
        format!("{pct:.1}%")
    }
}
