//! Text measurement and greedy word wrapping
//!
//! The same wrapping drives the spacing estimate in the layout engine and
//! the label panels the renderer draws, so both always agree on how wide a
//! label is.

use textwrap::core::{display_width, Fragment};
use textwrap::wrap_algorithms::wrap_first_fit;

/// Measures the rendered width of a string
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> f64;
}

/// Width estimate from a fixed advance per display column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageCharWidth {
    /// Advance of one column as a fraction of the font size
    pub factor: f64,
}

impl Default for AverageCharWidth {
    fn default() -> Self {
        Self { factor: 0.6 }
    }
}

impl TextMeasure for AverageCharWidth {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        display_width(text) as f64 * font_size * self.factor
    }
}

#[derive(Debug)]
struct MeasuredWord<'a> {
    text: &'a str,
    width: f64,
    space: f64,
}

impl Fragment for MeasuredWord<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.space
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Greedily pack words into lines no wider than `max_width`.
///
/// A word that is wider than `max_width` on its own gets a line to itself
/// and is never shortened. Blank input yields no lines.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font_size: f64,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let space = measure.measure(" ", font_size);
    let words: Vec<MeasuredWord<'_>> = text
        .split_whitespace()
        .map(|word| MeasuredWord {
            text: word,
            width: measure.measure(word, font_size),
            space,
        })
        .collect();
    if words.is_empty() {
        return Vec::new();
    }

    wrap_first_fit(&words, &[max_width])
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|word| word.text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Width of the widest line
pub fn widest_line(lines: &[String], font_size: f64, measure: &dyn TextMeasure) -> f64 {
    lines
        .iter()
        .map(|line| measure.measure(line, font_size))
        .fold(0.0, f64::max)
}
