use textwrap::{core::Fragment, wrap_algorithms::wrap_first_fit};

use super::invoice_style::pt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontWeight {
    Regular,
    Bold,
}

// Advance widths of the standard Helvetica faces for ASCII 32..=126, in
// thousandths of an em.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

fn char_units(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    (c as u32)
        .checked_sub(32)
        .and_then(|i| table.get(i as usize))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Rendered width of `text` in millimetres.
pub(crate) fn text_width(text: &str, size: f64, weight: FontWeight) -> f64 {
    let units: u32 = text.chars().map(|c| char_units(c, weight) as u32).sum();
    pt(units as f64 * size / 1000.0)
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

/// Split a word wider than `max_width` into pieces that fit.
fn split_long_word(word: &str, max_width: f64, size: f64, weight: FontWeight) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0.0;
    for (i, c) in word.char_indices() {
        let w = text_width(&word[i..i + c.len_utf8()], size, weight);
        if width + w > max_width && i > start {
            pieces.push(&word[start..i]);
            start = i;
            width = 0.0;
        }
        width += w;
    }
    pieces.push(&word[start..]);
    pieces
}

/// Wrap `text` so no line is wider than `max_width` millimetres. Explicit line
/// breaks are kept; an empty input yields a single empty line.
pub(crate) fn wrap_to_width(
    text: &str,
    max_width: f64,
    size: f64,
    weight: FontWeight,
) -> Vec<String> {
    let space = text_width(" ", size, weight);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let words: Vec<MeasuredWord> = paragraph
            .split_whitespace()
            .flat_map(|word| split_long_word(word, max_width, size, weight))
            .map(|piece| MeasuredWord {
                text: piece,
                width: text_width(piece, size, weight),
                space,
            })
            .collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }
        for line in wrap_first_fit(&words, &[max_width]) {
            lines.push(
                line.iter()
                    .map(|w| w.text)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_half_an_em_wide() {
        let w = text_width("0", 10.0, FontWeight::Regular);
        assert!((w - pt(5.56)).abs() < 1e-9);
    }

    #[test]
    fn bold_is_wider() {
        let regular = text_width("Grand Total:", 11.0, FontWeight::Regular);
        let bold = text_width("Grand Total:", 11.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn wrapped_lines_fit() {
        let text = "Very long detailed description of web development services including \
                    front-end and back-end work";
        let max = 60.0;
        let lines = wrap_to_width(text, max, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Regular) <= max + 1e-9);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn explicit_breaks_are_kept() {
        let lines = wrap_to_width("123 Main St\nSuite 100", 200.0, 10.0, FontWeight::Regular);
        assert_eq!(lines, vec!["123 Main St", "Suite 100"]);
    }

    #[test]
    fn unbreakable_words_are_split() {
        let word = "x".repeat(200);
        let lines = wrap_to_width(&word, 30.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_to_width("", 50.0, 10.0, FontWeight::Regular), vec![String::new()]);
    }
}
