//! Greedy word wrap against the metric tables.

use crate::layout::font_metrics::FontMetricTable;

/// Breaks `text` into lines no wider than `max_width_mm`.
///
/// Words are kept whole unless a single word is wider than the line, in which
/// case it is split at character boundaries. Whitespace runs collapse to one
/// space. Blank input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let space_w = metrics.space_width_mm(size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.width_mm(word, size_pt);

        if word_w > max_width_mm {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, size_pt, max_width_mm);
            // The tail of the broken word can share its line with what follows.
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current_width = metrics.width_mm(&last, size_pt);
                current = last;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, metrics: &FontMetricTable, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if piece.chars().count() > 1 && metrics.width_mm(&piece, size_pt) > max_width_mm {
            piece.pop();
            pieces.push(std::mem::replace(&mut piece, c.to_string()));
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFace, FontFamily};

    fn helvetica() -> &'static FontMetricTable {
        FontFace::new(FontFamily::Helvetica, false).metrics()
    }

    #[test]
    fn test_short_text_fits_one_line() {
        let lines = wrap_text("Senior   Engineer", helvetica(), 10.0, 180.0);
        assert_eq!(lines, vec!["Senior Engineer".to_string()]);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_text("  \n ", helvetica(), 10.0, 180.0).is_empty());
    }

    #[test]
    fn test_lines_respect_width() {
        let text = "Designed and shipped a distributed cache that cut p99 latency by forty \
                    percent across every region while keeping the on-call rotation quiet";
        let max = 60.0;
        let lines = wrap_text(text, helvetica(), 10.0, max);
        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(helvetica().width_mm(line, 10.0) <= max, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_is_broken() {
        let url = "https://example.com/a/really/long/path/that/cannot/fit/on/one/narrow/line";
        let lines = wrap_text(url, helvetica(), 10.0, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
        for line in &lines {
            assert!(helvetica().width_mm(line, 10.0) <= 30.0);
        }
    }
}
