//! Minimal inline markdown: `**bold**` and `- ` bullet lines.

use std::sync::OnceLock;

use regex::Regex;

use crate::render::html::escape_html;

fn bold_regex() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

/// Converts field text to HTML. The text is escaped before any markup is added.
pub fn render_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.split('\n')
        .map(|line| {
            let escaped = escape_html(line);
            let line = bold_regex()
                .replace_all(&escaped, "<strong>$1</strong>")
                .into_owned();
            match line.trim_start().strip_prefix("- ") {
                Some(rest) => format!("<br/>\u{2022} {rest}"),
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A line of field text with markup removed, for the PDF exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainLine {
    pub bullet: bool,
    pub text: String,
}

pub fn plain_lines(text: &str) -> Vec<PlainLine> {
    text.split('\n')
        .map(|line| {
            let stripped = bold_regex().replace_all(line, "$1").into_owned();
            match stripped.trim_start().strip_prefix("- ") {
                Some(rest) => PlainLine {
                    bullet: true,
                    text: rest.trim().to_string(),
                },
                None => PlainLine {
                    bullet: false,
                    text: stripped.trim().to_string(),
                },
            }
        })
        .filter(|line| line.bullet || !line.text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_is_converted() {
        assert_eq!(
            render_markdown("Led **three** teams"),
            "Led <strong>three</strong> teams"
        );
    }

    #[test]
    fn test_bullet_lines_get_break_and_dot() {
        assert_eq!(
            render_markdown("Highlights:\n- Shipped v2\n  - Cut costs"),
            "Highlights:\n<br/>\u{2022} Shipped v2\n<br/>\u{2022} Cut costs"
        );
    }

    #[test]
    fn test_html_is_escaped_before_markup() {
        assert_eq!(
            render_markdown("<script>x</script> **a&b**"),
            "&lt;script&gt;x&lt;/script&gt; <strong>a&amp;b</strong>"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(render_markdown(""), "");
        assert!(plain_lines("").is_empty());
    }

    #[test]
    fn test_plain_lines_strip_markup() {
        let lines = plain_lines("Built **fast** things\n\n- one\n- **two**");
        assert_eq!(
            lines,
            vec![
                PlainLine {
                    bullet: false,
                    text: "Built fast things".to_string()
                },
                PlainLine {
                    bullet: true,
                    text: "one".to_string()
                },
                PlainLine {
                    bullet: true,
                    text: "two".to_string()
                },
            ]
        );
    }
}
