//! Flows a view-mode composition onto fixed-size pages.
//!
//! Coordinates are millimetres from the top-left corner of the page; the PDF
//! writer flips them. Layout is pure CPU work and runs on the blocking pool.

use crate::layout::font_metrics::{FontFace, MM_PER_PT};
use crate::layout::wrap::wrap_text;
use crate::render::markdown::plain_lines;
use crate::render::{Composition, Field, FieldKind, Node, SectionBlock};
use crate::templates::{Align, Rgb, TemplateStyle, TextStyle};

const LINE_SPACING: f32 = 1.3;
/// Baseline position within a line box, as a fraction of its height.
const BASELINE_RATIO: f32 = 0.78;
const HEADER_GAP_MM: f32 = 4.0;
const SECTION_GAP_MM: f32 = 3.5;
const RULE_GAP_MM: f32 = 1.8;
const ENTRY_GAP_MM: f32 = 1.6;
const SPLIT_GAP_MM: f32 = 4.0;
const BULLET: &str = "- ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    /// A4 portrait, no page margin.
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x_mm: f32,
    /// Baseline, measured from the top edge.
    pub baseline_mm: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
}

/// A horizontal rule under a section heading.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRule {
    pub x1_mm: f32,
    pub x2_mm: f32,
    pub y_mm: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub texts: Vec<PlacedText>,
    pub rules: Vec<PlacedRule>,
}

/// Lays `composition` out with `style`. Always returns at least one page.
pub fn paginate(composition: &Composition, style: &TemplateStyle, geometry: PageGeometry) -> Vec<Page> {
    let mut flow = Flow::new(style, geometry);
    for node in &composition.header {
        flow.block(node, style.header_align);
    }
    if !composition.header.is_empty() {
        flow.y_mm += HEADER_GAP_MM;
    }
    for section in &composition.sections {
        flow.section(section);
    }
    flow.pages
}

// ────────────────────────────────────────────────────────────────────────────
// Inline lines
// ────────────────────────────────────────────────────────────────────────────

struct Span {
    text: String,
    style: TextStyle,
}

struct Run {
    text: String,
    style: TextStyle,
    x_mm: f32,
}

#[derive(Default)]
struct InlineLine {
    runs: Vec<Run>,
    width_mm: f32,
    size_pt: f32,
}

impl InlineLine {
    fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn push(&mut self, text: String, style: TextStyle, gap_mm: f32, width_mm: f32) {
        match self.runs.last_mut() {
            Some(last) if last.style == style => {
                if gap_mm > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(&text);
            }
            _ => self.runs.push(Run {
                text,
                style,
                x_mm: self.width_mm + gap_mm,
            }),
        }
        self.width_mm += gap_mm + width_mm;
        self.size_pt = self.size_pt.max(style.size_pt);
    }

    fn height_mm(&self) -> f32 {
        line_height_mm(self.size_pt)
    }
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * LINE_SPACING * MM_PER_PT
}

/// Punctuation that hugs the preceding word.
fn attaches_left(text: &str) -> bool {
    matches!(text, "," | ":" | ";" | ".")
}

// ────────────────────────────────────────────────────────────────────────────
// Flow state
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    style: &'a TemplateStyle,
    geometry: PageGeometry,
    pages: Vec<Page>,
    /// Top of the next line box.
    y_mm: f32,
}

impl<'a> Flow<'a> {
    fn new(style: &'a TemplateStyle, geometry: PageGeometry) -> Self {
        let mut flow = Self {
            style,
            geometry,
            pages: vec![Page::default()],
            y_mm: 0.0,
        };
        flow.y_mm = flow.top();
        flow
    }

    fn inset(&self) -> f32 {
        self.geometry.margin_mm + self.style.padding_mm
    }

    fn top(&self) -> f32 {
        self.inset()
    }

    fn left(&self) -> f32 {
        self.inset()
    }

    fn bottom(&self) -> f32 {
        self.geometry.height_mm - self.inset()
    }

    fn width(&self) -> f32 {
        self.geometry.width_mm - 2.0 * self.inset()
    }

    fn face(&self, style: TextStyle) -> FontFace {
        FontFace::new(self.style.font, style.bold)
    }

    fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page unless `height_mm` still fits. A fresh page always accepts.
    fn reserve(&mut self, height_mm: f32) {
        if self.y_mm + height_mm > self.bottom() && self.y_mm > self.top() {
            self.pages.push(Page::default());
            self.y_mm = self.top();
        }
    }

    fn place_row(&mut self, parts: &[(&InlineLine, f32)]) {
        let height = parts
            .iter()
            .map(|(line, _)| line.height_mm())
            .fold(0.0_f32, f32::max);
        if height <= 0.0 {
            return;
        }
        self.reserve(height);
        let baseline = self.y_mm + height * BASELINE_RATIO;
        let font = self.style.font;
        let page = self.page();
        for (line, x) in parts {
            for run in &line.runs {
                page.texts.push(PlacedText {
                    text: run.text.clone(),
                    x_mm: x + run.x_mm,
                    baseline_mm: baseline,
                    face: FontFace::new(font, run.style.bold),
                    size_pt: run.style.size_pt,
                    color: run.style.color,
                });
            }
        }
        self.y_mm += height;
    }

    fn aligned_x(&self, line: &InlineLine, align: Align) -> f32 {
        match align {
            Align::Left => self.left(),
            Align::Center => self.left() + ((self.width() - line.width_mm) / 2.0).max(0.0),
        }
    }

    // ── inline content ──────────────────────────────────────────────────────

    fn field_text(field: &Field) -> Option<String> {
        if field.value.trim().is_empty() {
            return field.placeholder.map(str::to_string);
        }
        Some(match field.kind {
            FieldKind::Multiline => plain_lines(&field.value)
                .into_iter()
                .map(|line| line.text)
                .collect::<Vec<_>>()
                .join(" "),
            FieldKind::Text | FieldKind::Link => field.value.clone(),
        })
    }

    fn spans(&self, nodes: &[Node], out: &mut Vec<Span>) {
        for node in nodes {
            match node {
                Node::Field(field) => {
                    if let Some(text) = Self::field_text(field) {
                        out.push(Span {
                            text,
                            style: self.style.role(field.role),
                        });
                    }
                }
                Node::Text { text, role } => out.push(Span {
                    text: text.clone(),
                    style: self.style.role(*role),
                }),
                Node::Line(children) | Node::Entry(children) => self.spans(children, out),
                Node::Split { left, right } => {
                    self.spans(left, out);
                    self.spans(right, out);
                }
            }
        }
    }

    fn wrap_spans(&self, spans: &[Span], width_mm: f32) -> Vec<InlineLine> {
        let mut lines = Vec::new();
        let mut line = InlineLine::default();
        for span in spans {
            let metrics = self.face(span.style).metrics();
            let size = span.style.size_pt;
            let hugs = attaches_left(span.text.trim());
            for (i, word) in span.text.split_whitespace().enumerate() {
                let spaced = !(i == 0 && hugs);
                let pieces = if metrics.width_mm(word, size) > width_mm {
                    wrap_text(word, metrics, size, width_mm)
                } else {
                    vec![word.to_string()]
                };
                for piece in pieces {
                    let w = metrics.width_mm(&piece, size);
                    let gap = if line.is_empty() || !spaced {
                        0.0
                    } else {
                        metrics.space_width_mm(size)
                    };
                    if !line.is_empty() && line.width_mm + gap + w > width_mm {
                        lines.push(std::mem::take(&mut line));
                        line.push(piece, span.style, 0.0, w);
                    } else {
                        line.push(piece, span.style, gap, w);
                    }
                }
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn inline_block(&mut self, nodes: &[Node], align: Align) {
        let mut spans = Vec::new();
        self.spans(nodes, &mut spans);
        for line in self.wrap_spans(&spans, self.width()) {
            let x = self.aligned_x(&line, align);
            self.place_row(&[(&line, x)]);
        }
    }

    fn split(&mut self, left: &[Node], right: &[Node]) {
        let mut right_spans = Vec::new();
        self.spans(right, &mut right_spans);
        let right_lines = self.wrap_spans(&right_spans, self.width() / 2.0);
        let right_width = right_lines
            .iter()
            .map(|l| l.width_mm)
            .fold(0.0_f32, f32::max);
        let left_width = if right_lines.is_empty() {
            self.width()
        } else {
            self.width() - right_width - SPLIT_GAP_MM
        };

        let mut left_spans = Vec::new();
        self.spans(left, &mut left_spans);
        let left_lines = self.wrap_spans(&left_spans, left_width);

        let right_edge = self.left() + self.width();
        for row in 0..left_lines.len().max(right_lines.len()) {
            let mut parts = Vec::with_capacity(2);
            if let Some(line) = left_lines.get(row) {
                parts.push((line, self.left()));
            }
            if let Some(line) = right_lines.get(row) {
                parts.push((line, right_edge - line.width_mm));
            }
            self.place_row(&parts);
        }
    }

    fn paragraphs(&mut self, field: &Field) {
        let style = self.style.role(field.role);
        let metrics = self.face(style).metrics();
        let size = style.size_pt;
        let indent = metrics.width_mm(BULLET, size);
        for paragraph in plain_lines(&field.value) {
            let (x, width) = if paragraph.bullet {
                (self.left() + indent, self.width() - indent)
            } else {
                (self.left(), self.width())
            };
            for (i, text) in wrap_text(&paragraph.text, metrics, size, width)
                .into_iter()
                .enumerate()
            {
                let mut line = InlineLine::default();
                let w = metrics.width_mm(&text, size);
                line.push(text, style, 0.0, w);
                if paragraph.bullet && i == 0 {
                    let mut bullet = InlineLine::default();
                    bullet.push(BULLET.trim_end().to_string(), style, 0.0, indent);
                    self.place_row(&[(&bullet, self.left()), (&line, x)]);
                } else {
                    self.place_row(&[(&line, x)]);
                }
            }
        }
    }

    // ── blocks ──────────────────────────────────────────────────────────────

    fn block(&mut self, node: &Node, align: Align) {
        match node {
            Node::Field(field) if field.kind == FieldKind::Multiline => self.paragraphs(field),
            Node::Split { left, right } => self.split(left, right),
            Node::Entry(children) => {
                for child in children {
                    self.block(child, Align::Left);
                }
                self.y_mm += ENTRY_GAP_MM;
            }
            other => self.inline_block(std::slice::from_ref(other), align),
        }
    }

    fn section(&mut self, section: &SectionBlock) {
        let heading = self.style.heading();
        let heading_height = line_height_mm(heading.size_pt);
        // Keep the heading on the same page as the first body line.
        self.reserve(heading_height + RULE_GAP_MM + line_height_mm(self.style.body_size_pt));

        let text = self.style.heading_text(section.heading);
        let metrics = self.face(heading).metrics();
        let mut line = InlineLine::default();
        let w = metrics.width_mm(&text, heading.size_pt);
        line.push(text, heading, 0.0, w);
        let x = self.left();
        self.place_row(&[(&line, x)]);

        let rule = PlacedRule {
            x1_mm: self.left(),
            x2_mm: self.left() + self.width(),
            y_mm: self.y_mm,
            color: heading.color,
        };
        self.page().rules.push(rule);
        self.y_mm += RULE_GAP_MM;

        for node in &section.body {
            self.block(node, Align::Left);
        }
        self.y_mm += SECTION_GAP_MM;
    }
}
