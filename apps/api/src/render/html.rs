//! HTML output for a composition.
//!
//! View mode renders text through the markdown transform and link fields as
//! anchors. Edit mode swaps every field for an `<input>` or `<textarea>` tagged
//! with its binding (`data-section`, `data-index`, `data-field`); the client
//! posts those back as field updates.

use crate::layout::FontFamily;
use crate::render::markdown::render_markdown;
use crate::render::{Composition, Field, FieldKind, Node, RenderMode, SectionBlock};
use crate::templates::{Align, TemplateStyle};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Only these schemes become clickable.
pub fn is_safe_href(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
}

fn css_font_stack(font: FontFamily) -> &'static str {
    match font {
        FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
        FontFamily::Times => "'Times New Roman', Times, serif",
    }
}

fn stylesheet(style: &TemplateStyle) -> String {
    let header_align = match style.header_align {
        Align::Left => "left",
        Align::Center => "center",
    };
    let heading_transform = if style.uppercase_headings {
        "uppercase"
    } else {
        "none"
    };
    format!(
        "<style>\
.resume{{max-width:210mm;margin:0 auto;background:#fff;padding:{pad}mm;font-family:{font};color:{text};font-size:{body}pt;}}\
.resume-header{{text-align:{header_align};margin-bottom:6mm;}}\
.resume-section{{margin-bottom:5mm;}}\
.resume-section h2{{color:{accent};font-size:{heading}pt;text-transform:{heading_transform};border-bottom:1px solid {accent};margin:0 0 2mm;}}\
.entry{{margin-bottom:3mm;}}\
.line{{display:flex;flex-wrap:wrap;gap:0.4em;align-items:baseline;}}\
.resume-header .line{{justify-content:{flex_align};}}\
.split{{display:flex;justify-content:space-between;align-items:baseline;gap:1em;}}\
.role-name{{font-size:{name}pt;font-weight:bold;color:{accent};}}\
.role-contact{{font-size:{small}pt;color:{muted};}}\
.role-link{{font-size:{small}pt;color:{accent};}}\
.role-title{{font-weight:bold;}}\
.role-subtitle{{color:{accent};}}\
.role-date{{font-size:{small}pt;color:{accent};}}\
.role-label{{font-weight:bold;color:{accent};}}\
input.field,textarea.field{{font:inherit;color:inherit;border:1px solid #d1d5db;border-radius:4px;padding:1px 4px;}}\
textarea.field{{width:100%;min-height:60px;}}\
@media print{{.resume{{box-shadow:none;}}a{{text-decoration:none;}}}}\
</style>",
        pad = style.padding_mm,
        font = css_font_stack(style.font),
        text = style.text.hex(),
        body = style.body_size_pt,
        accent = style.accent.hex(),
        heading = style.heading_size_pt,
        name = style.name_size_pt,
        small = style.small_size_pt,
        muted = style.muted.hex(),
        flex_align = if style.header_align == Align::Center {
            "center"
        } else {
            "flex-start"
        },
    )
}

fn binding_attrs(field: &Field) -> String {
    let mut attrs = format!(
        " data-section=\"{}\" data-field=\"{}\" aria-label=\"{}\"",
        field.binding.section.key(),
        field.binding.field,
        escape_html(field.label)
    );
    if let Some(index) = field.binding.index {
        attrs.push_str(&format!(" data-index=\"{index}\""));
    }
    attrs
}

fn render_field(field: &Field, mode: RenderMode, out: &mut String) {
    let class = field.role.css_class();
    match mode {
        RenderMode::Edit => match field.kind {
            FieldKind::Multiline => out.push_str(&format!(
                "<textarea class=\"field {class}\"{attrs}>{value}</textarea>",
                attrs = binding_attrs(field),
                value = escape_html(&field.value),
            )),
            FieldKind::Text | FieldKind::Link => out.push_str(&format!(
                "<input type=\"text\" class=\"field {class}\" value=\"{value}\"{attrs}{placeholder}>",
                value = escape_html(&field.value),
                attrs = binding_attrs(field),
                placeholder = field
                    .placeholder
                    .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
                    .unwrap_or_default(),
            )),
        },
        RenderMode::View => {
            let shown = match field.placeholder {
                Some(placeholder) if field.value.trim().is_empty() => placeholder,
                _ => field.value.as_str(),
            };
            match field.kind {
                FieldKind::Link if is_safe_href(shown) => out.push_str(&format!(
                    "<a class=\"field {class}\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"{label}\">{text}</a>",
                    href = escape_html(shown.trim()),
                    label = escape_html(field.label),
                    text = escape_html(shown),
                )),
                FieldKind::Link => out.push_str(&format!(
                    "<span class=\"field {class}\">{}</span>",
                    escape_html(shown)
                )),
                FieldKind::Multiline => out.push_str(&format!(
                    "<div class=\"field {class}\">{}</div>",
                    render_markdown(shown)
                )),
                FieldKind::Text => out.push_str(&format!(
                    "<span class=\"field {class}\">{}</span>",
                    render_markdown(shown)
                )),
            }
        }
    }
}

fn render_nodes(nodes: &[Node], mode: RenderMode, out: &mut String) {
    for node in nodes {
        render_node(node, mode, out);
    }
}

fn render_node(node: &Node, mode: RenderMode, out: &mut String) {
    match node {
        Node::Field(field) => render_field(field, mode, out),
        Node::Text { text, role } => out.push_str(&format!(
            "<span class=\"{}\">{}</span>",
            role.css_class(),
            escape_html(text)
        )),
        Node::Line(children) => {
            out.push_str("<div class=\"line\">");
            render_nodes(children, mode, out);
            out.push_str("</div>");
        }
        Node::Split { left, right } => {
            out.push_str("<div class=\"split\"><div class=\"line\">");
            render_nodes(left, mode, out);
            out.push_str("</div><div class=\"line\">");
            render_nodes(right, mode, out);
            out.push_str("</div></div>");
        }
        Node::Entry(children) => {
            out.push_str("<div class=\"entry\">");
            for child in children {
                render_block_child(child, mode, out);
            }
            out.push_str("</div>");
        }
    }
}

/// A bare field directly inside an entry or section gets its own row.
fn render_block_child(node: &Node, mode: RenderMode, out: &mut String) {
    match node {
        Node::Field(_) | Node::Text { .. } => {
            out.push_str("<div class=\"line\">");
            render_node(node, mode, out);
            out.push_str("</div>");
        }
        other => render_node(other, mode, out),
    }
}

fn render_section(section: &SectionBlock, mode: RenderMode, out: &mut String) {
    out.push_str(&format!(
        "<section class=\"resume-section\" data-section=\"{}\"><h2>{}</h2>",
        section.section.key(),
        escape_html(section.heading)
    ));
    for node in &section.body {
        render_block_child(node, mode, out);
    }
    out.push_str("</section>");
}

/// Renders a full resume as an HTML fragment rooted at `#resume-content`.
pub fn render_html(composition: &Composition, style: &TemplateStyle, mode: RenderMode) -> String {
    let mode_attr = match mode {
        RenderMode::View => "view",
        RenderMode::Edit => "edit",
    };
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(&format!(
        "<article id=\"resume-content\" class=\"resume resume-{}\" data-mode=\"{mode_attr}\">",
        composition.template
    ));
    out.push_str(&stylesheet(style));
    out.push_str("<header class=\"resume-header\">");
    for node in &composition.header {
        render_block_child(node, mode, &mut out);
    }
    out.push_str("</header>");
    for section in &composition.sections {
        render_section(section, mode, &mut out);
    }
    out.push_str("</article>");
    out
}
