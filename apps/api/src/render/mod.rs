//! Template composition tree.
//!
//! Templates describe a resume as a small tree of sections, entries, lines and
//! fields. The tree does not depend on the render mode: the HTML renderer turns
//! each [`Field`] into text or an editable control, and the PDF exporter lays
//! the same tree out on pages.

pub mod html;
pub mod markdown;

use crate::edit::{FieldBinding, Section};
use crate::templates::TemplateId;

pub use html::render_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    View,
    Edit,
}

/// Typographic role of a piece of text. Each template maps roles onto sizes,
/// weights and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Name,
    Contact,
    Link,
    EntryTitle,
    Subtitle,
    Date,
    Label,
    Body,
}

impl Role {
    pub fn css_class(self) -> &'static str {
        match self {
            Role::Name => "role-name",
            Role::Contact => "role-contact",
            Role::Link => "role-link",
            Role::EntryTitle => "role-title",
            Role::Subtitle => "role-subtitle",
            Role::Date => "role-date",
            Role::Label => "role-label",
            Role::Body => "role-body",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Link,
}

/// A bound, user-editable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub binding: FieldBinding,
    pub value: String,
    pub kind: FieldKind,
    pub role: Role,
    pub label: &'static str,
    /// Shown in view mode when the value is blank.
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Field(Field),
    Text { text: String, role: Role },
    /// Children laid out inline on one line.
    Line(Vec<Node>),
    /// Left part flush left, right part flush right.
    Split { left: Vec<Node>, right: Vec<Node> },
    /// One item of a list section.
    Entry(Vec<Node>),
}

impl Node {
    pub fn field(binding: FieldBinding, value: &str, role: Role, label: &'static str) -> Node {
        Node::Field(Field {
            binding,
            value: value.to_string(),
            kind: FieldKind::Text,
            role,
            label,
            placeholder: None,
        })
    }

    pub fn multiline(binding: FieldBinding, value: &str, label: &'static str) -> Node {
        Node::Field(Field {
            binding,
            value: value.to_string(),
            kind: FieldKind::Multiline,
            role: Role::Body,
            label,
            placeholder: None,
        })
    }

    pub fn link(binding: FieldBinding, value: &str, label: &'static str) -> Node {
        Node::Field(Field {
            binding,
            value: value.to_string(),
            kind: FieldKind::Link,
            role: Role::Link,
            label,
            placeholder: None,
        })
    }

    pub fn text(text: impl Into<String>, role: Role) -> Node {
        Node::Text {
            text: text.into(),
            role,
        }
    }

    /// Sets the view-mode placeholder on a field node; other nodes are unchanged.
    pub fn or_placeholder(mut self, placeholder: &'static str) -> Node {
        if let Node::Field(field) = &mut self {
            field.placeholder = Some(placeholder);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub section: Section,
    pub heading: &'static str,
    pub body: Vec<Node>,
}

/// A template applied to one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub template: TemplateId,
    pub header: Vec<Node>,
    pub sections: Vec<SectionBlock>,
}

impl Composition {
    pub fn section(&self, section: Section) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// Every field in document order.
    pub fn fields(&self) -> Vec<&Field> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Field>) {
            for node in nodes {
                match node {
                    Node::Field(field) => out.push(field),
                    Node::Text { .. } => {}
                    Node::Line(children) | Node::Entry(children) => walk(children, out),
                    Node::Split { left, right } => {
                        walk(left, out);
                        walk(right, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.header, &mut out);
        for section in &self.sections {
            walk(&section.body, &mut out);
        }
        out
    }
}
