//! The template set.
//!
//! A template is a pure mapping from `ResumeData` to a [`Composition`] plus the
//! typography used to draw it. The identifier set is closed; every place that
//! reads an identifier from outside (query string, cookie, stored document)
//! goes through [`TemplateId::from_str`] and keeps its current choice on failure.

pub mod blocks;
pub mod minimal;
pub mod modern;
pub mod professional;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::FontFamily;
use crate::models::ResumeData;
use crate::render::{Composition, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Minimal,
    Professional,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Modern,
        TemplateId::Minimal,
        TemplateId::Professional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Minimal => "minimal",
            TemplateId::Professional => "professional",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern Template",
            TemplateId::Minimal => "Minimal Template",
            TemplateId::Professional => "Professional Template",
        }
    }

    /// Parses `candidate`, falling back to `current` when it is absent or unknown.
    pub fn or_keep(candidate: Option<&str>, current: TemplateId) -> TemplateId {
        candidate
            .and_then(|s| s.parse().ok())
            .unwrap_or(current)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Resolved look of one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateStyle {
    pub font: FontFamily,
    pub accent: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub name_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    pub small_size_pt: f32,
    pub header_align: Align,
    pub uppercase_headings: bool,
    /// Inset of the content from the page edge.
    pub padding_mm: f32,
}

impl TemplateStyle {
    pub fn role(&self, role: Role) -> TextStyle {
        let (size_pt, bold, color) = match role {
            Role::Name => (self.name_size_pt, true, self.accent),
            Role::Contact => (self.small_size_pt, false, self.muted),
            Role::Link => (self.small_size_pt, false, self.accent),
            Role::EntryTitle => (self.body_size_pt + 0.5, true, self.text),
            Role::Subtitle => (self.body_size_pt, false, self.accent),
            Role::Date => (self.small_size_pt, false, self.accent),
            Role::Label => (self.body_size_pt, true, self.accent),
            Role::Body => (self.body_size_pt, false, self.text),
        };
        TextStyle {
            size_pt,
            bold,
            color,
        }
    }

    pub fn heading(&self) -> TextStyle {
        TextStyle {
            size_pt: self.heading_size_pt,
            bold: true,
            color: self.accent,
        }
    }

    pub fn heading_text(&self, heading: &str) -> String {
        if self.uppercase_headings {
            heading.to_uppercase()
        } else {
            heading.to_string()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template trait
// ────────────────────────────────────────────────────────────────────────────

pub trait Template: Send + Sync {
    fn id(&self) -> TemplateId;

    fn style(&self) -> &TemplateStyle;

    /// Arranges `data` into sections. Sections without content are left out.
    fn compose(&self, data: &ResumeData) -> Composition;
}

/// Looks up the renderer for an identifier.
pub fn template(id: TemplateId) -> &'static dyn Template {
    match id {
        TemplateId::Modern => &modern::ModernTemplate,
        TemplateId::Minimal => &minimal::MinimalTemplate,
        TemplateId::Professional => &professional::ProfessionalTemplate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Section;
    use crate::models::{Education, PersonalDetails, Skill, WorkExperience};

    fn sample() -> ResumeData {
        ResumeData {
            personal_details: PersonalDetails {
                full_name: "Katherine Johnson".to_string(),
                email: "kj@nasa.gov".to_string(),
                phone: "757 555 0100".to_string(),
                linkedin: "https://linkedin.com/in/kj".to_string(),
                ..Default::default()
            },
            objective: "Compute trajectories.".to_string(),
            work_experience: vec![WorkExperience {
                job_title: "Mathematician".to_string(),
                company_name: "NASA".to_string(),
                start_date: "1953".to_string(),
                description: "- Orbital mechanics".to_string(),
                ..Default::default()
            }],
            education: vec![Education {
                degree: "BS Mathematics".to_string(),
                institution: "West Virginia State".to_string(),
                ..Default::default()
            }],
            skills: vec![Skill {
                category: "Math".to_string(),
                skills: "Geometry, Calculus".to_string(),
                proficiency: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_template_id_parses_closed_set() {
        assert_eq!("modern".parse::<TemplateId>(), Ok(TemplateId::Modern));
        assert_eq!("minimal".parse::<TemplateId>(), Ok(TemplateId::Minimal));
        assert_eq!(
            "professional".parse::<TemplateId>(),
            Ok(TemplateId::Professional)
        );
        assert!("Modern".parse::<TemplateId>().is_err());
        assert!("fancy".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_or_keep_falls_back_on_unknown() {
        assert_eq!(
            TemplateId::or_keep(Some("fancy"), TemplateId::Professional),
            TemplateId::Professional
        );
        assert_eq!(
            TemplateId::or_keep(None, TemplateId::Minimal),
            TemplateId::Minimal
        );
        assert_eq!(
            TemplateId::or_keep(Some("minimal"), TemplateId::Modern),
            TemplateId::Minimal
        );
    }

    #[test]
    fn test_registry_returns_matching_template() {
        for id in TemplateId::ALL {
            assert_eq!(template(id).id(), id);
        }
    }

    #[test]
    fn test_every_template_omits_empty_sections() {
        let data = sample();
        for id in TemplateId::ALL {
            let composition = template(id).compose(&data);
            assert!(composition.section(Section::WorkExperience).is_some());
            assert!(composition.section(Section::Objective).is_some());
            assert!(composition.section(Section::Projects).is_none(), "{id}");
            assert!(composition.section(Section::Languages).is_none(), "{id}");
            assert!(composition.section(Section::Certifications).is_none(), "{id}");
        }
    }

    #[test]
    fn test_blank_objective_is_omitted() {
        let data = ResumeData {
            objective: "   ".to_string(),
            ..sample()
        };
        for id in TemplateId::ALL {
            let composition = template(id).compose(&data);
            assert!(composition.section(Section::Objective).is_none(), "{id}");
        }
    }

    #[test]
    fn test_every_template_binds_all_populated_fields() {
        let data = sample();
        for id in TemplateId::ALL {
            let composition = template(id).compose(&data);
            let bindings: Vec<_> = composition
                .fields()
                .iter()
                .map(|f| (f.binding.section, f.binding.index, f.binding.field))
                .collect();
            assert!(bindings.contains(&(Section::PersonalDetails, None, "fullName")));
            assert!(bindings.contains(&(Section::WorkExperience, Some(0), "jobTitle")));
            assert!(bindings.contains(&(Section::Education, Some(0), "degree")));
            assert!(bindings.contains(&(Section::Skills, Some(0), "skills")));
        }
    }

    #[test]
    fn test_role_styles_follow_template() {
        let style = template(TemplateId::Professional).style();
        assert_eq!(style.role(Role::Name).color, style.accent);
        assert!(style.role(Role::EntryTitle).bold);
        assert!(!style.role(Role::Body).bold);
        assert_eq!(Rgb::new(14, 116, 144).hex(), "#0e7490");
    }
}
