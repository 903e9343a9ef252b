//! Building blocks shared by the templates.

use crate::edit::{FieldBinding, Section};
use crate::models::{Education, HasContent, Language, PersonalDetails, Skill};
use crate::render::{Node, Role, SectionBlock};

fn personal(field: &'static str) -> FieldBinding {
    FieldBinding::singleton(Section::PersonalDetails, field)
}

pub fn name(details: &PersonalDetails) -> Node {
    Node::field(personal("fullName"), &details.full_name, Role::Name, "Full name")
}

/// Email, phone and location, skipping blank ones.
pub fn contact_items(details: &PersonalDetails) -> Vec<Node> {
    [
        ("email", &details.email, "Email address"),
        ("phone", &details.phone, "Phone number"),
        ("location", &details.location, "Location"),
    ]
    .into_iter()
    .filter(|(_, value, _)| value.has_content())
    .map(|(field, value, label)| Node::field(personal(field), value, Role::Contact, label))
    .collect()
}

/// LinkedIn and GitHub links, skipping blank ones.
pub fn profile_links(details: &PersonalDetails) -> Vec<Node> {
    [
        ("linkedin", &details.linkedin, "LinkedIn profile"),
        ("github", &details.github, "GitHub profile"),
    ]
    .into_iter()
    .filter(|(_, value, _)| value.has_content())
    .map(|(field, value, label)| Node::link(personal(field), value, label))
    .collect()
}

/// Interleaves `separator` text between nodes.
pub fn joined(nodes: Vec<Node>, separator: &str, role: Role) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len() * 2);
    for (i, node) in nodes.into_iter().enumerate() {
        if i > 0 {
            out.push(Node::text(separator, role));
        }
        out.push(node);
    }
    out
}

/// `start - end`, with a blank end shown as "Present". Empty when both are blank.
pub fn date_range(section: Section, index: usize, start: &str, end: &str) -> Vec<Node> {
    if !start.has_content() && !end.has_content() {
        return Vec::new();
    }
    vec![
        Node::field(
            FieldBinding::entry(section, index, "startDate"),
            start,
            Role::Date,
            "Start date",
        ),
        Node::text("-", Role::Date),
        Node::field(
            FieldBinding::entry(section, index, "endDate"),
            end,
            Role::Date,
            "End date",
        )
        .or_placeholder("Present"),
    ]
}

pub fn objective_section(objective: &str, heading: &'static str) -> Option<SectionBlock> {
    objective.has_content().then(|| SectionBlock {
        section: Section::Objective,
        heading,
        body: vec![Node::multiline(
            FieldBinding::singleton(Section::Objective, "objective"),
            objective,
            "Professional summary",
        )],
    })
}

/// Builds a list section when `entries` is non-empty.
pub fn list_section<T>(
    section: Section,
    heading: &'static str,
    entries: &[T],
    entry: impl Fn(usize, &T) -> Vec<Node>,
) -> Option<SectionBlock> {
    if entries.is_empty() {
        return None;
    }
    Some(SectionBlock {
        section,
        heading,
        body: entries
            .iter()
            .enumerate()
            .map(|(i, item)| Node::Entry(entry(i, item)))
            .collect(),
    })
}

pub fn grade_line(index: usize, education: &Education) -> Option<Node> {
    education.grade.has_content().then(|| {
        Node::Line(vec![
            Node::text("GPA:", Role::Body),
            Node::field(
                FieldBinding::entry(Section::Education, index, "grade"),
                &education.grade,
                Role::Body,
                "GPA",
            ),
        ])
    })
}

/// `category : skills (level)`
pub fn skill_line(index: usize, skill: &Skill) -> Node {
    let mut line = Vec::new();
    if skill.category.has_content() {
        line.push(Node::field(
            FieldBinding::entry(Section::Skills, index, "category"),
            &skill.category,
            Role::Label,
            "Skill category",
        ));
        line.push(Node::text(":", Role::Label));
    }
    line.push(Node::field(
        FieldBinding::entry(Section::Skills, index, "skills"),
        &skill.skills,
        Role::Body,
        "Skills",
    ));
    if let Some(level) = skill.proficiency {
        line.push(Node::field(
            FieldBinding::entry(Section::Skills, index, "proficiency"),
            level.as_str(),
            Role::Date,
            "Skill proficiency",
        ));
    }
    Node::Line(line)
}

/// `language - level`
pub fn language_line(index: usize, language: &Language) -> Node {
    let mut line = vec![Node::field(
        FieldBinding::entry(Section::Languages, index, "language"),
        &language.language,
        Role::EntryTitle,
        "Language name",
    )];
    if let Some(level) = language.proficiency {
        line.push(Node::text("-", Role::Body));
        line.push(Node::field(
            FieldBinding::entry(Section::Languages, index, "proficiency"),
            level.as_str(),
            Role::Subtitle,
            "Language proficiency",
        ));
    }
    Node::Line(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;
    use crate::render::Field;

    fn field_names(nodes: &[Node]) -> Vec<&'static str> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Field(Field { binding, .. }) => Some(binding.field),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_contact_items_skip_blank_values() {
        let details = PersonalDetails {
            email: "a@b.com".to_string(),
            phone: "  ".to_string(),
            location: "Oslo".to_string(),
            ..Default::default()
        };
        assert_eq!(field_names(&contact_items(&details)), vec!["email", "location"]);
        assert!(profile_links(&details).is_empty());
    }

    #[test]
    fn test_joined_interleaves_separators() {
        let nodes = vec![Node::text("a", Role::Body), Node::text("b", Role::Body)];
        let out = joined(nodes, "|", Role::Contact);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], Node::text("|", Role::Contact));
        assert!(joined(vec![], "|", Role::Contact).is_empty());
    }

    #[test]
    fn test_date_range_placeholder_for_open_end() {
        let nodes = date_range(Section::WorkExperience, 0, "2019-04", "");
        assert_eq!(nodes.len(), 3);
        match &nodes[2] {
            Node::Field(field) => {
                assert_eq!(field.binding.field, "endDate");
                assert_eq!(field.placeholder, Some("Present"));
            }
            other => panic!("unexpected node {other:?}"),
        }
        assert!(date_range(Section::Education, 0, "", " ").is_empty());
    }

    #[test]
    fn test_skill_line_includes_level_when_set() {
        let skill = Skill {
            category: "Backend".to_string(),
            skills: "Rust, Go".to_string(),
            proficiency: Some(SkillLevel::Advanced),
        };
        match skill_line(3, &skill) {
            Node::Line(nodes) => {
                assert_eq!(
                    field_names(&nodes),
                    vec!["category", "skills", "proficiency"]
                );
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_list_section_empty_is_none() {
        let entries: Vec<Skill> = vec![];
        assert!(list_section(Section::Skills, "Skills", &entries, |i, s| vec![skill_line(i, s)])
            .is_none());
    }
}
