use crate::edit::{FieldBinding, Section};
use crate::layout::FontFamily;
use crate::models::{HasContent, ResumeData};
use crate::render::{Composition, Node, Role};
use crate::templates::blocks::{
    contact_items, date_range, grade_line, language_line, list_section, name, objective_section,
    profile_links, skill_line,
};
use crate::templates::{Align, Rgb, Template, TemplateId, TemplateStyle};

/// Left-aligned header with a cyan accent.
pub struct ModernTemplate;

static STYLE: TemplateStyle = TemplateStyle {
    font: FontFamily::Helvetica,
    accent: Rgb::new(14, 116, 144),
    text: Rgb::new(31, 41, 55),
    muted: Rgb::new(75, 85, 99),
    name_size_pt: 26.0,
    heading_size_pt: 13.0,
    body_size_pt: 10.0,
    small_size_pt: 9.0,
    header_align: Align::Left,
    uppercase_headings: false,
    padding_mm: 12.0,
};

impl Template for ModernTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn style(&self) -> &TemplateStyle {
        &STYLE
    }

    fn compose(&self, data: &ResumeData) -> Composition {
        let details = &data.personal_details;

        let mut header = vec![Node::Line(vec![name(details)])];
        let contacts = contact_items(details);
        if !contacts.is_empty() {
            header.push(Node::Line(contacts));
        }
        let links = profile_links(details);
        if !links.is_empty() {
            header.push(Node::Line(links));
        }

        let sections = [
            objective_section(&data.objective, "Professional Summary"),
            list_section(
                Section::WorkExperience,
                "Work Experience",
                &data.work_experience,
                |i, job| {
                    let binding = |field| FieldBinding::entry(Section::WorkExperience, i, field);
                    vec![
                        Node::Split {
                            left: vec![Node::field(
                                binding("jobTitle"),
                                &job.job_title,
                                Role::EntryTitle,
                                "Job title",
                            )],
                            right: date_range(
                                Section::WorkExperience,
                                i,
                                &job.start_date,
                                &job.end_date,
                            ),
                        },
                        Node::field(
                            binding("companyName"),
                            &job.company_name,
                            Role::Subtitle,
                            "Company name",
                        ),
                        Node::multiline(binding("description"), &job.description, "Job description"),
                    ]
                },
            ),
            list_section(Section::Projects, "Projects", &data.projects, |i, project| {
                let binding = |field| FieldBinding::entry(Section::Projects, i, field);
                let mut right = Vec::new();
                if project.link.has_content() {
                    right.push(Node::link(binding("link"), &project.link, "Project link"));
                }
                vec![
                    Node::Split {
                        left: vec![Node::field(
                            binding("projectName"),
                            &project.project_name,
                            Role::EntryTitle,
                            "Project name",
                        )],
                        right,
                    },
                    Node::multiline(
                        binding("description"),
                        &project.description,
                        "Project description",
                    ),
                ]
            }),
            list_section(Section::Education, "Education", &data.education, |i, edu| {
                let binding = |field| FieldBinding::entry(Section::Education, i, field);
                let mut entry = vec![
                    Node::Split {
                        left: vec![Node::field(
                            binding("degree"),
                            &edu.degree,
                            Role::EntryTitle,
                            "Degree",
                        )],
                        right: date_range(Section::Education, i, &edu.start_date, &edu.end_date),
                    },
                    Node::field(
                        binding("institution"),
                        &edu.institution,
                        Role::Subtitle,
                        "Institution",
                    ),
                ];
                entry.extend(grade_line(i, edu));
                entry
            }),
            list_section(Section::Skills, "Technical Skills", &data.skills, |i, skill| {
                vec![skill_line(i, skill)]
            }),
            list_section(
                Section::Certifications,
                "Certifications",
                &data.certifications,
                |i, cert| {
                    let binding = |field| FieldBinding::entry(Section::Certifications, i, field);
                    vec![
                        Node::Split {
                            left: vec![Node::field(
                                binding("certificationName"),
                                &cert.certification_name,
                                Role::EntryTitle,
                                "Certification name",
                            )],
                            right: vec![Node::field(
                                binding("issueDate"),
                                &cert.issue_date,
                                Role::Date,
                                "Certification date",
                            )],
                        },
                        Node::field(
                            binding("issuingOrganization"),
                            &cert.issuing_organization,
                            Role::Subtitle,
                            "Issuing organization",
                        ),
                    ]
                },
            ),
            list_section(Section::Languages, "Languages", &data.languages, |i, lang| {
                vec![language_line(i, lang)]
            }),
        ];

        Composition {
            template: TemplateId::Modern,
            header,
            sections: sections.into_iter().flatten().collect(),
        }
    }
}
