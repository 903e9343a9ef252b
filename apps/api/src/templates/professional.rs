use crate::edit::{FieldBinding, Section};
use crate::layout::FontFamily;
use crate::models::{HasContent, ResumeData};
use crate::render::{Composition, Node, Role};
use crate::templates::blocks::{
    contact_items, date_range, grade_line, joined, language_line, list_section, name,
    objective_section, profile_links, skill_line,
};
use crate::templates::{Align, Rgb, Template, TemplateId, TemplateStyle};

/// Serif, navy headings, employer-first experience entries.
pub struct ProfessionalTemplate;

static STYLE: TemplateStyle = TemplateStyle {
    font: FontFamily::Times,
    accent: Rgb::new(30, 58, 138),
    text: Rgb::new(17, 24, 39),
    muted: Rgb::new(55, 65, 81),
    name_size_pt: 24.0,
    heading_size_pt: 12.0,
    body_size_pt: 10.5,
    small_size_pt: 9.5,
    header_align: Align::Center,
    uppercase_headings: true,
    padding_mm: 14.0,
};

impl Template for ProfessionalTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Professional
    }

    fn style(&self) -> &TemplateStyle {
        &STYLE
    }

    fn compose(&self, data: &ResumeData) -> Composition {
        let details = &data.personal_details;

        let mut header = vec![Node::Line(vec![name(details)])];
        let contacts = contact_items(details);
        if !contacts.is_empty() {
            header.push(Node::Line(joined(contacts, "\u{00b7}", Role::Contact)));
        }
        let links = profile_links(details);
        if !links.is_empty() {
            header.push(Node::Line(joined(links, "\u{00b7}", Role::Contact)));
        }

        let sections = [
            objective_section(&data.objective, "Career Objective"),
            list_section(
                Section::WorkExperience,
                "Professional Experience",
                &data.work_experience,
                |i, job| {
                    let binding = |field| FieldBinding::entry(Section::WorkExperience, i, field);
                    let mut location = Vec::new();
                    if job.location.has_content() {
                        location.push(Node::field(
                            binding("location"),
                            &job.location,
                            Role::Contact,
                            "Job location",
                        ));
                    }
                    vec![
                        Node::Split {
                            left: vec![Node::field(
                                binding("companyName"),
                                &job.company_name,
                                Role::EntryTitle,
                                "Company name",
                            )],
                            right: location,
                        },
                        Node::Split {
                            left: vec![Node::field(
                                binding("jobTitle"),
                                &job.job_title,
                                Role::Subtitle,
                                "Job title",
                            )],
                            right: date_range(
                                Section::WorkExperience,
                                i,
                                &job.start_date,
                                &job.end_date,
                            ),
                        },
                        Node::multiline(binding("description"), &job.description, "Job description"),
                    ]
                },
            ),
            list_section(Section::Education, "Education", &data.education, |i, edu| {
                let binding = |field| FieldBinding::entry(Section::Education, i, field);
                let mut location = Vec::new();
                if edu.location.has_content() {
                    location.push(Node::field(
                        binding("location"),
                        &edu.location,
                        Role::Contact,
                        "School location",
                    ));
                }
                let mut entry = vec![
                    Node::Split {
                        left: vec![Node::field(
                            binding("institution"),
                            &edu.institution,
                            Role::EntryTitle,
                            "Institution",
                        )],
                        right: location,
                    },
                    Node::Split {
                        left: vec![Node::field(
                            binding("degree"),
                            &edu.degree,
                            Role::Subtitle,
                            "Degree",
                        )],
                        right: date_range(Section::Education, i, &edu.start_date, &edu.end_date),
                    },
                ];
                entry.extend(grade_line(i, edu));
                entry
            }),
            list_section(
                Section::Certifications,
                "Certifications",
                &data.certifications,
                |i, cert| {
                    let binding = |field| FieldBinding::entry(Section::Certifications, i, field);
                    vec![Node::Split {
                        left: vec![
                            Node::field(
                                binding("certificationName"),
                                &cert.certification_name,
                                Role::EntryTitle,
                                "Certification name",
                            ),
                            Node::text(",", Role::Body),
                            Node::field(
                                binding("issuingOrganization"),
                                &cert.issuing_organization,
                                Role::Subtitle,
                                "Issuing organization",
                            ),
                        ],
                        right: vec![Node::field(
                            binding("issueDate"),
                            &cert.issue_date,
                            Role::Date,
                            "Certification date",
                        )],
                    }]
                },
            ),
            list_section(Section::Skills, "Skills", &data.skills, |i, skill| {
                vec![skill_line(i, skill)]
            }),
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
            list_section(Section::Languages, "Languages", &data.languages, |i, lang| {
                vec![language_line(i, lang)]
            }),
        ];

        Composition {
            template: TemplateId::Professional,
            header,
            sections: sections.into_iter().flatten().collect(),
        }
    }
}
