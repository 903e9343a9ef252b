use crate::edit::{FieldBinding, Section};
use crate::layout::FontFamily;
use crate::models::{HasContent, ResumeData};
use crate::render::{Composition, Node, Role};
use crate::templates::blocks::{
    contact_items, date_range, grade_line, joined, language_line, list_section, name,
    objective_section, profile_links, skill_line,
};
use crate::templates::{Align, Rgb, Template, TemplateId, TemplateStyle};

/// Centered, monochrome, one contact line separated by bars.
pub struct MinimalTemplate;

static STYLE: TemplateStyle = TemplateStyle {
    font: FontFamily::Helvetica,
    accent: Rgb::new(17, 24, 39),
    text: Rgb::new(31, 41, 55),
    muted: Rgb::new(107, 114, 128),
    name_size_pt: 22.0,
    heading_size_pt: 10.5,
    body_size_pt: 10.0,
    small_size_pt: 9.0,
    header_align: Align::Center,
    uppercase_headings: true,
    padding_mm: 16.0,
};

impl Template for MinimalTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Minimal
    }

    fn style(&self) -> &TemplateStyle {
        &STYLE
    }

    fn compose(&self, data: &ResumeData) -> Composition {
        let details = &data.personal_details;

        let mut header = vec![Node::Line(vec![name(details)])];
        let mut contact = contact_items(details);
        contact.extend(profile_links(details));
        if !contact.is_empty() {
            header.push(Node::Line(joined(contact, "|", Role::Contact)));
        }

        let sections = [
            objective_section(&data.objective, "Summary"),
            list_section(
                Section::WorkExperience,
                "Experience",
                &data.work_experience,
                |i, job| {
                    let binding = |field| FieldBinding::entry(Section::WorkExperience, i, field);
                    let mut title = vec![Node::field(
                        binding("jobTitle"),
                        &job.job_title,
                        Role::EntryTitle,
                        "Job title",
                    )];
                    if job.company_name.has_content() {
                        title.push(Node::text(",", Role::EntryTitle));
                        title.push(Node::field(
                            binding("companyName"),
                            &job.company_name,
                            Role::Body,
                            "Company name",
                        ));
                    }
                    let mut entry = vec![Node::Split {
                        left: title,
                        right: date_range(
                            Section::WorkExperience,
                            i,
                            &job.start_date,
                            &job.end_date,
                        ),
                    }];
                    if job.location.has_content() {
                        entry.push(Node::field(
                            binding("location"),
                            &job.location,
                            Role::Contact,
                            "Job location",
                        ));
                    }
                    entry.push(Node::multiline(
                        binding("description"),
                        &job.description,
                        "Job description",
                    ));
                    entry
                },
            ),
            list_section(Section::Education, "Education", &data.education, |i, edu| {
                let binding = |field| FieldBinding::entry(Section::Education, i, field);
                let mut entry = vec![Node::Split {
                    left: vec![
                        Node::field(binding("degree"), &edu.degree, Role::EntryTitle, "Degree"),
                        Node::text(",", Role::EntryTitle),
                        Node::field(
                            binding("institution"),
                            &edu.institution,
                            Role::Body,
                            "Institution",
                        ),
                    ],
                    right: date_range(Section::Education, i, &edu.start_date, &edu.end_date),
                }];
                entry.extend(grade_line(i, edu));
                entry
            }),
            list_section(Section::Projects, "Projects", &data.projects, |i, project| {
                let binding = |field| FieldBinding::entry(Section::Projects, i, field);
                let mut title = vec![Node::field(
                    binding("projectName"),
                    &project.project_name,
                    Role::EntryTitle,
                    "Project name",
                )];
                if project.link.has_content() {
                    title.push(Node::link(binding("link"), &project.link, "Project link"));
                }
                vec![
                    Node::Line(title),
                    Node::multiline(
                        binding("description"),
                        &project.description,
                        "Project description",
                    ),
                ]
            }),
            list_section(Section::Skills, "Skills", &data.skills, |i, skill| {
                vec![skill_line(i, skill)]
            }),
            list_section(Section::Languages, "Languages", &data.languages, |i, lang| {
                vec![language_line(i, lang)]
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
                            Node::text("-", Role::Body),
                            Node::field(
                                binding("issuingOrganization"),
                                &cert.issuing_organization,
                                Role::Body,
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
        ];

        Composition {
            template: TemplateId::Minimal,
            header,
            sections: sections.into_iter().flatten().collect(),
        }
    }
}
