// PDF export: compose the view-mode tree, paginate it, write it with printpdf.
// Layout and writing are CPU-bound; handlers go through `export_pdf_blocking`.

pub mod pdf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::layout::{paginate, PageGeometry};
use crate::models::{HasContent, ResumeData};
use crate::templates::{template, TemplateId};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Export task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub geometry: PageGeometry,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::A4,
        }
    }
}

/// `{fullName}_{YYYY-MM-DD}.pdf`, falling back to `resume` when the name is blank.
pub fn export_filename(data: &ResumeData, date: NaiveDate) -> String {
    let name = &data.personal_details.full_name;
    let stem = if name.has_content() {
        name.trim()
    } else {
        "resume"
    };
    format!("{stem}_{}.pdf", date.format("%Y-%m-%d"))
}

/// `Content-Disposition` value carrying an ASCII fallback and the UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

/// Renders `data` with the chosen template into PDF bytes.
pub fn export_pdf(
    data: &ResumeData,
    template_id: TemplateId,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let template = template(template_id);
    let composition = template.compose(data);
    let pages = paginate(&composition, template.style(), options.geometry);
    let title = if data.personal_details.full_name.has_content() {
        data.personal_details.full_name.trim()
    } else {
        "Resume"
    };
    pdf::write_pdf(&pages, options.geometry, title)
}

/// Runs [`export_pdf`] on the blocking pool.
pub async fn export_pdf_blocking(
    data: ResumeData,
    template_id: TemplateId,
    options: ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    tokio::task::spawn_blocking(move || export_pdf(&data, template_id, &options)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalDetails, WorkExperience};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_filename_uses_full_name() {
        let data = ResumeData {
            personal_details: PersonalDetails {
                full_name: "Jane Doe".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(export_filename(&data, date()), "Jane Doe_2024-03-09.pdf");
    }

    #[test]
    fn test_filename_falls_back_to_resume() {
        assert_eq!(
            export_filename(&ResumeData::default(), date()),
            "resume_2024-03-09.pdf"
        );
    }

    #[test]
    fn test_content_disposition_escapes() {
        assert_eq!(
            content_disposition("Zoë \"Z\"_2024-03-09.pdf"),
            "attachment; filename=\"Zo_ _Z__2024-03-09.pdf\"; \
             filename*=UTF-8''Zo%C3%AB%20%22Z%22_2024-03-09.pdf"
        );
    }

    #[test]
    fn test_export_produces_pdf_bytes() {
        let data = ResumeData {
            personal_details: PersonalDetails {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            work_experience: vec![WorkExperience {
                job_title: "Engineer".to_string(),
                company_name: "Acme".to_string(),
                description: "- Shipped **things**".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        for id in TemplateId::ALL {
            let bytes = export_pdf(&data, id, &ExportOptions::default()).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{id} did not produce a PDF");
        }
    }

    #[tokio::test]
    async fn test_blocking_export() {
        let bytes = export_pdf_blocking(
            ResumeData::default(),
            TemplateId::Minimal,
            ExportOptions::default(),
        )
        .await
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
