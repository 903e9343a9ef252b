use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::resume::ResumeData;
use crate::store::flatten::{flatten, unflatten, FlatDocument};
use crate::store::StoreError;

/// Key holding the selected template identifier inside a resume document.
pub const TEMPLATE_KEY: &str = "template";

/// A resume document as persisted: the aggregate plus the last selected template.
///
/// The template is kept as the raw stored string; callers parse it defensively
/// because older or hand-edited documents may carry identifiers we no longer know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResume {
    pub resume: ResumeData,
    pub template: Option<String>,
}

impl StoredResume {
    pub fn new(resume: ResumeData, template: Option<String>) -> Self {
        Self { resume, template }
    }

    /// Flattens the aggregate into dotted key paths and adds the `template` key.
    pub fn to_document(&self) -> Result<FlatDocument, StoreError> {
        let mut document = flatten(&serde_json::to_value(&self.resume)?)?;
        if let Some(template) = &self.template {
            document.insert(TEMPLATE_KEY.to_string(), Value::String(template.clone()));
        }
        Ok(document)
    }

    /// Rebuilds the nested aggregate from a stored flat document.
    pub fn from_document(document: &FlatDocument) -> Result<Self, StoreError> {
        let mut document = document.clone();
        let template = match document.remove(TEMPLATE_KEY) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let resume: ResumeData = serde_json::from_value(unflatten(&document)?)?;
        Ok(Self { resume, template })
    }
}
