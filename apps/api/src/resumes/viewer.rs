//! Per-resume viewing and editing session.
//!
//! A `Viewer` holds the last saved aggregate, the working copy and the active
//! template. Edits replace the working copy with a new aggregate; cancelling
//! restores the saved one.

use uuid::Uuid;

use crate::edit::{self, EditError, FieldUpdate};
use crate::models::{ResumeData, StoredResume};
use crate::render::{render_html, RenderMode};
use crate::store::flatten::FlatDocument;
use crate::store::StoreError;
use crate::templates::{template, TemplateId};

#[derive(Debug, Clone)]
pub struct Viewer {
    id: Uuid,
    saved: ResumeData,
    current: ResumeData,
    template: TemplateId,
    editing: bool,
}

impl Viewer {
    /// Opens a stored resume. The template comes from `preference` when it names
    /// a known template, then from the stored document, then the default.
    pub fn open(id: Uuid, stored: StoredResume, preference: Option<&str>) -> Self {
        let from_document = TemplateId::or_keep(stored.template.as_deref(), TemplateId::default());
        let template = TemplateId::or_keep(preference, from_document);
        Self {
            id,
            saved: stored.resume.clone(),
            current: stored.resume,
            template,
            editing: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn data(&self) -> &ResumeData {
        &self.current
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True when the working copy differs from the last save.
    pub fn is_dirty(&self) -> bool {
        self.current != self.saved
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Leaves edit mode and discards unsaved changes.
    pub fn cancel_edit(&mut self) {
        self.current = self.saved.clone();
        self.editing = false;
    }

    pub fn update_field(&mut self, update: &FieldUpdate) -> Result<(), EditError> {
        if !self.editing {
            return Err(EditError::NotEditing);
        }
        self.current = edit::update_field(&self.current, update)?;
        Ok(())
    }

    /// Switches template. Unknown identifiers, and any selection while editing,
    /// keep the current template. Returns the template now active.
    pub fn select_template(&mut self, candidate: &str) -> TemplateId {
        if self.editing {
            tracing::debug!(resume_id = %self.id, candidate, "Template change ignored while editing");
            return self.template;
        }
        self.template = TemplateId::or_keep(Some(candidate), self.template);
        self.template
    }

    /// The flattened document to merge into storage, including the template key.
    pub fn save_document(&self) -> Result<FlatDocument, StoreError> {
        StoredResume::new(self.current.clone(), Some(self.template.as_str().to_string()))
            .to_document()
    }

    /// Records a successful save and leaves edit mode.
    pub fn mark_saved(&mut self) {
        self.saved = self.current.clone();
        self.editing = false;
    }

    /// Renders the working copy with the active template.
    pub fn render(&self) -> String {
        let mode = if self.editing {
            RenderMode::Edit
        } else {
            RenderMode::View
        };
        let template = template(self.template);
        render_html(&template.compose(&self.current), template.style(), mode)
    }
}
