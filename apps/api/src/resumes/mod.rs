//! Saved resumes: viewing, in-place editing, template choice and export.

pub mod handlers;
pub mod preference;
pub mod viewer;

pub use viewer::Viewer;
