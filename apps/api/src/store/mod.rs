//! Document store adapter.
//!
//! Resumes live at `users/{email}/resumes/{id}` as flat documents (see
//! [`flatten`]). Writes merge dotted keys into the existing body so updating one
//! field never clobbers its siblings. There is no retry and no conflict
//! detection: the last writer wins.

pub mod flatten;
pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use flatten::{FlatDocument, FlattenError};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] FlattenError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Path of a document or collection in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// `users/{email}/resumes`
    pub fn resumes_of(user_email: &str) -> Self {
        Self(format!("users/{user_email}/resumes"))
    }

    /// `users/{email}/resumes/{id}`
    pub fn resume(user_email: &str, resume_id: Uuid) -> Self {
        Self(format!("users/{user_email}/resumes/{resume_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, i.e. the document id.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Whether this document sits directly inside `collection`.
    pub fn is_child_of(&self, collection: &DocumentPath) -> bool {
        self.0
            .strip_prefix(collection.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// The document store trait. `AppState` carries it as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes a new document. Fails if one already exists at `path`.
    async fn create(&self, path: &DocumentPath, body: FlatDocument) -> Result<(), StoreError>;

    /// Merges `fields` into an existing document, leaving other keys untouched.
    async fn update(&self, path: &DocumentPath, fields: FlatDocument) -> Result<(), StoreError>;

    async fn get(&self, path: &DocumentPath) -> Result<Option<FlatDocument>, StoreError>;

    /// Every document directly inside `collection`, ordered by path.
    async fn list(
        &self,
        collection: &DocumentPath,
    ) -> Result<Vec<(DocumentPath, FlatDocument)>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_path_layout() {
        let id = Uuid::nil();
        let path = DocumentPath::resume("a@b.com", id);
        assert_eq!(
            path.as_str(),
            "users/a@b.com/resumes/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(path.id(), id.to_string());
    }

    #[test]
    fn test_is_child_of_only_direct_children() {
        let collection = DocumentPath::resumes_of("a@b.com");
        let child = DocumentPath::resume("a@b.com", Uuid::nil());
        assert!(child.is_child_of(&collection));
        assert!(!collection.is_child_of(&collection));

        let nested = DocumentPath::from(format!("{}/x/y", collection));
        assert!(!nested.is_child_of(&collection));

        let other_user = DocumentPath::resume("a@b.co", Uuid::nil());
        assert!(!other_user.is_child_of(&collection));
    }
}
