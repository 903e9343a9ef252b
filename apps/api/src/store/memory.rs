use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{DocumentPath, DocumentStore, FlatDocument, StoreError};

/// In-process document store for local development and tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<BTreeMap<String, FlatDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, path: &DocumentPath, body: FlatDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(path.as_str()) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        documents.insert(path.to_string(), body);
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: FlatDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(path.as_str())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        existing.extend(fields);
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<FlatDocument>, StoreError> {
        Ok(self.documents.read().await.get(path.as_str()).cloned())
    }

    async fn list(
        &self,
        collection: &DocumentPath,
    ) -> Result<Vec<(DocumentPath, FlatDocument)>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|(path, body)| (DocumentPath::from(path.clone()), body))
            .filter(|(path, _)| path.is_child_of(collection))
            .map(|(path, body)| (path, body.clone()))
            .collect())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        Ok(self.documents.write().await.remove(path.as_str()).is_some())
    }
}
