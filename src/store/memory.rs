use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RunStore;
use crate::error::Result;
use crate::models::TestRunDocument;

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<TestRunDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunStore for MemoryStore {
    async fn insert(&self, document: &TestRunDocument) -> Result<()> {
        self.documents.write().await.push(document.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TestRunDocument>> {
        Ok(self.documents.read().await.clone())
    }
}
