mod mongo;
mod uri;

#[cfg(test)]
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::TestRunDocument;

#[cfg(test)]
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use uri::StoreUri;

/// Append-only collection of daily test runs.
#[async_trait]
pub trait RunStore: Send + Sync {
    async fn insert(&self, document: &TestRunDocument) -> Result<()>;

    /// Every stored document, in store order.
    async fn find_all(&self) -> Result<Vec<TestRunDocument>>;
}
