use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use super::{RunStore, StoreUri};
use crate::error::{ReportError, Result};
use crate::models::TestRunDocument;

pub struct MongoStore {
    collection: Collection<TestRunDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &StoreUri, database: &str, collection: &str) -> Result<Self> {
        if database.is_empty() || collection.is_empty() {
            return Err(ReportError::Config(
                "Database and collection names must not be empty".to_string(),
            ));
        }

        info!(
            "Connecting to MongoDB at {} ({database}.{collection})",
            uri.redacted()
        );

        let client = Client::with_uri_str(uri.as_str()).await?;
        let collection = client
            .database(database)
            .collection::<TestRunDocument>(collection);

        Ok(Self { collection })
    }
}

#[async_trait]
impl RunStore for MongoStore {
    async fn insert(&self, document: &TestRunDocument) -> Result<()> {
        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TestRunDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<TestRunDocument> = cursor.try_collect().await?;
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuiteResult;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{from_document, to_document, Bson};

    fn sample() -> TestRunDocument {
        TestRunDocument {
            date: "2024-01-01".to_string(),
            ok: 8,
            ng: 2,
            total: 10,
            suites: vec![SuiteResult {
                name: "サンプル".to_string(),
                ok: Some(8),
                ng: None,
                total: Some(10),
            }],
            success_rate: 80.0,
        }
    }

    #[test]
    fn test_document_uses_store_field_names() {
        let stored = to_document(&sample()).unwrap();

        let keys: Vec<_> = stored.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Date", "OK", "NG", "Total", "Suite", "SuccessRate"]);
        assert_eq!(stored.get_i64("Total").unwrap(), 10);
        assert_eq!(stored.get_f64("SuccessRate").unwrap(), 80.0);
    }

    #[test]
    fn test_absent_suite_metric_is_stored_as_null() {
        let stored = to_document(&sample()).unwrap();

        let suites = stored.get_array("Suite").unwrap();
        let Some(Bson::Document(suite)) = suites.first() else {
            panic!("expected an embedded suite document");
        };
        assert_eq!(suite.get_str("name").unwrap(), "サンプル");
        assert_eq!(suite.get("OK"), Some(&Bson::Int64(8)));
        assert_eq!(suite.get("NG"), Some(&Bson::Null));
    }

    #[test]
    fn test_stored_document_with_id_and_int32_counts_reads_back() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "Date": "2024-01-01",
            "OK": 8_i32,
            "NG": 2_i32,
            "Total": 10_i32,
            "Suite": [
                { "name": "サンプル", "OK": 8_i32, "NG": Bson::Null, "Total": 10_i32 }
            ],
            "SuccessRate": 80.0,
        };

        let document: TestRunDocument = from_document(stored).unwrap();

        let mut expected = sample();
        expected.ng = 2;
        assert_eq!(document, expected);
    }
}
