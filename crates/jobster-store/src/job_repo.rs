//! Typed repository for job listings.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use jobster_models::{Job, JobDraft, JobId, JobPatch};

use crate::error::{StoreError, StoreResult};
use crate::store::{Document, DocumentStore};

const COLLECTION: &str = "jobs";

/// Repository for job documents.
#[derive(Clone)]
pub struct JobRepository {
    store: Arc<DocumentStore>,
}

impl JobRepository {
    /// Create a new job repository over the given store.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// All job listings, in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<Job>> {
        let docs = self.store.find_all(COLLECTION).await?;
        docs.into_iter().map(document_to_job).collect()
    }

    /// Insert a new job listing. The store assigns the id; timestamps are
    /// set here.
    pub async fn create(&self, draft: &JobDraft) -> StoreResult<Job> {
        let mut fields = to_document(draft)?;
        let now = Value::String(Utc::now().to_rfc3339());
        fields.insert("created_at".to_string(), now.clone());
        fields.insert("updated_at".to_string(), now);

        let doc = self.store.insert(COLLECTION, fields).await?;
        let job = document_to_job(doc)?;
        info!(id = %job.id, title = %job.title, "created job");
        Ok(job)
    }

    /// A job by id, if present.
    pub async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        match self.store.find_by_id(COLLECTION, id.as_str()).await? {
            Some(doc) => Ok(Some(document_to_job(doc)?)),
            None => Ok(None),
        }
    }

    /// Shallow-merge the supplied fields onto a stored job. Returns the
    /// updated record, or `None` when no record matches.
    pub async fn update(&self, id: &JobId, patch: &JobPatch) -> StoreResult<Option<Job>> {
        let mut fields = to_document(patch)?;
        fields.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        match self
            .store
            .update_by_id(COLLECTION, id.as_str(), fields)
            .await?
        {
            Some(doc) => {
                info!(id = %id, "updated job");
                Ok(Some(document_to_job(doc)?))
            }
            None => Ok(None),
        }
    }

    /// Physically delete a job. Returns whether a record was removed.
    pub async fn delete(&self, id: &JobId) -> StoreResult<bool> {
        let removed = self.store.delete_by_id(COLLECTION, id.as_str()).await?;
        if removed {
            info!(id = %id, "deleted job");
        }
        Ok(removed)
    }

    /// Remove every job listing. Returns the removed count.
    pub async fn clear(&self) -> StoreResult<usize> {
        self.store.delete_many(COLLECTION).await
    }
}

fn to_document<T: serde::Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::serialization(format!(
            "expected JSON object, got {other}"
        ))),
    }
}

fn document_to_job(doc: Document) -> StoreResult<Job> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| StoreError::serialization(format!("job document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobster_models::Company;

    fn repo() -> JobRepository {
        JobRepository::new(Arc::new(DocumentStore::new()))
    }

    fn draft(title: &str) -> JobDraft {
        JobDraft {
            title: title.to_string(),
            job_type: "Full-Time".to_string(),
            description: "Come work with us!".to_string(),
            company: Company {
                name: "Test Company".to_string(),
                contact_email: "test@test.com".to_string(),
                contact_phone: "1234567890".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = repo();
        let created = repo.create(&draft("Web Developer")).await.unwrap();

        let fetched = repo.get(&created.id).await.unwrap().expect("job");
        assert_eq!(fetched.title, "Web Developer");
        assert_eq!(fetched.company.contact_email, "test@test.com");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn list_counts_stored_jobs() {
        let repo = repo();
        repo.create(&draft("Web Developer")).await.unwrap();
        repo.create(&draft("Backend Developer")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let repo = repo();
        let created = repo.create(&draft("Web Developer")).await.unwrap();

        let patch = JobPatch {
            title: Some("Updated Job Title".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update(&created.id, &patch)
            .await
            .unwrap()
            .expect("job");

        assert_eq!(updated.title, "Updated Job Title");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.company, created.company);
    }

    #[tokio::test]
    async fn update_absent_id_yields_none() {
        let repo = repo();
        let id = JobId::parse(&jobster_models::id::generate()).unwrap();
        let patch = JobPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(repo.update(&id, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = repo();
        let created = repo.create(&draft("Web Developer")).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(repo.get(&created.id).await.unwrap().is_none());
        assert!(!repo.delete(&created.id).await.unwrap());
    }
}
