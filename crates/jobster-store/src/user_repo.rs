//! Typed repository for user accounts.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use jobster_models::{Signup, User};

use crate::error::{StoreError, StoreResult};
use crate::store::{Document, DocumentStore};

const COLLECTION: &str = "users";

/// Repository for user documents.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<DocumentStore>,
}

impl UserRepository {
    /// Create a new user repository over the given store.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a user from a signup payload and an already-computed password
    /// hash. Fails with `AlreadyExists` when the email is taken.
    pub async fn create(&self, signup: &Signup, password_hash: &str) -> StoreResult<User> {
        let email = Value::String(signup.email.clone());
        if self
            .store
            .find_one(COLLECTION, "email", &email)
            .await?
            .is_some()
        {
            return Err(StoreError::already_exists(format!(
                "user email {}",
                signup.email
            )));
        }

        // The password hash is added by hand: `User` never serializes it,
        // but the stored document must carry it.
        let mut fields = to_document(signup)?;
        fields.remove("password");
        fields.insert(
            "password_hash".to_string(),
            Value::String(password_hash.to_string()),
        );
        fields.insert(
            "created_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let doc = self.store.insert(COLLECTION, fields).await?;
        let user = document_to_user(doc)?;
        info!(id = %user.id, email = %user.email, "created user");
        Ok(user)
    }

    /// A user by email, if present.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let value = Value::String(email.to_string());
        match self.store.find_one(COLLECTION, "email", &value).await? {
            Some(doc) => Ok(Some(document_to_user(doc)?)),
            None => Ok(None),
        }
    }

    /// A user by id, if present.
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        match self.store.find_by_id(COLLECTION, id).await? {
            Some(doc) => Ok(Some(document_to_user(doc)?)),
            None => Ok(None),
        }
    }

    /// Remove every user. Returns the removed count.
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

fn document_to_user(doc: Document) -> StoreResult<User> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| StoreError::serialization(format!("user document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(DocumentStore::new()))
    }

    fn signup(email: &str) -> Signup {
        Signup {
            name: "John Doe".to_string(),
            email: email.to_string(),
            password: "R3g5T7#gh".to_string(),
            phone_number: "1234567890".to_string(),
            gender: "Male".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            membership_status: "Inactive".to_string(),
        }
    }

    #[tokio::test]
    async fn create_stores_hash_not_password() {
        let repo = repo();
        let user = repo
            .create(&signup("john@example.com"), "$2b$12$hash")
            .await
            .unwrap();
        assert_eq!(user.password_hash, "$2b$12$hash");

        let fetched = repo
            .find_by_email("john@example.com")
            .await
            .unwrap()
            .expect("user");
        assert_eq!(fetched.name, "John Doe");
        assert_eq!(fetched.password_hash, "$2b$12$hash");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = repo();
        repo.create(&signup("john@example.com"), "h1").await.unwrap();

        let err = repo
            .create(&signup("john@example.com"), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn find_by_id_round_trips() {
        let repo = repo();
        let created = repo.create(&signup("jane@example.com"), "h").await.unwrap();
        let fetched = repo
            .find_by_id(created.id.as_str())
            .await
            .unwrap()
            .expect("user");
        assert_eq!(fetched.email, "jane@example.com");
    }
}
