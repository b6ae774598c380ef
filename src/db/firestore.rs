// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity storage, uniqueness lookups)
//! - Portfolios (one record per owner, keyed by username)
//!
//! The handle is explicitly constructed at startup and passed through
//! `AppState`; tests inject `new_mock()` instead of global connection state.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{PortfolioRecord, User};
use crate::schema::PortfolioPatch;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by username (the document id).
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(username)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by email address.
    ///
    /// Email is unique by contract; this is the registration-time check.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("email").eq(email.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Store a new user identity.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.username)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Portfolio Operations ────────────────────────────────────

    /// Get the portfolio record for an owner, if one exists.
    ///
    /// The owner key is the document id, so this can never return another
    /// owner's record.
    pub async fn get_portfolio(&self, username: &str) -> Result<Option<PortfolioRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PORTFOLIOS)
            .obj()
            .one(username)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or fully replace the owner's portfolio record.
    ///
    /// Returns the stored record post-write.
    pub async fn upsert_portfolio(
        &self,
        username: &str,
        record: &PortfolioRecord,
    ) -> Result<PortfolioRecord, AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PORTFOLIOS)
            .document_id(username)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(record.clone())
    }

    /// Apply a validated partial update to the owner's existing record.
    ///
    /// Fails with `NotFound` (and performs no write) when no record exists;
    /// patch never implicitly creates.
    pub async fn patch_portfolio(
        &self,
        username: &str,
        patch: PortfolioPatch,
    ) -> Result<PortfolioRecord, AppError> {
        let existing = self
            .get_portfolio(username)
            .await?
            .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;

        let merged = patch.apply_to(existing);
        self.upsert_portfolio(username, &merged).await
    }

    /// Remove the owner's portfolio record.
    ///
    /// A delete with no record reports `NotFound` rather than succeeding
    /// silently, so a second delete in a row is visible to the caller.
    pub async fn delete_portfolio(&self, username: &str) -> Result<(), AppError> {
        if self.get_portfolio(username).await?.is_none() {
            return Err(AppError::NotFound("Portfolio not found".to_string()));
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::PORTFOLIOS)
            .document_id(username)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
