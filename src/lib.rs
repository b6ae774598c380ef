// SPDX-License-Identifier: MIT

//! Codelio: publish a personal developer portfolio page.
//!
//! This crate provides the backend API for registering users and for
//! storing, merging and projecting per-user portfolio records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::Mailer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub mailer: Mailer,
}
