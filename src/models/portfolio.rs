//! Portfolio record model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The single per-user portfolio document stored in Firestore.
///
/// The owning user is the document id, never a field, so a request body can
/// never reassign a record to another owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PortfolioRecord {
    /// Introduction section (1-3000 characters)
    pub introduction: String,
    /// Experience section (1-3000 characters)
    pub experience: String,
    /// LinkedIn profile URL
    pub linkedin: String,
    /// GitHub profile URL
    pub github: String,
    /// Optional competitive-programming profile URLs
    pub codechef: Option<String>,
    pub codeforces: Option<String>,
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    /// Projects in submission order (always at least one)
    pub projects: Vec<Project>,
}

/// A project entry embedded in its parent record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Technology tags, order preserved for display
    pub technologies: Vec<String>,
    /// Optional link to the project
    pub link: Option<String>,
}
