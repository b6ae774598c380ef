//! User identity model for storage.

use serde::{Deserialize, Serialize};

/// User identity stored in Firestore (document id = username).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also used as document ID)
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2 PHC-string hash; the plaintext password is never stored
    pub password_hash: String,
    /// Active immediately at creation (no OTP verification step)
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    /// When the account was created
    pub created_at: String,
}
