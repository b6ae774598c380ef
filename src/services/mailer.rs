// SPDX-License-Identifier: MIT

//! Welcome mail dispatch via the Resend HTTP API.
//!
//! Sending is an explicit post-commit step invoked by the registrar, not a
//! hook on the storage write. Callers treat failure as best-effort: log and
//! continue.

use crate::config::Config;
use crate::error::AppError;
use serde::Serialize;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Outgoing mail sender.
pub struct Mailer {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
    frontend_url: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.resend_api_key.clone(),
            from: config.mail_from.clone(),
            frontend_url: config.frontend_url.clone(),
        }
    }

    /// Create a mailer that never sends (for tests and keyless local dev).
    pub fn new_mock() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: None,
            from: "welcome@codelio.dev".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        }
    }

    /// Send the registration welcome mail.
    pub async fn send_welcome(&self, email: &str, username: &str) -> Result<(), AppError> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!(to = email, "Mail sending disabled, skipping welcome email");
            return Ok(());
        };

        let body = SendRequest {
            from: &self.from,
            to: [email],
            subject: "Welcome to Codelio!",
            html: welcome_html(username, &self.frontend_url),
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Resend request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Resend API returned status {}",
                response.status()
            )));
        }

        tracing::info!(to = email, "Welcome email sent");
        Ok(())
    }
}

/// Render the welcome mail body.
fn welcome_html(username: &str, frontend_url: &str) -> String {
    format!(
        "<h2>Welcome to Codelio, {username}!</h2>\
         <p>We're thrilled to have you join us on this exciting journey. At Codelio, \
         we're committed to helping developers like you build, grow, and succeed in \
         your projects and career.</p>\
         <p>Feel free to explore the platform, connect with like-minded individuals, \
         and make the most of the tools and resources we've curated just for you.</p>\
         <p><a href=\"{frontend_url}/sign-in\">Get Started</a></p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_html_addresses_the_user() {
        let html = welcome_html("alice", "https://codelio.dev");

        assert!(html.contains("Welcome to Codelio, alice!"));
        assert!(html.contains("https://codelio.dev/sign-in"));
    }

    #[tokio::test]
    async fn test_mock_mailer_never_fails() {
        let mailer = Mailer::new_mock();

        mailer
            .send_welcome("test@example.com", "alice")
            .await
            .unwrap();
    }
}
