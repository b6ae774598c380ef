// SPDX-License-Identifier: MIT

//! Services module - side effects and credential handling.

pub mod mailer;
pub mod password;

pub use mailer::Mailer;
