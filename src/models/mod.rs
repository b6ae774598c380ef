// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod portfolio;
pub mod user;
pub mod view;

pub use portfolio::{PortfolioRecord, Project};
pub use user::User;
pub use view::PortfolioView;
