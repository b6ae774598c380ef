// SPDX-License-Identifier: MIT

//! Read-only view model for the portfolio display page.

use crate::models::PortfolioRecord;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Display projection of a stored portfolio record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PortfolioView {
    pub introduction: String,
    pub experience: String,
    /// Platform stat cards in display order; absent platforms are omitted
    pub stats: Vec<StatCard>,
    /// Projects in submission order for the accordion list
    pub projects: Vec<ProjectSummary>,
}

/// One platform card on the "Coding Portfolio" grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatCard {
    pub label: String,
    pub url: String,
    /// The GitHub card gets the large highlighted treatment
    pub featured: bool,
}

/// One accordion row in the project list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProjectSummary {
    /// Two-digit display index ("01", "02", ...)
    pub display_index: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

impl PortfolioView {
    /// Project a stored record into the display model.
    ///
    /// Stat card order is fixed: GitHub, CodeForces, CodeChef, LeetCode, GFG.
    pub fn from_record(record: &PortfolioRecord) -> Self {
        let platforms = [
            ("GitHub", Some(&record.github)),
            ("CodeForces", record.codeforces.as_ref()),
            ("CodeChef", record.codechef.as_ref()),
            ("LeetCode", record.leetcode.as_ref()),
            ("GFG", record.gfg.as_ref()),
        ];

        let stats = platforms
            .into_iter()
            .filter_map(|(label, url)| {
                let url = url?;
                (!url.is_empty()).then(|| StatCard {
                    label: label.to_string(),
                    url: url.clone(),
                    featured: label == "GitHub",
                })
            })
            .collect();

        let projects = record
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| ProjectSummary {
                display_index: format!("{:02}", i + 1),
                title: p.title.clone(),
                description: p.description.clone(),
                technologies: p.technologies.clone(),
                link: p.link.clone(),
            })
            .collect();

        Self {
            introduction: record.introduction.clone(),
            experience: record.experience.clone(),
            stats,
            projects,
        }
    }
}
