// SPDX-License-Identifier: MIT

//! Portfolio document validation and merge rules.
//!
//! Candidate documents arrive as all-optional drafts. [`PortfolioDraft::validate`]
//! turns a draft into a typed [`PortfolioRecord`] (replace mode), while
//! [`PortfolioPatch`] checks only the supplied fields and merges them into an
//! existing record (patch mode). The owner key is never part of the document;
//! it is the storage document id, derived from the authenticated session.

use crate::error::AppError;
use crate::models::{PortfolioRecord, Project};
use serde::Deserialize;

/// Character cap for the free-text sections, enforced on every write.
pub const MAX_TEXT_CHARS: usize = 3000;

/// A portfolio validation failure, carrying enough detail to fix the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Aggregated report of every absent (or blank) required field.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field supplied in a patch must not be blank.
    #[error("{field} is required")]
    RequiredField { field: &'static str },

    #[error("{field} cannot exceed {limit} characters")]
    TextTooLong { field: &'static str, limit: usize },

    /// Distinct from the missing-field report: the list was supplied but empty.
    #[error("At least one project is required")]
    NoProjects,

    #[error("Invalid {field} URL")]
    InvalidUrl { field: &'static str },

    #[error("Project {number}: {problem}")]
    Project {
        number: usize,
        problem: ProjectError,
    },
}

/// A violation inside a single project entry, reported with its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Description is required")]
    MissingDescription,

    #[error("At least one technology is required")]
    NoTechnologies,

    #[error("Technology names must not be empty")]
    BlankTechnology,

    #[error("Please enter a valid URL")]
    InvalidLink,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Untyped candidate document for create-or-replace submissions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioDraft {
    pub introduction: Option<String>,
    pub experience: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub codechef: Option<String>,
    pub codeforces: Option<String>,
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    pub projects: Option<Vec<ProjectDraft>>,
}

/// Untyped candidate project entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub link: Option<String>,
}

/// Partial update payload: only supplied fields are checked and merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioPatch {
    pub introduction: Option<String>,
    pub experience: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub codechef: Option<String>,
    pub codeforces: Option<String>,
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    pub projects: Option<Vec<ProjectDraft>>,
}

fn is_blank(value: &Option<String>) -> bool {
    match value {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

/// URLs must be absolute: `http://` or `https://`.
fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Validate a required free-text section against the at-rest length cap.
fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong {
            field,
            limit: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if !is_absolute_url(value) {
        return Err(ValidationError::InvalidUrl { field });
    }
    Ok(())
}

/// Normalize an optional platform URL: blank counts as absent, anything
/// supplied must be absolute.
fn normalize_optional_url(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(url) if url.trim().is_empty() => Ok(None),
        Some(url) => {
            check_url(field, &url)?;
            Ok(Some(url))
        }
        None => Ok(None),
    }
}

fn validate_project(number: usize, draft: ProjectDraft) -> Result<Project, ValidationError> {
    let project_err = |problem| ValidationError::Project { number, problem };

    if is_blank(&draft.title) {
        return Err(project_err(ProjectError::MissingTitle));
    }
    if is_blank(&draft.description) {
        return Err(project_err(ProjectError::MissingDescription));
    }

    let technologies = draft.technologies.unwrap_or_default();
    if technologies.is_empty() {
        return Err(project_err(ProjectError::NoTechnologies));
    }
    if technologies.iter().any(|t| t.trim().is_empty()) {
        return Err(project_err(ProjectError::BlankTechnology));
    }

    let link = match draft.link {
        Some(url) if url.trim().is_empty() => None,
        Some(url) => {
            if !is_absolute_url(&url) {
                return Err(project_err(ProjectError::InvalidLink));
            }
            Some(url)
        }
        None => None,
    };

    Ok(Project {
        title: draft.title.unwrap_or_default(),
        description: draft.description.unwrap_or_default(),
        technologies,
        link,
    })
}

fn validate_projects(drafts: Vec<ProjectDraft>) -> Result<Vec<Project>, ValidationError> {
    if drafts.is_empty() {
        return Err(ValidationError::NoProjects);
    }
    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| validate_project(i + 1, draft))
        .collect()
}

impl PortfolioDraft {
    /// Validate the draft and produce the full record to store (replace mode).
    ///
    /// The required-field check runs first and reports every missing field in
    /// one aggregated error; the remaining checks fail on the first violation.
    pub fn validate(self) -> Result<PortfolioRecord, ValidationError> {
        let mut missing = Vec::new();
        if is_blank(&self.introduction) {
            missing.push("introduction");
        }
        if is_blank(&self.experience) {
            missing.push("experience");
        }
        if is_blank(&self.linkedin) {
            missing.push("linkedin");
        }
        if is_blank(&self.github) {
            missing.push("github");
        }
        // An empty projects list is present, not missing; it gets its own error.
        if self.projects.is_none() {
            missing.push("projects");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let introduction = self.introduction.unwrap_or_default();
        let experience = self.experience.unwrap_or_default();
        let linkedin = self.linkedin.unwrap_or_default();
        let github = self.github.unwrap_or_default();

        check_text("Introduction", &introduction)?;
        check_text("Experience", &experience)?;

        let projects = validate_projects(self.projects.unwrap_or_default())?;

        check_url("LinkedIn", &linkedin)?;
        check_url("GitHub", &github)?;

        Ok(PortfolioRecord {
            introduction,
            experience,
            linkedin,
            github,
            codechef: normalize_optional_url("CodeChef", self.codechef)?,
            codeforces: normalize_optional_url("CodeForces", self.codeforces)?,
            leetcode: normalize_optional_url("LeetCode", self.leetcode)?,
            gfg: normalize_optional_url("GFG", self.gfg)?,
            projects,
        })
    }
}

impl PortfolioPatch {
    /// Check every supplied field against the same at-rest rules the full
    /// validator enforces. Fields absent from the patch are not touched, so
    /// the merged record keeps satisfying the invariants it already held.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(introduction) = &self.introduction {
            if introduction.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: "Introduction",
                });
            }
            check_text("Introduction", introduction)?;
        }
        if let Some(experience) = &self.experience {
            if experience.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: "Experience",
                });
            }
            check_text("Experience", experience)?;
        }
        if let Some(linkedin) = &self.linkedin {
            check_url("LinkedIn", linkedin)?;
        }
        if let Some(github) = &self.github {
            check_url("GitHub", github)?;
        }
        for (field, value) in [
            ("CodeChef", &self.codechef),
            ("CodeForces", &self.codeforces),
            ("LeetCode", &self.leetcode),
            ("GFG", &self.gfg),
        ] {
            if let Some(url) = value {
                if !url.trim().is_empty() {
                    check_url(field, url)?;
                }
            }
        }
        if let Some(projects) = &self.projects {
            // Rejecting an explicit empty list here is what keeps the
            // at-rest "never zero projects" invariant after the merge.
            validate_projects(projects.clone())?;
        }
        Ok(())
    }

    /// Merge the supplied fields into an existing record (patch mode).
    ///
    /// Call [`PortfolioPatch::validate`] first; this method assumes the
    /// patch already passed.
    pub fn apply_to(self, mut existing: PortfolioRecord) -> PortfolioRecord {
        if let Some(introduction) = self.introduction {
            existing.introduction = introduction;
        }
        if let Some(experience) = self.experience {
            existing.experience = experience;
        }
        if let Some(linkedin) = self.linkedin {
            existing.linkedin = linkedin;
        }
        if let Some(github) = self.github {
            existing.github = github;
        }
        if let Some(codechef) = self.codechef {
            existing.codechef = (!codechef.trim().is_empty()).then_some(codechef);
        }
        if let Some(codeforces) = self.codeforces {
            existing.codeforces = (!codeforces.trim().is_empty()).then_some(codeforces);
        }
        if let Some(leetcode) = self.leetcode {
            existing.leetcode = (!leetcode.trim().is_empty()).then_some(leetcode);
        }
        if let Some(gfg) = self.gfg {
            existing.gfg = (!gfg.trim().is_empty()).then_some(gfg);
        }
        if let Some(projects) = self.projects {
            // Already validated; conversion cannot fail here.
            if let Ok(projects) = validate_projects(projects) {
                existing.projects = projects;
            }
        }
        existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: Some(title.to_string()),
            description: Some("A thing I built".to_string()),
            technologies: Some(vec!["rust".to_string(), "axum".to_string()]),
            link: Some("https://github.com/x/p".to_string()),
        }
    }

    fn full_draft() -> PortfolioDraft {
        PortfolioDraft {
            introduction: Some("hi".to_string()),
            experience: Some("exp".to_string()),
            linkedin: Some("https://li.com/x".to_string()),
            github: Some("https://github.com/x".to_string()),
            codechef: None,
            codeforces: Some("https://codeforces.com/profile/x".to_string()),
            leetcode: None,
            gfg: None,
            projects: Some(vec![project_draft("P1")]),
        }
    }

    fn full_record() -> PortfolioRecord {
        full_draft().validate().unwrap()
    }

    #[test]
    fn test_valid_draft_round_trips_fields() {
        let record = full_record();
        assert_eq!(record.introduction, "hi");
        assert_eq!(record.experience, "exp");
        assert_eq!(record.linkedin, "https://li.com/x");
        assert_eq!(record.github, "https://github.com/x");
        assert_eq!(
            record.codeforces.as_deref(),
            Some("https://codeforces.com/profile/x")
        );
        assert_eq!(record.codechef, None);
        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].title, "P1");
        assert_eq!(record.projects[0].technologies, vec!["rust", "axum"]);
    }

    #[test]
    fn test_missing_fields_enumerated() {
        let draft = PortfolioDraft {
            introduction: Some("hi".to_string()),
            linkedin: Some("".to_string()), // blank counts as missing
            ..Default::default()
        };

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["experience", "linkedin", "github", "projects"])
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: experience, linkedin, github, projects"
        );
    }

    #[test]
    fn test_text_cap_boundary() {
        let mut draft = full_draft();
        draft.introduction = Some("a".repeat(MAX_TEXT_CHARS));
        assert!(draft.clone().validate().is_ok());

        draft.introduction = Some("a".repeat(MAX_TEXT_CHARS + 1));
        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Introduction cannot exceed 3000 characters"
        );

        let mut draft = full_draft();
        draft.experience = Some("b".repeat(MAX_TEXT_CHARS + 1));
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Experience cannot exceed 3000 characters");
    }

    #[test]
    fn test_empty_projects_has_dedicated_error() {
        let mut draft = full_draft();
        draft.projects = Some(vec![]);

        let err = draft.validate().unwrap_err();
        assert_eq!(err, ValidationError::NoProjects);
        assert_eq!(err.to_string(), "At least one project is required");
    }

    #[test]
    fn test_url_checks_name_the_field() {
        let mut draft = full_draft();
        draft.linkedin = Some("li.com/x".to_string());
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Invalid LinkedIn URL"
        );

        let mut draft = full_draft();
        draft.github = Some("ftp://github.com/x".to_string());
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Invalid GitHub URL"
        );

        let mut draft = full_draft();
        draft.gfg = Some("not-a-url".to_string());
        assert_eq!(draft.validate().unwrap_err().to_string(), "Invalid GFG URL");
    }

    #[test]
    fn test_blank_optional_url_normalized_to_absent() {
        let mut draft = full_draft();
        draft.codechef = Some("   ".to_string());

        let record = draft.validate().unwrap();
        assert_eq!(record.codechef, None);
    }

    #[test]
    fn test_project_violations_carry_number() {
        let mut draft = full_draft();
        draft.projects = Some(vec![
            project_draft("P1"),
            ProjectDraft {
                title: Some("P2".to_string()),
                description: Some("d".to_string()),
                technologies: Some(vec![]),
                link: None,
            },
        ]);

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Project 2: At least one technology is required"
        );
    }

    #[test]
    fn test_project_without_title_or_link_rules() {
        let mut draft = full_draft();
        draft.projects = Some(vec![ProjectDraft {
            title: None,
            ..project_draft("ignored")
        }]);
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Project 1: Title is required"
        );

        let mut draft = full_draft();
        draft.projects = Some(vec![ProjectDraft {
            link: Some("github.com/x/p".to_string()),
            ..project_draft("P1")
        }]);
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Project 1: Please enter a valid URL"
        );

        // A project link is optional; blank means absent.
        let mut draft = full_draft();
        draft.projects = Some(vec![ProjectDraft {
            link: Some("".to_string()),
            ..project_draft("P1")
        }]);
        let record = draft.validate().unwrap();
        assert_eq!(record.projects[0].link, None);
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let existing = PortfolioRecord {
            introduction: "A".to_string(),
            ..full_record()
        };

        let patch = PortfolioPatch {
            experience: Some("C".to_string()),
            ..Default::default()
        };
        patch.validate().unwrap();
        let merged = patch.apply_to(existing.clone());

        assert_eq!(merged.introduction, "A");
        assert_eq!(merged.experience, "C");
        assert_eq!(merged.linkedin, existing.linkedin);
        assert_eq!(merged.github, existing.github);
        assert_eq!(merged.projects.len(), existing.projects.len());
    }

    #[test]
    fn test_patch_rejects_explicit_empty_projects() {
        let patch = PortfolioPatch {
            projects: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(patch.validate().unwrap_err(), ValidationError::NoProjects);
    }

    #[test]
    fn test_patch_rejects_blank_required_text() {
        let patch = PortfolioPatch {
            introduction: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.validate().unwrap_err().to_string(),
            "Introduction is required"
        );
    }

    #[test]
    fn test_patch_enforces_text_cap_and_urls() {
        let patch = PortfolioPatch {
            experience: Some("x".repeat(MAX_TEXT_CHARS + 1)),
            ..Default::default()
        };
        assert_eq!(
            patch.validate().unwrap_err().to_string(),
            "Experience cannot exceed 3000 characters"
        );

        let patch = PortfolioPatch {
            codeforces: Some("codeforces.com/x".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.validate().unwrap_err().to_string(),
            "Invalid CodeForces URL"
        );
    }

    #[test]
    fn test_patch_replaces_projects_wholesale() {
        let existing = full_record();
        let patch = PortfolioPatch {
            projects: Some(vec![project_draft("P2"), project_draft("P3")]),
            ..Default::default()
        };
        patch.validate().unwrap();
        let merged = patch.apply_to(existing);

        let titles: Vec<&str> = merged.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["P2", "P3"]);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let existing = full_record();
        let patch = PortfolioPatch::default();
        patch.validate().unwrap();
        let merged = patch.apply_to(existing.clone());

        assert_eq!(merged.introduction, existing.introduction);
        assert_eq!(merged.projects.len(), existing.projects.len());
    }
}
