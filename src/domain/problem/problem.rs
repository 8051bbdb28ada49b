//! Problem entity - a user-submitted problem awaiting analysis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ProblemId, Timestamp};

/// A user-submitted problem description.
///
/// Title and description are required and validated at construction.
/// Fields unrelated to analysis (background, contact email) may be updated
/// later; title and description are fixed once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    id: ProblemId,
    title: String,
    description: String,
    background: Option<String>,
    contact_email: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Problem {
    /// Creates a new problem, validating required fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        background: Option<String>,
        contact_email: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(DomainError::empty_field("title"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::empty_field("description"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ProblemId::new(),
            title,
            description,
            background,
            contact_email,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Updates the optional background text.
    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
        self.updated_at = Timestamp::now();
    }

    /// Updates the optional contact identifier.
    pub fn set_contact_email(&mut self, contact_email: Option<String>) {
        self.contact_email = contact_email;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn problem_creation_succeeds_with_valid_fields() {
        let problem = Problem::new(
            "Cache eviction",
            "Design an LRU cache",
            Some("High-traffic API".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(problem.title(), "Cache eviction");
        assert_eq!(problem.description(), "Design an LRU cache");
        assert_eq!(problem.background(), Some("High-traffic API"));
        assert!(problem.contact_email().is_none());
    }

    #[test]
    fn empty_title_is_rejected() {
        let result = Problem::new("", "Some description", None, None);
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
    }

    #[test]
    fn whitespace_description_is_rejected() {
        let result = Problem::new("Title", "   ", None, None);
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
    }

    #[test]
    fn set_background_touches_updated_at() {
        let mut problem = Problem::new("Title", "Description", None, None).unwrap();
        let created = problem.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(10));

        problem.set_background(Some("New context".to_string()));

        assert_eq!(problem.background(), Some("New context"));
        assert!(problem.updated_at().is_after(&created));
    }
}
