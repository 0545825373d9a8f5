//! User stories fetched from the tracker and local edits applied to them.

use serde::{Deserialize, Serialize};

/// A requirement record fetched from the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    /// Tracker key, unique within a fetch (e.g. `BANK-42`).
    pub key: String,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Acceptance criteria used as the requirement text for generation.
    #[serde(default)]
    pub acceptance_criteria: String,
}

impl UserStory {
    /// Returns a copy of this story with the edit applied.
    ///
    /// The key is preserved; the receiver is left untouched so the fetched
    /// record stays available for comparison or reset.
    #[must_use]
    pub fn with_edit(&self, edit: &StoryEdit) -> Self {
        Self {
            key: self.key.clone(),
            summary: edit.summary.clone(),
            description: edit.description.clone(),
            acceptance_criteria: edit.acceptance_criteria.clone(),
        }
    }
}

/// Replacement field values for a locally edited story.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryEdit {
    /// New summary.
    pub summary: String,
    /// New description.
    pub description: String,
    /// New acceptance criteria.
    pub acceptance_criteria: String,
}

impl From<&UserStory> for StoryEdit {
    fn from(story: &UserStory) -> Self {
        Self {
            summary: story.summary.clone(),
            description: story.description.clone(),
            acceptance_criteria: story.acceptance_criteria.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoryEdit, UserStory};

    #[test]
    fn with_edit_produces_new_snapshot() {
        let fetched = UserStory {
            key: "BANK-7".to_owned(),
            summary: "Old summary".to_owned(),
            description: "Old description".to_owned(),
            acceptance_criteria: "Old criteria".to_owned(),
        };
        let edit = StoryEdit {
            summary: "New summary".to_owned(),
            ..StoryEdit::from(&fetched)
        };

        let edited = fetched.with_edit(&edit);

        assert_eq!(edited.key, "BANK-7");
        assert_eq!(edited.summary, "New summary");
        assert_eq!(edited.description, "Old description");
        assert_eq!(fetched.summary, "Old summary");
    }
}
