//! English-likeness heuristic for free-text requirements.
//!
//! The check is a gate against gibberish and placeholder input, not a
//! grammar check. It rejects text that is too short, text without any
//! letters, and text where too few of the plain alphabetic words belong to
//! a reference vocabulary. False positives and negatives are expected.

use std::collections::BTreeSet;

use camino::Utf8Path;

use crate::error::WorkbenchError;
use crate::files;

/// Minimum trimmed length, in characters, of an acceptable requirement.
pub const DEFAULT_MIN_REQUIREMENT_CHARS: usize = 120;

/// Minimum share of vocabulary words, in percent, of an acceptable
/// requirement.
pub const DEFAULT_VALID_WORD_PERCENT: usize = 30;

const LENGTH_MESSAGE: &str = "Requirement should contain at least 120 characters.";
const NO_LETTERS_MESSAGE: &str = "Invalid characters should in requirements.";

const BUILT_IN_WORDS: &[&str] = &[
    "this", "is", "a", "valid", "project", "requirement", "complete", "finish", "task",
    "document", "user", "email", "data", "analysis", "code", "design", "plan", "test", "review",
    "create", "update", "implement", "run", "execute", "process", "system", "shall", "provide",
    "information", "on", "the", "help", "page", "if", "you", "are", "facing", "an", "issue",
    "please", "contact", "or", "so", "that", "can", "get", "assistance", "when", "have",
    "questions", "and", "needs", "access", "for", "business", "purposes", "feature", "relates",
    "to", "local", "onboarding", "of", "affiliate", "approved", "core", "story", "as", "per",
    "security", "admin", "sop",
];

/// Reference vocabulary of lower-case words considered English-like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Default for Vocabulary {
    /// The built-in domain vocabulary (workflow and banking terms).
    fn default() -> Self {
        Self::from_words(BUILT_IN_WORDS.iter().copied())
    }
}

impl Vocabulary {
    /// Builds a vocabulary from arbitrary words, lower-casing each one.
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// Parses a word list with one word per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Loads a word list from a file (see [`Vocabulary::parse`]).
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Io`] when the file cannot be read and
    /// [`WorkbenchError::Configuration`] when it contains no words.
    pub fn load(path: &Utf8Path) -> Result<Self, WorkbenchError> {
        let vocabulary = Self::parse(&files::read_text(path)?);
        if vocabulary.is_empty() {
            return Err(WorkbenchError::Configuration {
                message: format!("vocabulary file '{path}' contains no words"),
            });
        }
        Ok(vocabulary)
    }

    /// Returns true when `word` (already lower-cased) is in the vocabulary.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true when the vocabulary holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Result of validating a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the requirement may be submitted.
    pub valid: bool,
    /// User-facing explanation; empty when valid.
    pub message: String,
}

impl ValidationOutcome {
    fn accepted() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validates requirements against a reference vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementValidator {
    vocabulary: Vocabulary,
    min_chars: usize,
    valid_word_percent: usize,
}

impl Default for RequirementValidator {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl RequirementValidator {
    /// Creates a validator with the default length and ratio thresholds.
    #[must_use]
    pub const fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            min_chars: DEFAULT_MIN_REQUIREMENT_CHARS,
            valid_word_percent: DEFAULT_VALID_WORD_PERCENT,
        }
    }

    /// Overrides the minimum share of vocabulary words, in percent.
    #[must_use]
    pub const fn with_valid_word_percent(mut self, percent: usize) -> Self {
        self.valid_word_percent = percent;
        self
    }

    /// The reference vocabulary in use.
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Classifies `text` as an acceptable requirement or not.
    #[must_use]
    pub fn validate(&self, text: &str) -> ValidationOutcome {
        if text.trim().chars().count() < self.min_chars {
            return ValidationOutcome::rejected(LENGTH_MESSAGE);
        }

        if !text.chars().any(|ch| ch.is_ascii_alphabetic()) {
            return ValidationOutcome::rejected(NO_LETTERS_MESSAGE);
        }

        let (known, total) = self.count_words(text);
        let meets_ratio = total > 0
            && known.saturating_mul(100) >= total.saturating_mul(self.valid_word_percent);

        if meets_ratio {
            ValidationOutcome::accepted()
        } else {
            ValidationOutcome::rejected(format!(
                "Requirement should contain at least {}% valid English-like words.",
                self.valid_word_percent
            ))
        }
    }

    /// Validates `text` and maps a rejection onto a field error.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Validation`] for `field` when the
    /// requirement is rejected.
    pub fn require_valid(&self, field: &str, text: &str) -> Result<(), WorkbenchError> {
        let outcome = self.validate(text);
        if outcome.valid {
            Ok(())
        } else {
            Err(WorkbenchError::validation(field, outcome.message))
        }
    }

    /// Returns `(known, total)` counts over the plain alphabetic words.
    fn count_words(&self, text: &str) -> (usize, usize) {
        text.split_whitespace()
            .map(str::to_lowercase)
            .filter(|word| is_plain_word(word))
            .fold((0, 0), |(known, total), word| {
                let hit = usize::from(self.vocabulary.contains(&word));
                (known + hit, total + 1)
            })
    }
}

fn is_plain_word(word: &str) -> bool {
    !word.is_empty() && !word.contains('@') && word.chars().all(|ch| ch.is_ascii_alphabetic())
}

/// Validates `text` with the built-in vocabulary and default thresholds.
#[must_use]
pub fn validate_requirement(text: &str) -> ValidationOutcome {
    RequirementValidator::default().validate(text)
}
