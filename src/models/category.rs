//! Category model
//!
//! A category is a trimmed, non-empty name. Aggregation and budgeting only
//! rely on equality, ordering and hashing, so the same type serves both
//! free-form names and a seeded default list.
//!
//! Identity ignores case: "Groceries" and "groceries" are the same category
//! for filtering, totals and budgets. The name keeps the spelling it was
//! created with.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::LedgerError;

/// Maximum category name length in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A validated category name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category {
    name: String,
    /// Lowercased name; equality, ordering and hashing use only this
    key: String,
}

impl Category {
    /// Create a category, trimming the name
    pub fn new(name: impl AsRef<str>) -> Result<Self, CategoryValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        let len = trimmed.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }
        Ok(Self {
            name: trimmed.to_string(),
            key: trimmed.to_lowercase(),
        })
    }

    /// Parse an optional category: blank input means "unset"
    pub fn parse_optional(name: &str) -> Result<Option<Self>, CategoryValidationError> {
        if name.trim().is_empty() {
            Ok(None)
        } else {
            Self::new(name).map(Some)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.key == name.trim().to_lowercase()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl FromStr for Category {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name
    }
}

/// Validation errors for category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

impl From<CategoryValidationError> for LedgerError {
    fn from(err: CategoryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
