//! Expense categories
//!
//! The category set is shared by every family member. It is an ordered list of
//! unique names; lookups are exact and case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories available in a fresh ledger
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Food", "Transportation", "Utilities", "Entertainment", "Other"];

/// Ordered, duplicate-free list of category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    /// The built-in five categories
    pub fn defaults() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    /// Append a new category, returning the stored (trimmed) name
    pub fn add(&mut self, name: &str) -> Result<&str, CategoryValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.contains(name) {
            return Err(CategoryValidationError::Duplicate(name.to_string()));
        }

        self.0.push(name.to_string());
        Ok(&self.0[self.0.len() - 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of a category in display order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl From<Vec<String>> for CategorySet {
    /// Build from stored names, dropping blanks and later duplicates
    fn from(names: Vec<String>) -> Self {
        let mut set = Self::empty();
        for name in names {
            // Rejections here are the blanks and repeats being dropped
            let _ = set.add(&name);
        }
        set
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.0
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    Duplicate(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::Duplicate(name) => write!(f, "Category '{}' already exists", name),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
