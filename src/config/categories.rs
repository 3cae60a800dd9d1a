//! Leave category configuration loading from config.toml
//!
//! This module provides the process-wide set of leave categories and the number
//! of days each new employee starts with in every category. Categories are read
//! from a TOML configuration file; when no file is present the built-in
//! Vacation/Sick/Maternity defaults apply.

use crate::errors::{Error, Result};
use crate::models::LeaveCategory;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Built-in categories used when no configuration file is supplied.
const DEFAULT_CATEGORIES: [(&str, u32); 3] = [("Vacation", 15), ("Sick", 10), ("Maternity", 90)];

/// Configuration structure representing the `[[categories]]` tables of config.toml
#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    /// List of leave categories in display order
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single leave category
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryConfig {
    /// Name of the category (e.g., "Vacation")
    pub name: String,
    /// Days granted to a newly created employee
    pub allotment: u32,
}

/// The validated, ordered set of leave categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveCategories {
    entries: Vec<CategoryConfig>,
}

impl LeaveCategories {
    /// Builds a category set, rejecting blank names, duplicates, and an empty list.
    pub fn new(entries: Vec<CategoryConfig>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Config {
                message: "At least one leave category must be configured".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::Config {
                    message: "Leave category name cannot be empty".to_string(),
                });
            }
            if !seen.insert(name.clone()) {
                return Err(Error::Config {
                    message: format!("Duplicate leave category: {name}"),
                });
            }
            cleaned.push(CategoryConfig {
                name,
                allotment: entry.allotment,
            });
        }

        Ok(Self { entries: cleaned })
    }

    /// Iterates categories in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.entries.iter()
    }

    /// Category names in configured order.
    pub fn names(&self) -> impl Iterator<Item = LeaveCategory> + '_ {
        self.entries.iter().map(|c| LeaveCategory::new(c.name.clone()))
    }

    /// Whether `category` is configured.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|c| c.name == category)
    }

    /// Default allotment for `category`, if it is configured.
    #[must_use]
    pub fn allotment(&self, category: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.allotment)
    }

    /// Starting balances for a newly created employee.
    #[must_use]
    pub fn default_balances(&self) -> BTreeMap<LeaveCategory, i64> {
        self.entries
            .iter()
            .map(|c| (LeaveCategory::new(c.name.clone()), i64::from(c.allotment)))
            .collect()
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LeaveCategories {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, allotment)| CategoryConfig {
                    name: (*name).to_string(),
                    allotment: *allotment,
                })
                .collect(),
        }
    }
}

/// Parses a category set from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is malformed or the category list is invalid.
pub fn parse_categories(contents: &str) -> Result<LeaveCategories> {
    let file: CategoriesFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse leave categories: {e}"),
    })?;
    LeaveCategories::new(file.categories)
}

/// Loads leave categories from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(LeaveCategories)` - Parsed categories, or the defaults if the file does not exist
/// * `Err(Error)` - Failed to read or parse the configuration file
pub fn load_categories<P: AsRef<Path>>(path: P) -> Result<LeaveCategories> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(
            "No category config at {:?}, using built-in leave categories",
            path
        );
        return Ok(LeaveCategories::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_categories(&contents)
}
