//! Exercise domain types.
//!
//! An [`Exercise`] belongs to exactly one [`Category`]. The selector and the
//! settings use [`CategoryFilter`], which adds the `All` wildcard on top of
//! the closed category set.

mod catalog;
mod defaults;

pub use catalog::{Catalog, ExerciseDraft, ImportReport};
pub use defaults::default_exercises;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default exercise length in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Neck,
    Shoulders,
    Back,
    Hips,
    Legs,
    Feet,
    Hands,
    #[serde(rename = "Full-Body")]
    FullBody,
    Stretch,
    Strength,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Neck,
        Category::Shoulders,
        Category::Back,
        Category::Hips,
        Category::Legs,
        Category::Feet,
        Category::Hands,
        Category::FullBody,
        Category::Stretch,
        Category::Strength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Neck => "Neck",
            Category::Shoulders => "Shoulders",
            Category::Back => "Back",
            Category::Hips => "Hips",
            Category::Legs => "Legs",
            Category::Feet => "Feet",
            Category::Hands => "Hands",
            Category::FullBody => "Full-Body",
            Category::Stretch => "Stretch",
            Category::Strength => "Strength",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Category selection used by settings, the selector and session records.
///
/// Serialized as the bare label: `"All"` or a category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: u32,
    pub category: Category,
    pub instructions: Vec<String>,
}
