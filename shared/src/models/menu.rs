//! Menu item model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu category
///
/// Always derived from the item code with [`category_of`]; the backend and
/// the local snapshot are not trusted to carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Beverage,
    Others,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Beverage, Category::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Beverage => "Beverage",
            Self::Others => "Others",
        }
    }
}

/// Classify a menu item by its code prefix
///
/// `"1…"` is food, `"2…"` is a beverage, anything else (including an empty
/// code) falls into others.
pub fn category_of(code: &str) -> Category {
    if code.starts_with('1') {
        Category::Food
    } else if code.starts_with('2') {
        Category::Beverage
    } else {
        Category::Others
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct InvalidCategory(pub String);

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Self::Food),
            "Beverage" => Ok(Self::Beverage),
            "Others" => Ok(Self::Others),
            other => Err(InvalidCategory(other.to_string())),
        }
    }
}

/// Category selector used by the menu tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Sentinel that lets every category through
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Tabs in display order
    pub const TABS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Food),
        CategoryFilter::Only(Category::Beverage),
        CategoryFilter::Only(Category::Others),
    ];

    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Catalog record as returned by `GET /menu/list/all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMenuItem {
    pub id: i64,
    pub code: String,
    pub full_name: String,
    /// Unit of sale, e.g. "bottle" or "portion"
    #[serde(default)]
    pub quantity_type: Option<String>,
}

/// Menu item as held by the cache and the cart
///
/// `code` is the business identity. `id` is only meaningful inside one
/// snapshot and may change across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub code: String,
    #[serde(alias = "fullname")]
    pub full_name: String,
    pub category: Category,
    pub category_type: String,
}

impl MenuItem {
    /// Create an item, deriving its category from the code
    pub fn new(
        id: i64,
        code: impl Into<String>,
        full_name: impl Into<String>,
        category_type: impl Into<String>,
    ) -> Self {
        let code = code.into();
        Self {
            id,
            category: category_of(&code),
            code,
            full_name: full_name.into(),
            category_type: category_type.into(),
        }
    }
}

impl From<RemoteMenuItem> for MenuItem {
    fn from(remote: RemoteMenuItem) -> Self {
        Self::new(
            remote.id,
            remote.code,
            remote.full_name,
            remote.quantity_type.unwrap_or_default(),
        )
    }
}
