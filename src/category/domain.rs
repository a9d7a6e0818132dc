//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty category title.
///
/// Transactions store the title of the categories they move money between,
/// so the title doubles as a reference key. See [crate::transaction::rename_cascade].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryTitle(String);

impl CategoryTitle {
    /// Create a category title.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryTitle] if `title` is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyCategoryTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create a category title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for CategoryTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryTitle::new(s)
    }
}

impl Display for CategoryTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// The row a category is displayed in when no row has been set.
pub const DEFAULT_ROW: i64 = 1;

/// A budget bucket, e.g. 'Salary', 'Wallet' or 'Groceries'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The title, which transactions use to refer to the category.
    pub title: CategoryTitle,
    /// The amount as a display string, e.g. "1 500 ₸".
    pub amount: String,
    /// The name of the icon shown on the category card.
    pub icon: String,
    /// The color token of the category card, e.g. "blue".
    pub color: String,
    /// The row the category is displayed in.
    pub row: Option<i64>,
}

impl Category {
    /// The row the category is displayed in, falling back to [DEFAULT_ROW].
    pub fn display_row(&self) -> i64 {
        self.row.unwrap_or(DEFAULT_ROW)
    }
}

/// The data needed to insert a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The title of the new category.
    pub title: CategoryTitle,
    /// The amount as a display string, see [crate::format_amount].
    pub amount: String,
    /// The name of the icon shown on the category card.
    pub icon: String,
    /// The color token of the category card.
    pub color: String,
    /// The row the category is displayed in, if any.
    pub row: Option<i64>,
}

/// The user editable fields of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    /// The new title. Transactions are renamed if it differs from the old one.
    pub title: CategoryTitle,
    /// The formatted amount, see [crate::format_amount].
    pub amount: String,
    /// The name of the icon shown on the category card.
    pub icon: String,
    /// The color token of the category card.
    pub color: String,
}

/// Form data for editing a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFormData {
    /// The title as typed by the user, not yet validated.
    pub title: String,
    /// The raw amount as typed by the user.
    pub amount: String,
    /// The selected icon.
    pub icon: String,
    /// The selected color token.
    pub color: String,
    /// The category's row, used to pick the icons offered when the form is shown again.
    #[serde(default)]
    pub row: Option<i64>,
}
