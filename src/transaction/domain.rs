//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::Date;

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// A movement of money from one category to another.
///
/// Both ends refer to a category by its title rather than its ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The title of the category the money came from.
    pub from_user: String,
    /// The title of the category the money went to.
    pub to_user: String,
    /// How much money was moved.
    pub amount: f64,
    /// The day the money was moved.
    pub date: Date,
}

/// The data needed to insert a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The title of the category the money came from.
    pub from_user: String,
    /// The title of the category the money went to.
    pub to_user: String,
    /// How much money was moved.
    pub amount: f64,
    /// The day the money was moved.
    pub date: Date,
}

/// One of the two category references on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    /// The `from_user` field.
    FromUser,
    /// The `to_user` field.
    ToUser,
}

impl Party {
    pub(crate) fn select_ids_statement(self) -> &'static str {
        match self {
            Party::FromUser => "SELECT id FROM \"transaction\" WHERE from_user = ?1 ORDER BY id",
            Party::ToUser => "SELECT id FROM \"transaction\" WHERE to_user = ?1 ORDER BY id",
        }
    }

    pub(crate) fn update_statement(self) -> &'static str {
        match self {
            Party::FromUser => "UPDATE \"transaction\" SET from_user = ?1 WHERE id = ?2",
            Party::ToUser => "UPDATE \"transaction\" SET to_user = ?1 WHERE id = ?2",
        }
    }
}
