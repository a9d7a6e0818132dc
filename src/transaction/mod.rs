//! Transactions between categories and the rename cascade that keeps them consistent.

mod cascade;
mod db;
mod domain;
mod list;

pub use cascade::{CascadeSummary, WriteBatch, rename_cascade};
pub use db::{
    create_transaction, create_transaction_table, find_transaction_ids_by_party,
    get_all_transactions, get_transaction,
};
pub use domain::{NewTransaction, Party, Transaction, TransactionId};
pub use list::get_transactions_page;
