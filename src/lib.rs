//! A web app for managing budget categories and the transactions that move
//! money between them.
//!
//! Transactions refer to categories by title, so renaming a category
//! rewrites every transaction that mentions the old title.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod amount;
mod app_state;
mod category;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use amount::{format_amount, parse_amount};
pub use app_state::AppState;
pub use category::{
    Category, CategoryId, CategoryTitle, CategoryUpdate, NewCategory, create_category,
    get_all_categories, get_category, save_category, update_category,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use routing::build_router;
pub use transaction::{
    CascadeSummary, NewTransaction, Party, Transaction, TransactionId, WriteBatch,
    create_transaction, find_transaction_ids_by_party, get_all_transactions, get_transaction,
    rename_cascade,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
