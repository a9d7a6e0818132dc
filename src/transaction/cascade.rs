//! Propagates a category rename into the transactions that refer to it by title.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    category::CategoryTitle,
    transaction::{Party, TransactionId, find_transaction_ids_by_party},
};

#[derive(Debug, Clone, PartialEq)]
struct StagedUpdate {
    transaction_id: TransactionId,
    party: Party,
    title: String,
}

/// Transaction field updates that are applied as a single unit.
///
/// Nothing touches the database until [WriteBatch::commit], which applies
/// either every staged update or none of them.
#[derive(Debug, Default)]
pub struct WriteBatch {
    staged: Vec<StagedUpdate>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage setting the `party` field of a transaction to `title`.
    pub fn set_party(&mut self, transaction_id: TransactionId, party: Party, title: &str) {
        self.staged.push(StagedUpdate {
            transaction_id,
            party,
            title: title.to_owned(),
        });
    }

    /// The number of staged updates.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether no update has been staged.
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Apply all staged updates in one SQL transaction and return how many were applied.
    ///
    /// # Errors
    ///
    /// Returns [Error::BatchUpdateMissingTransaction] if a staged update
    /// refers to a transaction that does not exist, or an SQL error. In
    /// both cases no staged update is applied.
    pub fn commit(self, connection: &Connection) -> Result<usize, Error> {
        let sql_transaction =
            SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

        for update in &self.staged {
            let rows_affected = sql_transaction.execute(
                update.party.update_statement(),
                (&update.title, update.transaction_id),
            )?;

            if rows_affected == 0 {
                // Dropping `sql_transaction` rolls back the updates applied so far.
                return Err(Error::BatchUpdateMissingTransaction(update.transaction_id));
            }
        }

        sql_transaction.commit()?;

        Ok(self.staged.len())
    }
}

/// The number of transaction fields rewritten by a rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    /// Transactions whose `from_user` was rewritten.
    pub from_user: usize,
    /// Transactions whose `to_user` was rewritten.
    pub to_user: usize,
}

/// Rewrite every `from_user` and `to_user` equal to `old_title` to `new_title`.
///
/// Both lookups run first, then all rewrites are committed as one
/// [WriteBatch]. The caller decides whether a rename happened; passing equal
/// titles rewrites the matches to the same value.
///
/// There is no limit on how many transactions one batch may touch.
pub fn rename_cascade(
    old_title: &CategoryTitle,
    new_title: &CategoryTitle,
    connection: &Connection,
) -> Result<CascadeSummary, Error> {
    let sent = find_transaction_ids_by_party(Party::FromUser, old_title.as_ref(), connection)?;
    let received = find_transaction_ids_by_party(Party::ToUser, old_title.as_ref(), connection)?;

    let mut batch = WriteBatch::new();

    for transaction_id in &sent {
        batch.set_party(*transaction_id, Party::FromUser, new_title.as_ref());
    }

    for transaction_id in &received {
        batch.set_party(*transaction_id, Party::ToUser, new_title.as_ref());
    }

    tracing::debug!(
        "Renaming \"{old_title}\" to \"{new_title}\" in {} transaction field(s)",
        batch.len()
    );

    batch.commit(connection)?;

    Ok(CascadeSummary {
        from_user: sent.len(),
        to_user: received.len(),
    })
}
