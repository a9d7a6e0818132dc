//! Database operations for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    transaction::{NewTransaction, Party, Transaction, TransactionId},
};

/// Create a transaction and return it with its generated ID.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (from_user, to_user, amount, date) VALUES (?1, ?2, ?3, ?4);",
        (
            &new_transaction.from_user,
            &new_transaction.to_user,
            new_transaction.amount,
            new_transaction.date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        from_user: new_transaction.from_user,
        to_user: new_transaction.to_user,
        amount: new_transaction.amount,
        date: new_transaction.date,
    })
}

/// Retrieve a single transaction by ID.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare("SELECT id, from_user, to_user, amount, date FROM \"transaction\" WHERE id = :id;")?
        .query_row(&[(":id", &transaction_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all transactions, most recent first.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, from_user, to_user, amount, date FROM \"transaction\" \
            ORDER BY date DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Find the IDs of the transactions whose `party` field equals `title` exactly.
pub fn find_transaction_ids_by_party(
    party: Party,
    title: &str,
    connection: &Connection,
) -> Result<Vec<TransactionId>, Error> {
    connection
        .prepare(party.select_ids_statement())?
        .query_map((title,), |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(|error| error.into()))
        .collect()
}

/// Initialize the transaction table and indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            from_user TEXT NOT NULL,
            to_user TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_from_user ON \"transaction\"(from_user);
        CREATE INDEX IF NOT EXISTS idx_transaction_to_user ON \"transaction\"(to_user);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        from_user: row.get(1)?,
        to_user: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
    })
}
