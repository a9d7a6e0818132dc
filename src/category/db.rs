//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryTitle, CategoryUpdate, NewCategory},
};

/// Create a category and return it with its generated ID.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (title, amount, icon, color, display_row) VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            new_category.title.as_ref(),
            &new_category.amount,
            &new_category.icon,
            &new_category.color,
            new_category.row,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        title: new_category.title,
        amount: new_category.amount,
        icon: new_category.icon,
        color: new_category.color,
        row: new_category.row,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, title, amount, icon, color, display_row FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered by row, then by insertion order.
///
/// Categories without a row are shown in the first row.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, icon, color, display_row FROM category \
            ORDER BY COALESCE(display_row, 1) ASC, id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the user editable fields of a category.
///
/// # Errors
///
/// Returns [Error::UpdateMissingCategory] if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    update: &CategoryUpdate,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET title = ?1, amount = ?2, icon = ?3, color = ?4 WHERE id = ?5",
        (
            update.title.as_ref(),
            &update.amount,
            &update.icon,
            &update.color,
            category_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Initialize the category table.
///
/// Titles are not unique: nothing stops two categories sharing a title.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            amount TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            display_row INTEGER
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let title = CategoryTitle::new_unchecked(&raw_title);

    Ok(Category {
        id,
        title,
        amount: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
        row: row.get(5)?,
    })
}
