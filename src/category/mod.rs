//! Budget categories and the modal for editing them.

mod db;
mod domain;
mod edit;
mod list;
mod selectors;

pub use db::{
    create_category, create_category_table, get_all_categories, get_category, update_category,
};
pub use domain::{Category, CategoryId, CategoryTitle, CategoryUpdate, DEFAULT_ROW, NewCategory};
pub use edit::{get_edit_category_modal, save_category, update_category_endpoint};
pub use list::get_categories_page;
