//! The modal for editing a category and the endpoint that saves it.
//!
//! Saving is two separate writes: the category row itself, then, if the
//! title changed, the rename of every transaction that refers to the old
//! title. The second write does not undo the first if it fails.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    amount::{amount_preview_view, format_amount, parse_amount},
    category::{
        CategoryId, CategoryTitle, CategoryUpdate, DEFAULT_ROW,
        domain::CategoryFormData,
        get_category,
        selectors::{color_selector, icon_selector},
        update_category,
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::{CascadeSummary, rename_cascade},
};

/// Clears the modal container, which closes the modal.
const CLOSE_MODAL_SCRIPT: &str = "document.getElementById('modal-container').innerHTML = ''";

/// Keeps the amount field to the characters the amount formatter reads.
const STRIP_AMOUNT_SCRIPT: &str = "this.value = this.value.replace(/[^0-9.-]/g, '')";

/// The state needed for the edit category modal.
#[derive(Debug, Clone)]
pub struct EditCategoryModalState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryModalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for saving a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The values shown in the edit form.
struct CategoryFormFields<'a> {
    title: &'a str,
    /// The amount as the user types it, i.e. without grouping or currency.
    amount: &'a str,
    icon: &'a str,
    color: &'a str,
    row: i64,
}

/// Save the user's edits to a category.
///
/// Updates the category, then renames the category in all transactions if
/// the title changed. Returns what the rename rewrote, or `None` if the
/// title is unchanged, in which case transactions are not queried at all.
///
/// # Errors
///
/// Returns an error if either step fails. A failed rename does not revert
/// the category update that preceded it.
pub fn save_category(
    category_id: CategoryId,
    update: &CategoryUpdate,
    connection: &Connection,
) -> Result<Option<CascadeSummary>, Error> {
    let current = get_category(category_id, connection)?;

    update_category(category_id, update, connection)?;

    if current.title == update.title {
        return Ok(None);
    }

    rename_cascade(&current.title, &update.title, connection).map(Some)
}

/// Render the edit modal for a category.
///
/// The categories page swaps this fragment into its modal container.
pub async fn get_edit_category_modal(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryModalState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    match get_category(category_id, &connection) {
        Ok(category) => {
            let amount = parse_amount(&category.amount);
            let fields = CategoryFormFields {
                title: category.title.as_ref(),
                amount: &amount,
                icon: &category.icon,
                color: &category.color,
                row: category.display_row(),
            };

            Ok(edit_category_modal_view(&edit_category_form_view(&update_endpoint, &fields, ""))
                .into_response())
        }
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Category not found",
                _ => {
                    tracing::error!("Failed to retrieve category {category_id}: {error}");
                    "Failed to load category"
                }
            };

            Ok(edit_category_modal_view(&html! {
                p id="form-error" class="text-red-600 dark:text-red-400" { (error_message) }
            })
            .into_response())
        }
    }
}

/// Handle the edit category form submission.
///
/// On success the client is redirected to the categories page, which closes
/// the modal. On failure an alert is shown and the modal stays open with the
/// submitted values.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryEndpointState>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category_id);

    let title = match CategoryTitle::new(&form_data.title) {
        Ok(title) => title,
        Err(error) => {
            let fields = CategoryFormFields {
                title: &form_data.title,
                amount: &form_data.amount,
                icon: &form_data.icon,
                color: &form_data.color,
                row: form_data.row.unwrap_or(DEFAULT_ROW),
            };

            return edit_category_form_view(&update_endpoint, &fields, &format!("Error: {error}"))
                .into_response();
        }
    };

    let update = CategoryUpdate {
        title,
        amount: format_amount(&form_data.amount),
        icon: form_data.icon,
        color: form_data.color,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match save_category(category_id, &update, &connection) {
        Ok(cascade) => {
            match cascade {
                Some(summary) => tracing::info!(
                    "Updated category {category_id} and renamed it to \"{}\" in {} sending and {} receiving transaction(s)",
                    update.title,
                    summary.from_user,
                    summary.to_user
                ),
                None => tracing::info!("Updated category {category_id}"),
            }

            (
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not save category {category_id}: {error}");
            Error::CategorySaveFailed.into_alert_response()
        }
    }
}

fn edit_category_modal_view(body: &Markup) -> Markup {
    html! {
        div
            id="category-modal"
            class="fixed inset-0 bg-black/50 flex items-center justify-center p-4 z-50"
        {
            div class="bg-white dark:bg-gray-800 text-gray-900 dark:text-white rounded-lg max-w-md w-full p-6 max-h-full overflow-y-auto"
            {
                div class="flex justify-between items-center mb-4"
                {
                    h2 class="text-xl font-semibold" { "Edit Category" }

                    button
                        type="button"
                        aria-label="Close"
                        onclick=(CLOSE_MODAL_SCRIPT)
                        class="text-2xl text-gray-500 hover:text-gray-700 dark:hover:text-gray-300"
                    {
                        "×"
                    }
                }

                (body)
            }
        }
    }
}

fn edit_category_form_view(
    update_endpoint: &str,
    fields: &CategoryFormFields,
    error_message: &str,
) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-put=(update_endpoint)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="#submit-button"
            hx-indicator="#indicator"
            hx-disinherit="*"
            class="w-full space-y-4"
        {
            input type="hidden" name="row" value=(fields.row);

            div
            {
                label
                    for="title"
                    class=(FORM_LABEL_STYLE)
                {
                    "Title"
                }

                input
                    id="title"
                    type="text"
                    name="title"
                    placeholder="Title"
                    value=(fields.title)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount (₸)"
                }

                input
                    id="amount"
                    type="text"
                    name="amount"
                    inputmode="decimal"
                    placeholder="0"
                    value=(fields.amount)
                    required
                    oninput=(STRIP_AMOUNT_SCRIPT)
                    hx-get=(endpoints::AMOUNT_PREVIEW)
                    hx-trigger="input changed delay:200ms"
                    hx-target="#amount-preview"
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);

                (amount_preview_view(fields.amount))
            }

            (icon_selector(fields.icon, fields.row))

            (color_selector(fields.color))

            @if !error_message.is_empty() {
                p id="form-error" class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Save"
            }
        }
    }
}

#[cfg(test)]
mod edit_category_modal_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        category::{CategoryTitle, NewCategory, create_category, edit::EditCategoryModalState},
        db::initialize,
        endpoints,
        test_utils::{
            assert_checked_radio, assert_content_type, assert_form_error_message,
            assert_form_input_with_value, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_fragment,
        },
    };

    use super::get_edit_category_modal;

    fn get_state() -> EditCategoryModalState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        EditCategoryModalState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_form_with_current_values() {
        let state = get_state();
        let category = create_category(
            NewCategory {
                title: CategoryTitle::new_unchecked("Food"),
                amount: "1 500 ₸".to_owned(),
                icon: "utensils".to_owned(),
                color: "green".to_owned(),
                row: Some(3),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let response = get_edit_category_modal(Path(category.id), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PUT_CATEGORY, category.id),
            "hx-put",
        );
        assert_hx_endpoint(&form, "#submit-button", "hx-disabled-elt");
        assert_form_input_with_value(&form, "title", "text", "Food");
        assert_form_input_with_value(&form, "amount", "text", "1500");
        assert_checked_radio(&form, "icon", "utensils");
        assert_checked_radio(&form, "color", "green");
        assert_form_submit_button_with_text(&form, "Save");
    }

    #[tokio::test]
    async fn missing_category_shows_error() {
        let state = get_state();

        let response = get_edit_category_modal(Path(999999), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_form_error_message(&html, "Category not found");
    }
}

#[cfg(test)]
mod update_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{
            Category, CategoryTitle, NewCategory, create_category, domain::CategoryFormData,
            edit::UpdateCategoryEndpointState, get_category,
        },
        db::initialize,
        endpoints,
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_redirect,
            assert_valid_html, must_get_form, parse_html_fragment,
        },
        transaction::{NewTransaction, Transaction, create_transaction, get_all_transactions},
    };

    use super::update_category_endpoint;

    fn get_state() -> UpdateCategoryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        UpdateCategoryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert_food_category(state: &UpdateCategoryEndpointState) -> Category {
        create_category(
            NewCategory {
                title: CategoryTitle::new_unchecked("Food"),
                amount: "1 000 ₸".to_owned(),
                icon: "utensils".to_owned(),
                color: "green".to_owned(),
                row: Some(3),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category")
    }

    fn insert_transaction(
        state: &UpdateCategoryEndpointState,
        from_user: &str,
        to_user: &str,
    ) -> Transaction {
        create_transaction(
            NewTransaction {
                from_user: from_user.to_owned(),
                to_user: to_user.to_owned(),
                amount: 3000.0,
                date: date!(2025 - 06 - 01),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test transaction")
    }

    fn form(title: &str, amount: &str) -> CategoryFormData {
        CategoryFormData {
            title: title.to_owned(),
            amount: amount.to_owned(),
            icon: "shopping-cart".to_owned(),
            color: "blue".to_owned(),
            row: Some(3),
        }
    }

    fn all_parties(state: &UpdateCategoryEndpointState) -> Vec<(String, String)> {
        get_all_transactions(&state.db_connection.lock().unwrap())
            .unwrap()
            .into_iter()
            .map(|transaction| (transaction.from_user, transaction.to_user))
            .collect()
    }

    #[tokio::test]
    async fn rename_updates_category_and_transactions() {
        let state = get_state();
        let category = insert_food_category(&state);
        insert_transaction(&state, "Food", "Cafe");
        insert_transaction(&state, "Food", "Market");
        insert_transaction(&state, "Wallet", "Food");
        insert_transaction(&state, "Salary", "Wallet");

        let response = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("Groceries", "1500")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);

        let updated = get_category(category.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.title.as_ref(), "Groceries");
        assert_eq!(updated.amount, "1 500 ₸");
        assert_eq!(updated.icon, "shopping-cart");
        assert_eq!(updated.color, "blue");

        let mut parties = all_parties(&state);
        parties.sort();
        assert_eq!(
            parties,
            vec![
                ("Groceries".to_owned(), "Cafe".to_owned()),
                ("Groceries".to_owned(), "Market".to_owned()),
                ("Salary".to_owned(), "Wallet".to_owned()),
                ("Wallet".to_owned(), "Groceries".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn unchanged_title_does_not_touch_transactions() {
        let state = get_state();
        let category = insert_food_category(&state);
        // Any query against the transaction table would now fail.
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE \"transaction\"", ())
            .unwrap();

        let response = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("Food", "2000")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let updated = get_category(category.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.amount, "2 000 ₸");
    }

    #[tokio::test]
    async fn failed_rename_keeps_category_update() {
        let state = get_state();
        let category = insert_food_category(&state);
        insert_transaction(&state, "Food", "Cafe");
        insert_transaction(&state, "Wallet", "Food");
        state
            .db_connection
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_rename BEFORE UPDATE ON \"transaction\"
                BEGIN
                    SELECT RAISE(ABORT, 'rejected');
                END;",
            )
            .unwrap();

        let response = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("Groceries", "1500")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Could not update category"));

        // The category update was committed before the rename failed.
        let updated = get_category(category.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.title.as_ref(), "Groceries");
        assert_eq!(updated.amount, "1 500 ₸");

        let mut parties = all_parties(&state);
        parties.sort();
        assert_eq!(
            parties,
            vec![
                ("Food".to_owned(), "Cafe".to_owned()),
                ("Wallet".to_owned(), "Food".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn resubmitting_has_no_further_effect() {
        let state = get_state();
        let category = insert_food_category(&state);
        insert_transaction(&state, "Food", "Cafe");

        let first = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("Groceries", "1500")),
        )
        .await;
        let category_after_first =
            get_category(category.id, &state.db_connection.lock().unwrap()).unwrap();
        let parties_after_first = all_parties(&state);

        let second = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("Groceries", "1500")),
        )
        .await;

        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()).unwrap(),
            category_after_first
        );
        assert_eq!(all_parties(&state), parties_after_first);
    }

    #[tokio::test]
    async fn empty_title_rerenders_form_with_error() {
        let state = get_state();
        let category = insert_food_category(&state);

        let response = update_category_endpoint(
            Path(category.id),
            State(state.clone()),
            Form(form("   ", "1500")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_form_error_message(&html, "Error: Category title cannot be empty");
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "text", "1500");

        let unchanged = get_category(category.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(unchanged, category);
    }

    #[tokio::test]
    async fn missing_category_shows_alert() {
        let state = get_state();

        let response =
            update_category_endpoint(Path(999999), State(state), Form(form("Groceries", "1")))
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
