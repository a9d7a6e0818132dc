//! Categories page, which hosts the edit modal.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories, selectors::color_swatch_class},
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the categories page with one section per row.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let mut rows: BTreeMap<i64, Vec<Category>> = BTreeMap::new();
    for category in categories {
        rows.entry(category.display_row()).or_default().push(category);
    }

    Ok(categories_view(&rows).into_response())
}

fn category_card(category: &Category) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);

    html! {
        li
        {
            button
                type="button"
                hx-get=(edit_url)
                hx-target="#modal-container"
                class="w-full flex items-center gap-3 p-4 rounded-lg shadow bg-white
                dark:bg-gray-800 hover:bg-gray-100 dark:hover:bg-gray-700 text-left"
            {
                span class=(format!("inline-block w-8 h-8 rounded-full shrink-0 {}", color_swatch_class(&category.color)))
                    title=(category.icon)
                {}

                span class="flex flex-col min-w-0"
                {
                    span class="font-semibold truncate" { (category.title) }
                    span class="text-sm text-gray-500 dark:text-gray-400" { (category.amount) }
                }
            }
        }
    }
}

fn categories_view(rows: &BTreeMap<i64, Vec<Category>>) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Categories" }

                @if rows.is_empty() {
                    p { "No categories yet." }
                }

                @for (row, categories) in rows {
                    ul
                        class="grid grid-cols-2 md:grid-cols-4 gap-4"
                        data-row=(row)
                    {
                        @for category in categories {
                            (category_card(category))
                        }
                    }
                }
            }
        }

        div id="modal-container" {}
    );

    base("Categories", &content)
}
