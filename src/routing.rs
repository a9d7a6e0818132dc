//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    amount::get_amount_preview,
    category::{get_categories_page, get_edit_category_modal, update_category_endpoint},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::get_transactions_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_modal))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::PUT_CATEGORY, put(update_category_endpoint))
        .route(endpoints::AMOUNT_PREVIEW, get(get_amount_preview))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the categories page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CATEGORIES_VIEW)
}
