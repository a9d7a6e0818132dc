//! Alert system for displaying success and error messages to users.
//!
//! An alert replaces the hidden `#alert-container` element of the base page,
//! so forms target it with `hx-target-error` and swap it with `outerHTML`.

use maud::{Markup, html};

/// An alert message with a headline and optional details.
#[derive(Debug, Clone)]
pub enum Alert {
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as a visible `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (message, details, container_style, icon) = match &self {
            Alert::Error { message, details } => (
                message,
                details,
                "flex items-start p-4 mb-4 text-red-800 border border-red-300 \
                rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 \
                dark:border-red-800",
                "!",
            ),
        };

        html! {
            div
                id="alert-container"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    span class="shrink-0 me-3 font-bold" { (icon) }

                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto -mx-1.5 -my-1.5 p-1.5 rounded-lg"
                        aria-label="Close"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
