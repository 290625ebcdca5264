//! The overlay dialog that hosts the forms for adding transactions and budgets.

use maud::{Markup, html};

/// Wrap `content` in a modal dialog.
///
/// Clicking the backdrop or the close button removes the modal. Clicks inside
/// the dialog do not reach the backdrop.
pub(crate) fn modal(title: &str, content: &Markup) -> Markup {
    html! {
        div
            id="modal"
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 px-4"
            onclick="closeModal()"
        {
            div
                class="modal-content relative w-full max-w-md p-6 bg-white rounded-lg shadow
                    dark:bg-gray-800 text-gray-900 dark:text-white"
                role="dialog"
                aria-modal="true"
                onclick="event.stopPropagation()"
            {
                button
                    type="button"
                    class="close-btn absolute top-3 right-4 text-2xl leading-none text-gray-500
                        hover:text-gray-900 dark:hover:text-white"
                    aria-label="Close"
                    onclick="closeModal()"
                {
                    "×"
                }

                h2 class="text-xl font-bold mb-4" { (title) }

                (content)
            }
        }
    }
}
