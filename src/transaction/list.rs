//! The table of transactions shown on the dashboard.

use maud::{Markup, html};

use crate::{
    api::{Transaction, TransactionType},
    endpoints::{self, format_endpoint},
    format::{format_currency, format_date},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE,
    },
};

/// Render `transactions` as a table in the order given, with a delete button per row.
pub(crate) fn transaction_list(transactions: &[Transaction]) -> Markup {
    if transactions.is_empty() {
        return html! {
            p class="py-4 text-center text-gray-500 dark:text-gray-400" { "No transactions yet." }
        };
    }

    html! {
        div class="overflow-x-auto"
        {
            table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (amount, amount_style) = match transaction.type_ {
        TransactionType::Income => (
            format!("+{}", format_currency(transaction.amount)),
            "text-green-600 dark:text-green-400",
        ),
        TransactionType::Expense => (
            format!("-{}", format_currency(transaction.amount)),
            "text-red-600 dark:text-red-400",
        ),
    };
    let date = transaction
        .date
        .as_deref()
        .map(format_date)
        .unwrap_or_default();
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (date) }
            td class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
            {
                (transaction.description)
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right font-semibold " (amount_style) }
            {
                (amount)
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm={ "Delete \"" (transaction.description) "\"?" }
                    hx-target-error="#alert-container"
                    hx-disabled-elt="this"
                {
                    "Delete"
                }
            }
        }
    }
}
