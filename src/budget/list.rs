//! The list of budgets with how much of each has been spent.

use maud::{Markup, html};

use crate::{
    api::{Budget, ExpensesByCategory},
    endpoints::{self, format_endpoint},
    format::format_currency,
    html::{BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE},
};

/// How much of a budget has been used up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BudgetProgress {
    spent: f64,
    remaining: f64,
    /// The share of the budget spent as a percentage, capped at 100.
    percent: f64,
    over_budget: bool,
}

impl BudgetProgress {
    fn new(budget: &Budget, expenses_by_category: &ExpensesByCategory) -> Self {
        let spent = expenses_by_category
            .get(&budget.category)
            .copied()
            .unwrap_or_default();
        let percent = if budget.amount > 0.0 {
            (spent / budget.amount * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        Self {
            spent,
            remaining: budget.amount - spent,
            percent,
            over_budget: spent > budget.amount,
        }
    }
}

/// Render `budgets` with the amount spent in each budget's category.
pub(crate) fn budget_list(budgets: &[Budget], expenses_by_category: &ExpensesByCategory) -> Markup {
    if budgets.is_empty() {
        return html! {
            p class="py-4 text-center text-gray-500 dark:text-gray-400" { "No budgets for this month yet." }
        };
    }

    html! {
        ul class="space-y-4"
        {
            @for budget in budgets {
                (budget_item(budget, BudgetProgress::new(budget, expenses_by_category)))
            }
        }
    }
}

fn budget_item(budget: &Budget, progress: BudgetProgress) -> Markup {
    let bar_style = if progress.over_budget {
        "bg-red-600"
    } else if progress.percent >= 80.0 {
        "bg-yellow-400"
    } else {
        "bg-green-600"
    };
    let delete_url = format_endpoint(endpoints::DELETE_BUDGET, budget.id);

    html! {
        li class="p-4 border rounded-lg dark:border-gray-700" data-budget-id=(budget.id)
        {
            div class="flex items-center justify-between mb-2"
            {
                span class=(CATEGORY_BADGE_STYLE) { (budget.category) }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm={ "Delete the " (budget.category) " budget?" }
                    hx-target-error="#alert-container"
                    hx-disabled-elt="this"
                {
                    "Delete"
                }
            }

            div class="flex justify-between text-sm text-gray-700 dark:text-gray-300"
            {
                span class="budget-spent" { (format_currency(progress.spent)) " spent" }
                span class="budget-amount" { "of " (format_currency(budget.amount)) }
            }

            div
                class="w-full h-2 my-2 bg-gray-200 rounded-full dark:bg-gray-700"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=(format!("{:.0}", progress.percent))
            {
                div class={ "h-2 rounded-full " (bar_style) } style={ "width: " (format!("{:.0}", progress.percent)) "%" } {}
            }

            p class="budget-remaining text-sm"
            {
                @if progress.over_budget {
                    span class="text-red-600 dark:text-red-400"
                    {
                        (format_currency(-progress.remaining)) " over budget"
                    }
                } @else {
                    span class="text-gray-500 dark:text-gray-400"
                    {
                        (format_currency(progress.remaining)) " remaining"
                    }
                }
            }
        }
    }
}
