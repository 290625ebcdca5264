//! HTML views for the dashboard: the stats grid, the tabs and their panels.

use maud::{Markup, html};

use crate::{
    analytics::insights_view,
    budget::budget_list,
    dashboard::{
        charts::{build_expenses_chart, chart_script, chart_view},
        loader::{BudgetPeriod, DashboardData},
        stats::DerivedStats,
    },
    endpoints,
    format::format_currency,
    html::{BUTTON_SECONDARY_STYLE, loading_spinner},
    import::TRANSACTIONS_IMPORTED_EVENT,
    transaction::transaction_list,
};

/// How many transactions the overview tab lists.
const RECENT_TRANSACTION_COUNT: usize = 5;

const CARD_STYLE: &str = "w-full p-6 bg-white rounded-lg shadow dark:bg-gray-800 \
    text-gray-900 dark:text-white";

/// The tabs of the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    #[default]
    Overview,
    Transactions,
    Budgets,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Overview, Tab::Transactions, Tab::Budgets];

    /// Parse the `tab` query parameter, falling back to the overview for unknown tabs.
    pub(crate) fn from_query(tab: Option<&str>) -> Self {
        Tab::ALL
            .into_iter()
            .find(|candidate| Some(candidate.key()) == tab)
            .unwrap_or_default()
    }

    pub(crate) fn key(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Transactions => "transactions",
            Tab::Budgets => "budgets",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Transactions => "Transactions",
            Tab::Budgets => "Budgets",
        }
    }
}

/// Switches tabs without a round trip to the server.
pub(super) const TAB_SCRIPT: &str = "function showTab(key) {
    document.querySelectorAll('[data-tab-panel]').forEach((panel) => {
        panel.classList.toggle('hidden', panel.dataset.tabPanel !== key);
    });
    document.querySelectorAll('[data-tab]').forEach((tab) => {
        tab.setAttribute('aria-selected', tab.dataset.tab === key);
    });
    document.dispatchEvent(new Event('tab-shown'));
}";

const TAB_STYLE: &str = "px-4 py-2 text-sm font-medium rounded-t-lg border-b-2 \
    border-transparent text-gray-500 hover:text-gray-700 dark:text-gray-400 \
    dark:hover:text-gray-300 aria-selected:border-blue-600 aria-selected:text-blue-600 \
    dark:aria-selected:text-blue-500 dark:aria-selected:border-blue-500";

pub(super) fn stats_grid(stats: &DerivedStats) -> Markup {
    let stat_cards = [
        ("Current Balance", format_currency(stats.balance)),
        ("Total Income", format_currency(stats.total_income)),
        ("Total Expenses", format_currency(stats.total_expenses)),
        ("Transactions", stats.transaction_count.to_string()),
    ];

    html! {
        section id="stats" class="grid grid-cols-2 lg:grid-cols-4 gap-4 w-full mb-6"
        {
            @for (label, value) in stat_cards {
                div class=(CARD_STYLE)
                {
                    div class="stat-value text-2xl font-bold" { (value) }
                    div class="stat-label text-sm text-gray-500 dark:text-gray-400" { (label) }
                }
            }
        }
    }
}

pub(super) fn tab_navigation(active_tab: Tab) -> Markup {
    html! {
        nav role="tablist" class="flex gap-2 mb-4 border-b border-gray-200 dark:border-gray-700 w-full"
        {
            @for tab in Tab::ALL {
                button
                    type="button"
                    role="tab"
                    data-tab=(tab.key())
                    aria-selected=((tab == active_tab).to_string())
                    onclick={ "showTab('" (tab.key()) "')" }
                    class=(TAB_STYLE)
                {
                    (tab.label())
                }
            }
        }
    }
}

fn tab_panel(tab: Tab, active_tab: Tab, content: Markup) -> Markup {
    html! {
        div
            id={ "tab-" (tab.key()) }
            role="tabpanel"
            data-tab-panel=(tab.key())
            class=[(tab != active_tab).then_some("hidden")]
        {
            (content)
        }
    }
}

fn add_button(label: &str, modal_endpoint: &str) -> Markup {
    html! {
        button
            type="button"
            hx-get=(modal_endpoint)
            hx-target="#modal-container"
            hx-target-error="#alert-container"
            class="px-4 py-2 text-sm bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 text-white rounded"
        {
            (label)
        }
    }
}

/// The URL of the dashboard content with `tab` selected.
pub(super) fn content_url(tab: Tab) -> String {
    match serde_urlencoded::to_string([("tab", tab.key())]) {
        Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_CONTENT),
        Err(error) => {
            tracing::error!("Could not encode dashboard query: {error}");
            endpoints::DASHBOARD_CONTENT.to_owned()
        }
    }
}

/// The dashboard once all its data has loaded.
///
/// After a CSV import the content reloads itself on the transactions tab,
/// where the import was started.
pub(super) fn dashboard_ready_view(
    data: &DashboardData,
    stats: &DerivedStats,
    period: BudgetPeriod,
    active_tab: Tab,
) -> Markup {
    let expenses_chart = build_expenses_chart(&data.expenses_by_category);
    let recent_count = data.transactions.len().min(RECENT_TRANSACTION_COUNT);

    let overview = html! {
        div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
        {
            div class=(CARD_STYLE)
            {
                h3 class="text-lg font-semibold mb-4" { "Expense Categories" }

                @match &expenses_chart {
                    Some(chart) => {
                        (chart_view(chart))
                    }
                    None => {
                        p class="text-gray-500 dark:text-gray-400" { "No expenses yet." }
                    }
                }
            }

            div class=(CARD_STYLE)
            {
                h3 class="text-lg font-semibold mb-4" { "Recent Transactions" }

                (transaction_list(&data.transactions[..recent_count]))

                button
                    type="button"
                    onclick={ "showTab('" (Tab::Transactions.key()) "')" }
                    class={ "mt-4 " (BUTTON_SECONDARY_STYLE) }
                {
                    "View All"
                }
            }
        }

        (insights_view(&data.transactions, period))
    };

    let transactions = html! {
        div class=(CARD_STYLE)
        {
            div class="flex justify-between items-center mb-4"
            {
                h3 class="text-lg font-semibold" { "All Transactions" }
                div class="flex gap-2"
                {
                    (add_button("Import CSV", endpoints::IMPORT_MODAL))
                    (add_button("Add Transaction", endpoints::TRANSACTION_MODAL))
                }
            }

            (transaction_list(&data.transactions))
        }
    };

    let budgets = html! {
        div class=(CARD_STYLE)
        {
            div class="flex justify-between items-center mb-4"
            {
                h3 class="text-lg font-semibold"
                {
                    "Budgets for " (period.month) "/" (period.year)
                }
                (add_button("Add Budget", endpoints::BUDGET_MODAL))
            }

            (budget_list(&data.budgets, &data.expenses_by_category))
        }
    };

    html! {
        div
            id="dashboard-content"
            class="w-full"
            hx-get=(content_url(Tab::Transactions))
            hx-trigger={ (TRANSACTIONS_IMPORTED_EVENT) " from:body" }
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
        {
            (stats_grid(stats))
            (tab_navigation(active_tab))
            (tab_panel(Tab::Overview, active_tab, overview))
            (tab_panel(Tab::Transactions, active_tab, transactions))
            (tab_panel(Tab::Budgets, active_tab, budgets))

            @if let Some(chart) = &expenses_chart {
                (chart_script(chart))
            }
        }
    }
}

/// The placeholder shown while the dashboard data loads.
///
/// htmx requests the dashboard content as soon as the placeholder is on the page.
pub(super) fn dashboard_loading_view(content_url: &str) -> Markup {
    html! {
        div
            id="dashboard-content"
            class="w-full"
            hx-get=(content_url)
            hx-trigger="load"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
        {
            div class="flex justify-center items-center py-16 text-gray-500 dark:text-gray-400"
            {
                span class="text-blue-600" { (loading_spinner()) }
                "Loading..."
            }
        }
    }
}

/// The page around the dashboard content.
pub(super) fn dashboard_shell(user_name: &str, content: Markup) -> Markup {
    html! {
        div class="flex flex-col items-center px-2 lg:px-6 py-8 mx-auto max-w-screen-xl text-gray-900 dark:text-white"
        {
            header class="flex flex-wrap justify-between items-center w-full mb-6 gap-4"
            {
                div
                {
                    h1 class="text-2xl font-bold" { "Welcome back, " (user_name) "!" }
                    p class="text-gray-500 dark:text-gray-400" { "Track your finances and achieve your goals" }
                }

                a href=(endpoints::LOG_OUT) class=(BUTTON_SECONDARY_STYLE) { "Logout" }
            }

            (content)
        }
    }
}
