//! The insights section of the dashboard overview.

use maud::{Markup, html};

use crate::{
    analytics::{
        anomalies::{Anomaly, AnomalyKind, Severity, detect_anomalies},
        report::{MonthlyReport, generate_monthly_report},
        trends::{Trends, calculate_trends},
    },
    api::Transaction,
    dashboard::BudgetPeriod,
    format::{format_currency, format_date},
};

/// How many months of history the trends cover.
const TREND_MONTHS: u8 = 6;
/// How many anomalies and category changes are listed.
const MAX_LISTED: usize = 5;

const CARD_STYLE: &str = "w-full p-6 bg-white rounded-lg shadow dark:bg-gray-800 \
    text-gray-900 dark:text-white";
const MUTED_STYLE: &str = "text-gray-500 dark:text-gray-400";

fn format_percent(value: f64) -> String {
    format!("{value:+.1}%")
}

/// The key with the largest value.
fn largest<'a>(values: impl IntoIterator<Item = (&'a String, &'a f64)>) -> Option<(&'a str, f64)> {
    values
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(key, value)| (key.as_str(), *value))
}

fn report_card(report: Option<&MonthlyReport>, period: BudgetPeriod) -> Markup {
    html! {
        div id="monthly-report" class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold mb-4" { "This Month (" (period.month) "/" (period.year) ")" }

            @match report {
                None => {
                    p class=(MUTED_STYLE) { "No transactions this month." }
                }
                Some(report) => {
                    dl class="grid grid-cols-2 gap-2"
                    {
                        dt class=(MUTED_STYLE) { "Income" }
                        dd class="insight-value" { (format_currency(report.total_income)) }
                        dt class=(MUTED_STYLE) { "Expenses" }
                        dd class="insight-value" { (format_currency(report.total_expenses)) }
                        dt class=(MUTED_STYLE) { "Net savings" }
                        dd class="insight-value" { (format_currency(report.net_savings)) }
                        dt class=(MUTED_STYLE) { "Savings rate" }
                        dd class="insight-value"
                        {
                            @match report.savings_rate {
                                Some(rate) => { (format!("{rate:.1}%")) }
                                None => { "n/a" }
                            }
                        }
                    }

                    ul class="mt-4 space-y-1 text-sm"
                    {
                        li { (report.transaction_count) " transactions" }

                        @if let Some((category, amount)) = largest(&report.expenses_by_category) {
                            li { "Most spent on " (category) ": " (format_currency(amount)) }
                        }

                        @if let Some((category, amount)) = largest(&report.income_by_category) {
                            li { "Main income: " (category) " (" (format_currency(amount)) ")" }
                        }

                        @if let Some(expense) = report.top_expenses.first() {
                            li { "Largest expense: " (expense.description) " (" (format_currency(expense.amount)) ")" }
                        }

                        @if let Some((day, amount)) = report
                            .daily_spending
                            .iter()
                            .max_by(|a, b| a.1.total_cmp(b.1))
                        {
                            li { "Busiest day: " (period.month) "/" (day) " (" (format_currency(*amount)) ")" }
                        }
                    }
                }
            }
        }
    }
}

fn trends_card(trends: &Trends) -> Markup {
    let mut category_changes: Vec<(&String, &f64)> = trends.category_changes.iter().collect();
    category_changes.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    category_changes.truncate(MAX_LISTED);

    html! {
        div id="trends" class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold mb-4" { "Trends" }

            @if trends.months.len() < 2 {
                p class=(MUTED_STYLE) { "Not enough history yet." }
            } @else {
                p class="mb-2"
                {
                    "Income: "
                    span class="insight-value"
                    {
                        (trends.income_change.map(format_percent).unwrap_or_else(|| "n/a".to_owned()))
                    }
                    " per month"
                }
                p class="mb-4"
                {
                    "Expenses: "
                    span class="insight-value"
                    {
                        (trends.expense_change.map(format_percent).unwrap_or_else(|| "n/a".to_owned()))
                    }
                    " per month"
                }

                ul class="space-y-1 text-sm"
                {
                    @for month in &trends.months {
                        li data-trend-month=(format!("{}-{:02}", month.period.year, month.period.month))
                        {
                            (month.period.month) "/" (month.period.year) ": "
                            (format_currency(month.income)) " in, "
                            (format_currency(month.expenses)) " out"
                        }
                    }
                }

                @if !category_changes.is_empty() {
                    h4 class="mt-4 font-semibold" { "By category" }
                    ul class="space-y-1 text-sm"
                    {
                        @for (category, change) in category_changes {
                            li { (category) ": " (format_percent(*change)) }
                        }
                    }
                }
            }
        }
    }
}

fn anomaly_reason(anomaly: &Anomaly) -> String {
    match anomaly.kind {
        AnomalyKind::LargeExpense => "Much larger than your usual expenses".to_owned(),
        AnomalyKind::UnusualForCategory { mean, spread } => format!(
            "Unusual for {}, expected {} ± {}",
            anomaly.transaction.category,
            format_currency(mean),
            format_currency(spread)
        ),
    }
}

fn anomalies_card(anomalies: &[Anomaly]) -> Markup {
    html! {
        div id="anomalies" class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold mb-4" { "Unusual Spending" }

            @if anomalies.is_empty() {
                p class=(MUTED_STYLE) { "Nothing unusual." }
            } @else {
                ul class="space-y-2"
                {
                    @for anomaly in anomalies.iter().take(MAX_LISTED) {
                        li
                            data-anomaly=(anomaly.transaction.id)
                            data-severity=(match anomaly.severity {
                                Severity::High => "high",
                                Severity::Medium => "medium",
                            })
                        {
                            span class="font-semibold" { (anomaly.transaction.description) }
                            " " (format_currency(anomaly.transaction.amount))
                            @if let Some(date) = &anomaly.transaction.date {
                                " on " (format_date(date))
                            }
                            p class={ "text-sm " (MUTED_STYLE) } { (anomaly_reason(anomaly)) }
                        }
                    }
                }
            }
        }
    }
}

/// The monthly report, trends and unusual expenses worked out from `transactions`.
pub(crate) fn insights_view(transactions: &[Transaction], period: BudgetPeriod) -> Markup {
    let report = generate_monthly_report(transactions, period);
    let trends = calculate_trends(transactions, period, TREND_MONTHS);
    let anomalies = detect_anomalies(transactions);

    html! {
        section id="insights" class="grid grid-cols-1 lg:grid-cols-3 gap-4 mt-4"
        {
            (report_card(report.as_ref(), period))
            (trends_card(&trends))
            (anomalies_card(&anomalies))
        }
    }
}
