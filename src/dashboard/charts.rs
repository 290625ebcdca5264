//! The expenses by category pie chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with its HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::Legend,
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{api::ExpensesByCategory, category::CHART_COLORS};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

pub(super) const EXPENSES_CHART_ID: &str = "expenses-chart";

/// Build the expenses chart, or `None` when there are no expenses to show.
pub(super) fn build_expenses_chart(expenses: &ExpensesByCategory) -> Option<DashboardChart> {
    if !expenses.values().any(|amount| *amount > 0.0) {
        return None;
    }

    Some(DashboardChart {
        id: EXPENSES_CHART_ID,
        options: expenses_pie_chart(expenses).to_string(),
    })
}

/// The container the chart is drawn into.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[320px] w-full rounded"
        {}
    )
}

/// Generates JavaScript initialization code for a dashboard chart.
///
/// The script runs as soon as it is inserted, since the dashboard content is
/// swapped in by htmx after the page has loaded.
pub(super) fn chart_script(chart: &DashboardChart) -> Markup {
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            if (!chartDom || typeof echarts === "undefined") {{
                return;
            }}
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
            document.addEventListener('tab-shown', () => chart.resize());

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        chart.id, chart.options
    );

    html!(script { (PreEscaped(script)) })
}

fn expenses_pie_chart(expenses: &ExpensesByCategory) -> Chart {
    let data: Vec<(f64, String)> = expenses
        .iter()
        .filter(|(_, amount)| **amount > 0.0)
        .map(|(category, amount)| (*amount, category.to_owned()))
        .collect();

    Chart::new()
        .color(CHART_COLORS.iter().map(|color| Color::from(*color)).collect())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod expenses_chart_tests {
    use crate::api::ExpensesByCategory;

    use super::{EXPENSES_CHART_ID, build_expenses_chart, chart_script};

    #[test]
    fn no_chart_without_expenses() {
        assert!(build_expenses_chart(&ExpensesByCategory::new()).is_none());

        let zeroes = ExpensesByCategory::from([("Travel".to_owned(), 0.0)]);
        assert!(build_expenses_chart(&zeroes).is_none());
    }

    #[test]
    fn chart_has_a_slice_per_category_in_palette_colours() {
        let expenses = ExpensesByCategory::from([
            ("Food & Dining".to_owned(), 120.5),
            ("Travel".to_owned(), 80.0),
            ("Other".to_owned(), 0.0),
        ]);

        let chart = build_expenses_chart(&expenses).expect("want a chart");

        assert_eq!(chart.id, EXPENSES_CHART_ID);
        assert!(chart.options.contains("Food & Dining"));
        assert!(chart.options.contains("Travel"));
        assert!(!chart.options.contains("\"Other\""));
        assert!(chart.options.contains("#667eea"));
        assert!(chart.options.contains("\"pie\""));
    }

    #[test]
    fn script_initialises_chart_in_container() {
        let expenses = ExpensesByCategory::from([("Travel".to_owned(), 80.0)]);
        let chart = build_expenses_chart(&expenses).unwrap();

        let script = chart_script(&chart).into_string();

        assert!(script.starts_with("<script>"));
        assert!(script.contains(r#"document.getElementById("expenses-chart")"#));
        assert!(script.contains("echarts.init"));
    }
}
