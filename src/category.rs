//! The fixed list of categories and the colours used to chart them.

/// The categories a transaction or budget can belong to, in display order.
pub const CATEGORIES: [&str; 12] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Investments",
    "Salary",
    "Freelance",
    "Other",
];

/// The colours of the slices in the expenses chart, in order.
pub const CHART_COLORS: [&str; 12] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4ecdc4", "#44a08d", "#ff6b6b", "#ee5a24",
    "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff",
];

/// Whether `category` is one of [CATEGORIES].
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}
