use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// Zero-padded, "01".."12".
    pub month: String,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub transactions_count: usize,
    pub top_categories: Vec<TopCategory>,
}
