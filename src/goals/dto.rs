use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_amount: f64,
    #[serde(default, with = "crate::timefmt::option")]
    pub deadline: Option<OffsetDateTime>,
}

/// `?amount=` of `PUT /goals/:id/add-amount`.
#[derive(Debug, Deserialize)]
pub struct AddAmountQuery {
    pub amount: f64,
}
