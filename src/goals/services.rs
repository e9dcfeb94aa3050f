use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::CreateGoalRequest,
    repo_types::{Goal, GoalStatus},
};
use crate::{error::AppError, store::Store};

pub fn new_goal(
    user_id: Uuid,
    req: CreateGoalRequest,
    now: OffsetDateTime,
) -> Result<Goal, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    if !(req.target_amount.is_finite() && req.target_amount > 0.0) {
        return Err(AppError::Validation(
            "target_amount must be greater than zero".into(),
        ));
    }
    Ok(Goal {
        id: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        target_amount: req.target_amount,
        current_amount: 0.0,
        deadline: req.deadline,
        status: GoalStatus::Active,
        created_at: now,
    })
}

pub fn validate_contribution(amount: f64) -> Result<f64, AppError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(AppError::Validation("amount must be greater than zero".into()))
    }
}

/// Adds `amount` and marks the goal completed once the target is reached.
/// Any other status is kept as is.
pub fn apply_contribution(goal: &Goal, amount: f64) -> (f64, GoalStatus) {
    let current = goal.current_amount + amount;
    let status = if current >= goal.target_amount {
        GoalStatus::Completed
    } else {
        goal.status
    };
    (current, status)
}

/// Read-modify-write without a guard: two concurrent calls may lose one increment.
#[instrument(skip(store))]
pub async fn contribute(
    store: &dyn Store,
    user_id: Uuid,
    goal_id: Uuid,
    amount: f64,
) -> Result<Goal, AppError> {
    let goal = store
        .find_goal(user_id, goal_id)
        .await?
        .ok_or(AppError::NotFound("Goal"))?;

    let (current, status) = apply_contribution(&goal, amount);
    let updated = store
        .update_goal_progress(user_id, goal_id, current, status)
        .await?
        .ok_or(AppError::NotFound("Goal"))?;

    if goal.status != updated.status {
        info!(goal_id = %goal_id, from = %goal.status, to = %updated.status, "goal status changed");
    }
    Ok(updated)
}
