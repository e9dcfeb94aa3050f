use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{dto::CreateCategoryRequest, repo_types::Category};
use crate::error::AppError;

/// (name, color, icon) seeded for every new user.
const DEFAULTS: [(&str, &str, &str); 8] = [
    ("Alimentação", "#EF4444", "🍽️"),
    ("Transporte", "#3B82F6", "🚗"),
    ("Moradia", "#8B5CF6", "🏠"),
    ("Saúde", "#10B981", "⚕️"),
    ("Educação", "#F59E0B", "📚"),
    ("Entretenimento", "#EC4899", "🎬"),
    ("Salário", "#22C55E", "💰"),
    ("Investimentos", "#6366F1", "📈"),
];

pub fn default_categories(user_id: Uuid, now: OffsetDateTime) -> Vec<Category> {
    DEFAULTS
        .iter()
        .map(|(name, color, icon)| Category {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            is_default: true,
            created_at: now,
        })
        .collect()
}

pub(crate) fn is_valid_color(color: &str) -> bool {
    lazy_static! {
        static ref COLOR_RE: Regex = Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap();
    }
    COLOR_RE.is_match(color)
}

/// Validates a create request and builds the record owned by `user_id`.
pub fn new_category(
    user_id: Uuid,
    req: CreateCategoryRequest,
    now: OffsetDateTime,
) -> Result<Category, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    if !is_valid_color(&req.color) {
        return Err(AppError::Validation(format!(
            "color must be a hex value like #3B82F6, got {:?}",
            req.color
        )));
    }
    Ok(Category {
        id: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        color: req.color,
        icon: req.icon,
        is_default: false,
        created_at: now,
    })
}
