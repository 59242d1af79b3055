use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::profile::store::{find_user, update_profile, ProfileChanges};
use crate::routes::UserIdQuery;
use crate::state::AppState;

const MAX_YEARS_OF_EXPERIENCE: i32 = 80;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub years_of_experience: Option<i32>,
    pub industry: Option<String>,
    /// Either a list or a single comma-separated string (onboarding form).
    pub key_skills: Option<KeySkills>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeySkills {
    List(Vec<String>),
    CommaSeparated(String),
}

impl KeySkills {
    fn into_list(self) -> Vec<String> {
        let raw = match self {
            KeySkills::List(items) => items,
            KeySkills::CommaSeparated(s) => s.split(',').map(String::from).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Validates and normalizes a profile update. Industry drives the weekly
/// insight refresh, so a blank one is rejected rather than stored.
pub fn validate_profile_update(req: ProfileUpdateRequest) -> Result<ProfileChanges, AppError> {
    let industry = match req.industry {
        Some(industry) if industry.trim().is_empty() => {
            return Err(AppError::Validation("industry cannot be blank".to_string()))
        }
        Some(industry) => Some(industry.trim().to_string()),
        None => None,
    };

    if let Some(years) = req.years_of_experience {
        if !(0..=MAX_YEARS_OF_EXPERIENCE).contains(&years) {
            return Err(AppError::Validation(format!(
                "years_of_experience must be between 0 and {MAX_YEARS_OF_EXPERIENCE}"
            )));
        }
    }

    Ok(ProfileChanges {
        job_title: trimmed(req.job_title),
        company_name: trimmed(req.company_name),
        years_of_experience: req.years_of_experience,
        industry,
        key_skills: req.key_skills.map(KeySkills::into_list),
        image: trimmed(req.image),
        bio: trimmed(req.bio),
    })
}

/// Blank optional strings are treated as "not provided".
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<User>, AppError> {
    let user = find_user(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", params.user_id)))?;
    Ok(Json(user))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<User>, AppError> {
    let user_id = req.user_id;
    let changes = validate_profile_update(req)?;

    let user = update_profile(&state.db, user_id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    info!("Updated profile for user {user_id}");
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            user_id: Uuid::new_v4(),
            job_title: None,
            company_name: None,
            years_of_experience: None,
            industry: None,
            key_skills: None,
            image: None,
            bio: None,
        }
    }

    #[test]
    fn test_blank_industry_is_rejected() {
        let req = ProfileUpdateRequest {
            industry: Some("   ".to_string()),
            ..request()
        };
        assert!(matches!(
            validate_profile_update(req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_years_out_of_range_is_rejected() {
        let req = ProfileUpdateRequest {
            years_of_experience: Some(-1),
            ..request()
        };
        assert!(validate_profile_update(req).is_err());

        let req = ProfileUpdateRequest {
            years_of_experience: Some(81),
            ..request()
        };
        assert!(validate_profile_update(req).is_err());
    }

    #[test]
    fn test_comma_separated_skills_are_split_and_trimmed() {
        let req: ProfileUpdateRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "key_skills": "Rust, SQL , ,Kubernetes",
            "industry": " Technology ",
            "bio": "  "
        }))
        .unwrap();
        let changes = validate_profile_update(req).unwrap();
        assert_eq!(
            changes.key_skills,
            Some(vec![
                "Rust".to_string(),
                "SQL".to_string(),
                "Kubernetes".to_string()
            ])
        );
        assert_eq!(changes.industry.as_deref(), Some("Technology"));
        assert_eq!(changes.bio, None);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        assert_eq!(
            validate_profile_update(request()).unwrap(),
            ProfileChanges::default()
        );
    }
}
