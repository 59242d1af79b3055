use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub years_of_experience: Option<i32>,
    pub key_skills: Vec<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Read-only projection used by the insight refresh run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserIndustryRef {
    pub id: Uuid,
    pub industry: Option<String>,
    pub job_title: Option<String>,
}
