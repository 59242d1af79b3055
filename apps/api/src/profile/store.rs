use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;

/// Fields a profile update may change. `None` leaves the column untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileChanges {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub years_of_experience: Option<i32>,
    pub industry: Option<String>,
    pub key_skills: Option<Vec<String>>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Applies `changes` and returns the updated user, or `None` if no such user.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    changes: &ProfileChanges,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            job_title = COALESCE($2, job_title),
            company_name = COALESCE($3, company_name),
            years_of_experience = COALESCE($4, years_of_experience),
            industry = COALESCE($5, industry),
            key_skills = COALESCE($6, key_skills),
            image = COALESCE($7, image),
            bio = COALESCE($8, bio)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&changes.job_title)
    .bind(&changes.company_name)
    .bind(changes.years_of_experience)
    .bind(&changes.industry)
    .bind(&changes.key_skills)
    .bind(&changes.image)
    .bind(&changes.bio)
    .fetch_optional(pool)
    .await
}
