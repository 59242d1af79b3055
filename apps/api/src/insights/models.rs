use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::insights::error::InsightError;
use crate::models::insight::IndustryInsightRow;

/// Time between an insight refresh and the next scheduled one.
pub const REFRESH_INTERVAL_DAYS: i64 = 7;

pub fn refresh_interval() -> Duration {
    Duration::days(REFRESH_INTERVAL_DAYS)
}

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(DemandLevel::High),
            "medium" => Some(DemandLevel::Medium),
            "low" => Some(DemandLevel::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    #[serde(alias = "positive", alias = "POSITIVE")]
    Positive,
    #[serde(alias = "neutral", alias = "NEUTRAL")]
    Neutral,
    #[serde(alias = "negative", alias = "NEGATIVE")]
    Negative,
}

impl MarketOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(MarketOutlook::Positive),
            "neutral" => Some(MarketOutlook::Neutral),
            "negative" => Some(MarketOutlook::Negative),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generated payload (LLM wire shape)
// ────────────────────────────────────────────────────────────────────────────

/// Annual salary band for one role, in INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

/// The JSON object the LLM is instructed to return. Every field is required:
/// a payload missing any of them fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInsights {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

impl GeneratedInsights {
    /// Rejects values that deserialize fine but make no sense as market data,
    /// and normalizes string lists (trimmed, blanks dropped).
    pub fn validated(mut self) -> Result<Self, InsightError> {
        if self.salary_ranges.is_empty() {
            return Err(malformed("salaryRanges is empty"));
        }
        if !self.growth_rate.is_finite() {
            return Err(malformed("growthRate is not a finite number"));
        }

        for range in &mut self.salary_ranges {
            range.role = range.role.trim().to_string();
            range.location = range.location.trim().to_string();
            if range.role.is_empty() {
                return Err(malformed("salary range with empty role"));
            }
            let values = [range.min, range.max, range.median];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(malformed(&format!(
                    "salary range for '{}' has a negative or non-finite value",
                    range.role
                )));
            }
            if range.min > range.max {
                return Err(malformed(&format!(
                    "salary range for '{}' has min > max",
                    range.role
                )));
            }
            if range.median < range.min || range.median > range.max {
                return Err(malformed(&format!(
                    "salary range for '{}' has median outside [min, max]",
                    range.role
                )));
            }
        }

        normalize_list(&mut self.top_skills);
        normalize_list(&mut self.key_trends);
        normalize_list(&mut self.recommended_skills);

        Ok(self)
    }
}

fn malformed(reason: &str) -> InsightError {
    InsightError::MalformedResponse(reason.to_string())
}

fn normalize_list(items: &mut Vec<String>) {
    for item in items.iter_mut() {
        *item = item.trim().to_string();
    }
    items.retain(|item| !item.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Stored record
// ────────────────────────────────────────────────────────────────────────────

/// One user's industry insight snapshot. Overwritten in place on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub industry: String,
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl InsightRecord {
    /// Builds the record to write for `user_id`. `existing_id` is kept so a
    /// refresh is an update, never a second row.
    pub fn refreshed(
        existing_id: Option<Uuid>,
        user_id: Uuid,
        industry: &str,
        generated: GeneratedInsights,
        now: DateTime<Utc>,
    ) -> Self {
        let id = existing_id.unwrap_or_else(Uuid::new_v4);
        Self {
            id,
            user_id,
            industry: industry.to_string(),
            salary_ranges: generated.salary_ranges,
            growth_rate: generated.growth_rate,
            demand_level: generated.demand_level,
            top_skills: generated.top_skills,
            market_outlook: generated.market_outlook,
            key_trends: generated.key_trends,
            recommended_skills: generated.recommended_skills,
            last_updated: now,
            next_update: now + refresh_interval(),
        }
    }
}

impl TryFrom<IndustryInsightRow> for InsightRecord {
    type Error = InsightError;

    fn try_from(row: IndustryInsightRow) -> Result<Self, Self::Error> {
        let demand_level = DemandLevel::parse(&row.demand_level).ok_or_else(|| {
            undecodable(format!(
                "stored demand_level '{}' is not recognised",
                row.demand_level
            ))
        })?;
        let market_outlook = MarketOutlook::parse(&row.market_outlook).ok_or_else(|| {
            undecodable(format!(
                "stored market_outlook '{}' is not recognised",
                row.market_outlook
            ))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            industry: row.industry,
            salary_ranges: row.salary_ranges.0,
            growth_rate: row.growth_rate,
            demand_level,
            top_skills: row.top_skills,
            market_outlook,
            key_trends: row.key_trends,
            recommended_skills: row.recommended_skills,
            last_updated: row.last_updated,
            next_update: row.next_update,
        })
    }
}

/// A stored row that no longer matches the model is a storage problem, not a
/// generation one.
fn undecodable(reason: String) -> InsightError {
    InsightError::Persistence(sqlx::Error::Decode(reason.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn range(min: f64, median: f64, max: f64) -> SalaryRange {
        SalaryRange {
            role: "Backend Engineer".to_string(),
            min,
            max,
            median,
            location: "Bangalore".to_string(),
        }
    }

    fn generated() -> GeneratedInsights {
        GeneratedInsights {
            salary_ranges: vec![range(800_000.0, 1_800_000.0, 3_500_000.0)],
            growth_rate: 12.5,
            demand_level: DemandLevel::High,
            top_skills: vec!["Rust".to_string()],
            market_outlook: MarketOutlook::Positive,
            key_trends: vec!["Platform engineering".to_string()],
            recommended_skills: vec!["Kubernetes".to_string()],
        }
    }

    #[test]
    fn test_enums_accept_lowercase_aliases() {
        let level: DemandLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(level, DemandLevel::Medium);
        let outlook: MarketOutlook = serde_json::from_str("\"NEGATIVE\"").unwrap();
        assert_eq!(outlook, MarketOutlook::Negative);
        assert!(serde_json::from_str::<DemandLevel>("\"Extreme\"").is_err());
    }

    #[test]
    fn test_validated_trims_and_drops_blank_list_items() {
        let mut g = generated();
        g.top_skills = vec!["  Rust ".to_string(), "   ".to_string()];
        let g = g.validated().unwrap();
        assert_eq!(g.top_skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_validated_rejects_inverted_range() {
        let mut g = generated();
        g.salary_ranges = vec![range(3_000_000.0, 2_000_000.0, 1_000_000.0)];
        assert!(matches!(
            g.validated(),
            Err(InsightError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_validated_rejects_median_outside_range() {
        let mut g = generated();
        g.salary_ranges = vec![range(100.0, 500.0, 200.0)];
        assert!(g.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_negative_salary_and_empty_ranges() {
        let mut g = generated();
        g.salary_ranges = vec![range(-1.0, 0.0, 10.0)];
        assert!(g.validated().is_err());

        let mut g = generated();
        g.salary_ranges.clear();
        assert!(g.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_non_finite_growth() {
        let mut g = generated();
        g.growth_rate = f64::NAN;
        assert!(g.validated().is_err());
    }

    #[test]
    fn test_refreshed_preserves_existing_id_and_sets_schedule() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let first = InsightRecord::refreshed(None, user_id, "Technology", generated(), now);
        assert_eq!(first.next_update - first.last_updated, Duration::seconds(604_800));

        let later = now + Duration::days(7);
        let second =
            InsightRecord::refreshed(Some(first.id), user_id, "Finance", generated(), later);
        assert_eq!(second.id, first.id);
        assert_eq!(second.industry, "Finance");
        assert_eq!(second.last_updated, later);
        assert_eq!(second.next_update, later + Duration::days(7));
    }

    #[test]
    fn test_row_conversion_rejects_unknown_enum_text() {
        let now = Utc::now();
        let row = IndustryInsightRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            industry: "Technology".to_string(),
            salary_ranges: Json(vec![range(1.0, 2.0, 3.0)]),
            growth_rate: 4.0,
            demand_level: "Sky-high".to_string(),
            top_skills: vec![],
            market_outlook: "Positive".to_string(),
            key_trends: vec![],
            recommended_skills: vec![],
            last_updated: now,
            next_update: now + refresh_interval(),
        };
        let err = InsightRecord::try_from(row.clone()).unwrap_err();
        assert_eq!(err.kind(), "persistence");

        let ok = IndustryInsightRow {
            demand_level: "Low".to_string(),
            ..row
        };
        let record = InsightRecord::try_from(ok).unwrap();
        assert_eq!(record.demand_level, DemandLevel::Low);
        assert_eq!(record.market_outlook, MarketOutlook::Positive);
    }
}
