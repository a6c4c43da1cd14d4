use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::gpa::{
    eligibility::EligibilityStatus, err::GpaError, matcher::MatchResult,
    requirements::StudyLevel,
};

/// Raw row of the `match_history` table
#[derive(sqlx::FromRow, Debug)]
pub struct MatchHistoryRow {
    pub history_id: i64,
    pub created_at: i64,
    pub percentage: f64,
    pub study_level: Option<String>,
    pub countries: String,
    pub results: String,
}

/// Compact form of a match result kept in history
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch {
    pub scholarship_id: String,
    pub name: String,
    pub status: EligibilityStatus,
    pub score: u8,
}

impl From<&MatchResult<'_>> for StoredMatch {
    fn from(result: &MatchResult<'_>) -> Self {
        Self {
            scholarship_id: result.requirement.id.to_string(),
            name: result.requirement.name.to_string(),
            status: result.status,
            score: result.score,
        }
    }
}

/// One saved matcher run
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryRecord {
    pub id: i64,
    /// unix seconds
    pub created_at: i64,
    pub percentage: f64,
    pub level: Option<StudyLevel>,
    pub countries: Vec<String>,
    pub results: Vec<StoredMatch>,
}

impl MatchHistoryRecord {
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.created_at).ok()
    }
}

impl TryFrom<MatchHistoryRow> for MatchHistoryRecord {
    type Error = GpaError;

    fn try_from(row: MatchHistoryRow) -> Result<Self, Self::Error> {
        let level = row
            .study_level
            .as_deref()
            .map(str::parse::<StudyLevel>)
            .transpose()?;
        Ok(Self {
            id: row.history_id,
            created_at: row.created_at,
            percentage: row.percentage,
            level,
            countries: serde_json::from_str(&row.countries)?,
            results: serde_json::from_str(&row.results)?,
        })
    }
}
