use serde::{Deserialize, Serialize};

use super::{
    convert::round2,
    eligibility::EligibilityStatus,
    requirements::{ScholarshipRequirement, StudyLevel, SCHOLARSHIP_REQUIREMENTS},
};

const COUNTRY_BONUS: f64 = 20.0;
const MAX_SCORE: f64 = 100.0;

/// What the candidate told the matcher about themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchProfile {
    pub percentage: f64,
    #[serde(default)]
    pub level: Option<StudyLevel>,
    #[serde(default)]
    pub countries: Vec<String>,
}

impl MatchProfile {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            level: None,
            countries: Vec::new(),
        }
    }

    pub fn level(mut self, level: StudyLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }

    fn prefers(&self, requirement: &ScholarshipRequirement) -> bool {
        self.countries.iter().any(|wanted| {
            let wanted = wanted.trim().to_lowercase();
            !wanted.is_empty()
                && (wanted == requirement.country.to_lowercase() || wanted == requirement.country_ar)
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<'a> {
    pub requirement: &'a ScholarshipRequirement,
    pub status: EligibilityStatus,
    pub diff: f64,
    pub country_match: bool,
    pub score: u8,
}

/// Academic part of the score, at most 80
fn academic_fit(diff: f64, status: EligibilityStatus) -> f64 {
    match status {
        EligibilityStatus::Eligible => 70.0 + diff.min(10.0),
        EligibilityStatus::Close => 50.0 + (diff + 5.0) * 4.0,
        EligibilityStatus::NotEligible => (50.0 + diff * 2.0).max(0.0),
    }
}

/// Rank the built-in scholarships for `profile`, best first
pub fn match_scholarships(profile: &MatchProfile) -> Vec<MatchResult<'static>> {
    match_scholarships_in(&SCHOLARSHIP_REQUIREMENTS, profile)
}

/// Rank `requirements` for `profile`; equal scores keep table order
pub fn match_scholarships_in<'a>(
    requirements: &'a [ScholarshipRequirement],
    profile: &MatchProfile,
) -> Vec<MatchResult<'a>> {
    let mut results: Vec<MatchResult<'a>> = requirements
        .iter()
        .filter(|requirement| profile.level.map_or(true, |level| requirement.offers(level)))
        .map(|requirement| {
            let diff = profile.percentage - requirement.min_percent;
            let status = EligibilityStatus::from_diff(diff);
            let country_match = profile.prefers(requirement);
            let mut score = academic_fit(diff, status);
            if country_match {
                score += COUNTRY_BONUS;
            }
            MatchResult {
                requirement,
                status,
                diff: round2(diff),
                country_match,
                score: score.clamp(0.0, MAX_SCORE).round() as u8,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
