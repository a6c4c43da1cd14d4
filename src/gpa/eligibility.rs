use serde::{Deserialize, Serialize};

use super::{
    convert::{round2, to_percentage},
    requirements::{ScholarshipRequirement, StudyLevel, SCHOLARSHIP_REQUIREMENTS},
    system::{GpaSystem, GradeValue},
};

/// Width of the "almost eligible" band below a requirement, in percentage points
pub const CLOSE_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EligibilityStatus {
    Eligible,
    Close,
    NotEligible,
}

impl EligibilityStatus {
    /// Classify `candidate - minimum`
    pub fn from_diff(diff: f64) -> Self {
        if diff >= 0.0 {
            EligibilityStatus::Eligible
        } else if diff >= -CLOSE_BAND {
            EligibilityStatus::Close
        } else {
            EligibilityStatus::NotEligible
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::Close => "close",
            EligibilityStatus::NotEligible => "not eligible",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "مؤهل",
            EligibilityStatus::Close => "قريب من الأهلية",
            EligibilityStatus::NotEligible => "غير مؤهل",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityEntry<'a> {
    pub requirement: &'a ScholarshipRequirement,
    /// candidate percentage minus the requirement's minimum
    pub diff: f64,
}

/// Partition of the requirement table for one candidate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult<'a> {
    pub percentage: f64,
    pub level: Option<StudyLevel>,
    pub eligible: Vec<EligibilityEntry<'a>>,
    pub close: Vec<EligibilityEntry<'a>>,
    pub not_eligible: Vec<EligibilityEntry<'a>>,
}

impl EligibilityResult<'_> {
    pub fn len(&self) -> usize {
        self.eligible.len() + self.close.len() + self.not_eligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status_of(&self, id: &str) -> Option<EligibilityStatus> {
        let contains = |entries: &[EligibilityEntry<'_>]| {
            entries.iter().any(|entry| entry.requirement.id == id)
        };
        if contains(self.eligible.as_slice()) {
            Some(EligibilityStatus::Eligible)
        } else if contains(self.close.as_slice()) {
            Some(EligibilityStatus::Close)
        } else if contains(self.not_eligible.as_slice()) {
            Some(EligibilityStatus::NotEligible)
        } else {
            None
        }
    }
}

/// Classify every built-in scholarship for a candidate percentage
pub fn check_eligibility(percentage: f64, level: Option<StudyLevel>) -> EligibilityResult<'static> {
    check_eligibility_in(&SCHOLARSHIP_REQUIREMENTS, percentage, level)
}

/// Classify `requirements`, keeping their order within each group
pub fn check_eligibility_in(
    requirements: &[ScholarshipRequirement],
    percentage: f64,
    level: Option<StudyLevel>,
) -> EligibilityResult<'_> {
    let mut result = EligibilityResult {
        percentage,
        level,
        eligible: Vec::new(),
        close: Vec::new(),
        not_eligible: Vec::new(),
    };

    for requirement in requirements {
        if let Some(level) = level {
            if !requirement.offers(level) {
                continue;
            }
        }
        let diff = percentage - requirement.min_percent;
        let entry = EligibilityEntry {
            requirement,
            diff: round2(diff),
        };
        match EligibilityStatus::from_diff(diff) {
            EligibilityStatus::Eligible => result.eligible.push(entry),
            EligibilityStatus::Close => result.close.push(entry),
            EligibilityStatus::NotEligible => result.not_eligible.push(entry),
        }
    }

    result
}

/// Convert a grade to a percentage, then classify
pub fn check_eligibility_for(
    value: &GradeValue,
    system: GpaSystem,
    level: Option<StudyLevel>,
) -> EligibilityResult<'static> {
    check_eligibility(to_percentage(value, system), level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_at_75() {
        let result = check_eligibility(75.0, Some(StudyLevel::Master));
        assert_eq!(result.status_of("daad"), Some(EligibilityStatus::Eligible));
        assert_eq!(result.status_of("chevening"), Some(EligibilityStatus::Eligible));
        assert_eq!(result.status_of("mext"), Some(EligibilityStatus::Close));

        let mext = result
            .close
            .iter()
            .find(|entry| entry.requirement.id == "mext")
            .unwrap();
        assert_eq!(mext.diff, -5.0);
    }

    #[test]
    fn test_level_filter_excludes_requirements() {
        let result = check_eligibility(95.0, Some(StudyLevel::Bachelor));
        assert_eq!(result.status_of("daad"), None);
        assert_eq!(result.status_of("chevening"), None);
        assert_eq!(result.status_of("mext"), Some(EligibilityStatus::Eligible));
    }

    #[test]
    fn test_no_level_covers_whole_table() {
        let result = check_eligibility(50.0, None);
        assert_eq!(result.len(), SCHOLARSHIP_REQUIREMENTS.len());
    }

    #[test]
    fn test_close_band_edges() {
        assert_eq!(EligibilityStatus::from_diff(0.0), EligibilityStatus::Eligible);
        assert_eq!(EligibilityStatus::from_diff(-0.01), EligibilityStatus::Close);
        assert_eq!(EligibilityStatus::from_diff(-5.0), EligibilityStatus::Close);
        assert_eq!(EligibilityStatus::from_diff(-5.01), EligibilityStatus::NotEligible);
    }

    #[test]
    fn test_groups_keep_table_order() {
        let result = check_eligibility(100.0, None);
        let ids: Vec<&str> = result.eligible.iter().map(|e| e.requirement.id).collect();
        let expected: Vec<&str> = SCHOLARSHIP_REQUIREMENTS.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_check_from_other_system() {
        // 3.0 on the 4.0 scale is 75%
        let result =
            check_eligibility_for(&GradeValue::Score(3.0), GpaSystem::Us4, Some(StudyLevel::Phd));
        assert_eq!(result.percentage, 75.0);
        assert_eq!(result.status_of("daad"), Some(EligibilityStatus::Eligible));
        assert_eq!(result.status_of("gates-cambridge"), Some(EligibilityStatus::NotEligible));
    }
}
