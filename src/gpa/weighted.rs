use log::warn;
use serde::{Deserialize, Serialize};

use super::{
    convert::{from_percentage, round2},
    system::{find_band, GpaSystem, GradeBand, GradeValue, LETTER_GRADES},
};

/// Top of the US grade-point scale the letter table is expressed in
const LETTER_POINTS_MAX: f64 = 4.0;

/// One course of a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// letter grade, e.g. `B+`
    pub grade: String,
    pub credits: f64,
}

impl Course {
    pub fn new(grade: impl Into<String>, credits: f64) -> Self {
        Self {
            name: None,
            grade: grade.into(),
            credits,
        }
    }

    pub fn named(name: impl Into<String>, grade: impl Into<String>, credits: f64) -> Self {
        Self {
            name: Some(name.into()),
            grade: grade.into(),
            credits,
        }
    }

    /// Grade points of the course's letter, 0 for unknown grades
    pub fn points(&self) -> f64 {
        match find_band(&LETTER_GRADES, &self.grade).and_then(|band| band.points) {
            Some(points) => points,
            None => {
                warn!("unknown letter grade {:?}, counting as 0 points", self.grade);
                0.0
            }
        }
    }

    /// Percentage equivalent of the course's grade points
    pub fn percentage(&self) -> f64 {
        self.points() / LETTER_POINTS_MAX * 100.0
    }
}

/// Lowest letter band worth at most `points`, `A` rather than `A+` on a tie
fn letter_for_points(points: f64) -> &'static GradeBand {
    let mut best = &LETTER_GRADES[LETTER_GRADES.len() - 1];
    for band in LETTER_GRADES.iter().rev() {
        let band_points = band.points.unwrap_or(0.0);
        if band_points <= points + 1e-9 && band_points > best.points.unwrap_or(0.0) {
            best = band;
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedGpa {
    pub system: GpaSystem,
    /// Σ(value × credits) / Σ credits, 0 for discrete target systems
    pub gpa: f64,
    pub percentage: f64,
    pub total_credits: f64,
    /// band of the weighted grade points when the target system is discrete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl WeightedGpa {
    fn zero(system: GpaSystem) -> Self {
        Self {
            system,
            gpa: 0.0,
            percentage: 0.0,
            total_credits: 0.0,
            symbol: None,
        }
    }
}

/// Credit-weighted GPA of `courses` expressed in `system`
pub fn calculate_weighted_gpa(courses: &[Course], system: GpaSystem) -> WeightedGpa {
    let mut total_credits = 0.0;
    let mut weighted_value = 0.0;
    let mut weighted_percent = 0.0;
    let mut weighted_points = 0.0;

    for course in courses {
        if !(course.credits > 0.0) {
            warn!(
                "ignoring course {:?} with non-positive credits {}",
                course.name.as_deref().unwrap_or(&course.grade),
                course.credits
            );
            continue;
        }
        let points = course.points();
        let percent = points / LETTER_POINTS_MAX * 100.0;
        let value = from_percentage(percent, system).as_score().unwrap_or(0.0);
        total_credits += course.credits;
        weighted_value += value * course.credits;
        weighted_percent += percent * course.credits;
        weighted_points += points * course.credits;
    }

    if total_credits == 0.0 {
        return WeightedGpa::zero(system);
    }

    let percentage = round2(weighted_percent / total_credits);
    // discrete targets use the letter band of the weighted points
    let symbol = if system.is_discrete() {
        let letter = letter_for_points(round2(weighted_points / total_credits));
        from_percentage(letter.min_percent, system)
            .as_symbol()
            .map(str::to_string)
    } else {
        None
    };

    WeightedGpa {
        system,
        gpa: round2(weighted_value / total_credits),
        percentage,
        total_credits,
        symbol,
    }
}

/// The GPA as a grade of its system: the band symbol for discrete systems
pub fn weighted_grade(result: &WeightedGpa) -> GradeValue {
    match &result.symbol {
        Some(symbol) => GradeValue::Symbol(symbol.clone()),
        None => GradeValue::Score(result.gpa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::convert::convert_gpa;

    #[test]
    fn test_weighted_us_gpa() {
        let courses = vec![Course::new("A", 3.0), Course::new("B", 1.0)];
        let result = calculate_weighted_gpa(&courses, GpaSystem::Us4);
        assert_eq!(result.gpa, 3.75);
        assert_eq!(result.percentage, 93.75);
        assert_eq!(result.total_credits, 4.0);
        assert_eq!(result.symbol, None);
    }

    #[test]
    fn test_empty_course_list_is_zero() {
        let result = calculate_weighted_gpa(&[], GpaSystem::German);
        assert_eq!(result, WeightedGpa::zero(GpaSystem::German));
    }

    #[test]
    fn test_zero_credit_courses_are_ignored() {
        let courses = vec![
            Course::new("A", 0.0),
            Course::new("C", -2.0),
            Course::new("B", 2.0),
        ];
        let result = calculate_weighted_gpa(&courses, GpaSystem::Us4);
        assert_eq!(result.gpa, 3.0);
        assert_eq!(result.total_credits, 2.0);

        let only_zero = calculate_weighted_gpa(&[Course::new("A", 0.0)], GpaSystem::Us4);
        assert_eq!(only_zero.gpa, 0.0);
    }

    #[test]
    fn test_unknown_grade_counts_as_zero() {
        let courses = vec![Course::new("A", 1.0), Course::new("Q", 1.0)];
        let result = calculate_weighted_gpa(&courses, GpaSystem::Us4);
        assert_eq!(result.gpa, 2.0);
        assert_eq!(result.percentage, 50.0);
    }

    #[test]
    fn test_other_target_systems() {
        let courses = vec![Course::new("B", 3.0), Course::named("Thesis", "B", 6.0)];
        assert_eq!(calculate_weighted_gpa(&courses, GpaSystem::French).gpa, 15.0);
        assert_eq!(calculate_weighted_gpa(&courses, GpaSystem::German).gpa, 2.0);

        let letter = calculate_weighted_gpa(&courses, GpaSystem::Letter);
        assert_eq!(letter.gpa, 0.0);
        assert_eq!(letter.percentage, 75.0);
        assert_eq!(letter.symbol.as_deref(), Some("B"));
        assert_eq!(weighted_grade(&letter), GradeValue::Symbol("B".to_string()));
    }

    #[test]
    fn test_letter_target_matches_letter_conversion() {
        let all_b = vec![Course::new("B", 3.0), Course::new("B", 3.0)];
        let letter = calculate_weighted_gpa(&all_b, GpaSystem::Letter);
        assert_eq!(letter.symbol.as_deref(), Some("B"));

        let uk = calculate_weighted_gpa(&all_b, GpaSystem::Uk);
        assert_eq!(
            uk.symbol.map(GradeValue::Symbol),
            Some(convert_gpa(
                &GradeValue::from("B"),
                GpaSystem::Letter,
                GpaSystem::Uk
            ))
        );

        let all_a = calculate_weighted_gpa(&[Course::new("A", 4.0)], GpaSystem::Letter);
        assert_eq!(all_a.symbol.as_deref(), Some("A"));
        let all_a_plus = calculate_weighted_gpa(&[Course::new("A+", 4.0)], GpaSystem::Letter);
        assert_eq!(all_a_plus.symbol.as_deref(), Some("A"));
    }

    #[test]
    fn test_mixed_letters_round_down_to_band() {
        // (3.3 + 3.0) / 2 = 3.15 points, between B and B+
        let courses = vec![Course::new("B+", 1.0), Course::new("B", 1.0)];
        let result = calculate_weighted_gpa(&courses, GpaSystem::Letter);
        assert_eq!(result.symbol.as_deref(), Some("B"));

        let failing = vec![Course::new("F", 2.0), Course::new("D-", 1.0)];
        let result = calculate_weighted_gpa(&failing, GpaSystem::Letter);
        assert_eq!(result.symbol.as_deref(), Some("F"));
    }

    #[test]
    fn test_letter_for_points() {
        assert_eq!(letter_for_points(4.0).symbol, "A");
        assert_eq!(letter_for_points(3.7).symbol, "A-");
        assert_eq!(letter_for_points(3.69).symbol, "B+");
        assert_eq!(letter_for_points(0.5).symbol, "F");
    }
}
