use serde::Serialize;

use super::{
    convert::{clamp_percent, from_percentage},
    system::{GpaSystem, GradeValue},
};

/// One row of the grade reference chart
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRow {
    pub letter: &'static str,
    pub min_percent: f64,
    pub max_percent: f64,
    pub points: f64,
    pub descriptor: &'static str,
    pub descriptor_ar: &'static str,
}

pub static REFERENCE_TABLE: [ReferenceRow; 13] = [
    row("A+", 97.0, 100.0, 4.0, "Exceptional", "استثنائي"),
    row("A", 93.0, 96.0, 4.0, "Excellent", "ممتاز"),
    row("A-", 90.0, 92.0, 3.7, "Excellent", "ممتاز"),
    row("B+", 87.0, 89.0, 3.3, "Very good", "جيد جداً"),
    row("B", 83.0, 86.0, 3.0, "Very good", "جيد جداً"),
    row("B-", 80.0, 82.0, 2.7, "Good", "جيد"),
    row("C+", 77.0, 79.0, 2.3, "Good", "جيد"),
    row("C", 73.0, 76.0, 2.0, "Satisfactory", "مقبول"),
    row("C-", 70.0, 72.0, 1.7, "Satisfactory", "مقبول"),
    row("D+", 67.0, 69.0, 1.3, "Pass", "ناجح"),
    row("D", 63.0, 66.0, 1.0, "Pass", "ناجح"),
    row("D-", 60.0, 62.0, 0.7, "Pass", "ناجح"),
    row("F", 0.0, 59.0, 0.0, "Fail", "راسب"),
];

const fn row(
    letter: &'static str,
    min_percent: f64,
    max_percent: f64,
    points: f64,
    descriptor: &'static str,
    descriptor_ar: &'static str,
) -> ReferenceRow {
    ReferenceRow {
        letter,
        min_percent,
        max_percent,
        points,
        descriptor,
        descriptor_ar,
    }
}

/// Row whose band contains `percent` (clamped to `[0, 100]`)
pub fn reference_row(percent: f64) -> &'static ReferenceRow {
    let percent = clamp_percent(percent);
    let last = &REFERENCE_TABLE[REFERENCE_TABLE.len() - 1];
    REFERENCE_TABLE
        .iter()
        .find(|row| percent >= row.min_percent)
        .unwrap_or(last)
}

/// The same percentage expressed in every grading system
pub fn equivalents(percent: f64) -> Vec<(GpaSystem, GradeValue)> {
    GpaSystem::ALL
        .into_iter()
        .map(|system| (system, from_percentage(percent, system)))
        .collect()
}
