use log::warn;

use super::system::{band_for, find_band, GpaSystem, GradeValue, GERMAN_BEST, GERMAN_WORST};

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp to `[0, 100]`, NaN counts as 0
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Express `value` as a percentage of the best grade in `system`
pub fn to_percentage(value: &GradeValue, system: GpaSystem) -> f64 {
    if system.is_discrete() {
        let symbol = match value {
            GradeValue::Symbol(symbol) => symbol.as_str(),
            GradeValue::Score(score) => {
                warn!("numeric grade {score} given for discrete system {system}, using 0%");
                return 0.0;
            }
        };
        return match find_band(system.bands(), symbol) {
            Some(band) => band.min_percent,
            None => {
                warn!("unknown {system} grade {symbol:?}, using 0%");
                0.0
            }
        };
    }

    let score = match value {
        GradeValue::Score(score) => *score,
        GradeValue::Symbol(symbol) => match symbol.trim().parse::<f64>() {
            Ok(score) => score,
            Err(_) => {
                warn!("non-numeric grade {symbol:?} given for {system}, using 0%");
                return 0.0;
            }
        },
    };
    score_to_percentage(score, system)
}

/// Linear scaling for continuous systems
pub(crate) fn score_to_percentage(score: f64, system: GpaSystem) -> f64 {
    match system {
        GpaSystem::German => (GERMAN_WORST - score) / (GERMAN_WORST - GERMAN_BEST) * 100.0,
        _ => score / system.info().max * 100.0,
    }
}

/// Express a percentage as a grade of `system`
pub fn from_percentage(percent: f64, system: GpaSystem) -> GradeValue {
    let percent = clamp_percent(percent);

    if system.is_discrete() {
        return match band_for(system.bands(), percent) {
            Some(band) => GradeValue::Symbol(band.symbol.to_string()),
            None => GradeValue::Score(0.0),
        };
    }

    let score = match system {
        GpaSystem::German => GERMAN_WORST - percent / 100.0 * (GERMAN_WORST - GERMAN_BEST),
        _ => percent / 100.0 * system.info().max,
    };
    GradeValue::Score(round2(score))
}

/// Convert a grade between two systems
///
/// ```
/// use scholar_gpa::gpa::{convert_gpa, GpaSystem, GradeValue};
///
/// let german = convert_gpa(&GradeValue::Score(3.0), GpaSystem::Us4, GpaSystem::German);
/// assert_eq!(german, GradeValue::Score(2.0));
/// ```
pub fn convert_gpa(value: &GradeValue, from: GpaSystem, to: GpaSystem) -> GradeValue {
    from_percentage(to_percentage(value, from), to)
}
