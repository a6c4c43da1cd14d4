use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::err::GpaError;

/// Identifier of a grading system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpaSystem {
    #[serde(rename = "us-4.0")]
    Us4,
    #[serde(rename = "us-5.0")]
    Us5,
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "letter")]
    Letter,
    #[serde(rename = "uk")]
    Uk,
    #[serde(rename = "german")]
    German,
    #[serde(rename = "french")]
    French,
    #[serde(rename = "indian-10")]
    Indian10,
}

/// Static description of a grading system
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub system: GpaSystem,
    pub id: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
    pub min: f64,
    pub max: f64,
    pub discrete: bool,
}

/// One named band of a discrete grading system
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub symbol: &'static str,
    /// lowest percentage that still earns this band
    pub min_percent: f64,
    /// US 4.0 grade points, letter grades only
    pub points: Option<f64>,
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

/// German grades run from 1.0 (best) to 5.0 (worst)
pub const GERMAN_BEST: f64 = 1.0;
pub const GERMAN_WORST: f64 = 5.0;

pub static GPA_SYSTEMS: [SystemInfo; 8] = [
    SystemInfo {
        system: GpaSystem::Us4,
        id: "us-4.0",
        name: "US GPA (4.0 scale)",
        name_ar: "المعدل الأمريكي (من 4.0)",
        min: 0.0,
        max: 4.0,
        discrete: false,
    },
    SystemInfo {
        system: GpaSystem::Us5,
        id: "us-5.0",
        name: "GPA (5.0 scale)",
        name_ar: "المعدل (من 5.0)",
        min: 0.0,
        max: 5.0,
        discrete: false,
    },
    SystemInfo {
        system: GpaSystem::Percentage,
        id: "percentage",
        name: "Percentage",
        name_ar: "النسبة المئوية",
        min: 0.0,
        max: 100.0,
        discrete: false,
    },
    SystemInfo {
        system: GpaSystem::Letter,
        id: "letter",
        name: "Letter grade",
        name_ar: "التقدير بالحروف",
        min: 0.0,
        max: 100.0,
        discrete: true,
    },
    SystemInfo {
        system: GpaSystem::Uk,
        id: "uk",
        name: "UK degree classification",
        name_ar: "تصنيف الدرجات البريطاني",
        min: 0.0,
        max: 100.0,
        discrete: true,
    },
    SystemInfo {
        system: GpaSystem::German,
        id: "german",
        name: "German grade (1.0 - 5.0)",
        name_ar: "النظام الألماني (1.0 - 5.0)",
        min: GERMAN_BEST,
        max: GERMAN_WORST,
        discrete: false,
    },
    SystemInfo {
        system: GpaSystem::French,
        id: "french",
        name: "French grade (out of 20)",
        name_ar: "النظام الفرنسي (من 20)",
        min: 0.0,
        max: 20.0,
        discrete: false,
    },
    SystemInfo {
        system: GpaSystem::Indian10,
        id: "indian-10",
        name: "CGPA (10 point scale)",
        name_ar: "المعدل التراكمي (من 10)",
        min: 0.0,
        max: 10.0,
        discrete: false,
    },
];

/// Letter bands in descending threshold order
pub static LETTER_GRADES: [GradeBand; 13] = [
    letter("A+", 97.0, 4.0),
    letter("A", 93.0, 4.0),
    letter("A-", 90.0, 3.7),
    letter("B+", 87.0, 3.3),
    letter("B", 83.0, 3.0),
    letter("B-", 80.0, 2.7),
    letter("C+", 77.0, 2.3),
    letter("C", 73.0, 2.0),
    letter("C-", 70.0, 1.7),
    letter("D+", 67.0, 1.3),
    letter("D", 63.0, 1.0),
    letter("D-", 60.0, 0.7),
    letter("F", 0.0, 0.0),
];

/// UK classifications in descending threshold order
pub static UK_GRADES: [GradeBand; 5] = [
    GradeBand {
        symbol: "First",
        min_percent: 70.0,
        points: None,
        aliases: &["1st", "first class"],
    },
    GradeBand {
        symbol: "2:1",
        min_percent: 60.0,
        points: None,
        aliases: &["2.1", "upper second"],
    },
    GradeBand {
        symbol: "2:2",
        min_percent: 50.0,
        points: None,
        aliases: &["2.2", "lower second"],
    },
    GradeBand {
        symbol: "Third",
        min_percent: 40.0,
        points: None,
        aliases: &["3rd"],
    },
    GradeBand {
        symbol: "Fail",
        min_percent: 0.0,
        points: None,
        aliases: &[],
    },
];

const fn letter(symbol: &'static str, min_percent: f64, points: f64) -> GradeBand {
    GradeBand {
        symbol,
        min_percent,
        points: Some(points),
        aliases: &[],
    }
}

impl GpaSystem {
    pub const ALL: [GpaSystem; 8] = [
        GpaSystem::Us4,
        GpaSystem::Us5,
        GpaSystem::Percentage,
        GpaSystem::Letter,
        GpaSystem::Uk,
        GpaSystem::German,
        GpaSystem::French,
        GpaSystem::Indian10,
    ];

    pub fn info(self) -> &'static SystemInfo {
        let index = match self {
            GpaSystem::Us4 => 0,
            GpaSystem::Us5 => 1,
            GpaSystem::Percentage => 2,
            GpaSystem::Letter => 3,
            GpaSystem::Uk => 4,
            GpaSystem::German => 5,
            GpaSystem::French => 6,
            GpaSystem::Indian10 => 7,
        };
        &GPA_SYSTEMS[index]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn is_discrete(self) -> bool {
        self.info().discrete
    }

    /// Ordered bands of a discrete system, empty for continuous ones
    pub fn bands(self) -> &'static [GradeBand] {
        match self {
            GpaSystem::Letter => &LETTER_GRADES,
            GpaSystem::Uk => &UK_GRADES,
            _ => &[],
        }
    }
}

impl fmt::Display for GpaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GpaSystem {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GPA_SYSTEMS
            .iter()
            .find(|info| info.id.eq_ignore_ascii_case(wanted))
            .map(|info| info.system)
            .ok_or_else(|| GpaError::UnknownSystem(wanted.to_string()))
    }
}

/// Find the band named by `symbol`, matching symbols and aliases case-insensitively
pub fn find_band<'a>(bands: &'a [GradeBand], symbol: &str) -> Option<&'a GradeBand> {
    let symbol = symbol.trim();
    bands.iter().find(|band| {
        band.symbol.eq_ignore_ascii_case(symbol)
            || band
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(symbol))
    })
}

/// Highest band whose threshold `percent` meets, scanning in descending order
pub fn band_for(bands: &[GradeBand], percent: f64) -> Option<&GradeBand> {
    bands
        .iter()
        .find(|band| percent >= band.min_percent)
        .or_else(|| bands.last())
}

/// A grade expressed in some grading system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
    Score(f64),
    Symbol(String),
}

impl GradeValue {
    /// Numbers become scores, anything else is kept as a symbol
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<f64>() {
            Ok(score) if score.is_finite() => GradeValue::Score(score),
            _ => GradeValue::Symbol(input.to_string()),
        }
    }

    pub fn as_score(&self) -> Option<f64> {
        match self {
            GradeValue::Score(score) => Some(*score),
            GradeValue::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            GradeValue::Score(_) => None,
            GradeValue::Symbol(symbol) => Some(symbol),
        }
    }
}

impl fmt::Display for GradeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeValue::Score(score) => write!(f, "{score}"),
            GradeValue::Symbol(symbol) => f.write_str(symbol),
        }
    }
}

impl From<f64> for GradeValue {
    fn from(score: f64) -> Self {
        GradeValue::Score(score)
    }
}

impl From<&str> for GradeValue {
    fn from(symbol: &str) -> Self {
        GradeValue::Symbol(symbol.to_string())
    }
}
