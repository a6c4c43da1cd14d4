use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::err::GpaError;

/// Degree level a scholarship is offered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudyLevel {
    Bachelor,
    Master,
    Phd,
}

impl StudyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StudyLevel::Bachelor => "BACHELOR",
            StudyLevel::Master => "MASTER",
            StudyLevel::Phd => "PHD",
        }
    }

    pub fn name_ar(self) -> &'static str {
        match self {
            StudyLevel::Bachelor => "بكالوريوس",
            StudyLevel::Master => "ماجستير",
            StudyLevel::Phd => "دكتوراه",
        }
    }
}

impl fmt::Display for StudyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyLevel {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bachelor" | "bachelors" | "undergraduate" => Ok(StudyLevel::Bachelor),
            "master" | "masters" => Ok(StudyLevel::Master),
            "phd" | "doctorate" => Ok(StudyLevel::Phd),
            _ => Err(GpaError::UnknownLevel(s.trim().to_string())),
        }
    }
}

/// Published academic requirement of a scholarship programme
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipRequirement {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
    pub country: &'static str,
    pub country_ar: &'static str,
    /// minimum grade expressed in the percentage interchange unit
    pub min_percent: f64,
    pub levels: &'static [StudyLevel],
    pub description: &'static str,
}

impl ScholarshipRequirement {
    pub fn offers(&self, level: StudyLevel) -> bool {
        self.levels.contains(&level)
    }
}

const MASTER: &[StudyLevel] = &[StudyLevel::Master];
const GRADUATE: &[StudyLevel] = &[StudyLevel::Master, StudyLevel::Phd];
const ALL_LEVELS: &[StudyLevel] = &[StudyLevel::Bachelor, StudyLevel::Master, StudyLevel::Phd];

pub static SCHOLARSHIP_REQUIREMENTS: [ScholarshipRequirement; 14] = [
    ScholarshipRequirement {
        id: "daad",
        name: "DAAD Scholarships",
        name_ar: "منحة الهيئة الألمانية للتبادل الأكاديمي (DAAD)",
        country: "Germany",
        country_ar: "ألمانيا",
        min_percent: 75.0,
        levels: GRADUATE,
        description: "Graduate study and research funding from the German Academic Exchange Service.",
    },
    ScholarshipRequirement {
        id: "chevening",
        name: "Chevening Scholarships",
        name_ar: "منحة تشيفنينج",
        country: "United Kingdom",
        country_ar: "المملكة المتحدة",
        min_percent: 60.0,
        levels: MASTER,
        description: "One-year master's degrees in the UK for future leaders, funded by the FCDO.",
    },
    ScholarshipRequirement {
        id: "mext",
        name: "MEXT Scholarship",
        name_ar: "منحة الحكومة اليابانية (MEXT)",
        country: "Japan",
        country_ar: "اليابان",
        min_percent: 80.0,
        levels: ALL_LEVELS,
        description: "Japanese Government scholarship covering tuition, travel and a monthly stipend.",
    },
    ScholarshipRequirement {
        id: "fulbright",
        name: "Fulbright Foreign Student Program",
        name_ar: "منحة فولبرايت",
        country: "United States",
        country_ar: "الولايات المتحدة",
        min_percent: 78.0,
        levels: GRADUATE,
        description: "Graduate study and research in the United States for international students.",
    },
    ScholarshipRequirement {
        id: "erasmus-mundus",
        name: "Erasmus Mundus Joint Masters",
        name_ar: "منحة إيراسموس موندوس",
        country: "European Union",
        country_ar: "الاتحاد الأوروبي",
        min_percent: 70.0,
        levels: MASTER,
        description: "Joint master's programmes delivered by consortia of European universities.",
    },
    ScholarshipRequirement {
        id: "commonwealth",
        name: "Commonwealth Scholarships",
        name_ar: "منحة الكومنولث",
        country: "United Kingdom",
        country_ar: "المملكة المتحدة",
        min_percent: 65.0,
        levels: GRADUATE,
        description: "Master's and doctoral study in the UK for Commonwealth citizens.",
    },
    ScholarshipRequirement {
        id: "csc",
        name: "Chinese Government Scholarship",
        name_ar: "منحة الحكومة الصينية",
        country: "China",
        country_ar: "الصين",
        min_percent: 70.0,
        levels: ALL_LEVELS,
        description: "Full and partial scholarships administered by the China Scholarship Council.",
    },
    ScholarshipRequirement {
        id: "turkiye-burslari",
        name: "Türkiye Scholarships",
        name_ar: "المنح التركية",
        country: "Türkiye",
        country_ar: "تركيا",
        min_percent: 70.0,
        levels: ALL_LEVELS,
        description: "Government-funded degree programmes at Turkish universities.",
    },
    ScholarshipRequirement {
        id: "gks",
        name: "Global Korea Scholarship",
        name_ar: "منحة الحكومة الكورية",
        country: "South Korea",
        country_ar: "كوريا الجنوبية",
        min_percent: 80.0,
        levels: ALL_LEVELS,
        description: "Korean Government scholarship including a year of Korean language training.",
    },
    ScholarshipRequirement {
        id: "stipendium-hungaricum",
        name: "Stipendium Hungaricum",
        name_ar: "منحة الحكومة المجرية",
        country: "Hungary",
        country_ar: "المجر",
        min_percent: 60.0,
        levels: ALL_LEVELS,
        description: "Tuition-free study in Hungary with a monthly stipend and accommodation.",
    },
    ScholarshipRequirement {
        id: "gates-cambridge",
        name: "Gates Cambridge Scholarship",
        name_ar: "منحة جيتس كامبريدج",
        country: "United Kingdom",
        country_ar: "المملكة المتحدة",
        min_percent: 90.0,
        levels: GRADUATE,
        description: "Full-cost postgraduate scholarships at the University of Cambridge.",
    },
    ScholarshipRequirement {
        id: "eiffel",
        name: "Eiffel Excellence Scholarship",
        name_ar: "منحة إيفل للتميز",
        country: "France",
        country_ar: "فرنسا",
        min_percent: 80.0,
        levels: GRADUATE,
        description: "French Ministry for Europe and Foreign Affairs programme for top applicants.",
    },
    ScholarshipRequirement {
        id: "australia-awards",
        name: "Australia Awards",
        name_ar: "منح أستراليا",
        country: "Australia",
        country_ar: "أستراليا",
        min_percent: 65.0,
        levels: GRADUATE,
        description: "Long-term development awards for postgraduate study in Australia.",
    },
    ScholarshipRequirement {
        id: "swedish-institute",
        name: "Swedish Institute Scholarships",
        name_ar: "منحة المعهد السويدي",
        country: "Sweden",
        country_ar: "السويد",
        min_percent: 70.0,
        levels: MASTER,
        description: "Master's scholarships in Sweden for global professionals.",
    },
];

pub fn find_requirement(id: &str) -> Option<&'static ScholarshipRequirement> {
    SCHOLARSHIP_REQUIREMENTS
        .iter()
        .find(|requirement| requirement.id.eq_ignore_ascii_case(id.trim()))
}
