pub mod convert;
pub mod db;
pub mod eligibility;
pub mod err;
pub mod faq;
pub mod locale;
pub mod matcher;
pub mod reference;
pub mod requirements;
pub mod system;
pub mod transcript;
pub mod weighted;

pub use convert::{convert_gpa, from_percentage, to_percentage};
pub use db::{MatchHistoryRecord, MatchStore, StoredMatch};
pub use eligibility::{
    check_eligibility, check_eligibility_for, EligibilityEntry, EligibilityResult,
    EligibilityStatus, CLOSE_BAND,
};
pub use err::GpaError;
pub use faq::{find_answer, FaqAnswer, FAQ_ENTRIES};
pub use locale::Locale;
pub use matcher::{match_scholarships, MatchProfile, MatchResult};
pub use reference::{equivalents, reference_row, ReferenceRow, REFERENCE_TABLE};
pub use requirements::{ScholarshipRequirement, StudyLevel, SCHOLARSHIP_REQUIREMENTS};
pub use system::{GpaSystem, GradeBand, GradeValue, GPA_SYSTEMS, LETTER_GRADES, UK_GRADES};
pub use transcript::{read_courses, Transcript};
pub use weighted::{calculate_weighted_gpa, Course, WeightedGpa};
