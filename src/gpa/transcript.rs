use std::{fs::File, io::Read, path::Path};

use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{
    err::GpaError,
    system::{find_band, LETTER_GRADES},
    weighted::Course,
};

// one transcript row
#[derive(Deserialize)]
struct RowRecord {
    #[serde(default)]
    course: Option<String>,
    grade: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    credits: Option<f64>,
}

/// A row that was left out of the transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based line number in the file, header included
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub courses: Vec<Course>,
    pub skipped: Vec<SkippedRow>,
}

/// Read a `course,grade,credits` transcript from a csv file
pub fn read_courses(path: &Path) -> Result<Transcript, GpaError> {
    let file = File::open(path)?;
    let transcript = read_courses_from_reader(file)?;
    info!(
        "read {} courses from {} ({} rows skipped)",
        transcript.courses.len(),
        path.display(),
        transcript.skipped.len()
    );
    Ok(transcript)
}

pub fn read_courses_from_reader<R: Read>(reader: R) -> Result<Transcript, GpaError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(GpaError::TranscriptError("empty file".to_string()));
    }
    for column in ["grade", "credits"] {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(column)) {
            return Err(GpaError::TranscriptError(format!(
                "missing `{column}` column"
            )));
        }
    }
    // serde matches header names exactly
    let lowered: csv::StringRecord = headers.iter().map(str::to_ascii_lowercase).collect();

    let re = Regex::new(r"^([A-Da-dFf])\s*([+-]?)$")?;
    let mut transcript = Transcript::default();

    for row in rdr.records() {
        let raw = match row {
            Ok(raw) => raw,
            Err(err) => {
                let line = err.position().map_or(0, |pos| pos.line());
                warn!("skipping transcript line {line}: {err}");
                transcript.skipped.push(SkippedRow {
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        // a quoted field may span lines
        let line = raw.position().map_or(0, |pos| pos.line());
        let record: RowRecord = match raw.deserialize(Some(&lowered)) {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping transcript line {line}: {err}");
                transcript.skipped.push(SkippedRow {
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let grade = match normalize_grade(&re, &record.grade) {
            Some(grade) => grade,
            None => {
                warn!("skipping transcript line {line}: unknown grade {:?}", record.grade);
                transcript.skipped.push(SkippedRow {
                    line,
                    reason: format!("unknown grade {:?}", record.grade),
                });
                continue;
            }
        };
        let credits = match record.credits {
            Some(credits) => credits,
            None => {
                warn!("skipping transcript line {line}: credits are not a number");
                transcript.skipped.push(SkippedRow {
                    line,
                    reason: "credits are not a number".to_string(),
                });
                continue;
            }
        };

        debug!("line {line}: {grade} x {credits}");
        transcript.courses.push(Course {
            name: record.course.filter(|name| !name.is_empty()),
            grade,
            credits,
        });
    }

    Ok(transcript)
}

/// `" b + "` -> `B+`, `None` when the result is not a known letter grade
fn normalize_grade(re: &Regex, raw: &str) -> Option<String> {
    let captures = re.captures(raw.trim())?;
    let letter = captures.get(1).map_or("", |m| m.as_str()).to_ascii_uppercase();
    let sign = captures.get(2).map_or("", |m| m.as_str());
    let grade = format!("{letter}{sign}");
    find_band(&LETTER_GRADES, &grade).map(|band| band.symbol.to_string())
}
