use std::{collections::BTreeMap, io::Write, path::Path};

use log::{debug, info};
use serde::Serialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;

use scholar_gpa::gpa::{
    calculate_weighted_gpa, check_eligibility_for, convert_gpa, equivalents, find_answer,
    match_scholarships, read_courses, to_percentage, EligibilityEntry, EligibilityStatus,
    GpaError, GpaSystem, GradeValue, Locale, MatchProfile, MatchStore, StudyLevel, GPA_SYSTEMS,
    REFERENCE_TABLE,
};

use crate::cli::Commands;

/// Output settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub locale: Locale,
}

impl Output {
    fn text<'a>(&self, en: &'a str, ar: &'a str) -> &'a str {
        self.locale.pick(en, ar)
    }

    fn print_json<W, T>(&self, w: &mut W, value: &T) -> Result<(), GpaError>
    where
        W: Write,
        T: Serialize + ?Sized,
    {
        writeln!(w, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}

pub async fn run<W: Write>(
    command: Commands,
    out: Output,
    db_path: &Path,
    w: &mut W,
) -> Result<(), GpaError> {
    debug!("running {command:?}");
    match command {
        Commands::Systems => systems(out, w),
        Commands::Convert { value, from, to } => convert(out, w, &value, from, to),
        Commands::Eligibility {
            value,
            system,
            level,
        } => eligibility(out, w, &value, system, level),
        Commands::Weighted { transcript, system } => weighted(out, w, &transcript, system),
        Commands::Reference => reference(out, w),
        Commands::Match {
            value,
            system,
            level,
            countries,
            top,
            save,
        } => {
            let mut profile = MatchProfile::new(to_percentage(&GradeValue::parse(&value), system));
            profile.level = level;
            profile.countries = countries;
            matches(out, w, &profile, top, save.then_some(db_path)).await
        }
        Commands::History { limit, clear } => history(out, w, db_path, limit, clear).await,
        Commands::Faq { question } => faq(out, w, &question.join(" ")),
    }
}

fn systems<W: Write>(out: Output, w: &mut W) -> Result<(), GpaError> {
    if out.json {
        return out.print_json(w, &GPA_SYSTEMS[..]);
    }
    for info in &GPA_SYSTEMS {
        let range = if info.discrete {
            let symbols: Vec<&str> = info.system.bands().iter().map(|b| b.symbol).collect();
            symbols.join(", ")
        } else {
            format!("{} - {}", info.min, info.max)
        };
        writeln!(
            w,
            "{:<12} {:<28} {}",
            info.id,
            out.text(info.name, info.name_ar),
            range
        )?;
    }
    Ok(())
}

fn convert<W: Write>(
    out: Output,
    w: &mut W,
    value: &str,
    from: GpaSystem,
    to: GpaSystem,
) -> Result<(), GpaError> {
    let input = GradeValue::parse(value);
    let percentage = to_percentage(&input, from);
    let converted = convert_gpa(&input, from, to);

    if out.json {
        return out.print_json(
            w,
            &json!({
                "from": from,
                "to": to,
                "input": input,
                "percentage": percentage,
                "result": converted,
            }),
        );
    }
    writeln!(w, "{input} ({from}) = {converted} ({to})")?;
    writeln!(
        w,
        "{}: {percentage:.2}%",
        out.text("percentage", "النسبة المئوية")
    )?;
    Ok(())
}

fn eligibility<W: Write>(
    out: Output,
    w: &mut W,
    value: &str,
    system: GpaSystem,
    level: Option<StudyLevel>,
) -> Result<(), GpaError> {
    let result = check_eligibility_for(&GradeValue::parse(value), system, level);
    if out.json {
        return out.print_json(w, &result);
    }

    writeln!(
        w,
        "{}: {:.2}%",
        out.text("percentage", "النسبة المئوية"),
        result.percentage
    )?;
    for (status, entries) in [
        (EligibilityStatus::Eligible, &result.eligible),
        (EligibilityStatus::Close, &result.close),
        (EligibilityStatus::NotEligible, &result.not_eligible),
    ] {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({})",
            out.text(status.label(), status.label_ar()),
            entries.len()
        )?;
        for entry in entries {
            print_entry(out, w, entry)?;
        }
    }
    Ok(())
}

fn print_entry<W: Write>(
    out: Output,
    w: &mut W,
    entry: &EligibilityEntry<'_>,
) -> Result<(), GpaError> {
    let req = entry.requirement;
    writeln!(
        w,
        "  {:<28} {:<16} {:>5.1}%  {:+.2}",
        out.text(req.name, req.name_ar),
        out.text(req.country, req.country_ar),
        req.min_percent,
        entry.diff
    )?;
    Ok(())
}

fn weighted<W: Write>(
    out: Output,
    w: &mut W,
    path: &Path,
    system: GpaSystem,
) -> Result<(), GpaError> {
    let transcript = read_courses(path)?;
    let result = calculate_weighted_gpa(&transcript.courses, system);
    info!(
        "weighted {} over {} credits",
        result.percentage, result.total_credits
    );

    if out.json {
        return out.print_json(
            w,
            &json!({
                "transcript": transcript,
                "result": result,
            }),
        );
    }

    for skipped in &transcript.skipped {
        writeln!(
            w,
            "{} {}: {}",
            out.text("skipped line", "سطر متجاهل"),
            skipped.line,
            skipped.reason
        )?;
    }
    let grade = match &result.symbol {
        Some(symbol) => symbol.clone(),
        None => format!("{:.2}", result.gpa),
    };
    writeln!(
        w,
        "{} ({system}): {grade}",
        out.text("weighted GPA", "المعدل التراكمي الموزون")
    )?;
    writeln!(
        w,
        "{}: {:.2}%",
        out.text("percentage", "النسبة المئوية"),
        result.percentage
    )?;
    writeln!(
        w,
        "{}: {}",
        out.text("credits", "الساعات المعتمدة"),
        result.total_credits
    )?;
    Ok(())
}

fn reference<W: Write>(out: Output, w: &mut W) -> Result<(), GpaError> {
    if out.json {
        let rows: Vec<_> = REFERENCE_TABLE
            .iter()
            .map(|row| {
                json!({
                    "row": row,
                    "equivalents": equivalents(row.min_percent)
                        .into_iter()
                        .map(|(system, value)| (system.id(), value))
                        .collect::<BTreeMap<_, _>>(),
                })
            })
            .collect();
        return out.print_json(w, &rows);
    }

    for row in &REFERENCE_TABLE {
        let german = convert_gpa(
            &GradeValue::Score(row.min_percent),
            GpaSystem::Percentage,
            GpaSystem::German,
        );
        let uk = convert_gpa(
            &GradeValue::Score(row.min_percent),
            GpaSystem::Percentage,
            GpaSystem::Uk,
        );
        writeln!(
            w,
            "{:<3} {:>5.1}-{:<5.1} {:>4.1}  {:<5} {:<6} {}",
            row.letter,
            row.min_percent,
            row.max_percent,
            row.points,
            german.to_string(),
            uk.to_string(),
            out.text(row.descriptor, row.descriptor_ar)
        )?;
    }
    Ok(())
}

async fn matches<W: Write>(
    out: Output,
    w: &mut W,
    profile: &MatchProfile,
    top: Option<usize>,
    save_to: Option<&Path>,
) -> Result<(), GpaError> {
    let mut results = match_scholarships(profile);

    // the saved run keeps every result, `top` only trims what is shown
    let saved = match save_to {
        Some(path) => {
            let store = MatchStore::open(path).await?;
            Some(store.record(profile, &results).await?)
        }
        None => None,
    };
    if let Some(top) = top {
        results.truncate(top);
    }

    if out.json {
        return out.print_json(
            w,
            &json!({
                "profile": profile,
                "results": results,
                "savedId": saved,
            }),
        );
    }

    writeln!(
        w,
        "{}: {:.2}%",
        out.text("percentage", "النسبة المئوية"),
        profile.percentage
    )?;
    for result in &results {
        let req = result.requirement;
        let marker = if result.country_match { "*" } else { " " };
        writeln!(
            w,
            "{:>3} {marker} {:<28} {:<16} {}",
            result.score,
            out.text(req.name, req.name_ar),
            out.text(req.country, req.country_ar),
            out.text(result.status.label(), result.status.label_ar())
        )?;
    }
    if let Some(id) = saved {
        writeln!(w, "{} #{id}", out.text("saved as", "حُفظ برقم"))?;
    }
    Ok(())
}

async fn history<W: Write>(
    out: Output,
    w: &mut W,
    db_path: &Path,
    limit: u32,
    clear: bool,
) -> Result<(), GpaError> {
    let store = MatchStore::open(db_path).await?;

    if clear {
        let removed = store.clear().await?;
        if out.json {
            return out.print_json(w, &json!({ "removed": removed }));
        }
        writeln!(w, "{}: {removed}", out.text("removed runs", "السجلات المحذوفة"))?;
        return Ok(());
    }

    let records = store.recent(limit).await?;
    if out.json {
        return out.print_json(w, &records);
    }
    if records.is_empty() {
        writeln!(w, "{}", out.text("no saved runs", "لا توجد سجلات محفوظة"))?;
    }
    for record in &records {
        let when = record
            .created_at()
            .and_then(|at| at.format(&Rfc3339).ok())
            .unwrap_or_else(|| record.created_at.to_string());
        let level = record
            .level
            .map(|level| out.text(level.as_str(), level.name_ar()).to_string())
            .unwrap_or_else(|| "-".to_string());
        let best = record
            .results
            .first()
            .map(|m| format!("{} ({})", m.name, m.score))
            .unwrap_or_default();
        writeln!(
            w,
            "#{:<4} {when}  {:>6.2}%  {level:<8} {best}",
            record.id, record.percentage
        )?;
    }
    Ok(())
}

fn faq<W: Write>(out: Output, w: &mut W, question: &str) -> Result<(), GpaError> {
    let answer = find_answer(question);
    if out.json {
        return out.print_json(w, &answer);
    }
    if let Some(question) = answer.question {
        writeln!(w, "{question}")?;
        writeln!(w)?;
    }
    writeln!(w, "{}", answer.answer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use scholar_gpa::gpa::SCHOLARSHIP_REQUIREMENTS;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const TEXT: Output = Output {
        json: false,
        locale: Locale::En,
    };
    const JSON: Output = Output {
        json: true,
        locale: Locale::En,
    };

    async fn run_args(args: &[&str], db_path: &Path) -> (Output, String) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let out = Output {
            json: cli.json,
            locale: cli.lang,
        };
        let mut buf = Vec::new();
        run(cli.command, out, db_path, &mut buf).await.unwrap();
        (out, String::from_utf8(buf).unwrap())
    }

    fn unused_db() -> PathBuf {
        PathBuf::from("unused.db")
    }

    #[test]
    fn test_convert_text() {
        let mut buf = Vec::new();
        convert(TEXT, &mut buf, "3.0", GpaSystem::Us4, GpaSystem::German).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("3 (us-4.0) = 2 (german)"), "{text}");
        assert!(text.contains("percentage: 75.00%"), "{text}");
    }

    #[test]
    fn test_convert_json() {
        let mut buf = Vec::new();
        convert(JSON, &mut buf, "2:1", GpaSystem::Uk, GpaSystem::Letter).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["percentage"], 60.0);
        assert_eq!(value["result"], "D-");
    }

    #[tokio::test]
    async fn test_match_parses_grade_through_system() {
        // 3.0 on the 4.0 scale is 75%
        let (_, output) = run_args(
            &[
                "scholar-gpa",
                "--json",
                "match",
                "3.0",
                "--system",
                "us-4.0",
                "--level",
                "master",
            ],
            &unused_db(),
        )
        .await;
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["profile"]["percentage"], 75.0);
        assert_eq!(value["savedId"], Value::Null);
        assert_eq!(value["results"][0]["score"], 80);
    }

    #[tokio::test]
    async fn test_match_top_trims_output_not_history() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("history.db");

        let (_, output) = run_args(
            &["scholar-gpa", "--json", "match", "85", "--top", "3", "--save"],
            &db_path,
        )
        .await;
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        let saved_id = value["savedId"].as_i64().unwrap();

        let store = MatchStore::open(&db_path).await.unwrap();
        let record = store.get(saved_id).await.unwrap().unwrap();
        assert_eq!(record.results.len(), SCHOLARSHIP_REQUIREMENTS.len());
    }

    #[tokio::test]
    async fn test_history_and_clear() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("history.db");

        let mut buf = Vec::new();
        history(TEXT, &mut buf, &db_path, 10, false).await.unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("no saved runs"));

        for value in ["70", "90"] {
            run_args(&["scholar-gpa", "match", value, "--save"], &db_path).await;
        }

        let mut buf = Vec::new();
        history(JSON, &mut buf, &db_path, 1, false).await.unwrap();
        let records: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(records.as_array().unwrap().len(), 1);
        assert_eq!(records[0]["percentage"], 90.0);

        let (_, output) =
            run_args(&["scholar-gpa", "--json", "history", "--clear"], &db_path).await;
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["removed"], 2);

        let store = MatchStore::open(&db_path).await.unwrap();
        assert!(store.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_arabic_labels() {
        let (out, output) = run_args(
            &["scholar-gpa", "--lang", "ar", "eligibility", "75", "--level", "master"],
            &unused_db(),
        )
        .await;
        assert_eq!(out.locale, Locale::Ar);
        assert!(output.contains("النسبة المئوية"), "{output}");
    }

    #[test]
    fn test_weighted_reports_skipped_lines() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("transcript.csv");
        std::fs::write(&path, "course,grade,credits\nMath,B,3\nArt,Z,2\nPhysics,B,3\n").unwrap();

        let mut buf = Vec::new();
        weighted(TEXT, &mut buf, &path, GpaSystem::Letter).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("skipped line 3"), "{text}");
        assert!(text.contains("weighted GPA (letter): B"), "{text}");
    }

    #[test]
    fn test_faq_fallback() {
        let mut buf = Vec::new();
        faq(JSON, &mut buf, "zzz").unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["score"], 0);
    }

    #[test]
    fn test_systems_and_reference_list_every_row() {
        let mut buf = Vec::new();
        systems(TEXT, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().lines().count(),
            GPA_SYSTEMS.len()
        );

        let mut buf = Vec::new();
        reference(JSON, &mut buf).unwrap();
        let rows: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), REFERENCE_TABLE.len());
    }
}
