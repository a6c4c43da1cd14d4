use clap::{Parser, Subcommand};
use scholar_gpa::gpa::{GpaSystem, Locale, StudyLevel};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scholar-gpa")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Convert grades, check scholarship eligibility and find matching scholarships")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// Output language (en or ar)
    #[arg(long, global = true, default_value = "en")]
    pub lang: Locale,
    /// Log level, overrides SCHOLAR_GPA_LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<LevelFilter>,
    /// Match history database, overrides SCHOLAR_GPA_DB
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the supported grading systems
    Systems,
    /// Convert a grade from one system to another
    Convert {
        /// Grade to convert, a number or a symbol such as A- or 2:1
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long)]
        from: GpaSystem,
        #[arg(short, long)]
        to: GpaSystem,
    },
    /// Show which scholarships a grade qualifies for
    Eligibility {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, default_value = "percentage")]
        system: GpaSystem,
        #[arg(short, long)]
        level: Option<StudyLevel>,
    },
    /// Credit-weighted GPA of a course,grade,credits csv transcript
    Weighted {
        transcript: PathBuf,
        #[arg(short, long, default_value = "us-4.0")]
        system: GpaSystem,
    },
    /// Print the grade reference chart
    Reference,
    /// Rank scholarships for a candidate
    Match {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, default_value = "percentage")]
        system: GpaSystem,
        #[arg(short, long)]
        level: Option<StudyLevel>,
        /// Preferred country, may be repeated
        #[arg(short, long = "country")]
        countries: Vec<String>,
        /// Only show the best N results
        #[arg(long)]
        top: Option<usize>,
        /// Save the run to the match history
        #[arg(long)]
        save: bool,
    },
    /// Show or clear saved matcher runs
    History {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Delete all saved runs
        #[arg(long)]
        clear: bool,
    },
    /// Ask the FAQ assistant a question
    Faq {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_symbol() {
        let cli = Cli::try_parse_from([
            "scholar-gpa", "convert", "2:1", "--from", "uk", "--to", "letter",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert { value, from, to } => {
                assert_eq!(value, "2:1");
                assert_eq!(from, GpaSystem::Uk);
                assert_eq!(to, GpaSystem::Letter);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.json);
        assert_eq!(cli.lang, Locale::En);
    }

    #[test]
    fn test_hyphenated_values_are_not_flags() {
        let cli = Cli::try_parse_from([
            "scholar-gpa", "convert", "A-", "-f", "letter", "-t", "german",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Convert { ref value, .. } if value == "A-"));

        let cli = Cli::try_parse_from(["scholar-gpa", "eligibility", "-3"]).unwrap();
        assert!(matches!(cli.command, Commands::Eligibility { ref value, .. } if value == "-3"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scholar-gpa",
            "match",
            "80",
            "--level",
            "phd",
            "--country",
            "Japan",
            "--country",
            "Germany",
            "--json",
            "--lang",
            "ar",
            "--log-level",
            "debug",
            "--db",
            "runs.db",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.lang, Locale::Ar);
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        assert_eq!(cli.db, Some(PathBuf::from("runs.db")));
        match cli.command {
            Commands::Match {
                level,
                countries,
                system,
                save,
                top,
                ..
            } => {
                assert_eq!(level, Some(StudyLevel::Phd));
                assert_eq!(countries, vec!["Japan".to_string(), "Germany".to_string()]);
                assert_eq!(system, GpaSystem::Percentage);
                assert!(!save);
                assert_eq!(top, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_system_and_level() {
        let unknown_system =
            Cli::try_parse_from(["scholar-gpa", "convert", "3", "--from", "us-9", "--to", "uk"]);
        assert!(unknown_system.is_err());
        let unknown_level =
            Cli::try_parse_from(["scholar-gpa", "eligibility", "80", "--level", "postdoc"]);
        assert!(unknown_level.is_err());
        assert!(Cli::try_parse_from(["scholar-gpa", "faq"]).is_err());
    }

    #[test]
    fn test_history_defaults() {
        let cli = Cli::try_parse_from(["scholar-gpa", "history"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: 10, clear: false }));
    }
}
