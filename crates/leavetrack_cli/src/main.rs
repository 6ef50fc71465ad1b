//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `leavetrack_core` linkage without the Flutter/FFI runtime.
//! - Print a deterministic summary of an existing tracker database.
//!
//! # Invariants
//! - The probe never creates a database; a missing path is an error.

use clap::Parser;
use leavetrack_core::db::open_db;
use leavetrack_core::{month_name, LeaveTracker, SqliteKvRepository};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "leavetrack_cli",
    about = "Leave calendar tracker smoke probe",
    version
)]
struct Cli {
    /// Existing tracker database to summarize.
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("leavetrack_core ping={}", leavetrack_core::ping());
    println!("leavetrack_core version={}", leavetrack_core::core_version());

    let Some(db_path) = cli.db_path else {
        return ExitCode::SUCCESS;
    };
    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !db_path.is_file() {
        return Err(format!("tracker database `{}` does not exist", db_path.display()).into());
    }
    let conn = open_db(db_path)?;
    let repo = SqliteKvRepository::try_new(&conn)?;
    let tracker = LeaveTracker::load(repo)?;

    let years = tracker.years().years();
    println!("years={years:?}");
    for member in tracker.team().members() {
        println!(
            "member id={} active={} name={}",
            member.id, member.active, member.name
        );
        for &year in years {
            let counts = tracker.days().member_year_counts(year, member.id);
            if counts.is_empty() {
                continue;
            }
            let summary = counts
                .iter()
                .map(|(token, count)| format!("{token}={count}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {year}: {summary}");
        }
    }

    if let (Some(&year), Some(member)) = (years.first(), tracker.team().active_members().first()) {
        let january = tracker.days().month_assignments(year, member.id, 0);
        println!(
            "{} {year} member={} assigned_days={}",
            month_name(0).unwrap_or("?"),
            member.id,
            january.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{print_summary, Cli};
    use clap::error::ErrorKind;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn help_and_version_are_handled_by_the_parser() {
        let help = Cli::try_parse_from(["leavetrack_cli", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        let version = Cli::try_parse_from(["leavetrack_cli", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["leavetrack_cli", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn db_path_is_optional_positional() {
        let cli = Cli::try_parse_from(["leavetrack_cli"]).unwrap();
        assert!(cli.db_path.is_none());
        let cli = Cli::try_parse_from(["leavetrack_cli", "tracker.db"]).unwrap();
        assert_eq!(cli.db_path, Some(PathBuf::from("tracker.db")));
    }

    #[test]
    fn missing_database_is_reported_without_creating_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.db");

        let err = print_summary(&path).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(!path.exists());
    }

    #[test]
    fn existing_database_is_summarized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.db");
        drop(leavetrack_core::db::open_db(&path).unwrap());

        print_summary(&path).unwrap();
    }
}
