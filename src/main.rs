// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::fn_params_excessive_bools,
    clippy::unnecessary_wraps
)]

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use transcripts::cli::commands::{Cli, Command};
use transcripts::cli::output;
use transcripts::config::Config;
use transcripts::db::Database;
use transcripts::ingest::read_transcript;
use transcripts::models::GradeKind;
use transcripts::operations;
use transcripts::parse::{self, semester_key};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TRANSCRIPTS_LOG";

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> CmdResult {
    let config = get_config()?;
    let pretty = cli.pretty || config.settings.output.is_pretty();

    match cli.command {
        Command::Parse { path, issues } => cmd_parse(&path, issues, pretty),
        Command::Batch { path } => cmd_batch(&config, &path, pretty),
        Command::Import { path } => cmd_import(&config, &path, pretty),
        Command::Catalog { path } => cmd_catalog(&config, &path, pretty),
        Command::Recommend {
            student,
            passing_grade,
        } => cmd_recommend(&config, &student, passing_grade, pretty),
        Command::Key { label, vacational } => cmd_key(&label, vacational, pretty),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

fn get_db(config: &Config) -> Result<Database, Box<dyn std::fmt::Display>> {
    config.ensure_data_dir().map_err(map_err)?;
    Database::open(&config.db_path).map_err(map_err)
}

fn print<T: Serialize>(value: &T, pretty: bool) {
    println!("{}", output::format_output(value, pretty));
}

fn cmd_parse(path: &str, with_issues: bool, pretty: bool) -> CmdResult {
    let text = read_transcript(Path::new(path)).map_err(map_err)?;
    let report = parse::parse_with_report(&text);
    if with_issues {
        print(&report, pretty);
    } else {
        print(&report.record, pretty);
    }
    Ok(())
}

fn cmd_batch(config: &Config, path: &str, pretty: bool) -> CmdResult {
    let root = if path == "." {
        config.root.clone()
    } else {
        Path::new(path).to_path_buf()
    };
    let entries = operations::parse_directory(
        &root,
        config.settings.scan.max_file_size_mb,
        |p| config.should_exclude(p),
    )
    .map_err(map_err)?;
    print(&entries, pretty);
    Ok(())
}

fn cmd_import(config: &Config, path: &str, pretty: bool) -> CmdResult {
    let db = get_db(config)?;
    let outcome = operations::import_file(&db, Path::new(path)).map_err(map_err)?;
    print(&outcome, pretty);
    Ok(())
}

fn cmd_catalog(config: &Config, path: &str, pretty: bool) -> CmdResult {
    let db = get_db(config)?;
    let summary = operations::load_catalog(&db, Path::new(path)).map_err(map_err)?;
    print(&summary, pretty);
    Ok(())
}

fn cmd_recommend(
    config: &Config,
    student: &str,
    passing_grade: Option<f64>,
    pretty: bool,
) -> CmdResult {
    if !config.db_exists() {
        return Err(map_err("no records stored yet, run `transcripts import` first"));
    }
    let db = get_db(config)?;
    let threshold = passing_grade.unwrap_or(config.settings.recommend.passing_grade);
    let recs = operations::recommend_electives(&db, student, threshold).map_err(map_err)?;
    print(&recs, pretty);
    Ok(())
}

fn cmd_key(label: &str, vacational: bool, pretty: bool) -> CmdResult {
    let kind = if vacational {
        GradeKind::Vacational
    } else {
        GradeKind::Definitive
    };

    #[derive(Serialize)]
    struct KeyOutput<'a> {
        label: &'a str,
        key: String,
    }

    print(
        &KeyOutput {
            label,
            key: semester_key(label, kind),
        },
        pretty,
    );
    Ok(())
}
