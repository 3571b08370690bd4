use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "transcripts",
    version,
    about = "Academic transcript extraction, storage and elective recommendation",
    after_help = "Data is kept in .transcripts/ under the current directory \
                  (records.db and config.toml). Set TRANSCRIPTS_LOG=debug to see \
                  why lines were dropped."
)]
pub struct Cli {
    /// Indent JSON output (overrides output.format from config.toml)
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one transcript (PDF or extracted text) and print the record.
    Parse {
        /// Transcript file
        path: String,
        /// Also print the non-fatal issues met while parsing
        #[arg(long)]
        issues: bool,
    },

    /// Parse every transcript under a directory in parallel.
    ///
    /// Respects .gitignore and skips hidden files/directories. Documents that
    /// cannot be read are reported per file and do not stop the batch.
    Batch {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Parse and store one transcript.
    ///
    /// A `.json` file is read as an already parsed record. Documents whose
    /// content was imported before are skipped.
    Import {
        /// Transcript or record file
        path: String,
    },

    /// Load a course catalog (courses, credits, electives, prerequisites)
    Catalog {
        /// Catalog JSON file
        path: String,
    },

    /// Recommend electives for a stored student
    Recommend {
        /// Student code
        student: String,
        /// Minimum grade for a course to count as approved
        #[arg(long)]
        passing_grade: Option<f64>,
    },

    /// Print the semester key for a period label
    Key {
        /// Period label, e.g. "Primer período de 2020"
        label: String,
        /// Key the label as a vacation session
        #[arg(long)]
        vacational: bool,
    },
}
