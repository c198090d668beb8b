use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "exam", version, about = "Take multiple-choice exams in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Raise log verbosity (-v info, -vv debug). `EXAM_LOG` overrides it.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Subcommand to run; a bare `exam` takes the default exam.
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.cmd.clone().unwrap_or(Command::Take(TakeArgs::default()))
    }
}

/// Where question sets are read from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Directory holding `db_tema_<key>.json` files.
    #[arg(long, env = "EXAM_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// SQLite question bank; takes precedence over `--data-dir`.
    #[arg(long = "db", env = "EXAM_DB_URL", global = true)]
    pub db_url: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Answer an exam interactively (default)
    Take(TakeArgs),
    /// List the stored exam keys
    List,
    /// Load and validate one exam without starting it
    Validate(ExamArg),
    /// Validate a JSON question set and store it in the SQLite bank
    Import(ImportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ExamArg {
    /// Exam key; numeric keys are zero-padded to two digits.
    #[arg(long = "exam", env = "EXAM_KEY", default_value = "01")]
    pub exam: String,
}

impl Default for ExamArg {
    fn default() -> Self {
        Self { exam: "01".into() }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TakeArgs {
    #[command(flatten)]
    pub exam: ExamArg,

    /// Keep the first answer of each question.
    #[arg(long, env = "EXAM_LOCK_ANSWERS")]
    pub lock_answers: bool,

    /// Present questions in random order.
    #[arg(long)]
    pub shuffle: bool,

    /// Print the final report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// JSON file in the question-set format.
    pub file: PathBuf,

    #[command(flatten)]
    pub exam: ExamArg,
}
