mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sift_core::{DEFAULT_THRESHOLD, MatchConfig, TokenizerKind};
use sift_render::OutputFormat;
use std::path::PathBuf;

/// Sift: locate answers to known questions inside free-text submissions.
#[derive(Parser, Debug)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract answers from one submission
    Extract {
        /// Submission text file (`-` for stdin)
        submission: PathBuf,

        /// Question bank JSON file
        #[arg(short, long)]
        bank: PathBuf,

        #[command(flatten)]
        matching: MatchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract answers for every student in a course folder
    Batch {
        /// Folder containing submissions/<student>/submission.txt
        folder: PathBuf,

        /// Question bank JSON file (default: derived from the folder's model answer file)
        #[arg(short, long)]
        bank: Option<PathBuf>,

        #[command(flatten)]
        matching: MatchArgs,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive a question bank from a model answer file
    Bank {
        /// Model answer text file
        model: PathBuf,

        /// Print the parsed model answers instead of the bank
        #[arg(long)]
        answers: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pair a submission's answers with model answers for grading
    Pair {
        /// Submission text file (`-` for stdin)
        submission: PathBuf,

        /// Model answer text file
        #[arg(short, long)]
        model: PathBuf,

        /// Read `N. answer` lines instead of matching restated questions
        #[arg(long)]
        labeled: bool,

        #[command(flatten)]
        matching: MatchArgs,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Minimum similarity for a line to count as a restated question
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Word tokenizer used for similarity scoring: auto, linguistic or whitespace
    #[arg(long, default_value_t = TokenizerKind::Auto)]
    tokenizer: TokenizerKind,

    /// Scan questions one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
}

impl MatchArgs {
    fn config(&self) -> MatchConfig {
        let config = MatchConfig::new()
            .with_threshold(self.threshold)
            .with_tokenizer(self.tokenizer);
        if self.sequential {
            config.sequential()
        } else {
            config
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format: json or jsonl
    #[arg(short, long, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Extract {
            submission,
            bank,
            matching,
            output,
        } => commands::extract::run(
            submission,
            bank,
            matching.config(),
            output.format,
            output.output.as_deref(),
        ),
        Command::Batch {
            folder,
            bank,
            matching,
            output,
        } => commands::batch::run(
            folder,
            bank.as_deref(),
            matching.config(),
            output.as_deref(),
        ),
        Command::Bank {
            model,
            answers,
            output,
        } => commands::bank::run(model, *answers, output.as_deref()),
        Command::Pair {
            submission,
            model,
            labeled,
            matching,
            output,
        } => commands::pair::run(
            submission,
            model,
            *labeled,
            matching.config(),
            output.as_deref(),
        ),
    }
}
