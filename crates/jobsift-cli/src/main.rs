mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(
    name = "jobsift",
    version,
    about = "Split CVs and job postings into labelled sections"
)]
struct Cli {
    /// Log extraction progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options for fetching job pages.
#[derive(Args, Clone)]
pub struct FetchArgs {
    /// Custom site adapters (JSON array), tried before the builtin ones
    #[arg(long = "adapters", value_name = "FILE")]
    pub adapters: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// User-Agent header sent with each request
    #[arg(long = "user-agent", value_name = "UA")]
    pub user_agent: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CV (DOCX, paragraph JSON or plain text) into sections
    Cv {
        /// Path to .docx, .json or .txt file
        input_file: PathBuf,

        /// Custom CV heading rules (JSON)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the parsed CV to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Fetch a job posting and extract its fields and sections
    Job {
        /// Posting URL
        url: String,

        /// Custom job heading rules (JSON)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the posting to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Score how well a CV covers a job posting's key points
    Match {
        /// Path to the CV (.docx, .json or .txt)
        cv_file: PathBuf,

        /// Posting URL, or a posting saved with `jobsift job --out`
        job: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also reorder CV skills and highlight experience for the posting
        #[arg(long)]
        tailor: bool,
    },
    /// Inspect heading rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List builtin rule presets
    List,
    /// Print the headings and keywords of a preset
    Show {
        /// Preset name ("cv" or "job")
        preset: String,
    },
    /// Validate a custom rules file
    Validate {
        /// Path to JSON rules file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cv {
            input_file,
            rules,
            output,
            out,
        } => commands::cv::run(input_file, rules, &output, out),
        Commands::Job {
            url,
            rules,
            fetch,
            output,
            out,
        } => commands::job::run(&url, rules, &fetch, &output, out),
        Commands::Match {
            cv_file,
            job,
            fetch,
            output,
            tailor,
        } => commands::match_cmd::run(cv_file, &job, &fetch, &output, tailor),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Show { preset } => commands::rules::show(&preset),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
