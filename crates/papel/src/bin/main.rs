//! Papel command-line interface

use clap::{Parser, Subcommand};
use papel::cli::{check, eval, output, render};
use std::path::PathBuf;

/// Papel document-template tool
#[derive(Parser)]
#[command(name = "papel")]
#[command(author, version, about = "Render and validate JSON-described document templates", long_about = None)]
struct Cli {
    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document template
    Render {
        /// Template file (JSON)
        template: PathBuf,

        /// Input values file (JSON object)
        #[arg(short, long)]
        inputs: Option<PathBuf>,

        /// Input values (name=value), overriding the inputs file
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Pin the clock for reproducible output (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        now: Option<String>,
    },

    /// Evaluate a single expression
    Eval {
        /// Expression source text
        expression: String,

        /// Context file with inputs/constants/vars (JSON object)
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Input values (name=value)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Pin the clock (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        now: Option<String>,

        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
    },

    /// Validate template files
    Check {
        /// Template files to validate
        files: Vec<PathBuf>,

        /// Exit non-zero when any problem is found
        #[arg(short, long)]
        strict: bool,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    output::setup_colors(&cli.color);

    let result = match cli.command {
        Commands::Render {
            template,
            inputs,
            params,
            now,
        } => render::run(render::RenderArgs {
            template,
            inputs,
            params,
            now,
            output: cli.output,
        }),
        Commands::Eval {
            expression,
            context,
            params,
            now,
            pretty,
        } => eval::run(eval::EvalArgs {
            expression,
            context,
            params,
            now,
            pretty,
            output: cli.output,
        }),
        Commands::Check { files, strict } => check::run(check::CheckArgs { files, strict }),
    };

    if let Err(err) = result {
        eprintln!("{}", output::format_error(&err));
        std::process::exit(1);
    }
}
