mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cyons_common::AppConfig;
use cyons_llm::{ControlParams, BIAS_AVOIDANCE_RANGE, COMPRESSION_RANGE};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "cyons", version)]
#[command(about = "cyons - Choose-Your-Own-News controlled summarizer", long_about = None)]
struct Cli {
    /// Configuration file (TOML); defaults to ./cyons.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize an article and review the result
    Summarize {
        #[command(flatten)]
        input: ArticleArgs,

        /// Also print the prompt sent to the model
        #[arg(long)]
        show_prompt: bool,

        /// Print the full run as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the compiled prompt without calling the model
    Compile {
        #[command(flatten)]
        input: ArticleArgs,
    },

    /// Run the heuristic review on a summary
    Review {
        /// Summary file (reads stdin when omitted)
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// List available styles
    Styles,
}

#[derive(Args)]
pub struct ArticleArgs {
    /// Summarization style (sherlock, policy, critic)
    #[arg(long, short)]
    pub style: Option<String>,

    /// Compression level: lower means shorter (0.1 - 1.0)
    #[arg(
        long,
        default_value_t = ControlParams::default().compression,
        value_parser = parse_compression
    )]
    pub compression: f64,

    /// Bias avoidance level: higher means stricter neutrality (0.0 - 1.0)
    #[arg(
        long,
        default_value_t = ControlParams::default().bias_avoidance,
        value_parser = parse_bias_avoidance
    )]
    pub bias_avoidance: f64,

    /// Article file (reads stdin when omitted)
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

impl ArticleArgs {
    pub fn controls(&self) -> ControlParams {
        ControlParams::new(self.compression, self.bias_avoidance)
    }
}

fn parse_compression(s: &str) -> std::result::Result<f64, String> {
    parse_in_range(s, COMPRESSION_RANGE)
}

fn parse_bias_avoidance(s: &str) -> std::result::Result<f64, String> {
    parse_in_range(s, BIAS_AVOIDANCE_RANGE)
}

fn parse_in_range(
    s: &str,
    range: std::ops::RangeInclusive<f64>,
) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{} is outside the allowed range {}..={}",
            value,
            range.start(),
            range.end()
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before AppConfig so its variables take part in layering
    load_dotenv_from_project_root();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { host, port }) => commands::serve(config, host, port).await,
        None => commands::serve(config, None, None).await,
        Some(Commands::Summarize {
            input,
            show_prompt,
            json,
        }) => commands::summarize(&config, &input, show_prompt, json).await,
        Some(Commands::Compile { input }) => commands::compile(&config, &input),
        Some(Commands::Review { file }) => commands::review(file.as_deref()),
        Some(Commands::Styles) => commands::styles(&config),
    }
}
