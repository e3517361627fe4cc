use anyhow::{bail, Context, Result};
use cyons_common::{logger, AppConfig};
use cyons_llm::{
    compile_prompt, review_text, ManifestoSet, OpenAiClient, Summarizer, SummaryRequest,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::ArticleArgs;

/// Log level for one-shot commands (RUST_LOG still wins)
const CLI_LOG_LEVEL: &str = "warn";

/// Start the HTTP server
pub async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    // Override with CLI arguments
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;
    config.ensure_directories()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("cyons starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.llm_model);
    tracing::info!("  Default style: {}", config.default_style.key());
    tracing::info!("  Log file: {}", config.get_log_path(logger::LOG_FILE_NAME).display());

    let summarizer = Arc::new(build_summarizer(&config)?);

    println!("Server listening on http://{}", config.server_bind_address());

    cyons_server::start_server(config, summarizer).await?;
    Ok(())
}

/// Summarize an article and print summary, review and optionally the prompt
pub async fn summarize(
    config: &AppConfig,
    input: &ArticleArgs,
    show_prompt: bool,
    json: bool,
) -> Result<()> {
    logger::setup_console_logging(CLI_LOG_LEVEL)?;

    let article = read_article(input.file.as_deref())?;
    let summarizer = build_summarizer(config)?;
    let (style, _) = summarizer
        .manifestos()
        .resolve(input.style.as_deref().unwrap_or(config.default_style.key()));
    let request = SummaryRequest::new(style, article, input.controls());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Compiling prompt and fetching summary...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let run = summarizer.summarize(&request).await;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        println!("Summary ({} Style)", run.style.label());
        println!(
            "Generated using {} style with Compression={} and Bias Avoidance={}",
            run.style.label(),
            run.controls.compression,
            run.controls.bias_avoidance
        );
        println!();
        println!("{}", run.generation.text());

        if let Some(review) = &run.review {
            println!();
            println!("=== Heuristic Logic & Tone Review ===");
            println!("{}", review);
        }

        if show_prompt {
            println!();
            println!("=== Prompt Sent to LLM ===");
            println!("{}", run.prompt);
        }
    }

    if !run.generation.is_summary() {
        bail!("summary generation failed");
    }

    Ok(())
}

/// Print the compiled prompt (offline)
pub fn compile(config: &AppConfig, input: &ArticleArgs) -> Result<()> {
    logger::setup_console_logging(CLI_LOG_LEVEL)?;

    let article = read_article(input.file.as_deref())?;
    let manifestos = ManifestoSet::load_dir(&config.manifesto_dir, config.default_style)?;
    let (_, manifesto) =
        manifestos.resolve(input.style.as_deref().unwrap_or(config.default_style.key()));

    println!("{}", compile_prompt(manifesto, &article, &input.controls()));
    Ok(())
}

/// Print the heuristic review of a summary
pub fn review(file: Option<&Path>) -> Result<()> {
    logger::setup_console_logging(CLI_LOG_LEVEL)?;

    let summary = read_input(file)?;
    println!("{}", review_text(&summary));
    Ok(())
}

/// List styles with a manifesto
pub fn styles(config: &AppConfig) -> Result<()> {
    logger::setup_console_logging(CLI_LOG_LEVEL)?;

    let manifestos = ManifestoSet::load_dir(&config.manifesto_dir, config.default_style)?;
    for style in manifestos.styles() {
        if style == manifestos.default_style() {
            println!("{} (default)", style.key());
        } else {
            println!("{}", style.key());
        }
    }
    Ok(())
}

fn build_summarizer(config: &AppConfig) -> Result<Summarizer> {
    let manifestos = ManifestoSet::load_dir(&config.manifesto_dir, config.default_style)?;
    let client = OpenAiClient::from_config(config)?;

    Ok(Summarizer::new(Arc::new(client), manifestos)
        .review_failed_output(config.review_failed_output))
}

fn read_article(file: Option<&Path>) -> Result<String> {
    let article = read_input(file)?;
    if article.trim().is_empty() {
        bail!("Please paste an article to begin summarization.");
    }
    Ok(article)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
