use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cheatsheet::config::Config;
use cheatsheet::errors::AppError;
use cheatsheet::lecture::load_lecture;
use cheatsheet::llm_client::LlmClient;
use cheatsheet::pipeline::{self, GenerationReport, SAMPLE_OUTPUT};
use cheatsheet::prompt::{build_prompt, format_topics, parse_topic_list};

#[derive(Parser)]
#[command(
    name = "cheatsheet",
    version,
    about = "Generate a dense A4 exam cheat sheet from lecture material"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Where to write the PDF
    #[arg(short, long, global = true, default_value = "cheatsheet.pdf")]
    output: PathBuf,

    /// Page budget
    #[arg(long, global = true, env = "MAX_PAGES", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Lecture files + topics -> model -> PDF
    Generate {
        /// Lecture files (.txt, .md, .pdf)
        #[arg(short, long, required = true, num_args = 1..)]
        lecture: Vec<PathBuf>,

        /// File with one topic per line
        #[arg(short, long)]
        topics: PathBuf,

        /// Normalise the topic list with a model call first
        #[arg(long)]
        format_topics: bool,
    },
    /// Render box markup that was produced elsewhere
    Render {
        /// File containing [BOX:..] markup
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the prompt that `generate` would send
    Prompt {
        #[arg(short, long, required = true, num_args = 1..)]
        lecture: Vec<PathBuf>,

        #[arg(short, long)]
        topics: PathBuf,
    },
    /// Render the built-in sample sheet
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }

    // Initialize structured logging
    let filter = if cli.verbose {
        EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("cheatsheet v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli.command, &cli.output, &config).await {
        match &e {
            AppError::Parse(parse_err) => error!(
                code = e.code(),
                line = parse_err.line(),
                offset = parse_err.offset(),
                "{e}"
            ),
            _ => error!(code = e.code(), "{e}"),
        }
        return Err(e.into());
    }
    Ok(())
}

async fn run(command: Command, output: &Path, config: &Config) -> Result<(), AppError> {
    let page_config = config.page_config();

    match command {
        Command::Generate {
            lecture,
            topics,
            format_topics: normalise,
        } => {
            let lecture_content = load_lecture(&lecture)?;
            let client = llm_client(config)?;
            let raw_topics = std::fs::read_to_string(&topics)?;
            let topic_list = if normalise {
                format_topics(&raw_topics, &client).await?
            } else {
                parse_topic_list(&raw_topics)
            };
            let report = pipeline::generate(
                &lecture_content,
                &topic_list,
                &client,
                &page_config,
                output,
            )
            .await?;
            print_report(&report);
        }
        Command::Render { input } => {
            let raw_text = std::fs::read_to_string(&input)?;
            let report = pipeline::render_from_text(&raw_text, &page_config, output)?;
            print_report(&report);
        }
        Command::Prompt { lecture, topics } => {
            let lecture_content = load_lecture(&lecture)?;
            let topic_list = parse_topic_list(&std::fs::read_to_string(&topics)?);
            let prompt = build_prompt(&topic_list, &lecture_content, config.max_pages);
            println!("=== SYSTEM PROMPT ===\n{}\n", prompt.system);
            println!("=== USER PROMPT ===\n{}", prompt.user);
        }
        Command::Demo => {
            let report = pipeline::render_from_text(SAMPLE_OUTPUT, &page_config, output)?;
            print_report(&report);
        }
    }
    Ok(())
}

fn llm_client(config: &Config) -> Result<LlmClient, AppError> {
    let api_key = config.require_api_key()?;
    let client = LlmClient::new(
        api_key.to_string(),
        config.model.clone(),
        config.llm_max_tokens,
        config.llm_timeout(),
    )?;
    info!("LLM client initialized (model: {})", client.model());
    Ok(client)
}

fn print_report(report: &GenerationReport) {
    println!(
        "Wrote {} ({} boxes on {} page(s))",
        report.output_path.display(),
        report.box_count,
        report.pages_used
    );
    if report.clipped_lines > 0 {
        println!(
            "Note: {} line(s) did not fit their box and were clipped",
            report.clipped_lines
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_max_pages_flag_is_parsed_and_bounded() {
        let cli = Cli::try_parse_from(["cheatsheet", "--max-pages", "3", "demo"]).unwrap();
        assert_eq!(cli.max_pages, Some(3));
        assert!(Cli::try_parse_from(["cheatsheet", "--max-pages", "0", "demo"]).is_err());
    }
}
