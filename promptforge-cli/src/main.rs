mod tui;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use promptforge_core::composer::{Composer, ComposerError};
use promptforge_core::config::ForgeConfig;
use promptforge_core::logging::LoggingConfig;
use promptforge_llm::LlmClient;

use crate::tui::{format, theme, App};

#[derive(Parser)]
#[command(name = "promptforge", version, about = "Turns a task description into a framework-structured LLM prompt")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one prompt and print it to stdout
    Prompt {
        /// The task or goal to build a prompt for
        task: Vec<String>,
    },
    /// List supported providers and their environment variables
    Providers,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _ = LoggingConfig::from_env().init();

    match cli.command {
        Some(Command::Prompt { task }) => {
            let task = task.join(" ");
            if let Err(e) = run_once(&task).await {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        Some(Command::Providers) => {
            for info in LlmClient::list_providers() {
                println!("{} - {}", info.name, info.display_name);
                for var in info.env_vars {
                    let required = if var.required { "" } else { " (optional)" };
                    println!("  {}{}: {}", var.name, required, var.description);
                }
            }
        }
        None => {
            println!("{}", theme::logo_gradient());
            let mut app = App::new();
            let _ = app.run().await;
        }
    }
}

/// One-shot mode: compose a single prompt and print it, no UI
async fn run_once(task: &str) -> Result<(), ComposerError> {
    let (llm, model) = ForgeConfig::get_llm().await?;
    eprintln!("\x1b[2m{} on {}\x1b[0m", model, llm.provider_name());

    let composer = Composer::new(Arc::new(llm), model);
    let result = composer.compose(task).await?;
    print!("{}", format::render_result(&result));
    Ok(())
}
