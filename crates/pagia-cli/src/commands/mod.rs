use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;
use std::sync::Arc;

use pagia_config::ConfigLoader;
use pagia_llm::{GeminiProvider, GenerationOptions, TextProvider};

mod chat;
mod serve;
mod skills;

/// PAGIA — command-line AI assistant with pluggable skills
#[derive(Parser)]
#[command(name = "pagia", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to pagia.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat in the terminal
    Chat {
        /// Session ID (defaults to the configured default session)
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Manage skills
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },
    /// Start the workflow REST API server
    Serve {
        /// Listen address override, e.g. 0.0.0.0:3001
        #[arg(short = 'L', long)]
        listen: Option<String>,
    },
    /// Check whether the workflow API is running
    Status,
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SkillAction {
    /// List available skills
    List,
    /// Show details of a skill
    Show { name: String },
    /// Run a skill once and print its output
    Run {
        name: String,
        /// Input text passed to the skill
        #[arg(short, long, default_value = "")]
        prompt: String,
        /// Session ID (defaults to the configured default session)
        #[arg(short, long)]
        session: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> pagia_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        // Initialize tracing with the configured format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Chat { session } => chat::cmd_chat(config, session).await,
            Commands::Skill { action } => skills::cmd_skill(config, action).await,
            Commands::Serve { listen } => serve::cmd_serve(config, listen).await,
            Commands::Status => Self::cmd_status(config).await,
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    async fn cmd_status(config: pagia_config::PagiaConfig) -> pagia_core::Result<()> {
        let listen = config.server.listen();
        println!("Checking status at http://{listen}...");

        let client = reqwest::Client::new();
        match client.get(format!("http://{listen}/health")).send().await {
            Ok(resp) => {
                let data: serde_json::Value = resp
                    .json()
                    .await
                    .map_err(|e| pagia_core::PagiaError::Server(e.to_string()))?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&data)
                        .map_err(pagia_core::PagiaError::Serialization)?
                );
            }
            Err(_) => {
                println!("❌ Workflow API is not running at {listen}");
            }
        }
        Ok(())
    }

    fn cmd_config(config: pagia_config::PagiaConfig, json: bool) -> pagia_core::Result<()> {
        // Never print credentials, even on explicit request.
        let mut redacted = config;
        if redacted.provider.api_key.is_some() {
            redacted.provider.api_key = Some("<redacted>".into());
        }

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&redacted)
                    .map_err(pagia_core::PagiaError::Serialization)?
            );
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&redacted)
                    .map_err(|e| pagia_core::PagiaError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_version() -> pagia_core::Result<()> {
        println!("pagia v{}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> pagia_core::Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        Ok(())
    }
}

/// Build the configured provider. The API key comes from the config file
/// or the `GEMINI_API_KEY` fallback applied at load time.
fn build_provider(
    config: &pagia_config::PagiaConfig,
) -> pagia_core::Result<Arc<dyn TextProvider>> {
    let api_key = config.provider.api_key.clone().ok_or_else(|| {
        pagia_core::PagiaError::Config(
            "no API key configured — set provider.api_key in pagia.toml or export GEMINI_API_KEY"
                .into(),
        )
    })?;
    Ok(Arc::new(GeminiProvider::new(
        api_key,
        config.provider.model.clone(),
    )))
}

/// Generation knobs taken straight from config, unvalidated.
fn generation_options(config: &pagia_config::PagiaConfig) -> GenerationOptions {
    GenerationOptions {
        system_prompt: config.provider.system_prompt.clone(),
        temperature: Some(config.provider.temperature),
        max_tokens: Some(config.provider.max_tokens),
    }
}
