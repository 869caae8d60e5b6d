use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use variable_tokens_core::{
    dangling_aliases, handle_command, AliasRef, ColorFormat, Command, ExportConfig, MemorySource,
    PluginMessage,
};

/// Export design tool variables as nested JSON token trees
#[derive(Parser, Debug)]
#[command(name = "variable-tokens", version)]
pub struct Cli {
    /// Variables snapshot (JSON with `collections` and `variables`)
    pub snapshot: PathBuf,

    /// Which export to run
    #[arg(short, long, value_enum, default_value_t = CommandArg::CreateTokens)]
    pub command: CommandArg,

    /// TOML file with export options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Round numeric values to the nearest integer
    #[arg(long)]
    pub round: bool,

    /// Color output: `hex` (alpha dropped) or `hex-alpha`
    #[arg(long)]
    pub color_format: Option<ColorFormat>,

    /// Warn about aliases that point outside the exported batch
    #[arg(long)]
    pub check_aliases: bool,

    /// Pretty-print each message
    #[arg(long)]
    pub pretty: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandArg {
    CreateTokens,
    CreateVariables,
}

impl From<CommandArg> for Command {
    fn from(arg: CommandArg) -> Self {
        match arg {
            CommandArg::CreateTokens => Command::CreateTokens,
            CommandArg::CreateVariables => Command::CreateVariables,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Reads the config file, if any, then applies flag overrides.
pub fn load_config(cli: &Cli) -> Result<ExportConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str::<ExportConfig>(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => ExportConfig::default(),
    };
    if cli.round {
        config.round_numbers = true;
    }
    if let Some(format) = cli.color_format {
        config.color_format = format;
    }
    Ok(config)
}

pub fn load_source(cli: &Cli) -> Result<MemorySource> {
    let json = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("Failed to read snapshot {}", cli.snapshot.display()))?;
    MemorySource::from_json(&json)
        .with_context(|| format!("Failed to load snapshot {}", cli.snapshot.display()))
}

/// Runs the selected export and returns the messages posted to the sink.
pub async fn run(cli: &Cli) -> Result<Vec<PluginMessage>> {
    let config = load_config(cli)?;
    let source = load_source(cli)?;
    let mut messages = Vec::new();
    handle_command(&source, &mut messages, cli.command.into(), &config).await;
    if cli.check_aliases {
        for alias in check_aliases(&messages) {
            tracing::warn!("alias {} does not resolve within the export", alias);
        }
    }
    Ok(messages)
}

/// Dangling aliases across every batch in `messages`.
pub fn check_aliases(messages: &[PluginMessage]) -> Vec<AliasRef> {
    messages
        .iter()
        .flat_map(|message| match message {
            PluginMessage::AllTokenCollections { data } | PluginMessage::AllCollections { data } => {
                dangling_aliases(data)
            }
            PluginMessage::Error { .. } => Vec::new(),
        })
        .collect()
}

/// One JSON document per message.
pub fn render(messages: &[PluginMessage], pretty: bool) -> Result<String> {
    let lines = messages
        .iter()
        .map(|message| {
            if pretty {
                serde_json::to_string_pretty(message)
            } else {
                serde_json::to_string(message)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize messages")?;
    Ok(lines.join("\n"))
}
