// ABOUTME: Command-line entry point for sending chat notifications
// ABOUTME: Loads config, initializes logging, wires the gateway, and runs one subcommand

use anyhow::{Context, Result};
use chatgate::{config::Config, logging, platform, Gateway};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatgate", version, about = "Send status messages to a chat room")]
struct Cli {
    /// Config file (defaults to CHATGATE_CONFIG_PATH, ./config.toml, then the XDG config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Discard messages instead of delivering them
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a message to a room
    Speak {
        message: String,
        /// Room name (defaults to the configured default room)
        #[arg(long)]
        room: Option<String>,
        /// Room id, skipping name resolution
        #[arg(long, conflicts_with = "room")]
        room_id: Option<i64>,
        /// Provider option as key=value; values are parsed as JSON when possible
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },
    /// List rooms visible to the configured service
    Rooms,
    /// List registered chat services
    Services,
}

fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got: {}", raw))?;
    if key.is_empty() {
        return Err(format!("option key is empty in: {}", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.mock {
        config.chat.mock = true;
    }

    logging::init(&config.logging);
    tracing::debug!(chat = ?config.chat, "Configuration loaded");

    let gateway = Gateway::new(platform::registry());

    match cli.command {
        Command::Services => {
            for name in gateway.registry().names() {
                println!("{}", name);
            }
        }
        Command::Speak {
            message,
            room,
            room_id,
            options,
        } => {
            gateway.configure(&config.chat)?;
            let resolved = match (room_id, &room) {
                (Some(id), _) => Some(id),
                (None, Some(name)) => gateway.room_id(name).await?,
                (None, None) => gateway.default_room_id().await?,
            };
            let room_id = resolved.with_context(|| {
                let name = room.or_else(|| gateway.default_room_name()).unwrap_or_default();
                format!("Unknown chat room: {:?}", name)
            })?;

            let options = (!options.is_empty())
                .then(|| Value::Object(options.into_iter().collect::<Map<String, Value>>()));
            gateway.speak(&message, room_id, options.as_ref()).await?;
            tracing::info!(room_id, "Message sent");
        }
        Command::Rooms => {
            gateway.configure(&config.chat)?;
            for room in gateway.rooms().await? {
                println!("{}\t{}", room.id, room.name);
            }
        }
    }

    Ok(())
}
