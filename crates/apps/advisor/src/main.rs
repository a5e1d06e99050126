use clap::{Parser, Subcommand};
use layers::LayerKind;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use advisor::chat::{EXAMPLE_QUESTIONS, TYPING_TEXT};
use advisor::{
    ChatContext, ChatReply, ChatWidget, ClientConfig, HttpBackend, LoadOutcome, LoadTarget,
    MapApi, MapShell, UiEvent,
};
use catalog::DateRegistry;

#[derive(Parser, Debug)]
#[command(author, version, about = "Farm NDVI map and advisory chat client")]
struct Args {
    /// Backend base URL (default: $ADVISOR_API_URL or http://127.0.0.1:5000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Farm attached to chat questions (default: $ADVISOR_FARM_ID)
    #[arg(long, global = true)]
    farm_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load farms and a snapshot, then print the map surface as JSON
    Map {
        /// Observation date (YYYYMMDD); omitted or "latest" loads the newest
        #[arg(long)]
        date: Option<String>,

        /// Data layer to show
        #[arg(long, default_value = "ndvi")]
        layer: LayerKind,
    },

    /// List available observation dates
    Dates,

    /// List farms
    Farms,

    /// Ask the advisor a single question
    Ask {
        question: String,

        /// Observation date the question refers to
        #[arg(long)]
        date: Option<String>,
    },

    /// Weather advice for the configured farm
    Weather,

    /// Growth advice for the configured farm
    Advice {
        #[arg(long)]
        date: Option<String>,
    },

    /// Interactive chat over stdin
    Chat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ClientConfig::from_env().with_overrides(args.api_url, args.farm_id);
    info!(api_url = %config.api_url, "advisor client starting");
    let backend = HttpBackend::new(&config);

    match args.command {
        Command::Map { date, layer } => run_map(backend, date.as_deref(), layer).await?,
        Command::Dates => {
            let mut registry = DateRegistry::new();
            registry.populate(backend.dates().await?);
            print_json(&registry.entries())?;
        }
        Command::Farms => print_json(&backend.farms().await?)?,
        Command::Ask { question, date } => {
            let context = ChatContext {
                farm_id: config.farm_id.clone(),
                date,
            };
            let mut chat = ChatWidget::new(backend).with_context(context);
            let reply = chat.submit(&question).await;
            print_reply(&chat, reply)?;
        }
        Command::Weather => {
            let farm_id = require_farm(&config)?;
            let mut chat = ChatWidget::new(backend);
            let reply = chat.request_weather(&farm_id).await;
            print_reply(&chat, reply)?;
        }
        Command::Advice { date } => {
            let farm_id = require_farm(&config)?;
            let mut chat = ChatWidget::new(backend);
            let reply = chat.request_farm_advice(&farm_id, date.as_deref()).await;
            print_reply(&chat, reply)?;
        }
        Command::Chat => {
            let context = ChatContext {
                farm_id: config.farm_id.clone(),
                date: None,
            };
            run_chat(ChatWidget::new(backend).with_context(context)).await?;
        }
    }

    Ok(())
}

async fn run_map(
    backend: HttpBackend,
    date: Option<&str>,
    layer: LayerKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = MapShell::new(backend);
    shell.load_farms().await;
    let outcome = shell.resolve_and_load(LoadTarget::parse(date)).await;
    if let LoadOutcome::Failed(err) = &outcome {
        eprintln!("map data unavailable: {err}");
    }
    if layer == LayerKind::None {
        shell.handle(UiEvent::SelectLayer(LayerKind::None)).await;
    }
    debug!(metrics = ?shell.metrics().snapshot(), "map session finished");
    print_json(&shell.surface().state())
}

async fn run_chat<C: advisor::ChatApi>(
    mut chat: ChatWidget<C>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut banner = String::from("Ask about your fields. Examples:\n");
    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        banner.push_str(&format!("  {}. {question}\n", i + 1));
    }
    banner.push_str("Type a number to use an example, or an empty line to skip.\n");
    stdout.write_all(banner.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let picked = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| EXAMPLE_QUESTIONS.get(i).copied());
        let reply = match picked {
            Some(question) => {
                chat.use_example(question);
                stdout.write_all(format!("> {question}\n").as_bytes()).await?;
                stdout.write_all(format!("{TYPING_TEXT}\n").as_bytes()).await?;
                stdout.flush().await?;
                chat.submit_input().await
            }
            None if line.trim().is_empty() => continue,
            None => {
                stdout.write_all(format!("{TYPING_TEXT}\n").as_bytes()).await?;
                stdout.flush().await?;
                chat.submit(&line).await
            }
        };
        if reply != ChatReply::Ignored {
            if let Some(message) = chat.last_message() {
                for text in message.lines() {
                    stdout.write_all(format!("bot: {text}\n").as_bytes()).await?;
                }
                stdout.flush().await?;
            }
        }
    }
    Ok(())
}

fn require_farm(config: &ClientConfig) -> Result<String, Box<dyn std::error::Error>> {
    config
        .farm_id
        .clone()
        .ok_or_else(|| "a farm is required: pass --farm-id or set ADVISOR_FARM_ID".into())
}

fn print_reply<C: advisor::ChatApi>(
    chat: &ChatWidget<C>,
    reply: ChatReply,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(message) = chat.last_message() {
        for text in message.lines() {
            println!("{text}");
        }
    }
    match reply {
        ChatReply::Failed(err) => Err(err.into()),
        ChatReply::Answered | ChatReply::Ignored => Ok(()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
