use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use dermalens_ai::ClassifierService;
use dermalens_chat::ChatClient;

mod display;

#[derive(Parser)]
#[command(name = "dermalens", version, about = "Skin-condition classification and chat")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a skin lesion photo with the local fine-tuned model.
    Classify {
        /// Path to the ONNX model artifact.
        #[arg(long, env = "DERMALENS_MODEL", default_value = "models/lesion_classifier.onnx")]
        model: PathBuf,
        /// Image file to classify.
        image: PathBuf,
        /// Emit the raw JSON outcome instead of the card view.
        #[arg(long)]
        json: bool,
    },
    /// Ask the hosted assistant a question about skin conditions.
    Chat {
        /// Text-generation endpoint URL.
        #[arg(long, env = "DERMALENS_CHAT_ENDPOINT")]
        endpoint: String,
        /// Bearer token for the endpoint.
        #[arg(long, env = "DERMALENS_CHAT_TOKEN", hide_env_values = true)]
        token: String,
        prompt: String,
    },
    /// Verify that the model artifact loads and matches the expected head.
    Check {
        #[arg(long, env = "DERMALENS_MODEL", default_value = "models/lesion_classifier.onnx")]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Classify { model, image, json } => classify(&model, &image, json),
        Command::Chat {
            endpoint,
            token,
            prompt,
        } => chat(endpoint, token, &prompt).await,
        Command::Check { model } => check(&model),
    }
}

fn classify(model: &Path, image: &Path, json: bool) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(image).with_context(|| format!("reading {}", image.display()))?;
    let filename = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.display().to_string());

    let service = ClassifierService::new(model);
    let outcome = service.classify(&filename, &bytes);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        display::print_outcome(&outcome);
    }

    // The outcome itself already carried the error to stdout/stderr above;
    // exit non-zero without printing it a second time.
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

async fn chat(endpoint: String, token: String, prompt: &str) -> anyhow::Result<()> {
    let client = ChatClient::new(endpoint, token);
    let reply = client.ask(prompt).await?;
    println!("{reply}");
    Ok(())
}

fn check(model: &Path) -> anyhow::Result<()> {
    let service = ClassifierService::new(model);
    match service.unavailable_reason() {
        None => {
            println!("ok: {} loads and matches the 23-class head", model.display());
            Ok(())
        }
        Some(reason) => anyhow::bail!("unavailable: {reason}"),
    }
}
