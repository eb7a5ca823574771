use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use katha_client::api::DEFAULT_SERVER_URL;
use katha_client::export::EXPORT_FILE_NAME;
use katha_client::{BackendClient, Session, SessionDriver, SessionPhase};
use katha_core::translations::Language;
use katha_gemini::{ApiKeyStatus, GeminiApi};

/// Katha - Marathi children's story generator
#[derive(Parser, Debug)]
#[command(name = "katha")]
#[command(about = "Generate illustrated Marathi children's stories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a story and its illustrations
    Story {
        /// Story idea, character or situation
        prompt: String,

        /// Interface language for messages (mr or en)
        #[arg(long, default_value = "mr")]
        lang: Language,

        /// Backend base URL
        #[arg(long, env = "KATHA_SERVER", default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Write the story document to this path
        #[arg(long, num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
        export: Option<PathBuf>,
    },

    /// Check that the backend is up
    Health {
        /// Backend base URL
        #[arg(long, env = "KATHA_SERVER", default_value = DEFAULT_SERVER_URL)]
        server: String,
    },

    /// List the upstream models available to GOOGLE_API_KEY
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "katha=debug,katha_client=debug"
    } else {
        "katha=info,katha_client=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Story {
            prompt,
            lang,
            server,
            export,
        } => story(prompt, lang, server, export).await,
        Commands::Health { server } => health(server).await,
        Commands::Models => models().await,
    }
}

async fn story(
    prompt: String,
    lang: Language,
    server: String,
    export: Option<PathBuf>,
) -> Result<()> {
    let mut session = Session::new(lang);
    session.set_prompt(prompt);

    let mut driver = SessionDriver::new(BackendClient::new(server), session);
    if driver.generate().await.is_err() {
        bail!("{}", driver.session().text().enter_prompt);
    }
    let mut session = driver.into_session();
    let text = session.text();

    if session.phase() == SessionPhase::StoryFailed {
        bail!("{}", session.error().unwrap_or(text.story_error));
    }

    println!("{}\n", text.your_story);
    println!("{}\n", session.story());

    if session.images().is_empty() {
        if let Some(error) = session.error() {
            eprintln!("{error}");
        }
    } else {
        println!("{}", text.story_images);
        for (i, url) in session.images().iter().enumerate() {
            println!("  {}. {url}", i + 1);
        }
    }

    if let Some(path) = export {
        let document = session
            .export_document()
            .with_context(|| text.pdf_error.to_string())?;
        document
            .write_to(&path)
            .with_context(|| format!("{} ({})", text.pdf_error, path.display()))?;
        tracing::info!(path = %path.display(), "Story exported");
    }

    Ok(())
}

async fn health(server: String) -> Result<()> {
    let client = BackendClient::new(server);
    let status = client
        .health()
        .await
        .with_context(|| format!("Backend at {} is not reachable", client.base_url()))?;
    println!("{}: {}", status.status, status.message);
    Ok(())
}

async fn models() -> Result<()> {
    let key = std::env::var("GOOGLE_API_KEY").ok();
    match ApiKeyStatus::of(key.as_deref()) {
        ApiKeyStatus::Missing => bail!("GOOGLE_API_KEY is not set"),
        ApiKeyStatus::Placeholder => {
            bail!("GOOGLE_API_KEY still holds the sample placeholder; replace it with a real key")
        }
        ApiKeyStatus::Configured => {}
    }
    let key = key.unwrap_or_default();
    tracing::info!(key_len = key.len(), "Listing available models");

    let api = GeminiApi::new(key);
    let models = api.list_models().await.context("Failed to list models")?;

    println!("Available models:");
    for model in models {
        match model.display_name {
            Some(name) => println!("- {} ({name})", model.name),
            None => println!("- {}", model.name),
        }
    }
    Ok(())
}
