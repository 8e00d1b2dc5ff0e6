mod config;
mod errors;
mod form;
mod models;
mod notifications;
mod proxy;
mod routes;
mod state;
mod storage;
mod submission;
mod workflow;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ClientConfig, ProxyConfig};
use crate::form::ResumeForm;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{build_s3_client, S3ArtifactStore};
use crate::submission::WebhookSubmitter;
use crate::workflow::{Phase, ResumeWorkflow};

/// Resume Forge - submit resumes for generation and proxy the generation webhook
#[derive(Parser)]
#[command(name = "resume-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook proxy
    Serve,

    /// Submit a resume form and wait for the generated PDF
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// JSON form document (camelCase keys, as sent to the webhook)
    #[arg(short, long)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = config::rust_log();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Each subcommand only requires the variables it uses.
    match cli.command {
        Commands::Serve => serve(ProxyConfig::from_env()?).await,
        Commands::Submit(args) => submit(ClientConfig::from_env()?, args).await,
    }
}

async fn serve(config: ProxyConfig) -> Result<()> {
    info!("Starting Resume Forge proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("Upstream webhook: {}", config.upstream_webhook_url);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let app = build_router(AppState::new(config)).layer(TraceLayer::new_for_http());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn submit(config: ClientConfig, args: SubmitArgs) -> Result<()> {
    let form = ResumeForm::load(&args.file).await?;

    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let store = S3ArtifactStore::new(s3, config.s3_bucket.clone(), config.storage_public_base.clone());
    let submitter = WebhookSubmitter::new(config.generation_endpoint.clone());
    let mut workflow = ResumeWorkflow::new(submitter, store, config.poll_policy);

    let mut phases = workflow.subscribe();
    let progress = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            match phase {
                Phase::Submitting => info!("Generating your resume..."),
                Phase::Polling { attempt: 0 } => info!("Finalizing your resume..."),
                Phase::Polling { attempt } => info!(attempt, "Waiting for the PDF"),
                _ => {}
            }
        }
    });

    let outcome = workflow.run(&form).await;
    // Closing the sender ends the progress task.
    drop(workflow);
    progress.await?;

    let notification = outcome.notification();
    if notification.is_error() {
        eprintln!("{notification}");
    } else {
        println!("{notification}");
    }

    match outcome.download_url() {
        Some(url) => {
            println!("Download: {url}");
            Ok(())
        }
        None => bail!("{}", notification.description),
    }
}
