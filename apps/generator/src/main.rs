mod backend_client;
mod cli;
mod config;
mod controller;
mod description;
mod errors;
mod export;
mod models;
mod session;
mod toast;
mod validation;
mod view_state;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::BackendClient;
use crate::cli::{Cli, Commands, GenerateArgs, NormalizeArgs};
use crate::config::Config;
use crate::controller::GeneratorController;
use crate::description::sections::canonicalize;
use crate::export::PreviewOptions;
use crate::models::job::{JobDetails, RawJobDetails};
use crate::toast::LogNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => {
            let base_url = cli.base_url.unwrap_or_else(|| config.base_url.clone());
            run_generate(&config, &base_url, args).await
        }
        Commands::Normalize(args) => run_normalize(args),
    }
}

async fn run_generate(config: &Config, base_url: &str, args: GenerateArgs) -> Result<()> {
    let client = BackendClient::new(base_url, config.timeout)?;
    info!(
        "jd-generator v{} using {}",
        env!("CARGO_PKG_VERSION"),
        client.base_url()
    );
    let preview = PreviewOptions {
        viewer: config.pdf_viewer.clone(),
        release_after: config.preview_release,
    };
    let mut controller = GeneratorController::new(client, Arc::new(LogNotifier), preview);

    let form = cli::load_form(args.form_file.as_ref(), args.form)?;
    controller.submit(&form).await?;
    if args.regenerate {
        controller.regenerate().await?;
    }

    debug!("Final view state: {:?}", controller.view_state());
    let view = controller
        .result()
        .context("Generation finished without a result to show")?;
    if let Some(path) = &args.html {
        std::fs::write(path, view.to_html())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote HTML view to {}", path.display());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else if let Some(entry) = controller.session().current() {
        println!("{}", entry.description);
    }

    if let Some(dir) = &args.download {
        let path = controller.download(dir).await?;
        println!("Saved {}", path.display());
    }
    if args.preview {
        controller.preview().await?;
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let details = JobDetails::from_raw(Some(RawJobDetails {
        company_email: args.email,
        ..Default::default()
    }));
    let (_, text) = canonicalize(&raw, &details);
    println!("{text}");
    Ok(())
}
