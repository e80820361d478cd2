mod backend_client;
mod config;
mod console;
mod errors;
mod models;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::BackendClient;
use crate::config::Config;
use crate::console::{render_analysis, ConsolePresenter};
use crate::errors::WorkflowError;
use crate::models::{ExportFormat, SelectedFile, TemplateStyle};
use crate::workflow::WorkflowCoordinator;

/// Upload a résumé, get AI feedback on it, and export an improved version.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Résumé to analyze (.pdf or .docx)
    file: PathBuf,

    /// Job title to tailor the analysis to
    #[arg(long)]
    target_role: Option<String>,

    /// professional, modern, classic or creative
    #[arg(long, default_value = "professional")]
    template: TemplateStyle,

    /// pdf or docx
    #[arg(long, default_value = "pdf")]
    format: ExportFormat,

    /// Replace the improved résumé with this file's text before exporting
    #[arg(long)]
    edited: Option<PathBuf>,

    /// Directory for the exported file (overrides OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Stop after printing the analysis
    #[arg(long)]
    no_export: bool,

    /// Print the final workflow state as JSON instead of the analysis report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Arguments first: --help and --version need no configuration
    let cli = Cli::parse();

    // Load configuration (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting résumé client v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.backend_url);

    let output_dir = cli.output_dir.clone().unwrap_or(config.output_dir);
    let backend = Arc::new(BackendClient::new(config.backend_url));
    let presenter = Arc::new(ConsolePresenter::new(output_dir).notices_on_stderr(cli.json));
    let coordinator = WorkflowCoordinator::new(backend, presenter);

    let outcome = run(&coordinator, &cli).await;
    info!("Workflow finished in phase: {}", coordinator.phase());

    if cli.json {
        let snapshot = coordinator.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot.summary())?);
    }

    if let Err(err) = outcome {
        // Workflow errors were already shown to the user as notices.
        if err.downcast_ref::<WorkflowError>().is_none() {
            eprintln!("error: {err:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Drives one pass through the workflow, the way a user would click through it.
async fn run(coordinator: &WorkflowCoordinator, cli: &Cli) -> Result<()> {
    let file = SelectedFile::from_path(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    coordinator.select_file(file)?;

    let handoff = coordinator.upload().await?.done();
    coordinator.open_analysis(handoff)?;
    coordinator.set_target_role(cli.target_role.as_deref())?;

    let Some(analysis) = coordinator.analyze().await?.done() else {
        return Ok(());
    };
    if !cli.json {
        println!("{}", render_analysis(&analysis));
    }

    if let Some(path) = &cli.edited {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        coordinator.edit_resume(text)?;
    }

    if !cli.no_export {
        coordinator.export(cli.template, cli.format).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["client", "resume.pdf"]).unwrap();
        assert_eq!(cli.template, TemplateStyle::Professional);
        assert_eq!(cli.format, ExportFormat::Pdf);
        assert!(cli.target_role.is_none());
        assert!(!cli.no_export);
        assert!(!cli.json);
    }

    #[test]
    fn test_help_and_version_parse_without_config() {
        let err = Cli::try_parse_from(["client", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["client", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_json_flag() {
        let cli = Cli::try_parse_from(["client", "resume.pdf", "--json", "--no-export"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_export);
    }

    #[test]
    fn test_cli_parses_export_options() {
        let cli = Cli::try_parse_from([
            "client",
            "resume.docx",
            "--template",
            "modern",
            "--format",
            "docx",
            "--target-role",
            "Data Analyst",
        ])
        .unwrap();
        assert_eq!(cli.template, TemplateStyle::Modern);
        assert_eq!(cli.format, ExportFormat::Docx);
        assert_eq!(cli.target_role.as_deref(), Some("Data Analyst"));
    }

    #[test]
    fn test_cli_rejects_unknown_template() {
        assert!(Cli::try_parse_from(["client", "r.pdf", "--template", "fancy"]).is_err());
    }
}
