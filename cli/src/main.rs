//! CLI entrypoint for llm-council
//!
//! The only place where concrete adapters meet the use cases: everything
//! below parses flags, merges config, and injects the pieces.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use council_application::{
    CallOptions, NullSink, RecordKey, RunCouncilInput, RunCouncilUseCase,
};
use council_domain::{has_errors, Model, OutputFormat, Query, Severity};
use council_infrastructure::{ConfigLoader, JsonlConversationStore, OpenRouterGateway};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting llm-council");

    // Load and merge configuration files
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(config) => config,
            Err(e) => bail!("Failed to load configuration: {e}"),
        }
    };

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    // CLI flags override file config
    let mut council = file_config.council_config();
    if !cli.model.is_empty() {
        council = council.with_models(cli.model.iter().map(|name| Model::from_id(name)).collect());
    }
    if let Some(chairman) = &cli.chairman {
        council = council.with_chairman(Model::from_id(chairman));
    }

    // Refuse a roster that cannot deliberate before spending tokens
    let issues = council.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if has_errors(&issues) {
        bail!("Invalid council configuration");
    }

    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Try: llm-council \"your question\""),
    };
    let Some(query) = Query::try_new(question) else {
        bail!("Question cannot be empty");
    };

    let api_key = match std::env::var(&file_config.gateway.api_key_env) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => bail!(
            "{} is not set. Create a key at https://openrouter.ai/keys and export it.",
            file_config.gateway.api_key_env
        ),
    };
    let gateway = Arc::new(OpenRouterGateway::with_config(
        api_key,
        file_config.gateway.base_url.clone(),
        file_config.gateway.timeout(),
    )?);

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                  llm-council - LLM Council                 |");
        println!("+============================================================+");
        println!();
        println!("Question: {query}");
        println!(
            "Council:  {}",
            council
                .models()
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Chairman: {}", council.chairman());
        println!();
    }

    let mut use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
    let mut input = RunCouncilInput::new(query, &council);

    // Attach persistence when asked for (--save beats the config file)
    let store_path = cli.save.clone().or_else(|| {
        file_config
            .storage
            .conversations_file
            .as_deref()
            .map(PathBuf::from)
    });
    if let Some(path) = store_path
        && let Some(store) = JsonlConversationStore::open(&path)
    {
        info!("Appending council records to {}", store.path().display());
        let conversation_id = format!("cli-{}", Utc::now().format("%Y%m%d-%H%M%S"));
        use_case = use_case.with_store(Arc::new(store));
        input = input.persisted_at(RecordKey::new(conversation_id, 0));
    }

    // Ctrl-C stops the run at the next stage boundary
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let result = if cli.quiet {
        use_case.execute_with_sink(input, &NullSink, cancel).await?
    } else if cli.verbose > 0 {
        // Spinner redraws fight with log lines; plain lines coexist
        use_case
            .execute_with_sink(input, &SimpleProgress, cancel)
            .await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_sink(input, &progress, cancel).await?
    };

    let format = cli
        .format
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    Ok(())
}
