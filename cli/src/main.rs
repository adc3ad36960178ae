//! story-council CLI entrypoint
//!
//! Wires the layers together: configuration, the chat completions gateway,
//! deck loading, and one council run per requested recipe.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    DecisionLogger, DeckSource, DeckSourceError, NoDecisionLogger, NoProgress, ProgressNotifier,
    RunSequenceInput, RunSequenceUseCase,
};
use council_domain::{ArbitrationPolicy, CardPool, DecisionSequence, DeckKind, OutputFormat, RecipeCatalog};
use council_infrastructure::{
    ArchiveConfig, ConfigLoader, FileConfig, JsonRunArchive, JsonlDecisionLogger,
    OpenRouterGateway, RecipeRun, RunArchive,
};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };
    apply_overrides(&mut config, &cli);

    for issue in config.validate() {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    // A broken custom recipe is only left out of the catalog.
    if !config.blocking_issues().is_empty() {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let catalog = config.catalog();
    if cli.list_recipes {
        print!("{}", ConsoleFormatter::format_recipe_list(&catalog));
        return Ok(());
    }

    let recipes = resolve_recipes(&cli, &catalog)?;
    if recipes.is_empty() {
        bail!("No recipes to run");
    }

    let gateway_config = config
        .provider
        .to_gateway_config()
        .context("Failed to configure the chat completions provider")?;
    let gateway = Arc::new(OpenRouterGateway::new(gateway_config)?);
    info!("Using model {}", gateway.model());

    let log_path = cli
        .conversation_log
        .clone()
        .or_else(|| config.output.conversation_log.clone());
    let logger: Arc<dyn DecisionLogger> = match log_path.and_then(JsonlDecisionLogger::new) {
        Some(logger) => {
            info!("Decision log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoDecisionLogger),
    };

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling the current run");
            interrupt.cancel();
        }
    });

    let params = config.debate.to_params();
    let (evaluators, arbitrator) = config.provider.personas();
    let use_case = RunSequenceUseCase::new(Arc::clone(&gateway), params.clone())
        .with_personas(evaluators, arbitrator)
        .with_logger(logger)
        .with_cancellation(token.clone());

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 && format != OutputFormat::Json {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let mut archive = RunArchive::new(
        shared_deck(&recipes),
        ArchiveConfig {
            model: gateway.model().to_string(),
            opinion_rounds: params.opinion_rounds,
            candidates_per_draw: params.candidates_per_draw,
        },
    );

    let loader = config.deck.loader();
    let mut pools = HashMap::new();
    let mut cancelled = false;

    for sequence in &recipes {
        let pool = match load_pool(&loader, &mut pools, sequence.deck()) {
            Ok(pool) => pool,
            Err(e) => {
                eprint!("{}", ConsoleFormatter::format_failure(sequence.name(), &e.to_string()));
                archive.push(RecipeRun::failure(sequence.as_ref(), &e));
                continue;
            }
        };

        let input = RunSequenceInput::new(Arc::clone(sequence), pool);
        match use_case.execute_with_progress(input, progress.as_ref()).await {
            Ok(outcome) => {
                match format {
                    OutputFormat::Full => print!("{}", ConsoleFormatter::format(&outcome)),
                    OutputFormat::Prompt => print!("{}", ConsoleFormatter::format_prompt_only(&outcome)),
                    OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
                }
                archive.push(RecipeRun::success(sequence.as_ref(), &outcome));
            }
            Err(e) => {
                eprint!("{}", ConsoleFormatter::format_failure(sequence.name(), &e.to_string()));
                archive.push(RecipeRun::failure(sequence.as_ref(), &e));
                if e.is_cancelled() {
                    cancelled = true;
                    break;
                }
            }
        }
    }

    if config.output.archive && !cli.no_archive {
        match JsonRunArchive::new(config.output.dir.clone()).write(&archive) {
            Ok(path) if !cli.quiet => eprintln!("Archive written to {}", path.display()),
            Ok(_) => {}
            Err(e) => warn!("Failed to write archive: {}", e),
        }
    }

    if cancelled {
        bail!("Cancelled");
    }
    let failures = archive.failures();
    if failures > 0 {
        bail!("{} of {} recipes failed", failures, archive.metadata.len());
    }

    Ok(())
}

/// Console logging filtered by `-v` (or `RUST_LOG`), plus daily log files
/// when `--log-dir` is given. The returned guard flushes the file writer.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "story-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}

fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(rounds) = cli.rounds {
        config.debate.opinion_rounds = rounds;
    }
    if let Some(candidates) = cli.candidates {
        config.debate.candidates_per_draw = candidates;
    }
    if let Some(timeout) = cli.timeout {
        config.debate.call_timeout_secs = timeout;
    }
    if cli.parallel {
        config.debate.parallel_calls = true;
    }
    if cli.strict_arbitration {
        config.debate.arbitration = ArbitrationPolicy::Strict.to_string();
    }
    if cli.seed.is_some() {
        config.debate.seed = cli.seed;
    }
}

/// Explicit recipes first, then every recipe of the `--deck-batch` deck.
fn resolve_recipes(cli: &Cli, catalog: &RecipeCatalog) -> Result<Vec<Arc<dyn DecisionSequence>>> {
    let mut recipes = Vec::new();
    for name in cli.requested_recipes() {
        recipes.push(catalog.resolve(&name)?);
    }
    if let Some(deck) = &cli.deck_batch {
        let deck: DeckKind = deck.parse().map_err(anyhow::Error::msg)?;
        recipes.extend(catalog.for_deck(deck));
    }
    Ok(recipes)
}

fn shared_deck(recipes: &[Arc<dyn DecisionSequence>]) -> Option<DeckKind> {
    let first = recipes.first()?.deck();
    recipes.iter().all(|r| r.deck() == first).then_some(first)
}

fn load_pool(
    loader: &dyn DeckSource,
    cache: &mut HashMap<DeckKind, CardPool>,
    deck: DeckKind,
) -> Result<CardPool, DeckSourceError> {
    if let Some(pool) = cache.get(&deck) {
        return Ok(pool.clone());
    }
    let pool = loader.load(deck)?;
    cache.insert(deck, pool.clone());
    Ok(pool)
}
