use cf_ladder::config::toml_config::FileConfig;
use cf_ladder::core::{ConfigProvider, FilterSource};
use cf_ladder::utils::error::{ErrorSeverity, LadderError};
use cf_ladder::utils::{logger, validation::Validate};
use cf_ladder::{
    CliConfig, FilterPanel, HttpLadderSource, LadderApp, LadderConfig, LocalStorage,
    RefreshOutcome, StderrNotifier,
};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

type App = LadderApp<HttpLadderSource, FilterPanel, StderrNotifier>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cf-ladder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match FileConfig::from_file(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    let config = LadderConfig::resolve(&cli, file_config.as_ref());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let source = match HttpLadderSource::new(&config) {
        Ok(source) => source,
        Err(e) => fail(e),
    };

    if cli.check {
        match source.check_backend().await {
            Ok(()) => {
                println!("✅ Backend is up at {}", source.endpoint());
                return Ok(());
            }
            Err(e) => fail(e),
        }
    }

    if config.handle().is_empty() {
        tracing::warn!("No handle configured; solved problems will not be marked");
    }

    let storage = LocalStorage::new(".".to_string());
    let app = Arc::new(LadderApp::new(
        source,
        FilterPanel::new(config.filters.clone()),
        StderrNotifier,
        config.handle(),
    ));

    match app.on_load().await {
        RefreshOutcome::Rendered(_) => match app.write_page(&storage, config.output_path()).await {
            Ok(rows) => println!("✅ {} problems written to {}", rows, config.output_path()),
            Err(e) => fail(e),
        },
        RefreshOutcome::Failed if !cli.interactive => std::process::exit(2),
        _ => {}
    }

    if cli.interactive {
        run_interactive(app, storage, config.output_path().to_string()).await?;
    }

    Ok(())
}

/// Each `apply` runs concurrently with any refresh still in flight; the
/// app only renders the newest one.
async fn run_interactive(
    app: Arc<App>,
    storage: LocalStorage,
    output_path: String,
) -> std::io::Result<()> {
    println!("Commands: min <v> | max <v> | sort <v> | indices <v> | apply | show | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, value) = line
            .split_once(char::is_whitespace)
            .map(|(c, v)| (c, v.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "min" => app.filters().set_min(value),
            "max" => app.filters().set_max(value),
            "sort" => app.filters().set_sort(value),
            "indices" => app.filters().set_indices(value),
            "show" => {
                let filters = app.filters().current();
                println!(
                    "min={} max={} sort={} indices={}",
                    filters.min, filters.max, filters.sort, filters.indices
                );
            }
            "apply" => {
                let app = Arc::clone(&app);
                let storage = storage.clone();
                let output_path = output_path.clone();
                in_flight.spawn(async move {
                    if let RefreshOutcome::Rendered(_) = app.apply_filters().await {
                        match app.write_page(&storage, &output_path).await {
                            Ok(rows) => println!("✅ {} problems written to {}", rows, output_path),
                            Err(e) => report(&e),
                        }
                    }
                });
            }
            "quit" | "exit" => break,
            other => eprintln!("Unknown command: {}", other),
        }

        // reap finished refreshes so the set does not grow
        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}
    Ok(())
}

fn report(e: &LadderError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn fail(e: LadderError) -> ! {
    report(&e);

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
