//! CLI entry point for workspace search.
//!
//! Provides commands for indexing workspace JSON exports, searching them,
//! and managing the index. Main components: Cli parser, Commands enum and
//! one handler per command.

use anyhow::{Context, anyhow};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use workspace_search::display::{
    Outcome, THEME, create_results_table, create_status_table, create_summary_table,
    format_timestamp,
};
use workspace_search::storage::IndexLocation;
use workspace_search::{
    IndexError, IndexMetadata, IndexStats, SearchComponent, Settings, TantivySearchComponent,
    Workspace, WorkspaceId, create_search_component,
};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Search indexing for architecture workspaces
#[derive(Parser)]
#[command(
    name = "workspace-search",
    version = env!("CARGO_PKG_VERSION"),
    about = "Index and search architecture workspaces",
    long_about = "Index diagrams, documentation and decisions of workspace JSON exports and search them.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .workspace-search directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Index workspace JSON files
    #[command(
        about = "Replace the indexed documents of one or more workspaces",
        after_help = "Examples:\n  workspace-search index big-bank.json\n  workspace-search index exports/*.json"
    )]
    Index {
        /// Workspace JSON exports
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Remove a workspace from the index
    #[command(about = "Remove every indexed document of a workspace")]
    Delete {
        /// Workspace id
        workspace_id: WorkspaceId,
    },

    /// Search indexed workspaces
    #[command(
        about = "Search within one or more workspaces",
        after_help = "Examples:\n  workspace-search search \"payment gateway\" -w 1\n  workspace-search search kafka -w 1 -w 2 --type decision --json\n\nTypes: workspace, diagram, documentation, decision"
    )]
    Search {
        /// Free-text query
        query: String,

        /// Workspace ids to search in
        #[arg(short, long = "workspace", required = true)]
        workspaces: Vec<WorkspaceId>,

        /// Restrict results to one document type
        #[arg(short = 't', long = "type", default_value = "")]
        doc_type: String,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Erase the index
    #[command(about = "Erase every document and reprovision an empty index")]
    Clear,

    /// Show indexed workspaces
    #[command(about = "Show indexed workspaces and index metadata")]
    Status {
        /// Output metadata as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(1);
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    if cli.debug {
        settings.debug = true;
    }
    init_tracing(&settings);

    let outcome = match cli.command {
        Commands::Init { force } => run_init(force),
        Commands::Config => run_config(&settings),
        Commands::Index { files } => run_index(&settings, &files),
        Commands::Delete { workspace_id } => run_delete(&settings, workspace_id),
        Commands::Search {
            query,
            workspaces,
            doc_type,
            json,
        } => run_search(&settings, &query, &doc_type, &workspaces, json),
        Commands::Clear => run_clear(&settings),
        Commands::Status { json } => run_status(&settings, json),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", THEME.outcome(Outcome::Failed, &format!("{e:#}")));
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr. `RUST_LOG` takes precedence over the configured level.
fn init_tracing(settings: &Settings) {
    let level = if settings.debug {
        "debug"
    } else {
        settings.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("workspace_search={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_init(force: bool) -> anyhow::Result<bool> {
    let path = Settings::init_config_file(force).map_err(|e| anyhow!("{e}"))?;
    println!(
        "{}",
        THEME.outcome(Outcome::Done, &format!("Created configuration file at: {}", path.display()))
    );
    println!("Edit this file to customize your settings.");
    Ok(true)
}

fn run_config(settings: &Settings) -> anyhow::Result<bool> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    let toml_str = toml::to_string_pretty(settings).context("Error displaying config")?;
    println!("{toml_str}");
    Ok(true)
}

/// The component for write commands, or `None` when search is disabled.
fn writable_component(settings: &Settings) -> Option<TantivySearchComponent> {
    if settings.search.enabled {
        Some(TantivySearchComponent::from_settings(settings))
    } else {
        eprintln!(
            "{}",
            THEME.outcome(Outcome::Partial, "Search is disabled in the configuration, nothing to do")
        );
        None
    }
}

/// Metadata lives next to an on-disk index only.
fn metadata_dir(component: &TantivySearchComponent, settings: &Settings) -> Option<PathBuf> {
    match component.store().location() {
        IndexLocation::Directory(_) => Some(settings.data_dir.clone()),
        IndexLocation::InMemory => None,
    }
}

fn update_metadata(
    dir: Option<&Path>,
    update: impl FnOnce(&mut IndexMetadata),
) -> anyhow::Result<()> {
    if let Some(dir) = dir {
        let mut metadata = IndexMetadata::load(dir)?;
        update(&mut metadata);
        metadata.save(dir)?;
    }
    Ok(())
}

fn run_index(settings: &Settings, files: &[PathBuf]) -> anyhow::Result<bool> {
    let Some(component) = writable_component(settings) else {
        return Ok(true);
    };
    let metadata_dir = metadata_dir(&component, settings);

    let mut runs: Vec<IndexStats> = Vec::new();
    let mut indexed: Vec<(WorkspaceId, String, usize)> = Vec::new();
    let mut failures = 0;

    for file in files {
        let workspace = match Workspace::load(file) {
            Ok(workspace) => workspace,
            Err(e) => {
                eprintln!("{}", THEME.outcome(Outcome::Failed, &e.to_string()));
                failures += 1;
                continue;
            }
        };

        match component.reindex(&workspace) {
            Ok(stats) => {
                indexed.push((workspace.id, workspace.name.clone(), stats.documents_written));
                runs.push(stats);
            }
            Err(IndexError::PartialIndexFailure {
                workspace_id,
                written,
                cause,
            }) => {
                eprintln!(
                    "{}",
                    THEME.outcome(
                        Outcome::Partial,
                        &format!(
                            "Workspace {workspace_id} partially indexed ({written} documents): {cause}"
                        )
                    )
                );
                indexed.push((workspace_id, workspace.name.clone(), written));
                failures += 1;
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    THEME.outcome(Outcome::Failed, &format!("{}: {e}", file.display()))
                );
                for suggestion in e.recovery_suggestions() {
                    eprintln!("  {suggestion}");
                }
                failures += 1;
            }
        }
    }

    component.stop();

    update_metadata(metadata_dir.as_deref(), |metadata| {
        for (id, name, documents) in &indexed {
            metadata.record_indexed(*id, name, *documents);
        }
    })?;

    if !runs.is_empty() {
        println!("{}", create_summary_table(&runs));
    }
    Ok(failures == 0)
}

fn run_delete(settings: &Settings, workspace_id: WorkspaceId) -> anyhow::Result<bool> {
    let Some(component) = writable_component(settings) else {
        return Ok(true);
    };

    component.remove(workspace_id)?;
    component.stop();

    update_metadata(metadata_dir(&component, settings).as_deref(), |metadata| {
        metadata.record_deleted(workspace_id);
    })?;

    println!(
        "{}",
        THEME.outcome(Outcome::Done, &format!("Removed workspace {workspace_id} from the index"))
    );
    Ok(true)
}

fn run_search(
    settings: &Settings,
    query: &str,
    doc_type: &str,
    workspaces: &[WorkspaceId],
    json: bool,
) -> anyhow::Result<bool> {
    let component = create_search_component(settings);
    let results = component.search(query, doc_type, workspaces)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results for '{query}'");
    } else {
        println!("{}", create_results_table(&results));
        println!(
            "{} result(s)",
            THEME.apply(&THEME.number, results.len())
        );
    }
    Ok(true)
}

fn run_clear(settings: &Settings) -> anyhow::Result<bool> {
    let Some(component) = writable_component(settings) else {
        return Ok(true);
    };

    component
        .store()
        .clear()
        .map_err(|e| IndexError::StoreUnavailable {
            operation: "clear".to_string(),
            cause: e.to_string(),
        })?;
    component.stop();

    update_metadata(metadata_dir(&component, settings).as_deref(), |metadata| {
        metadata.record_cleared();
    })?;

    println!("{}", THEME.outcome(Outcome::Done, "Index cleared"));
    Ok(true)
}

fn run_status(settings: &Settings, json: bool) -> anyhow::Result<bool> {
    let metadata = IndexMetadata::load(&settings.data_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(true);
    }

    println!(
        "{} {}",
        THEME.apply(&THEME.header, "Index:"),
        THEME.apply(&THEME.path, settings.index_path().display())
    );
    println!("  Last modified: {}", format_timestamp(metadata.last_modified));
    if let Some(cleared) = metadata.last_cleared {
        println!("  Last cleared: {}", format_timestamp(cleared));
    }
    println!(
        "  Workspaces: {}, documents: {}",
        metadata.workspaces.len(),
        metadata.document_count()
    );

    if !metadata.workspaces.is_empty() {
        println!("{}", create_status_table(&metadata));
    }
    Ok(true)
}
