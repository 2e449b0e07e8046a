//! # CLI Layer
//!
//! This module is **one possible UI client** for the catalogue library. A browser front
//! end or a notebook could drive the same [`CatalogApi`].
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the config directory, load config and the two tables
//! 3. **API Dispatch**: Call the appropriate `CatalogApi` method
//! 4. **Output Formatting**: Convert `CmdResult` into terminal output or JSON
//!
//! CLI tests should **not** test business logic. That's the command layer's job.

use super::render::{detect_color, Renderer};
use super::setup::{Cli, Commands, FilterArgs};
use catalogue::api::{CatalogApi, CmdResult, ConfigAction};
use catalogue::config::{config_dir, CatalogConfig, CONFIG_KEYS};
use catalogue::error::{CatalogError, Result};
use catalogue::sort::SortSpec;
use clap::Parser;
use log::{debug, LevelFilter};
use serde::Serialize;
use std::path::{Path, PathBuf};

struct AppContext {
    api: CatalogApi,
    renderer: Renderer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let dir = config_dir(&cwd)?;
    debug!("Using config dir {}", dir.display());
    let renderer = Renderer::new(detect_color(cli.no_color));

    // Config commands don't need the tables
    if let Commands::Config { key, value } = &cli.command {
        return handle_config(&renderer, &dir, key.clone(), value.clone());
    }

    let config = CatalogConfig::load(&dir)?;
    let ctx = init_context(&cli, config, renderer)?;

    match cli.command {
        Commands::List {
            filters,
            sort,
            desc,
            json,
        } => handle_list(&ctx, &filters, sort, desc, json),
        Commands::Show { id, search, json } => handle_show(&ctx, id, search.as_deref(), json),
        Commands::Facets {
            column,
            filters,
            json,
        } => handle_facets(&ctx, &column, &filters, json),
        Commands::Schema { json } => handle_schema(&ctx, json),
        Commands::Config { .. } => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn required_path(
    flag: Option<&PathBuf>,
    configured: Option<&PathBuf>,
    what: &str,
    key: &str,
) -> Result<PathBuf> {
    flag.or(configured).cloned().ok_or_else(|| {
        CatalogError::Config(format!(
            "No {} file given (use --{} or config {}-path)",
            what, what, key
        ))
    })
}

fn init_context(cli: &Cli, config: CatalogConfig, renderer: Renderer) -> Result<AppContext> {
    let metadata = required_path(
        cli.metadata.as_ref(),
        config.metadata_path.as_ref(),
        "metadata",
        "metadata",
    )?;
    let data = required_path(cli.data.as_ref(), config.data_path.as_ref(), "data", "data")?;
    let api = CatalogApi::load(&metadata, &data, config)?;
    Ok(AppContext { api, renderer })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON output keeps stdout machine readable, so messages go to stderr.
fn print_messages(ctx: &AppContext, result: &CmdResult, json: bool) {
    let output = ctx.renderer.messages(&result.messages);
    if json {
        eprint!("{}", output);
    } else {
        print!("{}", output);
    }
}

fn handle_list(
    ctx: &AppContext,
    filters: &FilterArgs,
    sort: Option<String>,
    desc: bool,
    json: bool,
) -> Result<()> {
    let state = filters.to_state()?;
    let sort = sort.map(|column| {
        if desc {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        }
    });
    let result = ctx.api.list(&state, sort.as_ref())?;

    if json {
        print_json(&result.listed_rows)?;
    } else if let Some(table) = &result.table {
        let width = ctx.api.config().cell_width();
        print!("{}", ctx.renderer.table(table, result.total, width));
    }
    print_messages(ctx, &result, json);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: usize, query: Option<&str>, json: bool) -> Result<()> {
    let result = ctx.api.show(id, query)?;
    if let Some(detail) = &result.detail {
        if json {
            print_json(detail)?;
        } else {
            print!("{}", ctx.renderer.detail(detail));
        }
    }
    print_messages(ctx, &result, json);
    Ok(())
}

fn handle_facets(ctx: &AppContext, column: &str, filters: &FilterArgs, json: bool) -> Result<()> {
    let state = filters.to_state()?;
    let result = ctx.api.facets(column, &state)?;
    if let Some(facets) = &result.facets {
        if json {
            print_json(facets)?;
        } else {
            print!("{}", ctx.renderer.facets(facets));
        }
    }
    print_messages(ctx, &result, json);
    Ok(())
}

fn handle_schema(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.api.schema()?;
    if json {
        print_json(&result.columns)?;
    } else {
        print!("{}", ctx.renderer.schema(&result.columns));
    }
    print_messages(ctx, &result, json);
    Ok(())
}

fn handle_config(
    renderer: &Renderer,
    dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = CatalogApi::configure(dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            let lines: Vec<String> = CONFIG_KEYS
                .iter()
                .map(|key| format!("{} = {}", key, config.get(key).unwrap_or_default()))
                .collect();
            print!("{}", renderer.text_list(&lines, "No configuration values."));
        }
    }
    print!("{}", renderer.messages(&result.messages));
    Ok(())
}
