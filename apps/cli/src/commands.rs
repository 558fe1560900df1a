//! # Command Handlers
//!
//! Each subcommand builds what it needs from the config, runs against the
//! Store, and prints a rendered result to stdout.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Command Execution                               │
//! │                                                                         │
//! │  ClientConfig::load ──► HttpGateway ──► CatalogStore                   │
//! │                                              │                          │
//! │   list    load(term) ─► render page(s)       │                          │
//! │   add     validate ──► create ─► detail      │                          │
//! │   edit    load("") ─► prefill ─► validate ─► update ─► detail          │
//! │   delete  confirm ──► delete                 │                          │
//! │   search  stdin lines ─► SearchController ─► emitter renders           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use larder_core::{validate_form, FormInput, Paginator};
use larder_sync::{
    CatalogStore, ClientConfig, ClientError, HttpGateway, SearchController, StoreEventEmitter,
    StoreState,
};

use crate::args::{Cli, Commands, ConfigAction, FormArgs};
use crate::render;

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        config: config_path,
        api_url,
    } = cli;

    let load = || load_config(config_path.clone(), api_url.clone());

    match command {
        Commands::List { search, page } => {
            let config = load()?;
            let store = build_store(&config, None)?;
            list(&store, &config, &search, page).await
        }
        Commands::Add { fields } => add(&build_store(&load()?, None)?, fields).await,
        Commands::Edit { id, fields } => edit(&build_store(&load()?, None)?, &id, fields).await,
        Commands::Delete { id, yes } => delete(&build_store(&load()?, None)?, &id, yes).await,
        Commands::Search => search(&load()?).await,
        Commands::Config { action } => config_command(action, config_path.clone(), api_url.clone()),
    }
}

fn load_config(path: Option<PathBuf>, api_url: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path).context("Could not load client config")?;
    if let Some(url) = api_url {
        config.api.base_url = url;
        config.validate()?;
    }
    debug!(?config, "Client config ready");
    Ok(config)
}

fn build_store(
    config: &ClientConfig,
    emitter: Option<Arc<dyn StoreEventEmitter>>,
) -> Result<CatalogStore> {
    let gateway = Arc::new(HttpGateway::from_config(config)?);
    info!(url = %gateway.collection_url(), "Using remote collection");
    Ok(match emitter {
        Some(emitter) => CatalogStore::with_emitter(gateway, emitter),
        None => CatalogStore::new(gateway),
    })
}

/// Rejects a form that fails validation, before any request is made.
fn check_form(form: &FormInput) -> Result<(), ClientError> {
    validate_form(form).map_err(ClientError::from)
}

// =============================================================================
// List / Add / Edit / Delete
// =============================================================================

async fn list(store: &CatalogStore, config: &ClientConfig, term: &str, pages: usize) -> Result<()> {
    store.load(term).await?;

    let state = store.snapshot().await;
    let mut pager = Paginator::new(config.display.page_size);
    pager.show_pages(pages);

    print!("{}", render::item_list(&state.items, &pager));
    Ok(())
}

async fn add(store: &CatalogStore, fields: FormArgs) -> Result<()> {
    let form = fields.apply(FormInput::default());
    check_form(&form)?;

    let item = store.create(&form).await?;
    println!("Added food item {}", item.id);
    print!("{}", render::item_detail(&item));
    Ok(())
}

async fn edit(store: &CatalogStore, id: &str, fields: FormArgs) -> Result<()> {
    store.load("").await?;
    let state = store.snapshot().await;
    let current = state
        .items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| anyhow!("No food item with id {id}"))?;

    let form = fields.apply(FormInput::from_item(current));
    check_form(&form)?;

    let item = store.update(id, &form).await?;
    println!("Updated food item {}", item.id);
    print!("{}", render::item_detail(&item));
    Ok(())
}

async fn delete(store: &CatalogStore, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete food item {id}? [y/N] ")).await? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete(id).await?;
    println!("Deleted food item {id}");
    Ok(())
}

async fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

// =============================================================================
// Interactive Search
// =============================================================================

/// Prints the list each time a load finishes.
struct TerminalEmitter {
    pager: Mutex<Paginator>,
    was_loading: AtomicBool,
}

impl TerminalEmitter {
    fn new(page_size: usize) -> Self {
        TerminalEmitter {
            pager: Mutex::new(Paginator::new(page_size)),
            was_loading: AtomicBool::new(false),
        }
    }

    fn pager(&self) -> std::sync::MutexGuard<'_, Paginator> {
        self.pager.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreEventEmitter for TerminalEmitter {
    fn emit_state(&self, state: &StoreState) {
        let was_loading = self.was_loading.swap(state.is_loading, Ordering::SeqCst);
        if was_loading && !state.is_loading {
            let mut pager = self.pager();
            pager.reset();
            print!("{}", render::state_view(state, &pager));
        }
    }

    fn emit_error(&self, message: &str) {
        debug!(message, "Search load failed");
    }
}

async fn search(config: &ClientConfig) -> Result<()> {
    let emitter = Arc::new(TerminalEmitter::new(config.display.page_size));
    let store = build_store(config, Some(emitter.clone()))?;

    println!("Type to search. '+' shows more, ':q' quits.");
    // Failures are rendered by the emitter.
    let _ = store.load("").await;

    let handle = SearchController::new(store.clone(), config.debounce()).start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_term = String::new();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" => break,
            "+" => {
                let state = store.snapshot().await;
                let mut pager = emitter.pager();
                pager.load_more();
                print!("{}", render::state_view(&state, &pager));
            }
            term => {
                last_term = term.to_string();
                handle.input(term).await?;
            }
        }
    }

    // Waits for fired loads. A term still inside the debounce window is
    // dropped, which piped input can hit at EOF.
    handle.shutdown().await?;

    if store.search_term().await != last_term {
        let _ = store.load(&last_term).await;
    }
    Ok(())
}

// =============================================================================
// Config
// =============================================================================

fn config_command(
    action: ConfigAction,
    path: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let shown = path.clone().or_else(ClientConfig::default_config_path);
            let config = load_config(path, api_url)?;
            if let Some(shown) = shown {
                println!("# {}", shown.display());
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init { force } => {
            let path = path
                .or_else(ClientConfig::default_config_path)
                .ok_or_else(|| anyhow!("No config directory available; pass --config"))?;
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }

            let mut config = ClientConfig::default();
            if let Some(url) = api_url {
                config.api.base_url = url;
                config.validate()?;
            }
            let written = config.save(Some(path))?;
            println!("Wrote {}", written.display());
        }
    }
    Ok(())
}
