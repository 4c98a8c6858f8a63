//! BASTION back-office access control — Demo CLI
//!
//! Shows the navigation menu and capability checks for bundled or custom
//! actor profiles, and runs the reference scenarios.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- menu --profile sales
//!   cargo run -p demo -- menu --profile-file actor.json --menu menu.toml --json
//!   cargo run -p demo -- check --profile accountant COST_SHEET_APPROVE SALE_CONTRACT_DELETE
//!   cargo run -p demo -- catalog

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bastion_contracts::{
    capability::CapabilityToken,
    error::{BastionError, BastionResult},
    profile::ActorProfile,
};
use bastion_core::CapabilityStore;
use bastion_menu::{MenuDefinition, RoleBasedMenu};
use bastion_ref_backoffice::{
    backoffice_menu, mock_data, render_tree,
    scenarios::{contract_page, menu_visibility, session_lifecycle},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// BASTION — role-based menu and access control for the back office.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "BASTION back-office access-control demo",
    long_about = "Filters the back-office navigation menu and checks capabilities\n\
                  for bundled or custom actor profiles."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three reference scenarios in sequence.
    RunAll,
    /// Print the navigation menu an actor can see.
    Menu {
        #[command(flatten)]
        actor: ActorArgs,
        /// Menu definition TOML; defaults to the bundled back-office menu.
        #[arg(long)]
        menu: Option<PathBuf>,
        /// Print the filtered tree as JSON instead of an outline.
        #[arg(long)]
        json: bool,
    },
    /// Report whether an actor holds at least one of the given capabilities.
    Check {
        #[command(flatten)]
        actor: ActorArgs,
        /// Capability tokens, e.g. SALE_CONTRACT_VIEW.
        #[arg(required = true)]
        tokens: Vec<CapabilityToken>,
    },
    /// List every capability token the application knows.
    Catalog,
}

#[derive(Args)]
struct ActorArgs {
    /// Bundled profile name (admin, sales, logistics, accountant, guest).
    #[arg(long, conflicts_with = "profile_file", required_unless_present = "profile_file")]
    profile: Option<String>,
    /// Actor profile JSON as returned by the backend.
    #[arg(long)]
    profile_file: Option<PathBuf>,
}

impl ActorArgs {
    fn load(&self) -> BastionResult<ActorProfile> {
        match (&self.profile, &self.profile_file) {
            (Some(name), _) => mock_data::profile(name),
            (None, Some(path)) => {
                let contents = std::fs::read_to_string(path).map_err(|e| BastionError::ConfigError {
                    reason: format!("failed to read profile file '{}': {}", path.display(), e),
                })?;
                ActorProfile::from_json_str(&contents)
            }
            (None, None) => Err(BastionError::ConfigError {
                reason: "either --profile or --profile-file is required".to_string(),
            }),
        }
    }

    fn sign_in(&self) -> BastionResult<CapabilityStore> {
        let mut store = CapabilityStore::new();
        store.initialize(self.load()?)?;
        Ok(store)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Menu { actor, menu, json } => show_menu(&actor, menu, json),
        Command::Check { actor, tokens } => check(&actor, &tokens),
        Command::Catalog => {
            catalog();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_all() -> BastionResult<()> {
    menu_visibility::run_scenario()?;
    contract_page::run_scenario()?;
    session_lifecycle::run_scenario()?;
    println!("All scenarios completed successfully.");
    Ok(())
}

fn show_menu(actor: &ActorArgs, menu: Option<PathBuf>, json: bool) -> BastionResult<()> {
    let store = actor.sign_in()?;
    let full = match menu {
        Some(path) => MenuDefinition::from_file(&path)?.into_tree(),
        None => backoffice_menu()?,
    };
    debug!(top_level = full.items.len(), "menu loaded");

    let mut menu = RoleBasedMenu::new(full);
    let visible = menu.visible(&store);

    if json {
        let body = serde_json::to_string_pretty(visible).map_err(|e| BastionError::ConfigError {
            reason: format!("failed to serialize menu: {}", e),
        })?;
        println!("{}", body);
    } else {
        print!("{}", render_tree(visible));
    }
    Ok(())
}

fn check(actor: &ActorArgs, tokens: &[CapabilityToken]) -> BastionResult<()> {
    let store = actor.sign_in()?;
    let granted = store.granted()?;

    for token in tokens {
        let mark = if granted.has(token) { "GRANTED" } else { "missing" };
        println!("  {:<32} {}", token.to_string(), mark);
    }
    let any = store.has_capability(tokens)?;
    println!("any of the above: {}", if any { "yes" } else { "no" });
    Ok(())
}

fn catalog() {
    for token in CapabilityToken::catalog() {
        println!("{}", token);
    }
}
