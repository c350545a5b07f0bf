//! waypost CLI — driving adapter for the waypost router.
//!
//! Subcommands:
//! - `lookup <table> <path>...` — route each path, print handler and parameters
//! - `trace <table> <path>` — print every step of one lookup
//! - `check <table>` — validate that a route table loads
//! - `routes <table>` — list the interned schemas
//!
//! Handler names in the table resolve to label handlers, so the output
//! shows which named route a path reaches.

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypost::{LookupPhase, RouteTableConfig, Router, RouterError};
use waypost_test::{label_bindings, LabelHandler};

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Inspect and exercise waypost route tables", long_about = None)]
struct Cli {
    /// Log registration and lookup decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route each path and print the handler it reaches
    Lookup {
        /// Route table (YAML, or JSON by extension)
        table: String,
        /// Paths to route
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print every candidate tried while routing one path
    Trace {
        /// Route table (YAML, or JSON by extension)
        table: String,
        /// Path to route
        path: String,
    },
    /// Validate that a route table loads
    Check {
        /// Route table (YAML, or JSON by extension)
        table: String,
    },
    /// List interned schemas with their group and entry count
    Routes {
        /// Route table (YAML, or JSON by extension)
        table: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Lookup { table, paths } => cmd_lookup(table, paths),
        Command::Trace { table, path } => cmd_trace(table, path),
        Command::Check { table } => cmd_check(table),
        Command::Routes { table } => cmd_routes(table),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_lookup(table: &str, paths: &[String]) -> Result<(), RouterError> {
    let router = load_router(table)?;
    for path in paths {
        println!("{}", describe(&router, path));
    }
    Ok(())
}

fn cmd_trace(table: &str, path: &str) -> Result<(), RouterError> {
    let router = load_router(table)?;
    println!("{}", router.lookup_with_trace(path));
    Ok(())
}

fn cmd_check(table: &str) -> Result<(), RouterError> {
    let router = load_router(table)?;
    println!("Route table valid ({} routes)", router.len());
    Ok(())
}

fn cmd_routes(table: &str) -> Result<(), RouterError> {
    let router = load_router(table)?;
    for line in route_listing(&router) {
        println!("{line}");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

fn describe(router: &Router, path: &str) -> String {
    let Some(route) = router.lookup(path) else {
        return format!("{path} -> (no match)");
    };

    let handler = route.instantiate();
    let label = handler
        .as_deref()
        .and_then(LabelHandler::from_handler)
        .map_or("(no handler)", LabelHandler::label)
        .to_owned();

    let mut params: Vec<String> = route
        .bundle()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    params.sort();

    format!(
        "{path} -> {label} [{}] {{{}}}",
        route.schema().pattern(),
        params.join(", ")
    )
}

fn route_listing(router: &Router) -> Vec<String> {
    router
        .schemas()
        .map(|schema| {
            let group = if schema.ends_in_wildcard() {
                LookupPhase::WildcardFloor(schema.len()).to_string()
            } else {
                format!("exact={}", schema.len())
            };
            format!(
                "{:<32} {:<12} {} entries  ({})",
                schema.fingerprint(),
                group,
                router.entries_for(schema).len(),
                schema.pattern()
            )
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Route table loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_router(path: &str) -> Result<Router, RouterError> {
    let config = load_config(path)?;
    let router = Router::load(&config, &label_bindings(&config))?;
    tracing::debug!(
        table = path,
        routes = router.len(),
        schemas = router.schema_count(),
        "route table loaded"
    );
    Ok(router)
}

fn load_config(path: &str) -> Result<RouteTableConfig, RouterError> {
    let content = std::fs::read_to_string(path).map_err(|e| RouterError::InvalidConfig {
        reason: format!("failed to read \"{path}\": {e}"),
    })?;
    parse_config(path, &content)
}

fn parse_config(path: &str, content: &str) -> Result<RouteTableConfig, RouterError> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content).map_err(|e| RouterError::InvalidConfig {
            reason: format!("JSON parse error: {e}"),
        })
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| RouterError::InvalidConfig {
            reason: format!("YAML parse error: {e}"),
        })
    }
}
