//! Sentinel CLI
//!
//! Starts the interactive console by default. The other subcommands run the
//! same matcher and dataset from the shell.

use clap::{Parser, Subcommand};
use console::style;
use sentinel::{logging, search, AppConfig, Category, Collection, Dataset, Matcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Sentinel - access-control console
///
/// Browse users, devices, user groups and card templates, and find any of
/// them from the global search palette (Ctrl+K).
#[derive(Parser)]
#[command(name = "sentinel")]
#[command(version)]
#[command(about = "Access-control console with global search", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON dataset file (defaults to the built-in sample site)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "palette=trace" (SENTINEL_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Tui,

    /// Run one palette search and print the results
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// List one collection
    List {
        /// users, devices, user-groups, card-templates or device-groups
        category: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Write the active dataset as JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(target: "main", error = %e, "command failed");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        if e.is_recoverable() {
            eprintln!("{}", style("Run `sentinel --help` for usage").dim());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> sentinel::Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.data {
        config.data_path = Some(path);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    logging::init(&config.log_level);
    logging::separator(&format!("Sentinel {} starting", sentinel::VERSION));

    let data = Arc::new(load_dataset(config.data_path.as_deref())?);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => sentinel::tui::run(config, data),
        Commands::Search { query, output } => cmd_search(&config, data, &query, &output),
        Commands::List { category, output } => cmd_list(&data, &category, &output),
        Commands::Export { output } => cmd_export(&data, &output),
    }
}

fn load_dataset(path: Option<&Path>) -> sentinel::Result<Dataset> {
    match path {
        Some(p) => Dataset::load(p),
        None => {
            tracing::info!(target: "main", "using built-in sample dataset");
            Ok(Dataset::sample())
        }
    }
}

/// Search command implementation
fn cmd_search(
    config: &AppConfig,
    data: Arc<Dataset>,
    query: &str,
    output: &str,
) -> sentinel::Result<()> {
    let matcher = Matcher::new(data, config.caps);
    let start = Instant::now();
    let results = matcher.search(query);
    let elapsed = start.elapsed();
    tracing::info!(target: "search", query, results = results.len(), "cli search");

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "{} Searching for '{}'",
        style("→").cyan().bold(),
        style(query.trim()).yellow()
    );
    println!();

    if results.is_empty() {
        println!("  No results found for \"{}\"", query.trim());
        println!(
            "  {}",
            style("Try searching for users, devices, or groups").dim()
        );
        return Ok(());
    }

    for group in search::group_by_category(&results) {
        println!("  {}", style(group.category.label()).bold().underlined());
        for (_, result) in group.items {
            println!(
                "    {}  {}  {}",
                style(&result.title).bold(),
                style(&result.subtitle).dim(),
                style(result.route).cyan()
            );
        }
        println!();
    }

    println!(
        "Found {} results in {:.2}ms",
        style(results.len()).green(),
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

/// List command implementation
fn cmd_list(data: &Dataset, collection: &str, output: &str) -> sentinel::Result<()> {
    let collection: Collection = collection.parse()?;

    if output == "json" {
        let json = match collection {
            Collection::Searchable(Category::User) => serde_json::to_string_pretty(&data.users)?,
            Collection::Searchable(Category::Device) => serde_json::to_string_pretty(&data.devices)?,
            Collection::Searchable(Category::UserGroup) => {
                serde_json::to_string_pretty(&data.user_groups)?
            }
            Collection::Searchable(Category::CardTemplate) => {
                serde_json::to_string_pretty(&data.card_templates)?
            }
            Collection::DeviceGroups => serde_json::to_string_pretty(&data.device_groups)?,
        };
        println!("{}", json);
        return Ok(());
    }

    let count = match collection {
        Collection::Searchable(category) => data.count(category),
        Collection::DeviceGroups => data.device_groups.len(),
    };
    println!(
        "{} {} ({})",
        style("→").cyan().bold(),
        style(collection.label()).bold(),
        count
    );
    println!();

    match collection {
        Collection::Searchable(Category::User) => {
            for u in &data.users {
                println!(
                    "  {:>6}  {:<24} {:<10} {:<12} {}",
                    style(&u.visible_id).dim(),
                    u.name,
                    u.user_type,
                    u.user_group,
                    status(&u.status)
                );
            }
        }
        Collection::Searchable(Category::Device) => {
            for d in &data.devices {
                println!(
                    "  {:<24} {:<16} {:<16} {:<15} {}",
                    d.name,
                    d.device_type,
                    d.location,
                    d.ip_address.as_deref().unwrap_or("-"),
                    status(&d.status)
                );
            }
            let summary = data.device_summary();
            println!();
            println!(
                "  {} online, {} offline, {} maintenance",
                style(summary.online).green(),
                style(summary.offline).red(),
                style(summary.maintenance).yellow()
            );
        }
        Collection::Searchable(Category::UserGroup) => {
            for g in &data.user_groups {
                println!(
                    "  {:<20} {:>4} members  {:<14} {}",
                    g.name,
                    g.member_count,
                    g.access_level,
                    status(&g.status)
                );
            }
        }
        Collection::Searchable(Category::CardTemplate) => {
            for t in &data.card_templates {
                println!(
                    "  {:<22} {:<10} {:<10} {:>4} used  {}",
                    t.name,
                    t.card_type,
                    t.validity_period,
                    t.usage_count,
                    status(&t.status)
                );
            }
        }
        Collection::DeviceGroups => {
            for g in &data.device_groups {
                println!(
                    "  {:<20} {:>4} devices  {:<26} {}",
                    g.name,
                    g.device_count,
                    g.location,
                    status(&g.status)
                );
            }
        }
    }

    Ok(())
}

fn status(value: &str) -> console::StyledObject<&str> {
    match value.to_ascii_lowercase().as_str() {
        "active" | "online" => style(value).green(),
        "inactive" | "offline" => style(value).red(),
        _ => style(value).yellow(),
    }
}

/// Export command implementation
fn cmd_export(data: &Dataset, output: &Path) -> sentinel::Result<()> {
    println!(
        "{} Exporting dataset to {}",
        style("→").cyan().bold(),
        style(output.display()).yellow()
    );

    data.save(output)?;

    println!(
        "{} Wrote {} users, {} devices, {} user groups, {} card templates, {} device groups",
        style("✓").green().bold(),
        data.users.len(),
        data.devices.len(),
        data.user_groups.len(),
        data.card_templates.len(),
        data.device_groups.len()
    );
    Ok(())
}
