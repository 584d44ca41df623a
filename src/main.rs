//! Fleetdesk - Command Line Entry Point
//!
//! Loads the configuration, seeds a store and runs one command against it.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use fleetdesk::auth::{Role, Session};
use fleetdesk::domain::config::LogConfig;
use fleetdesk::domain::{AppConfig, MaintenanceKind, VehicleId};
use fleetdesk::helpers::{get_or_create_data_dir, is_development};
use fleetdesk::queries::{
    DueWindow, MechanicFilter, Quadrant, available_mechanics, eisenhower_matrix, free_bays,
    suggest_bay, vehicles_due,
};
use fleetdesk::state::{ActionScript, FleetStore};
use fleetdesk::utils::{
    format_cost, format_date, format_datetime, format_hours, format_ratio, truncate,
};

/// Fleet maintenance back office.
#[derive(Parser, Debug)]
#[command(name = "fleetdesk", version, about = "Fleet maintenance store")]
struct Cli {
    /// Path to config file (default: platform config dir / fleetdesk.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act as this role instead of the configured one.
    #[arg(long, global = true, value_parser = parse_role)]
    role: Option<Role>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Start from an empty fleet.
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show fleet statistics.
    Stats,

    /// Replay an action script, then show statistics.
    Run {
        /// TOML script with [[actions]] entries.
        script: PathBuf,
        /// Continue after a rejected action.
        #[arg(long)]
        keep_going: bool,
    },

    /// Group open maintenance by urgency and importance.
    Matrix,

    /// List vehicles due for maintenance.
    Due {
        /// Days ahead (default from config).
        #[arg(long)]
        days: Option<i64>,
        /// Kilometres ahead (default from config).
        #[arg(long)]
        km: Option<i64>,
    },

    /// List mechanics that can take work.
    Mechanics {
        /// Required skill or specialty.
        #[arg(long)]
        skill: Option<String>,
        /// Time of day they must be on shift (HH:MM).
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
        /// Include busy mechanics below the assignment cap.
        #[arg(long)]
        include_busy: bool,
    },

    /// List free bays and the suggested bay per kind of work.
    Bays,

    /// Show the maintenance history of a vehicle with its planned slots.
    History {
        /// Vehicle id, e.g. veh-001.
        vehicle: String,
    },

    /// Show the views and permissions of the current session.
    Views,

    /// Print the JSON Schema of action scripts.
    Schema,

    /// Print the effective configuration as TOML.
    Config,
}

fn parse_role(s: &str) -> std::result::Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

/// Console logging on stderr, plus daily rolling files when a directory is configured
fn init_tracing(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("invalid log level")?;

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(is_development());
    let registry = tracing_subscriber::registry().with(filter).with(console);

    match &config.directory {
        Some(dir) => {
            let dir = if dir.as_os_str().is_empty() {
                get_or_create_data_dir()?
            } else {
                dir.clone()
            };
            let appender = tracing_appender::rolling::daily(&dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_timer(LocalTime::rfc_3339())
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            registry.init();
            Ok(None)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_stats(store: &FleetStore, today: NaiveDate, json: bool) -> Result<()> {
    let stats = store.stats();
    if json {
        return print_json(&stats);
    }

    println!("Vehicles      {:>4} total", stats.total_vehicles);
    println!(
        "  active      {:>4} ({} available)",
        stats.vehicles_active,
        format_ratio(stats.availability_rate())
    );
    println!("  maintenance {:>4}", stats.vehicles_in_maintenance);
    println!("  in workshop {:>4}", stats.vehicles_in_workshop);
    println!("  waiting     {:>4}", stats.vehicles_waiting);
    println!(
        "Mechanics     {:>4} total, {} available, {} busy",
        stats.total_mechanics, stats.available_mechanics, stats.busy_mechanics
    );
    println!(
        "Bays          {:>4} total, {} free ({} occupied)",
        stats.total_bays,
        stats.free_bays,
        format_ratio(stats.bay_occupancy())
    );
    println!(
        "Maintenance   {} planned, {} in progress, {} completed",
        stats.planned_maintenance, stats.in_progress_maintenance, stats.completed_maintenance
    );
    println!("Alerts        {} unacknowledged", stats.unacknowledged_alerts);

    let workload: f64 = store
        .state()
        .maintenance
        .iter()
        .filter(|r| r.is_open())
        .map(|r| r.estimated_duration_hours)
        .sum();
    println!("Open workload {} as of {}", format_hours(workload), format_date(&today));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    if cli.no_seed {
        config.store.seed_demo_data = false;
    }
    if let Some(role) = cli.role {
        config.session.role = role;
    }

    let _guard = init_tracing(&config.log)?;
    tracing::debug!(?config, "Configuration resolved");

    let session = Session::from_config(&config.session);
    let mut store = FleetStore::from_config(&config.store);
    let today = Utc::now().date_naive();

    match cli.command {
        Commands::Stats => print_stats(&store, today, cli.json)?,

        Commands::Run { script, keep_going } => {
            let script = ActionScript::load_from(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;
            let total = script.actions.len();
            let steps = script.run(&mut store, &session, keep_going);
            let failed = steps.iter().filter(|s| !s.is_ok()).count();

            if cli.json {
                print_json(&steps)?;
            } else {
                for step in &steps {
                    match &step.error {
                        None => println!(
                            "#{:<3} {:<24} ok ({} events)",
                            step.index,
                            step.action,
                            step.events.len()
                        ),
                        Some(error) => {
                            println!("#{:<3} {:<24} FAILED: {error}", step.index, step.action)
                        }
                    }
                }
                println!();
                print_stats(&store, today, false)?;
            }

            tracing::info!(total, ran = steps.len(), failed, "Script finished");
            if failed > 0 {
                bail!("{failed} of {total} actions failed");
            }
        }

        Commands::Matrix => {
            let matrix = eisenhower_matrix(&store.state().maintenance);
            if cli.json {
                return print_json(&matrix);
            }
            for quadrant in Quadrant::ALL {
                println!("{}:", quadrant.label());
                for id in matrix.quadrant(quadrant) {
                    if let Some(record) = store.state().record(id) {
                        println!(
                            "  {:<10} {:<32} {:>12}  {}",
                            record.id,
                            truncate(&record.title, 32),
                            format_cost(record.estimated_cost),
                            record.status.label()
                        );
                    }
                }
            }
        }

        Commands::Due { days, km } => {
            let defaults = DueWindow::from_config(&config.store);
            let window = DueWindow {
                days: days.unwrap_or(defaults.days),
                km: km.unwrap_or(defaults.km),
            };
            let due = vehicles_due(store.state(), today, window);
            if cli.json {
                return print_json(&due);
            }
            if due.is_empty() {
                println!("No vehicle due within {} days / {} km", window.days, window.km);
            }
            for vehicle in &due {
                let date = vehicle
                    .days_left
                    .map(|d| format!("{d:+} days"))
                    .unwrap_or_else(|| "-".to_string());
                let odometer = vehicle
                    .km_left
                    .map(|k| format!("{k:+} km"))
                    .unwrap_or_else(|| "-".to_string());
                let flag = if vehicle.is_overdue() { "OVERDUE" } else { "" };
                println!(
                    "{:<10} {:<36} {:>10} {:>12}  {flag}",
                    vehicle.vehicle_id, vehicle.name, date, odometer
                );
            }
        }

        Commands::Mechanics {
            skill,
            at,
            include_busy,
        } => {
            let filter = MechanicFilter {
                skill,
                on_shift_at: at,
                include_busy,
            };
            let mechanics = available_mechanics(store.state(), &filter);
            if cli.json {
                return print_json(&mechanics);
            }
            for mechanic in mechanics {
                println!(
                    "{:<10} {:<20} {:<12} {:<10} {} open, shift {}-{}",
                    mechanic.id,
                    mechanic.name,
                    mechanic.specialty,
                    mechanic.status.label(),
                    mechanic.current_assignments,
                    mechanic.working_hours.start.format("%H:%M"),
                    mechanic.working_hours.end.format("%H:%M"),
                );
            }
        }

        Commands::Bays => {
            let free = free_bays(store.state(), None);
            let suggestions: Vec<_> = MaintenanceKind::ALL
                .into_iter()
                .map(|kind| (kind, suggest_bay(store.state(), kind).map(|b| b.id.clone())))
                .collect();
            if cli.json {
                return print_json(&serde_json::json!({
                    "free": free,
                    "suggestions": suggestions,
                }));
            }
            for bay in free {
                println!("{:<10} {:<16} {}", bay.id, bay.name, bay.capability.label());
            }
            for (kind, bay) in suggestions {
                let bay = bay.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string());
                println!("{:<12} -> {bay}", kind.label());
            }
        }

        Commands::History { vehicle } => {
            let vehicle_id = VehicleId::from(vehicle.as_str());
            let Some(found) = store.state().vehicle(&vehicle_id) else {
                bail!("vehicle '{vehicle_id}' not found");
            };
            let history = store.state().history_for_vehicle(&vehicle_id);
            if cli.json {
                return print_json(&history);
            }
            println!("{} ({})", found.display_name(), found.status.label());
            for record in history {
                println!(
                    "  {:<10} {} {:<32} {:<11} {:>12}",
                    record.id,
                    format_datetime(&record.created_at),
                    truncate(&record.title, 32),
                    record.status.label(),
                    format_cost(record.final_cost.unwrap_or(record.estimated_cost)),
                );
                for slot in store.state().planning_for(&record.id) {
                    println!(
                        "      {} {} {} with {} in {}",
                        format_date(&slot.date),
                        slot.start_time.format("%H:%M"),
                        format_hours(slot.duration_hours),
                        slot.mechanic_id,
                        slot.bay_id,
                    );
                }
            }
        }

        Commands::Views => {
            if cli.json {
                return print_json(&serde_json::json!({
                    "user": session.user(),
                    "views": session.accessible_views(),
                    "permissions": session.permissions(),
                }));
            }
            println!("{} ({})", session.user().name, session.role());
            for view in session.accessible_views() {
                println!("  {}", view.label());
            }
        }

        Commands::Schema => print_json(&ActionScript::json_schema())?,

        Commands::Config => print!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}
