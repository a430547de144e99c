mod browse;
mod platform;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use shiftmap_app::Coordinator;
use shiftmap_core::{AppConfig, Coordinate};
use shiftmap_geocode::{CityResolver, GeocodeClient};
use shiftmap_location::{
    FixedPositionSource, LocationProvider, PermissionGate, PermissionStatus, PositionOptions,
    PositionSource, PresetPermission,
};
use shiftmap_shifts::FetchOutcome;
use tracing_subscriber::EnvFilter;

use crate::platform::{NoPositionService, PromptPermissionGate};

#[derive(Debug, Parser)]
#[command(name = "shiftmap")]
#[command(about = "Find work shifts near your location")]
struct Cli {
    /// Device latitude (overrides `SHIFTMAP_LATITUDE`)
    #[arg(long, global = true, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Device longitude (overrides `SHIFTMAP_LONGITUDE`)
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Ask for location consent on the terminal before reading the position
    #[arg(long, global = true, conflicts_with = "deny_location")]
    ask_permission: bool,
    /// Behave as if location consent was refused
    #[arg(long, global = true)]
    deny_location: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the city and the shifts near the device position
    Shifts,
    /// Print the details of one shift near the device position
    Show {
        /// Shift id as listed by `shifts`
        id: String,
    },
    /// Print the city for the device position
    City,
    /// Browse shifts interactively
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shiftmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let source = position_source(&cli, &config)?;
    let gate = permission_gate(&cli);

    match cli.command {
        Commands::Shifts => {
            let coordinator = Coordinator::from_config(&config, source, gate)?;
            run_shifts(&coordinator).await?;
        }
        Commands::Show { id } => {
            let coordinator = Coordinator::from_config(&config, source, gate)?;
            run_show(&coordinator, &id).await?;
        }
        Commands::City => run_city(&config, source, gate).await?,
        Commands::Browse => {
            let coordinator = Coordinator::from_config(&config, source, gate)?;
            browse::run_browse(coordinator).await?;
        }
    }

    Ok(())
}

/// Flags win over config; with neither, acquisition fails as it would on a
/// host without a location service.
fn position_source(cli: &Cli, config: &AppConfig) -> anyhow::Result<Arc<dyn PositionSource>> {
    let from_flags = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
        _ => None,
    };
    Ok(match from_flags.or(config.device_position) {
        Some(coordinate) => Arc::new(FixedPositionSource::new(coordinate)),
        None => Arc::new(NoPositionService),
    })
}

fn permission_gate(cli: &Cli) -> Option<Arc<dyn PermissionGate>> {
    if cli.deny_location {
        Some(Arc::new(PresetPermission(PermissionStatus::Denied)))
    } else if cli.ask_permission {
        Some(Arc::new(PromptPermissionGate))
    } else {
        None
    }
}

/// Runs the location flow to completion, including the city lookup.
///
/// Returns `None` when no position was obtained.
async fn load(coordinator: &Coordinator) -> anyhow::Result<Option<FetchOutcome>> {
    let Some(fetch) = coordinator.trigger_location_flow().await else {
        return Ok(None);
    };
    let outcome = fetch.await?;
    coordinator
        .subscribe_city()
        .wait_for(|city| !city.loading)
        .await?;
    Ok(Some(outcome))
}

async fn run_shifts(coordinator: &Coordinator) -> anyhow::Result<()> {
    if load(coordinator).await?.is_none() {
        println!("Location unavailable; no shifts to show.");
        return Ok(());
    }
    println!("{}", render::headline(&coordinator.city()));
    println!();
    println!("{}", render::list(&coordinator.shifts()));
    Ok(())
}

async fn run_show(coordinator: &Coordinator, id: &str) -> anyhow::Result<()> {
    match load(coordinator).await? {
        None => anyhow::bail!("location unavailable; cannot look up shift '{id}'"),
        Some(FetchOutcome::Failed { message }) => {
            anyhow::bail!("could not load shifts: {message}")
        }
        Some(_) => {}
    }
    let Some(shift) = coordinator.select(id) else {
        anyhow::bail!("shift '{id}' not found near this location");
    };
    println!("{}", render::detail(&shift));
    Ok(())
}

async fn run_city(
    config: &AppConfig,
    source: Arc<dyn PositionSource>,
    gate: Option<Arc<dyn PermissionGate>>,
) -> anyhow::Result<()> {
    let mut location = LocationProvider::new(source, PositionOptions::from_app_config(config));
    if let Some(gate) = gate {
        location = location.with_permission_gate(gate);
    }
    let Some(coordinate) = location.acquire().await else {
        println!("Location unavailable.");
        return Ok(());
    };

    let geocoder = GeocodeClient::with_base_url(
        &config.geocode_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let resolver = CityResolver::new(Arc::new(geocoder), config.geocode_language.clone());
    resolver.resolve(Some(coordinate));
    let city = resolver
        .subscribe()
        .wait_for(|city| !city.loading)
        .await?
        .clone();

    println!("{coordinate}");
    println!("{}", render::headline(&city));
    Ok(())
}
