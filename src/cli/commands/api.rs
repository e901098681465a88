use anyhow::{Context, Result};
use tracing::warn;

use super::{auth_client, Command};
use ilicoo::api::{get_route_passengers, get_vehicles, ApiClient};
use ilicoo::config::{self, IlicooConfig};
use ilicoo::data::sample_vehicles;
use ilicoo::trips::{default_vehicle, toggle_default};

fn api_client(config: &IlicooConfig) -> Result<ApiClient> {
    let auth = auth_client(config)?;
    ApiClient::new(&config.api, Some(auth)).context("Failed to create API client")
}

pub struct VehiclesCommand {
    pub toggle_default: Option<u32>,
}

impl Command for VehiclesCommand {
    async fn execute(&self) -> Result<()> {
        let config = config::config()?;
        let api = api_client(config)?;
        let mut vehicles = match get_vehicles(&api).await {
            Ok(vehicles) => vehicles,
            Err(e) => {
                warn!(error = %e, base_url = %api.base_url(), "Vehicle list unavailable");
                println!("📴 Could not reach {} ({e}); showing sample vehicles", api.base_url());
                sample_vehicles()
            }
        };

        if let Some(vehicle_id) = self.toggle_default {
            let is_default = toggle_default(&mut vehicles, vehicle_id)?;
            let verb = if is_default { "is now" } else { "is no longer" };
            println!("⭐ Vehicle {vehicle_id} {verb} the default");
        }

        if vehicles.is_empty() {
            println!("🚙 No vehicles registered");
            return Ok(());
        }
        for vehicle in &vehicles {
            println!(
                "🚙 [{}] {} · {} · {} · up to {} passengers · {}",
                vehicle.id,
                vehicle.name,
                vehicle.color,
                vehicle.registration,
                vehicle.maximum_passenger,
                vehicle.role_label()
            );
        }
        if default_vehicle(&vehicles).is_none() {
            println!("💡 No default vehicle set");
        }
        Ok(())
    }
}

pub struct PassengersCommand;

impl Command for PassengersCommand {
    async fn execute(&self) -> Result<()> {
        let config = config::config()?;
        let api = api_client(config)?;
        let passengers = get_route_passengers(&api)
            .await
            .with_context(|| format!("Failed to fetch passengers from {}", api.base_url()))?;

        if passengers.is_empty() {
            println!("🧍 No passenger requests on this route");
            return Ok(());
        }
        for passenger in &passengers {
            println!(
                "🧍 [{}] {} ({:.1}★) · {:?} · {} seat(s)",
                passenger.id, passenger.name, passenger.rating, passenger.status, passenger.seats
            );
        }
        Ok(())
    }
}
