use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;

use ilicoo::config::IlicooConfig;
use ilicoo::geo::{find_neighborhood, Coordinate};
use ilicoo::session::{AuthClient, FileCredentialStore};

pub mod api;
pub mod call;
pub mod estimate;
pub mod places;
pub mod route;
pub mod session;
pub mod sign_in;
pub mod trips;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Auth client backed by the credential directory from the config.
pub fn auth_client(config: &IlicooConfig) -> Result<Arc<AuthClient>> {
    let store = Arc::new(FileCredentialStore::new(&config.auth.storage_dir));
    let client = AuthClient::new(&config.auth, store).context("Failed to create auth client")?;
    Ok(Arc::new(client))
}

/// Accepts a neighborhood id (`hamdallaye`) or a `lat,lng` pair.
pub fn parse_point(text: &str) -> Result<Coordinate> {
    if let Some(neighborhood) = find_neighborhood(&text.trim().to_lowercase()) {
        return Ok(neighborhood.coordinate());
    }

    let Some((lat, lng)) = text.split_once(',') else {
        bail!("'{text}' is neither a neighborhood id nor a \"lat,lng\" pair");
    };
    let latitude: f64 = lat.trim().parse().map_err(|_| anyhow!("Invalid latitude '{lat}'"))?;
    let longitude: f64 = lng.trim().parse().map_err(|_| anyhow!("Invalid longitude '{lng}'"))?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        bail!("Coordinates out of range: {latitude}, {longitude}");
    }
    Ok(Coordinate::new(latitude, longitude))
}

pub async fn show_getting_started() -> Result<()> {
    println!("🚗 ilicoo - carpooling in Bamako");
    println!();
    println!("To get started:");
    println!("  💰 ilicoo estimate 10                                 # Fare for 10 km");
    println!("  🗺️  ilicoo route --from hamdallaye --to niamakoro      # Plan a trip");
    println!("  📍 ilicoo neighborhoods                               # Pickup areas");
    println!("  🧾 ilicoo trips recent                                # Your trips");
    println!();
    println!("Account:");
    println!("  📱 ilicoo sign-in --country ML                        # Phone sign-in");
    println!("  👤 ilicoo session show                                # Who is signed in");
    println!();
    println!("💡 Set ILICOO__API__BASE_URL or ilicoo.toml to point at your backend.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_ids_resolve() {
        let at = parse_point("Niamakoro").unwrap();
        assert_eq!(at, Coordinate::new(12.5854, -7.9502));
    }

    #[test]
    fn coordinate_pairs_parse() {
        assert_eq!(parse_point(" 12.6, -8.0 ").unwrap(), Coordinate::new(12.6, -8.0));
        assert!(parse_point("12.6").is_err());
        assert!(parse_point("north,-8").is_err());
        assert!(parse_point("95,-8").is_err());
    }
}
