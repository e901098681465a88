use anyhow::{bail, Context, Result};

use super::Command;
use ilicoo::config;
use ilicoo::geo::{filter_neighborhoods, PlacesClient};

pub struct NeighborhoodsCommand {
    pub query: Option<String>,
}

impl Command for NeighborhoodsCommand {
    async fn execute(&self) -> Result<()> {
        let found = filter_neighborhoods(self.query.as_deref().unwrap_or_default());
        if found.is_empty() {
            println!("📍 No neighborhood matches '{}'", self.query.as_deref().unwrap_or_default());
            return Ok(());
        }
        for neighborhood in found {
            println!(
                "📍 {:<14} {:<16} {:.4}, {:.4}",
                neighborhood.id, neighborhood.name, neighborhood.latitude, neighborhood.longitude
            );
        }
        Ok(())
    }
}

pub struct PlacesCommand {
    pub query: String,
    pub details: bool,
}

impl Command for PlacesCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        if config.maps.google_maps_api_key.is_none() {
            bail!("No places API key; set EXPO_PUBLIC_GOOGLE_MAPS_API_KEY or maps.google_maps_api_key");
        }
        let client = PlacesClient::new(&config.maps).context("Invalid places settings")?;

        let predictions = client.autocomplete(&self.query).await;
        if predictions.is_empty() {
            println!("🔍 No places found for '{}'", self.query);
            return Ok(());
        }
        for prediction in &predictions {
            println!(
                "🔍 {} · {}",
                prediction.structured_formatting.main_text,
                prediction.structured_formatting.secondary_text
            );
        }

        if self.details {
            let first = &predictions[0];
            match client.details(&first.place_id).await {
                Some(details) => {
                    let at = details.coordinate();
                    println!();
                    println!("📌 {}", details.name);
                    println!("   {}", details.formatted_address);
                    println!("   {:.5}, {:.5}", at.latitude, at.longitude);
                }
                None => println!("⚠️  No details for '{}'", first.description),
            }
        }
        Ok(())
    }
}
