use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use std::sync::Arc;
use tracing::Instrument;

use super::{parse_point, Command};
use ilicoo::config;
use ilicoo::data::other_driver_routes;
use ilicoo::geo::{Coordinate, NominatimGeocoder, OsrmRouter};
use ilicoo::overlay::{SheetContent, SheetContext};
use ilicoo::pricing::format_fcfa;
use ilicoo::search::{PointField, TripSearch};
use ilicoo::telemetry::{create_flow_span, generate_correlation_id};
use ilicoo::trips::nearby_drivers;
use ilicoo::wizard::StepOutcome;

const NEARBY_RADIUS_KM: f64 = 2.0;

pub struct RouteCommand {
    pub from: String,
    pub to: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub seats: String,
    pub nearby: bool,
}

impl RouteCommand {
    fn date(&self) -> Result<NaiveDate> {
        match &self.date {
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{text}', expected YYYY-MM-DD")),
            None => Ok(Local::now().date_naive()),
        }
    }

    fn time(&self) -> Result<NaiveTime> {
        match &self.time {
            Some(text) => NaiveTime::parse_from_str(text, "%H:%M")
                .with_context(|| format!("Invalid time '{text}', expected HH:MM")),
            None => {
                let now = Local::now().time();
                NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
                    .context("Current time is not representable")
            }
        }
    }

    async fn pick(search: &mut TripSearch, field: PointField, at: Coordinate) -> Result<()> {
        let picker = search.picker_mut();
        picker.open_picker(field);
        if picker.select_coordinate(at).await.is_none() {
            bail!("Picker did not accept the {field:?} point");
        }
        search.confirm_point().await;
        Ok(())
    }

    async fn plan(&self) -> Result<()> {
        let config = config()?;
        let from = parse_point(&self.from)?;
        let to = parse_point(&self.to)?;

        print!("🔄 Looking up addresses and route... ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let geocoder = Arc::new(NominatimGeocoder::new(&config.maps).context("Invalid geocoder settings")?);
        let router = Arc::new(OsrmRouter::new(&config.maps).context("Invalid routing settings")?);
        let mut search = TripSearch::new(geocoder, router);

        Self::pick(&mut search, PointField::Departure, from).await?;
        Self::pick(&mut search, PointField::Arrival, to).await?;
        println!("✅");

        search.set_date(self.date()?);
        search.set_time(self.time()?);
        search.set_seats(self.seats.clone());

        // Walk the form the way the screen does so each step reports its own errors
        while !search.wizard().is_last_step() {
            if !matches!(search.next_step(), StepOutcome::Moved { .. }) {
                break;
            }
        }

        let mut sheet = SheetContext::new();
        if !search.open_recap(&mut sheet) {
            let messages: Vec<String> = search
                .wizard()
                .errors()
                .values()
                .map(ToString::to_string)
                .collect();
            bail!("Trip is incomplete: {}", messages.join("; "));
        }
        let Some(SheetContent::TripRecap(recap)) = sheet.content() else {
            bail!("Recap sheet did not open");
        };

        if search.picker().route().is_empty() {
            println!("⚠️  No driving route found; showing the minimum fare");
        }

        println!();
        println!("🧾 TRIP RECAP");
        println!("─────────────");
        println!("   🟢 From:     {}", recap.departure.address);
        println!("   🔴 To:       {}", recap.arrival.address);
        println!("   📅 When:     {} at {}", recap.formatted_date(), recap.formatted_time());
        println!("   💺 Seats:    {}", recap.seats);
        println!("   📏 Distance: {:.2} km (~{} min)", recap.distance_km, recap.duration_min);
        println!("   💰 Price:    {}", recap.formatted_price());
        println!("   🧭 {}", recap.directions_url());

        if self.nearby {
            let routes = other_driver_routes().context("Bundled driver routes are corrupt")?;
            let found = nearby_drivers(&routes, from, NEARBY_RADIUS_KM, recap.seats);
            println!();
            if found.is_empty() {
                println!("🚫 No drivers leaving within {NEARBY_RADIUS_KM} km");
            } else {
                println!("🚗 DRIVERS NEARBY:");
                for driver in found {
                    println!(
                        "   {} ({:.1}★) {} → {} · {:.1} km away · {} · {} seats",
                        driver.route.driver_name,
                        driver.route.driver_rating,
                        driver.route.from,
                        driver.route.to,
                        driver.distance_km,
                        driver.route.price,
                        driver.route.available_seats,
                    );
                }
            }
        }

        tracing::debug!(price = %format_fcfa(recap.estimated_price), "Route planned");
        Ok(())
    }
}

impl Command for RouteCommand {
    async fn execute(&self) -> Result<()> {
        let correlation_id = generate_correlation_id();
        self.plan()
            .instrument(create_flow_span("trip_search", Some(&correlation_id)))
            .await
    }
}
