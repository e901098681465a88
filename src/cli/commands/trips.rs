use anyhow::{anyhow, Context, Result};

use super::{parse_point, Command};
use ilicoo::data;
use ilicoo::overlay::SheetContext;
use ilicoo::trips::{
    nearby_drivers, trips_with_status, PassengerStatus, PublishedTrip, PublishedTrips, RecentTrip,
    TripStatus,
};

pub struct RecentTripsCommand {
    pub status: Option<String>,
}

fn print_recent(trip: &RecentTrip) {
    println!("   #{} {} → {}", trip.id, trip.from, trip.to);
    println!("      📅 {} · 💰 {}", trip.date, trip.price);
    if let Some(driver) = &trip.driver {
        println!("      👤 {} ({:.1}★) · 📞 {}", driver.name, driver.rating, driver.phone);
    }
}

impl Command for RecentTripsCommand {
    async fn execute(&self) -> Result<()> {
        let trips = data::recent_trips().context("Bundled recent trips are corrupt")?;
        let tabs = match &self.status {
            Some(text) => vec![TripStatus::parse_tab(text)
                .ok_or_else(|| anyhow!("Unknown status '{text}', expected termine, annule or en-attente"))?],
            None => TripStatus::TABS.to_vec(),
        };

        for status in tabs {
            let in_tab = trips_with_status(&trips, status);
            println!("{} ({})", status.label(), in_tab.len());
            println!("────────────────────");
            if in_tab.is_empty() {
                println!("   No trips");
            }
            for trip in in_tab {
                print_recent(trip);
            }
            println!();
        }
        Ok(())
    }
}

pub struct PublishedTripsCommand {
    pub trip: Option<String>,
    pub accept: Option<String>,
    pub reject: Option<String>,
}

fn print_published(trip: &PublishedTrip) {
    println!("🚗 Trip {} · {} → {}", trip.id, trip.from, trip.to);
    println!(
        "   {} · {} {} · {} · {}/{} seats free · {}",
        trip.status.label(),
        trip.date,
        trip.time,
        trip.price,
        trip.available_seats,
        trip.total_seats,
        trip.vehicle_name
    );
    if trip.passengers.is_empty() {
        println!("   No passenger requests yet");
    }
    for passenger in &trip.passengers {
        let badge = match passenger.status {
            PassengerStatus::Pending => "⏳",
            PassengerStatus::Accepted => "✅",
            PassengerStatus::Rejected => "❌",
        };
        println!(
            "   {badge} [{}] {} ({:.1}★) · {} seat(s) · requested {}",
            passenger.id, passenger.name, passenger.rating, passenger.seats, passenger.requested_at
        );
    }
    if trip.pending_count() > 0 {
        println!("   {} request(s) awaiting your answer", trip.pending_count());
    }
}

impl Command for PublishedTripsCommand {
    async fn execute(&self) -> Result<()> {
        let mut trips = PublishedTrips::new(data::published_trips().context("Bundled published trips are corrupt")?);
        let mut sheet = SheetContext::new();

        if let Some(trip_id) = &self.trip {
            trips.open_trip_sheet(trip_id, &mut sheet)?;
            if let Some(passenger_id) = &self.accept {
                trips.accept_passenger(trip_id, passenger_id, &mut sheet)?;
                println!("✅ Accepted {passenger_id} on trip {trip_id}");
            }
            if let Some(passenger_id) = &self.reject {
                trips.reject_passenger(trip_id, passenger_id, &mut sheet)?;
                println!("❌ Rejected {passenger_id} on trip {trip_id}");
            }

            let trip = trips.find(trip_id)?;
            print_published(trip);
            if trips.open_all_passengers_map(trip_id, &mut sheet)? {
                let active = trip.passengers.iter().filter(|p| p.is_active()).count();
                println!("   🗺️  {active} passenger route(s) on the trip map");
            }
            return Ok(());
        }

        for trip in trips.trips() {
            print_published(trip);
            println!();
        }
        Ok(())
    }
}

pub struct DriversCommand {
    pub near: String,
    pub radius_km: f64,
    pub seats: u8,
}

impl Command for DriversCommand {
    async fn execute(&self) -> Result<()> {
        let near = parse_point(&self.near)?;
        let routes = data::other_driver_routes().context("Bundled driver routes are corrupt")?;
        let found = nearby_drivers(&routes, near, self.radius_km, self.seats);

        if found.is_empty() {
            println!("🚫 No drivers within {} km with {} free seat(s)", self.radius_km, self.seats);
            return Ok(());
        }
        for driver in found {
            let route = driver.route;
            println!(
                "🚗 {} ({:.1}★) {} → {}",
                route.driver_name, route.driver_rating, route.from, route.to
            );
            println!(
                "   {:.1} km away · leaves {} · {} · {} seat(s)",
                driver.distance_km, route.departure_at, route.price, route.available_seats
            );
        }
        Ok(())
    }
}
