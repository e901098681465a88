use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "ilicoo")]
#[command(about = "Carpooling in Bamako from the terminal")]
#[command(long_about = "ilicoo drives the carpooling client flows from a terminal: fare estimates, \
                       routes between neighborhoods, your trips and vehicles, and phone sign-in. \
                       Start with 'ilicoo route --from hamdallaye --to niamakoro'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the fare of a trip from its length
    Estimate {
        /// Trip distance in kilometers
        #[arg(help = "Distance in kilometers, e.g. 10 or 4.5")]
        distance_km: f64,
    },
    /// Plan a trip between two points and show its recap
    Route {
        /// Departure: a neighborhood id or "lat,lng"
        #[arg(long, help = "Neighborhood id (see 'ilicoo neighborhoods') or \"lat,lng\"")]
        from: String,
        /// Arrival: a neighborhood id or "lat,lng"
        #[arg(long, help = "Neighborhood id (see 'ilicoo neighborhoods') or \"lat,lng\"")]
        to: String,
        /// Departure date (YYYY-MM-DD), defaults to today
        #[arg(long, help = "Departure date as YYYY-MM-DD (defaults to today)")]
        date: Option<String>,
        /// Departure time (HH:MM), defaults to now
        #[arg(long, help = "Departure time as HH:MM (defaults to now)")]
        time: Option<String>,
        /// Seats to book
        #[arg(long, default_value = "1", help = "Number of seats (1-6)")]
        seats: String,
        /// Also list other drivers leaving near the departure point
        #[arg(long, help = "List drivers picking up within 2 km of the departure")]
        nearby: bool,
    },
    /// List the predefined pickup neighborhoods
    Neighborhoods {
        /// Case-insensitive filter on the name
        query: Option<String>,
    },
    /// Search places with the autocomplete service
    Places {
        /// Text typed in the search box
        query: String,
        /// Fetch details of the first prediction
        #[arg(long, help = "Resolve the first prediction to an address and coordinates")]
        details: bool,
    },
    /// Browse trips
    #[command(subcommand)]
    Trips(TripsCommand),
    /// Query the ilicoo REST API
    #[command(subcommand)]
    Api(ApiCommand),
    /// Inspect or clear the stored session
    #[command(subcommand)]
    Session(SessionCommand),
    /// Sign in with a phone number and a verification code
    SignIn {
        /// Phone number without the dial code
        #[arg(long, help = "Phone number (prompted for when omitted)")]
        phone: Option<String>,
        /// ISO country code of the dial code
        #[arg(long, default_value = "FR", help = "Country of the dial code, e.g. ML for +223")]
        country: String,
    },
    /// Call a phone number through the system dialer
    Call {
        /// Phone number, spaces allowed
        phone: String,
    },
}

#[derive(Subcommand)]
pub enum TripsCommand {
    /// Trips taken as a passenger
    Recent {
        /// Only show one tab: termine, annule or en-attente
        #[arg(long, help = "Filter by status: termine, annule, en-attente")]
        status: Option<String>,
    },
    /// Trips published as a driver, with passenger requests
    Published {
        /// Only show this trip
        #[arg(long, help = "Trip id to show (required with --accept/--reject)")]
        trip: Option<String>,
        /// Accept a pending passenger request on --trip
        #[arg(long, conflicts_with = "reject", requires = "trip")]
        accept: Option<String>,
        /// Reject a pending passenger request on --trip
        #[arg(long, requires = "trip")]
        reject: Option<String>,
    },
    /// Other drivers' routes near a point
    Drivers {
        /// Center of the search: a neighborhood id or "lat,lng"
        #[arg(long, default_value = "hamdallaye")]
        near: String,
        /// Search radius in kilometers
        #[arg(long, default_value = "5")]
        radius_km: f64,
        /// Minimum free seats
        #[arg(long, default_value = "1")]
        seats: u8,
    },
}

#[derive(Subcommand)]
pub enum ApiCommand {
    /// Vehicles of the signed-in user
    Vehicles {
        /// Flip the default flag of this vehicle before listing
        #[arg(long, help = "Vehicle id to make (or stop being) the default")]
        toggle_default: Option<u32>,
    },
    /// Passenger requests on the current route
    Passengers,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the signed-in user
    Show,
    /// Sign out and clear stored credentials
    SignOut,
}
