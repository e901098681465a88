use anyhow::Result;
use clap::Parser;

mod cli;

use cli::commands::api::{PassengersCommand, VehiclesCommand};
use cli::commands::call::CallCommand;
use cli::commands::estimate::EstimateCommand;
use cli::commands::places::{NeighborhoodsCommand, PlacesCommand};
use cli::commands::route::RouteCommand;
use cli::commands::session::{ShowSessionCommand, SignOutCommand};
use cli::commands::sign_in::SignInCommand;
use cli::commands::trips::{DriversCommand, PublishedTripsCommand, RecentTripsCommand};
use cli::commands::{show_getting_started, Command};
use cli::{ApiCommand, Cli, Commands, SessionCommand, TripsCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ilicoo::config()?;
    ilicoo::init_telemetry(&config.observability)?;
    ilicoo::init_config()?;

    tokio::runtime::Runtime::new()?.block_on(async {
        match cli.command {
            // Default behavior: no subcommand - explain what the tool does
            None => show_getting_started().await,
            Some(Commands::Estimate { distance_km }) => {
                EstimateCommand::new(distance_km).execute().await
            }
            Some(Commands::Route {
                from,
                to,
                date,
                time,
                seats,
                nearby,
            }) => {
                RouteCommand {
                    from,
                    to,
                    date,
                    time,
                    seats,
                    nearby,
                }
                .execute()
                .await
            }
            Some(Commands::Neighborhoods { query }) => {
                NeighborhoodsCommand { query }.execute().await
            }
            Some(Commands::Places { query, details }) => {
                PlacesCommand { query, details }.execute().await
            }
            Some(Commands::Trips(TripsCommand::Recent { status })) => {
                RecentTripsCommand { status }.execute().await
            }
            Some(Commands::Trips(TripsCommand::Published {
                trip,
                accept,
                reject,
            })) => {
                PublishedTripsCommand {
                    trip,
                    accept,
                    reject,
                }
                .execute()
                .await
            }
            Some(Commands::Trips(TripsCommand::Drivers {
                near,
                radius_km,
                seats,
            })) => {
                DriversCommand {
                    near,
                    radius_km,
                    seats,
                }
                .execute()
                .await
            }
            Some(Commands::Api(ApiCommand::Vehicles { toggle_default })) => {
                VehiclesCommand { toggle_default }.execute().await
            }
            Some(Commands::Api(ApiCommand::Passengers)) => PassengersCommand.execute().await,
            Some(Commands::Session(SessionCommand::Show)) => ShowSessionCommand.execute().await,
            Some(Commands::Session(SessionCommand::SignOut)) => SignOutCommand.execute().await,
            Some(Commands::SignIn { phone, country }) => {
                SignInCommand { phone, country }.execute().await
            }
            Some(Commands::Call { phone }) => CallCommand { phone }.execute().await,
        }
    })
}
