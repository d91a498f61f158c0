//! Stars CLI
//!
//! Command-line interface for the trip booking API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use stars_client::StarsClient;

#[derive(Parser)]
#[command(name = "stars")]
#[command(author, version, about = "Trip booking API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the booking API
    #[arg(long, env = "STARS_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Origin the payment page should return to after checkout
    #[arg(long, env = "STARS_ORIGIN")]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trip catalog operations
    Trips {
        #[command(subcommand)]
        action: TripCommands,
    },
    /// Open a checkout session and print the payment URL
    Checkout {
        /// Trip ID
        #[arg(long)]
        trip: String,
        /// Departure date, one of the trip's listed dates
        #[arg(long)]
        date: String,
    },
    /// Show the public payment configuration
    Config,
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum TripCommands {
    /// List all bookable trips
    List,
    /// Get trip details
    Get {
        /// Trip ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = StarsClient::new(&cli.api_url);
    if let Some(origin) = cli.origin {
        client = client.with_origin(origin);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Trips { action } => match action {
            TripCommands::List => {
                let trips = client.list_trips().await?;
                println!("{}", serde_json::to_string_pretty(&trips)?);
            }
            TripCommands::Get { id } => {
                let trip = client.get_trip(&id).await?;
                println!("{}", serde_json::to_string_pretty(&trip)?);
            }
        },

        Commands::Checkout { trip, date } => {
            let session = client.create_checkout_session(&trip, &date).await?;
            println!("{}", session.url);
        }

        Commands::Config => {
            let config = client.public_config().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
