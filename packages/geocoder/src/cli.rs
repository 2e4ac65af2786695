//! Command-line interface for the geocoder.

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::{validate_latitude, validate_longitude};
use crate::error::Result;
use crate::geocoder::{Geocoder, GoogleGeocoder};
use crate::types::{Address, LatLng};

/// Geocoder - Convert postal addresses to coordinates and back.
#[derive(Parser)]
#[command(name = "geocoder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the coordinates of an address.
    Geocode {
        /// Country
        #[arg(long)]
        country: Option<String>,

        /// State or region
        #[arg(long)]
        state: Option<String>,

        /// Town
        #[arg(long)]
        town: Option<String>,

        /// Street
        #[arg(long)]
        street: Option<String>,

        /// Postal code
        #[arg(long)]
        postal_code: Option<String>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Look up the address at a coordinate.
    Reverse {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,

        #[command(flatten)]
        service: ServiceArgs,
    },
}

/// Options shared by both lookups.
#[derive(Args, Debug, Default)]
pub struct ServiceArgs {
    /// Service API key
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Service endpoint (default: the public geocoding endpoint)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Geocode {
            country,
            state,
            town,
            street,
            postal_code,
            service,
        } => {
            let address = Address {
                country,
                state,
                town,
                address: street,
                postal_code,
            };
            geocode_command(&address, &service)
        }
        Commands::Reverse { lat, lng, service } => reverse_command(lat, lng, &service),
    }
}

fn build_geocoder(service: &ServiceArgs) -> Result<GoogleGeocoder> {
    let mut geocoder = GoogleGeocoder::new()?;
    if let Some(base_url) = &service.base_url {
        geocoder = geocoder.with_base_url(base_url);
    }
    if let Some(api_key) = &service.api_key {
        geocoder.set_api_key(api_key);
    }
    Ok(geocoder)
}

/// Run `lookup` behind a progress spinner.
fn with_spinner<T>(message: String, lookup: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = lookup();
    pb.finish_and_clear();
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Execute the geocode command.
fn geocode_command(address: &Address, service: &ServiceArgs) -> Result<()> {
    let geocoder = build_geocoder(service)?;

    let location = with_spinner(format!("Looking up {address}..."), || {
        geocoder.geocode(address)
    })?;

    if service.json {
        return print_json(&location);
    }

    println!("{} {}", style("Address:").bold(), style(address).cyan());
    println!("  Latitude: {}", style(location.lat).green());
    println!("  Longitude: {}", style(location.lng).green());
    Ok(())
}

/// Execute the reverse command.
fn reverse_command(lat: f64, lng: f64, service: &ServiceArgs) -> Result<()> {
    // Validate inputs before making HTTP requests
    validate_latitude(lat)?;
    validate_longitude(lng)?;

    let geocoder = build_geocoder(service)?;
    let location = LatLng::new(lat, lng);

    let address = with_spinner(format!("Looking up {location}..."), || {
        geocoder.revert(&location)
    })?;

    if service.json {
        return print_json(&address);
    }

    println!("{} {}", style("Location:").bold(), style(location).cyan());
    let fields = [
        ("Street", &address.address),
        ("Postal code", &address.postal_code),
        ("Town", &address.town),
        ("State", &address.state),
        ("Country", &address.country),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {}", style(value).green());
        }
    }
    Ok(())
}
