//! `dca geocode` / `dca reverse-geocode` commands

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, Coordinates, Geocoder, HttpGeocoder};

#[derive(clap::Args, Debug)]
pub struct GeocodeArgs {
    /// Street address (several words are joined with spaces)
    #[arg(required = true, trailing_var_arg = true)]
    pub address: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReverseGeocodeArgs {
    /// Latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn geocoder(config: &Config) -> Result<HttpGeocoder> {
    HttpGeocoder::new(config.geocoder_url(), config.geocoder_user_agent())
        .map_err(|e| miette::miette!("Cannot set up geocoder: {}", e))
}

pub fn run(args: GeocodeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let address = args.address.join(" ");
    let result = geocoder(&config)?.geocode(&address);

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| miette::miette!("{}", e))?;
        println!("{}", json);
        return Ok(());
    }

    match (result.coordinates, result.error) {
        (Some(c), _) => {
            if global.quiet {
                println!("{} {}", c.latitude, c.longitude);
            } else {
                println!("{} {} {}", style("✓").green(), address, style(c).cyan());
            }
            Ok(())
        }
        (None, error) => Err(miette::miette!(
            "Geocoding failed: {}",
            error.unwrap_or_else(|| "no result".to_string())
        )),
    }
}

pub fn run_reverse(args: ReverseGeocodeArgs, global: &GlobalOpts) -> Result<()> {
    if !(-90.0..=90.0).contains(&args.latitude) || !(-180.0..=180.0).contains(&args.longitude) {
        return Err(miette::miette!(
            "Coordinates out of range: {}, {}",
            args.latitude,
            args.longitude
        ));
    }

    let config = Config::load();
    let coordinates = Coordinates {
        latitude: args.latitude,
        longitude: args.longitude,
    };
    let result = geocoder(&config)?.reverse(coordinates);

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| miette::miette!("{}", e))?;
        println!("{}", json);
        return Ok(());
    }

    match (result.address, result.error) {
        (Some(address), _) => {
            if global.quiet {
                println!("{}", address);
            } else {
                println!("{} {} {}", style("✓").green(), style(coordinates).cyan(), address);
            }
            Ok(())
        }
        (None, error) => Err(miette::miette!(
            "Reverse geocoding failed: {}",
            error.unwrap_or_else(|| "no result".to_string())
        )),
    }
}
