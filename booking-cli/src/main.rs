//! Booking CLI - offline quotes and form schema

use anyhow::{Context, Result};
use booking_core::{FormSchema, QuoteCalculator, QuoteRequest};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use tracing::debug;

#[derive(Parser)]
#[command(name = "booking")]
#[command(about = "Booking engine - price quotes and booking form schema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a price quote
    Quote {
        /// JSON file holding a quote request body
        #[arg(short = 'i', long)]
        file: Option<String>,

        /// Tenant identifier
        #[arg(long)]
        tenant: Option<String>,

        /// Booking type
        #[arg(long)]
        booking_type: Option<String>,

        /// Vehicle class code (sedan, suv, van)
        #[arg(long)]
        vehicle: Option<String>,

        /// Passenger count
        #[arg(long)]
        pax: Option<u32>,

        /// Trip distance in kilometres
        #[arg(short, long)]
        distance_km: Option<f64>,

        /// Route as a JSON value
        #[arg(long)]
        route: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the booking form schema as JSON
    Schema {
        /// Tenant identifier
        #[arg(long)]
        tenant: Option<String>,

        /// Booking type
        #[arg(long)]
        booking_type: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("booking=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Quote {
            file,
            tenant,
            booking_type,
            vehicle,
            pax,
            distance_km,
            route,
            format,
        } => {
            let mut request = match file {
                Some(path) => {
                    let contents = fs::read(&path)
                        .with_context(|| format!("Failed to read file: {}", path))?;
                    QuoteRequest::from_slice(&contents)
                        .with_context(|| format!("Invalid quote request in {}", path))?
                }
                None => QuoteRequest::default(),
            };

            if let Some(tenant) = tenant {
                request.tenant = Some(tenant);
            }
            if let Some(booking_type) = booking_type {
                request.booking_type = Some(booking_type);
            }
            if let Some(vehicle) = vehicle {
                request = request.with_vehicle(vehicle);
            }
            if let Some(pax) = pax {
                request.pax = Some(pax.into());
            }
            if let Some(km) = distance_km {
                request = request.with_distance_km(km);
            }
            if let Some(route) = route {
                let route = serde_json::from_str(&route).context("--route must be valid JSON")?;
                request.route = Some(route);
            }

            quote_command(request, &format)?;
        }
        Commands::Schema {
            tenant,
            booking_type,
        } => {
            let schema = FormSchema::for_tenant(tenant.as_deref(), booking_type.as_deref());
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn quote_command(request: QuoteRequest, format: &str) -> Result<()> {
    debug!("Quote request: {:?}", request);
    let quote = QuoteCalculator::new().quote(request);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        _ => {
            let b = &quote.breakdown;
            println!("\n{} Quote", "═".blue().bold());
            println!("{} Tenant: {}", "▸".blue(), quote.tenant);
            println!("{} Booking type: {}", "▸".blue(), quote.booking_type);
            println!("{} Vehicle: {}", "▸".blue(), quote.inputs.vehicle);
            println!("{} Passengers: {}", "▸".blue(), quote.inputs.pax);
            println!(
                "{} Fare: {} + {} km x {} = {}",
                "▸".blue(),
                b.base,
                b.km,
                b.per_km,
                b.raw()
            );
            println!("{} Vehicle multiplier: x{}", "▸".blue(), b.vehicle_adj);
            println!(
                "\n{} Total: {} {:.2}",
                "✓".green(),
                quote.currency,
                quote.total
            );
        }
    }

    Ok(())
}
