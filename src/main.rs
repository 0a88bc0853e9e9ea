use clap::Parser;
use delitrack::sdk::{
    config::{geocoder_base_url, DirectionsConfig, OrdersConfig},
    orders::fetch_user_orders,
    routing::{
        Coordinate, DirectionsProvider, EnvLocationSource, FixedLocationSource, MapboxProvider,
        OsrmProvider, PlaceError, PlaceResolver,
    },
    tracking::Tracker,
    util::{log::init_logging, rate_limit::Limiter},
};
use reqwest::blocking::Client as HttpClient;
use std::error::Error;

/// A CLI tool to preview the driving route from a venue to your delivery location
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The venue name to search for (e.g., "Hotel Sea View")
    #[arg(short, long)]
    venue: String,

    /// Index of the search result to route from
    #[arg(short, long, default_value_t = 0)]
    choice: usize,

    /// [Optional] Override the delivery latitude
    #[arg(long)]
    lat: Option<f64>,

    /// [Optional] Override the delivery longitude
    #[arg(long)]
    lng: Option<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Start with our custom logger
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- 1. Dependency Initialization ---
    let provider: Box<dyn DirectionsProvider> = match DirectionsConfig::from_env()? {
        DirectionsConfig::Mapbox { access_token } => {
            Box::new(MapboxProvider::new(access_token, Limiter::per_minute(60)))
        }
        DirectionsConfig::Osrm { base_url } => Box::new(OsrmProvider::new(base_url)),
    };
    let resolver = PlaceResolver::new(geocoder_base_url());
    let mut tracker = Tracker::new(resolver, provider);

    // --- 2. Order History (optional, never fatal) ---
    if let Some(orders_config) = OrdersConfig::from_env() {
        let http_client = HttpClient::new();
        match fetch_user_orders(&orders_config, &http_client) {
            Ok(orders) => {
                log::info!("Found {} past orders", orders.len());
                for order in &orders {
                    let items = order
                        .items
                        .iter()
                        .map(|item| format!("{} x {}", item.name, item.quantity))
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("[ORDER] {} | {:.2} | {}", items, order.amount, order.status);
                }
            }
            Err(err) => log::warn!("Could not fetch order history: {}", err),
        }
    }

    // --- 3. Locate, Search, Select, Route ---
    let location = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => tracker.start(&FixedLocationSource(Coordinate::new(lat, lng))),
        _ => tracker.start(&EnvLocationSource),
    };
    log::info!(
        "Delivery location set to ({}, {})",
        location.latitude,
        location.longitude
    );

    let candidates = match tracker.search(&cli.venue) {
        Ok(candidates) => candidates.to_vec(),
        Err(PlaceError::NoMatches) => {
            println!("No hotels found.");
            return Ok(());
        }
        Err(PlaceError::NoneNearby { .. }) => {
            println!("No nearby hotels within 5 km found.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    for (idx, candidate) in candidates.iter().enumerate() {
        println!("[{}] {}", idx, candidate.display_name);
    }

    let Some(selected) = tracker.select(cli.choice) else {
        return Err(format!("No search result at index {}", cli.choice).into());
    };
    println!("Routing from: {}", selected.display_name);

    // --- 4. Output Results ---
    match tracker.route() {
        Some(estimate) => {
            println!("Estimated Time: {:.1} mins", estimate.duration_minutes);
            println!("Distance: {:.2} km", estimate.distance_km);
            println!("{}", estimate.advisory().message());
        }
        None => println!("No route available."),
    }

    Ok(())
}
