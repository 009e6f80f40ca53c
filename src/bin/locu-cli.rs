use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use locu_api::{constants::DEFAULT_BASE_URL, ApiKey, Client, Found, SearchConditions};
use log::info;
use serde_json::Value;

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(short = 'k', long, env = "LOCU_API_KEY", global = true)]
    pub api_key: Option<String>,

    #[arg(short = 'b', long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "find", about = "Look up venues by id")]
    Find {
        #[arg(required = true, help = "Venue ids; several are fetched in one request")]
        ids: Vec<String>,
    },

    #[clap(name = "search", about = "Search for venues")]
    Search {
        #[arg(short = 'l', long, value_name = "LAT,LONG", value_parser = parse_location)]
        location: Option<(f64, f64)>,

        #[arg(long, value_name = "LAT1,LONG1,LAT2,LONG2", value_parser = parse_bounds)]
        bounds: Option<[f64; 4]>,

        #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
}

fn parse_coordinates(raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("`{}` is not a coordinate: {}", part, e))
        })
        .collect()
}

fn parse_location(raw: &str) -> Result<(f64, f64), String> {
    match parse_coordinates(raw)?.as_slice() {
        [lat, long] => Ok((*lat, *long)),
        _ => Err("expected LAT,LONG".to_string()),
    }
}

fn parse_bounds(raw: &str) -> Result<[f64; 4], String> {
    match parse_coordinates(raw)?.as_slice() {
        [lat1, long1, lat2, long2] => Ok([*lat1, *long1, *lat2, *long2]),
        _ => Err("expected LAT1,LONG1,LAT2,LONG2".to_string()),
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| "expected KEY=VALUE".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let Some(api_key) = args.global_opts.api_key.as_deref() else {
        bail!("an API key is required (pass --api-key or set LOCU_API_KEY)");
    };
    let client = Client::builder()
        .api_key(ApiKey::from_raw(api_key))
        .base_url(args.global_opts.base_url)
        .build()
        .context("invalid client configuration")?;

    let output = match args.subcommand {
        Command::Find { mut ids } => {
            let found = if ids.len() == 1 {
                client.find(ids.remove(0)).await?
            } else {
                client.find(ids).await?
            };
            match found {
                Some(Found::One(venue)) => venue.to_hash(),
                Some(Found::Many(venues)) => venues.to_hash(),
                None => {
                    info!("no venues found");
                    Value::Null
                }
            }
        }
        Command::Search {
            location,
            bounds,
            filters,
        } => {
            let mut conditions = SearchConditions::new();
            if let Some((lat, long)) = location {
                conditions = conditions.location(lat, long);
            }
            if let Some([lat1, long1, lat2, long2]) = bounds {
                conditions = conditions.bounds(lat1, long1, lat2, long2);
            }
            for (key, value) in filters {
                conditions = conditions.filter(key, value);
            }
            client.search(&conditions).await?.to_hash()
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
