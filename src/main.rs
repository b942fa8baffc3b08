mod advisor;
mod data;
mod economy;
mod farming;
mod session;
mod shared;
mod weather;

use std::io::Write;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use economy::format_money;
use session::GameSession;
use shared::*;
use weather::WeatherClient;

#[derive(Parser, Debug)]
#[command(name = "sproutfield")]
#[command(about = "Terminal farm: plant a 5x5 field, manage the books, harvest", version)]
struct Cli {
    /// Farm latitude, used for weather and crop advice.
    #[arg(long, default_value_t = DEFAULT_LATITUDE)]
    lat: f64,

    /// Farm longitude, used for weather and crop advice.
    #[arg(long, default_value_t = DEFAULT_LONGITUDE)]
    lon: f64,

    /// Skip the weather fetch and start with default conditions.
    #[arg(long)]
    offline: bool,

    /// Override the advisor chat model.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let location = GeoPoint {
        latitude: cli.lat,
        longitude: cli.lon,
    };

    let catalog = data::builtin_catalog()?;
    let weather = if cli.offline {
        info!("[Weather] Offline mode: using default conditions");
        WeatherSnapshot::default()
    } else {
        WeatherClient::new().fetch(location).await
    };

    let mut session = GameSession::new(catalog);

    println!("Sproutfield — a terminal farm at ({:.4}, {:.4})", cli.lat, cli.lon);
    println!("Conditions: {}", describe_conditions(&weather));
    println!(
        "Fill all {} plots to unlock the harvest. Type 'help' for commands.",
        FIELD_CELLS
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["status"] => print_status(&session),
            ["field"] => print_field(&session),
            ["crops"] => print_crops(&session),
            ["buy", "seeds", crop, count] => buy_seeds_command(&mut session, crop, count),
            ["buy", "water", liters] => match liters.parse::<f64>() {
                Ok(liters) => report_purchase(session.purchase_water(liters), &session),
                Err(_) => println!("Liters must be a number, e.g. buy water 50"),
            },
            ["buy", "fertilizer", kilos] => match kilos.parse::<f64>() {
                Ok(kilos) => report_purchase(session.purchase_fertilizer(kilos), &session),
                Err(_) => println!("Kilograms must be a number, e.g. buy fertilizer 20"),
            },
            ["plant", row, col, crop] => plant_command(&mut session, row, col, crop),
            ["irrigate"] => irrigate_command(&mut session),
            ["harvest"] => harvest_command(&mut session),
            ["advice"] => advice_command(cli.model.as_deref(), location, &weather).await,
            _ => println!("Unrecognized command. Type 'help' for the list."),
        }
    }

    println!(
        "Closing the books: {} earned over {} harvests, balance {}.",
        format_money(session.stats.total_earned),
        session.stats.total_harvests,
        format_money(session.wallet.balance)
    );
    Ok(())
}

fn describe_conditions(weather: &WeatherSnapshot) -> String {
    let mut conditions = format!(
        "{:.1}°C, {:.1}mm precipitation",
        weather.temperature_c, weather.precipitation_mm
    );
    if let Some(elevation) = weather.elevation_m {
        conditions.push_str(&format!(", {elevation:.0}m elevation"));
    }
    if let Some(soil) = &weather.soil_type {
        conditions.push_str(&format!(", {soil} soil"));
    }
    conditions
}

fn print_help() {
    println!("Commands:");
    println!("  status                     balance, stock, and running totals");
    println!("  field                      show the plot grid");
    println!("  crops                      catalog with prices and per-plot needs");
    println!("  buy seeds <crop> <count>   e.g. buy seeds maize 10");
    println!("  buy water <liters>");
    println!("  buy fertilizer <kg>");
    println!("  plant <row> <col> <crop>   rows and columns run 0-{}", FIELD_ROWS - 1);
    println!("  irrigate                   water and fertilize every planted plot");
    println!("  harvest                    apply resources, then reap mature plots");
    println!("  advice                     ask the crop advisor (needs GROQ_API_KEY)");
    println!("  quit");
}

fn print_status(session: &GameSession) {
    println!("Balance: {}", format_money(session.wallet.balance));
    println!(
        "Stock: {}L water, {}kg fertilizer",
        session.inventory.water, session.inventory.fertilizer
    );
    let mut seeds: Vec<(&String, &u32)> = session
        .inventory
        .seeds
        .iter()
        .filter(|(_, count)| **count > 0)
        .collect();
    seeds.sort_by(|a, b| a.0.cmp(b.0));
    if seeds.is_empty() {
        println!("Seeds: none");
    } else {
        let listing: Vec<String> = seeds
            .iter()
            .map(|(crop, count)| format!("{crop} x{count}"))
            .collect();
        println!("Seeds: {}", listing.join(", "));
    }
    println!(
        "Plots planted: {}/{}",
        session.field.planted_count(),
        FIELD_CELLS
    );
    println!(
        "Totals: {} earned, {} spent, {} harvests, {} transactions",
        format_money(session.stats.total_earned),
        format_money(session.stats.total_spent),
        session.stats.total_harvests,
        session.stats.total_transactions
    );
}

fn print_field(session: &GameSession) {
    for row in &session.field.cells {
        let mut line = String::new();
        for cell in row {
            match cell {
                Some(planted) => {
                    let icon = session
                        .catalog
                        .get(&planted.crop_type)
                        .map(|def| def.icon.as_str())
                        .unwrap_or("?");
                    line.push_str(&format!("[{}{}] ", icon, planted.growth_stage));
                }
                None => line.push_str("[ .] "),
            }
        }
        println!("{}", line.trim_end());
    }
}

fn print_crops(session: &GameSession) {
    for id in session.catalog.ids() {
        let Ok(def) = session.catalog.get(id) else {
            continue;
        };
        println!(
            "{} {:<12} seed {:>7}  sells {:>7}  yield {:>4}  needs {}L water, {}kg fertilizer",
            def.icon,
            id,
            format_money(def.base_cost),
            format_money(def.market_price),
            def.yield_per_plant,
            def.water_need,
            def.fertilizer_need
        );
    }
}

fn buy_seeds_command(session: &mut GameSession, crop: &str, count: &str) {
    let Ok(quantity) = count.parse::<u32>() else {
        println!("Seed count must be a whole number, e.g. buy seeds maize 10");
        return;
    };
    match session.purchase_seeds(crop, quantity) {
        Ok(receipt) => println!(
            "Bought {} {} seeds for {}. Balance: {}.",
            quantity,
            crop,
            format_money(receipt.cost),
            format_money(session.wallet.balance)
        ),
        Err(e) => println!("{e}"),
    }
}

fn report_purchase(outcome: Result<PurchaseReceipt, GameError>, session: &GameSession) {
    match outcome {
        Ok(receipt) => println!(
            "Bought {} {} for {}. Balance: {}.",
            receipt.quantity,
            receipt.item,
            format_money(receipt.cost),
            format_money(session.wallet.balance)
        ),
        Err(e) => println!("{e}"),
    }
}

fn plant_command(session: &mut GameSession, row: &str, col: &str, crop: &str) {
    let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
        println!("Rows and columns must be numbers, e.g. plant 0 3 wheat");
        return;
    };
    if row >= FIELD_ROWS || col >= FIELD_COLS {
        println!("Rows and columns run 0-{}.", FIELD_ROWS - 1);
        return;
    }
    match session.plant(row, col, crop) {
        Ok(()) => println!("Planted {crop} at ({row}, {col})."),
        Err(e) => println!("{e}"),
    }
}

fn irrigate_command(session: &mut GameSession) {
    match session.apply_resources() {
        Ok(result) if result.cells_grown == 0 => println!("Nothing planted; nothing applied."),
        Ok(result) => println!(
            "Applied {}L water and {}kg fertilizer across {} plots. The crops shot up.",
            result.water_used, result.fertilizer_used, result.cells_grown
        ),
        Err(e) => println!("{e}"),
    }
}

fn harvest_command(session: &mut GameSession) {
    let can = match session.can_harvest() {
        Ok(can) => can,
        Err(e) => {
            println!("{e}");
            return;
        }
    };
    if !can {
        if !session.field.is_full() {
            println!(
                "Harvest locked: {}/{} plots planted. Fill the field first.",
                session.field.planted_count(),
                FIELD_CELLS
            );
        } else if let Ok(demand) = session.field_demand() {
            println!(
                "Harvest locked: the field needs {}L water and {}kg fertilizer (stock: {}L, {}kg).",
                demand.water,
                demand.fertilizer,
                session.inventory.water,
                session.inventory.fertilizer
            );
        }
        return;
    }
    if let Err(e) = session.apply_resources() {
        println!("{e}");
        return;
    }
    match session.harvest() {
        Ok(summary) => {
            println!("Harvested {} mature plots.", summary.cells_harvested);
            let mut yields: Vec<(&String, &f64)> = summary.yields.iter().collect();
            yields.sort_by(|a, b| a.0.cmp(b.0));
            for (crop, units) in yields {
                println!("  {crop}: {units} units");
            }
            println!(
                "Earned {}. Balance: {}.",
                format_money(summary.earnings),
                format_money(session.wallet.balance)
            );
        }
        Err(e) => println!("{e}"),
    }
}

async fn advice_command(
    model_override: Option<&str>,
    location: GeoPoint,
    weather: &WeatherSnapshot,
) {
    let config = match advisor::AdvisorConfig::from_env() {
        Ok(mut config) => {
            if let Some(model) = model_override {
                config.model = model.to_owned();
            }
            config
        }
        Err(e) => {
            println!("Advisor unavailable: {e}");
            return;
        }
    };
    let client = advisor::AdvisorClient::new(config);
    println!("Consulting the advisor...");
    match client.recommend_crops(location, weather).await {
        Ok(crops) if crops.is_empty() => println!("The advisor had no suggestions."),
        Ok(crops) => {
            println!("Recommended for this location:");
            for (i, crop) in crops.iter().enumerate() {
                println!("  {}. {}", i + 1, crop);
            }
        }
        Err(e) => println!("Advisor request failed: {e}"),
    }
}
