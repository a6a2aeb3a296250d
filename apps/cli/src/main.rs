use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::display::{format_price, humanize_token};
use client_core::{FormSession, PredictionApi, PredictorClient};

#[derive(Parser, Debug)]
#[command(about = "Command-line client for the car price prediction service")]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the selectable makes, models and conditions.
    Options {
        /// Print the raw catalog JSON instead of readable labels.
        #[arg(long)]
        json: bool,
    },
    /// Request a price estimate for one car.
    Predict {
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        condition: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        engine_size: String,
        #[arg(long)]
        horse_power: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let client = PredictorClient::new(&args.server_url)
        .with_context(|| format!("cannot use {} as server url", args.server_url))?;

    match args.command {
        Command::Options { json } => {
            let catalog = client
                .fetch_options()
                .await
                .context("failed to load car options")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
                return Ok(());
            }
            println!("Makes:");
            for make in &catalog.makes {
                println!("  {} ({make})", humanize_token(make));
            }
            println!("Models:");
            for model in &catalog.models {
                println!("  {} ({model})", humanize_token(model));
            }
            println!("Conditions:");
            for condition in &catalog.conditions {
                println!("  {} ({condition})", humanize_token(condition));
            }
        }
        Command::Predict {
            make,
            model,
            condition,
            age,
            engine_size,
            horse_power,
        } => {
            let catalog = client
                .fetch_options()
                .await
                .context("failed to load car options")?;

            let mut session = FormSession::default();
            session.make = make;
            session.model = model;
            session.condition = condition;
            session.age = age;
            session.engine_size = engine_size;
            session.horse_power = horse_power;
            // Installing the catalog drops any selection it does not offer,
            // so unknown values surface as the usual missing-selection error.
            session.set_catalog(catalog);

            let request = session.build_request()?;
            let price = client.predict(&request).await?;
            println!("Estimated Price: {}", format_price(price));
        }
    }

    Ok(())
}
