use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use jara_client::{ClientConfig, FeeApi, NetworkHttpClient};
use jara_storefront::address::DeliveryLocations;
use jara_storefront::search::{
    BackendEnhancedStrategy, KeywordStrategy, SearchFilters, SearchHistory, SearchPanel,
    StopWordStrategy, VoiceAnalytics,
};
use jara_storefront::{Storage, StorefrontConfig, TracingNotifier, init_logger_with_file};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Coordinates, FeeCalculationRequest};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "jara", about = "Jara storefront command line", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Print results as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote delivery and service fees
    Quote(QuoteArgs),
    /// List states, or the local governments of one state
    States(StatesArgs),
    /// Search businesses
    Search(SearchArgs),
}

#[derive(Args)]
struct QuoteArgs {
    #[arg(long)]
    business_id: String,
    #[arg(long, default_value = "")]
    business_address: String,
    #[arg(long, env = "JARA_DEFAULT_ORIGIN_LAT")]
    business_lat: Option<f64>,
    #[arg(long, env = "JARA_DEFAULT_ORIGIN_LNG")]
    business_lng: Option<f64>,
    #[arg(long)]
    address: String,
    #[arg(long)]
    lat: f64,
    #[arg(long)]
    lng: f64,
    /// Local government id of the delivery address
    #[arg(long)]
    lga: String,
    #[arg(long, default_value_t = 1)]
    packs: usize,
    #[arg(long)]
    order_value: Decimal,
}

#[derive(Args)]
struct StatesArgs {
    /// Show the local governments of this state instead
    #[arg(long)]
    state_id: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    query: String,
    /// Treat the query as a voice transcript
    #[arg(long, action = ArgAction::SetTrue)]
    voice: bool,
    #[arg(long)]
    business_type: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let client_config = ClientConfig::from_env();
    tracing::debug!(base_url = %client_config.base_url, "Using backend");
    let client = Arc::new(
        client_config
            .build_http_client()
            .context("failed to build HTTP client")?,
    );

    match cli.command {
        Commands::Quote(args) => handle_quote(&client, &config, args, cli.json).await,
        Commands::States(args) => handle_states(client, &config, args, cli.json).await,
        Commands::Search(args) => handle_search(client, &config, args, cli.json).await,
    }
}

async fn handle_quote(
    client: &NetworkHttpClient,
    config: &StorefrontConfig,
    args: QuoteArgs,
    json: bool,
) -> Result<()> {
    if args.lga.trim().is_empty() {
        bail!("a local government id is required to calculate fees");
    }
    let origin = Coordinates::new(
        args.business_lat.unwrap_or(config.default_origin.latitude),
        args.business_lng.unwrap_or(config.default_origin.longitude),
    );
    let request = FeeCalculationRequest {
        business_id: args.business_id,
        business_address: args.business_address,
        business_coordinates: origin,
        delivery_address: args.address,
        delivery_coordinates: Coordinates::new(args.lat, args.lng),
        num_packs: args.packs,
        order_value: args.order_value,
        local_government_id: args.lga,
    };

    let quote = client
        .calculate_fees(&request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if json {
        print_json(&quote)?;
    } else {
        println!("Delivery fee: ₦{}", quote.delivery_fee);
        println!("Service fee:  ₦{}", quote.service_fee);
        println!("Total fees:   ₦{}", quote.total());
    }
    Ok(())
}

async fn handle_states(
    client: Arc<NetworkHttpClient>,
    config: &StorefrontConfig,
    args: StatesArgs,
    json: bool,
) -> Result<()> {
    let locations = DeliveryLocations::new(client, config.location_cache_ttl);
    match args.state_id {
        Some(state_id) => {
            let lgas = locations
                .local_governments_for_state(&state_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            if json {
                return print_json(&lgas);
            }
            for lga in lgas {
                println!("{}\t{}", lga.id, lga.name);
            }
        }
        None => {
            let states = locations
                .states()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            if json {
                return print_json(&states);
            }
            for state in states {
                println!("{}\t{}", state.id, state.name);
            }
        }
    }
    Ok(())
}

async fn handle_search(
    client: Arc<NetworkHttpClient>,
    config: &StorefrontConfig,
    args: SearchArgs,
    json: bool,
) -> Result<()> {
    let device = Storage::open_dir(&config.data_dir)
        .with_context(|| format!("failed to open {}", config.data_dir.display()))?;
    let strategy: Arc<dyn KeywordStrategy> = if args.voice {
        Arc::new(BackendEnhancedStrategy::new(client.clone()))
    } else {
        Arc::new(StopWordStrategy)
    };
    let panel = SearchPanel::new(
        client,
        strategy,
        SearchHistory::load(device.clone()),
        VoiceAnalytics::new(device, Storage::in_memory()),
        Arc::new(TracingNotifier),
        config.search_debounce,
    );
    panel.set_filters(SearchFilters {
        business_type: args.business_type,
        city: args.city,
        state: args.state,
    });

    let response = if args.voice {
        panel.voice_search(&args.query).await?
    } else {
        panel.search_now(&args.query).await?
    };

    if json {
        return print_json(&response);
    }
    if response.businesses.is_empty() {
        println!("No businesses found");
        if !response.suggestions.is_empty() {
            println!("Try: {}", response.suggestions.join(", "));
        }
        return Ok(());
    }
    println!("{} result(s)", response.total);
    for business in &response.businesses {
        println!(
            "{}\t{}\t{}",
            business.id,
            business.name,
            business.address.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
