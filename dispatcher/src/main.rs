//! Dispatcher binary entry point

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use futures_util::future::join_all;

use dispatcher::{
    AlertSession, DispatcherConfig, DispatcherError, DispatcherResult, FixedOutcomeSelector, OutcomeSelector,
    RandomOutcomeSelector,
};
use shared::{logging, BloodGroup, BloodProduct, RecipientId, RequestConfig, RequestStatus, ResponseOutcome, Urgency};

#[derive(Parser)]
#[command(name = "dispatcher")]
#[command(about = "Send urgent blood requests to nearby blood banks and track their replies")]
struct Args {
    /// Base URL of the blood bank API (overrides BLOODBANK_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// CSV file used when the API is unreachable (overrides BLOODBANK_FALLBACK_CSV)
    #[arg(long)]
    fallback_csv: Option<PathBuf>,

    /// Milliseconds before a sent request's simulated reply lands
    #[arg(long)]
    resolution_delay_ms: Option<u64>,

    /// Blood group needed
    #[arg(long, default_value = "A+")]
    blood_group: BloodGroup,

    /// Products needed, comma separated
    #[arg(long, value_delimiter = ',', default_value = "Whole Blood")]
    products: Vec<BloodProduct>,

    /// Urgency level
    #[arg(long, default_value = "High")]
    urgency: Urgency,

    /// Units needed (1-50)
    #[arg(long, default_value_t = 1)]
    units: u32,

    /// Only request this blood bank; every unrequested bank otherwise
    #[arg(long)]
    recipient: Option<String>,

    /// Force every simulated reply to this outcome instead of a random one
    #[arg(long)]
    reply: Option<ResponseOutcome>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));

    let mut config = DispatcherConfig::from_env()?;
    if let Some(base) = args.api_base.clone() {
        config.api_base_url = base;
    }
    if let Some(path) = args.fallback_csv.clone() {
        config.fallback_csv_path = path;
    }
    if let Some(millis) = args.resolution_delay_ms {
        config.resolution_delay = Duration::from_millis(millis);
    }
    config.validate()?;

    let request = RequestConfig::new(args.blood_group, args.products.clone(), args.urgency, args.units)
        .map_err(DispatcherError::from)?;

    logging::log_startup(&format!("blood request dispatcher against {}", config.api_base_url));

    match args.reply {
        Some(outcome) => run(&args, &config, request, FixedOutcomeSelector(outcome)).await?,
        None => run(&args, &config, request, RandomOutcomeSelector::new()).await?,
    }

    Ok(())
}

async fn run<O>(args: &Args, config: &DispatcherConfig, request: RequestConfig, selector: O) -> DispatcherResult<()>
where
    O: OutcomeSelector + 'static,
{
    let session = AlertSession::from_config(config, selector);
    session.set_request_config(request).await;

    let report = session.load().await;
    if let Some(warning) = &report.warning {
        println!("⚠️ {warning}");
        println!("Using fallback data from {}", config.fallback_csv_path.display());
    }

    if session.store().is_empty().await {
        println!("No blood banks found within 10km radius");
        return Ok(());
    }

    let dispatched = match &args.recipient {
        Some(id) => {
            let id = RecipientId::new(id.as_str());
            let handle = session.dispatch(&id).await?;
            vec![(id, handle)]
        }
        None => session.dispatch_all().await,
    };

    for (id, result) in join_all(dispatched.into_iter().map(|(id, handle)| async move { (id, handle.await) })).await {
        if let Err(e) = result {
            logging::log_error(&format!("Dispatch task for {id}"), &e);
        }
    }

    print_table(&session.rows().await);
    logging::log_success("All dispatches settled");
    Ok(())
}

fn print_table(rows: &[(shared::Recipient, Option<RequestStatus>)]) {
    println!("{:<36} {:<16} {:<10} {:<12}", "BLOOD BANK", "PHONE", "DISTANCE", "STATUS");
    for (recipient, status) in rows {
        println!(
            "{:<36} {:<16} {:<10} {:<12}",
            recipient.name,
            recipient.phone,
            recipient.distance_label(),
            RequestStatus::label(*status)
        );
    }
}
