use checkout_dispatch::application::dispatcher::PaymentDispatcher;
use checkout_dispatch::config::DispatchConfig;
use checkout_dispatch::domain::ports::{NavigatorArc, OrderServiceArc, ReferenceLedgerArc};
use checkout_dispatch::infrastructure::in_memory::InMemoryReferenceLedger;
use checkout_dispatch::infrastructure::scripted::{RecordingNavigator, ScriptedOrderService};
use checkout_dispatch::interfaces::json::report_writer::{Report, ReportWriter};
use checkout_dispatch::interfaces::json::scenario_reader::ScenarioReader;
use checkout_dispatch::telemetry;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Checkout scenario JSON file
    scenario: PathBuf,

    /// What to do with the mounted payment button
    #[arg(long, value_enum, default_value_t = Action::View)]
    action: Action,

    /// Query string of the current page, overriding the scenario's
    #[arg(long)]
    query: Option<String>,

    /// Dispatcher configuration JSON file, replacing the scenario's `config`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a persistent reference ledger (optional). If provided, uses RocksDB.
    #[arg(long)]
    ledger_path: Option<PathBuf>,

    /// Timeout for provider and order-service calls, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Test id given to the payment button
    #[arg(long, default_value = "submit-order-button")]
    test_id: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Only render the button
    View,
    /// Click "Place order"
    Press,
    /// Approve in the wallet
    Approve,
    /// Re-enter the page with the current query string
    Resume,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Press => "press",
            Action::Approve => "approve",
            Action::Resume => "resume",
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_ledger(path: Option<PathBuf>) -> Result<ReferenceLedgerArc> {
    use checkout_dispatch::infrastructure::rocksdb::RocksDbReferenceLedger;

    match path {
        Some(path) => Ok(Arc::new(RocksDbReferenceLedger::open(path).into_diagnostic()?)),
        None => Ok(Arc::new(InMemoryReferenceLedger::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_ledger(path: Option<PathBuf>) -> Result<ReferenceLedgerArc> {
    if path.is_some() {
        warn!(
            "Persistent ledger requested via --ledger-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory ledger."
        );
    }
    Ok(Arc::new(InMemoryReferenceLedger::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let file = File::open(&cli.scenario).into_diagnostic()?;
    let mut scenario = ScenarioReader::new(file).read().into_diagnostic()?;
    if let Some(path) = &cli.config {
        scenario.config = DispatchConfig::from_json_file(path).into_diagnostic()?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        scenario.config.call_timeout_ms = timeout_ms;
    }
    let query = cli.query.unwrap_or(scenario.query);

    let ledger = open_ledger(cli.ledger_path)?;
    let orders = Arc::new(ScriptedOrderService::new(scenario.order));
    let navigator = Arc::new(RecordingNavigator::new(&query));

    let order_service: OrderServiceArc = orders.clone();
    let navigator_port: NavigatorArc = navigator.clone();
    let mut dispatcher = PaymentDispatcher::new(order_service, navigator_port, ledger, scenario.config);
    if let Some(card) = &scenario.card {
        dispatcher = dispatcher.with_card_client(Arc::new(card.client()));
    }
    if let Some(wallet) = &scenario.wallet {
        dispatcher = dispatcher.with_wallet(Arc::new(wallet.sdk()));
    }

    let button = dispatcher.mount(scenario.cart, &cli.test_id);
    let result = match cli.action {
        Action::View => Ok(None),
        Action::Press => button.press().await.map(Some),
        Action::Approve => button.approve().await.map(Some),
        Action::Resume => button.resume_current().await.map(Some),
    };

    let (outcome, error) = match result {
        Ok(outcome) => (outcome, None),
        Err(e) => {
            warn!(error = %e, "Action failed");
            (None, Some(e.to_string()))
        }
    };

    let report = Report {
        routing: button.routing(),
        action: cli.action.as_str().to_string(),
        outcome,
        error,
        view: button.view(),
        navigated_to: navigator.pushed(),
        orders_placed: orders.calls(),
    };

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&report).into_diagnostic()?;

    Ok(())
}
