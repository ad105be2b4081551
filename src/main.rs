use clap::Parser;
use std::sync::Arc;
use travel_widgets::utils::error::ErrorSeverity;
use travel_widgets::utils::logger;
use travel_widgets::{app, AppState, CliConfig, ToolService, TravelError};

async fn run(cli: &CliConfig) -> travel_widgets::Result<()> {
    let config = cli.resolve()?;
    let tools = Arc::new(ToolService::from_config(config.as_ref())?);
    app::serve(&config.bind_address(), AppState::new(tools)).await
}

fn exit_code(err: &TravelError) -> i32 {
    match err.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = CliConfig::parse();

    logger::init_server_logger(cli.verbose, cli.log_json);
    tracing::info!("Starting travel-widgets {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "Server stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }
}
