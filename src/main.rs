use accounts_backend::app::app::App;
use accounts_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let dotenv_result = dotenv();

    // Initialize tracing with console and rolling file outputs
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting Accounts Backend Application");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    // Create and start the App
    let app = App::new().await;
    app.start().await;
}
