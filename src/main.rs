// src/main.rs

use stripe_audit::{cli, logging};

#[tokio::main]
async fn main() {
    if let Err(e) = logging::initialize_logging() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    match cli::run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(2);
        }
    }
}
