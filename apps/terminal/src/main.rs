//! # Abacus Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load ad configuration (file + env)
//! 3. Build the ad-trigger coordinator and run its startup calls
//! 4. Run the keypad loop on stdin/stdout
//! 5. Shut down pending ad timers on exit

#[tokio::main]
async fn main() {
    // Setup lives in lib.rs for testability
    if let Err(e) = abacus_terminal::run().await {
        eprintln!("abacus: {}", e);
        std::process::exit(1);
    }
}
