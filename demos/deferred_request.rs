//! Deferred request logging example
//!
//! Buffers a request's debug trail and only sends it when the request fails.
//! Output goes to whatever backend the platform probe picks.
//!
//! Run with: cargo run --example deferred_request

use rust_journal_logger::prelude::*;
use rust_journal_logger::{debug, error, notice};

fn handle_request(logger: &Logger, id: u32) -> std::result::Result<(), String> {
    logger.enable_defer();
    debug!(logger, { "REQUEST_ID" => id }, "parsing headers");
    debug!(logger, { "REQUEST_ID" => id }, "looking up session");

    if id % 2 == 0 {
        Err(format!("session {} expired", id))
    } else {
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Rust Journal Logger - Deferred Request Example ===\n");

    let logger = Logger::builder()
        .constant_field("SYSLOG_IDENTIFIER", "deferred_request")
        .constant_field("SERVICE", "demo")
        .build();
    println!("Selected backend: {}\n", logger.dispatcher_name());

    for id in 1..=4 {
        match handle_request(&logger, id) {
            Ok(()) => {
                // Success: the debug trail is not worth sending
                let dropped = logger.discard(Priority::Debug);
                notice!(logger, { "REQUEST_ID" => id }, "request ok ({} debug entries dropped)", dropped);
                logger.flush();
            }
            Err(reason) => {
                error!(logger, { "REQUEST_ID" => id }, "request failed: {}", reason);
                logger.disable_defer();
            }
        }
    }

    let metrics = logger.metrics();
    println!(
        "\nsubmitted={} dispatched={} discarded={}",
        metrics.submitted(),
        metrics.dispatched(),
        metrics.discarded()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
