//! Models command handler.

use polyglot_error::PolyglotResult;
use polyglot_server::PolyglotConfig;
use std::path::Path;

/// Handle the `models` command
///
/// Prints the fallback order and the delay taken after each pass but the last.
pub fn handle_models_command(config_path: Option<&Path>) -> PolyglotResult<()> {
    let config = PolyglotConfig::load(config_path)?;
    let fallback = config.fallback();

    println!("Fallback order:");
    for (position, model) in fallback.models().iter().enumerate() {
        println!("  {}. {}", position + 1, model);
    }

    let passes = *fallback.max_passes();
    println!();
    println!("Passes: {} (at most {} calls)", passes, fallback.max_attempts());
    for pass in 0..passes.saturating_sub(1) {
        println!(
            "  after pass {}: wait {} ms",
            pass + 1,
            fallback.backoff().delay(pass).as_millis()
        );
    }
    println!("API key variable: {}", config.provider().api_key_env());
    Ok(())
}
