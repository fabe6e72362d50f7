//! Customizing rendering with PropertiesOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_properties::{to_string_with_options, PropertiesOptions, Separator};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    motto: String,
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        motto: "caf\u{e9} \u{0e4f}".to_string(),
        debug: true,
    };

    // Canonical form (`key = value`, escaped)
    println!("Canonical:");
    println!("{}\n", serde_properties::to_string(&config)?);

    // Colon separator, newline-terminated
    println!("Colon separator:");
    let colon = PropertiesOptions::new()
        .with_separator(Separator::Colon)
        .with_trailing_newline(true);
    println!("{}", to_string_with_options(&config, &colon)?);

    // Space separator
    println!("Space separator:");
    let space = PropertiesOptions::new().with_separator(Separator::Space);
    println!("{}\n", to_string_with_options(&config, &space)?);

    // Display form: values left unescaped
    println!("Display:");
    println!("{}", serde_properties::to_string_display(&config)?);

    Ok(())
}
