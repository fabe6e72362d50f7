//! Reading and writing a configuration struct.
//!
//! Run with: cargo run --example typed_config

use serde::{Deserialize, Serialize};
use serde_properties::{from_reader, to_writer};
use std::error::Error;
use std::io::Cursor;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Level {
    Error,
    Warn,
    Info,
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(rename = "app.name")]
    name: String,
    #[serde(rename = "app.port")]
    port: u16,
    #[serde(rename = "app.hosts")]
    hosts: Vec<String>,
    #[serde(rename = "log.level")]
    level: Level,
    #[serde(rename = "log.file")]
    log_file: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let input = b"\
app.name = Inventory Service
app.port = 8080
app.hosts = alpha, beta, \\
            gamma
log.level = info
log.file =
";

    let config: Config = from_reader(Cursor::new(&input[..]))?;
    println!("{:#?}", config);

    let mut output = Vec::new();
    to_writer(&mut output, &config)?;
    println!("\nWritten back:\n{}", String::from_utf8(output)?);

    Ok(())
}
