//! Decoding a `.properties` document and looking up keys.
//!
//! Run with: RUST_LOG=serde_properties=debug cargo run --example simple

use serde_properties::{parse_str, Error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = "\
# Application messages
greeting = Hello, \\u0e4f world
farewell : Good bye
multi.line = first part, \\
             second part
install\\ dir  C:\\\\Program Files\\\\App
";

    let mut table = parse_str(text)?;

    println!("Decoded {} entries:", table.len());
    for (key, value) in &table {
        println!("  {key:?} => {value:?}");
    }

    println!("\ngreeting = {}", table.get("greeting")?);

    match table.get("missing") {
        Err(Error::KeyNotFound(key)) => println!("no entry for {key:?}"),
        other => println!("unexpected: {other:?}"),
    }

    table.delete("farewell")?;
    table.set("added.later", "tab\there");

    println!("\nCanonical form:\n{}", table);
    println!("\nDisplay form:\n{}", table.to_display_string());

    Ok(())
}
