//! Generates Rust code from a small CastleDB document and prints it.
//!
//! ```text
//! RUST_LOG=debug cargo run --example generate
//! ```

use castledb::codegen::BinaryMode;
use castledb::prelude::*;

const DATABASE: &str = r#"{
    "sheets": [
        {
            "name": "items",
            "columns": [
                { "typeStr": "0", "name": "id" },
                { "typeStr": "1", "name": "name" },
                { "typeStr": "5:Weapon,Armor", "name": "kind" },
                { "typeStr": "6:items", "name": "upgrade", "opt": true },
                { "typeStr": "7", "name": "icon" }
            ],
            "lines": []
        }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let database = parse_database(DATABASE)?;
    let config = GeneratorConfig::new()
        .with_binary_mode(BinaryMode::On)
        .with_namespace("game");
    let generated = Generator::new(&database, &config)
        .with_source("inline")
        .generate()?;

    for diagnostic in &generated.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    println!("{}", generated.code);
    Ok(())
}
