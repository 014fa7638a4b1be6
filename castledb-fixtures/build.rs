//! Generates the fixture types from `schema/game.cdb`.

use castledb_codegen::{BinaryMode, GeneratorConfig, generate_from_file};
use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() -> anyhow::Result<()> {
    let schema = Path::new("schema/game.cdb");
    println!("cargo:rerun-if-changed={}", schema.display());
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let outputs = [
        (
            "game.rs",
            GeneratorConfig::new()
                .with_binary_mode(BinaryMode::On)
                .with_namespace("game")
                .with_inherit("crate::Row"),
        ),
        (
            "game_binary.rs",
            GeneratorConfig::new()
                .with_binary_mode(BinaryMode::Only)
                .with_namespace("game_binary")
                .with_database_name("BinaryDatabase"),
        ),
    ];

    for (file, config) in &outputs {
        let generated = generate_from_file(schema, config)?;
        for diagnostic in &generated.diagnostics {
            println!("cargo:warning={file}: {diagnostic}");
        }
        fs::write(out_dir.join(file), generated.code)?;
    }

    Ok(())
}
