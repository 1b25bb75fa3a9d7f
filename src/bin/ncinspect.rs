//! Dump the dimensions, variables and attributes of a netCDF file.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stratus::{init_tracing, Attribute};

/// Command-line arguments for ncinspect
#[derive(Parser, Debug)]
#[command(name = "ncinspect")]
#[command(author, version, about = "Inspect the attribute surface of a netCDF file", long_about = None)]
struct Args {
    /// Path to the netCDF file to inspect
    file: PathBuf,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "STRATUS_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn attribute_map(attrs: &[Attribute]) -> HashMap<String, serde_json::Value> {
    attrs
        .iter()
        .map(|a| {
            let value = a
                .value()
                .map_err(|e| e.to_string())
                .and_then(|v| serde_json::to_value(v).map_err(|e| e.to_string()))
                .unwrap_or_else(|e| serde_json::json!({ "error": e }));
            (a.name().to_string(), value)
        })
        .collect()
}

fn print_attributes(attrs: &[Attribute], indent: &str) {
    for attr in attrs {
        match attr.value() {
            Ok(value) => println!("{}{} ({}): {:?}", indent, attr.name(), attr.nc_type(), value),
            Err(e) => println!("{}{}: error reading value: {}", indent, attr.name(), e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let file = stratus::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    let globals = file.attributes()?;
    let variables = file.variables()?;

    if args.json {
        let mut vars = HashMap::new();
        for var in &variables {
            vars.insert(
                var.name().to_string(),
                serde_json::json!({
                    "type": var.nctype,
                    "attributes": attribute_map(&var.attributes()?),
                }),
            );
        }
        let doc = serde_json::json!({
            "path": file.path(),
            "num_dimensions": file.num_dimensions()?,
            "global_attributes": attribute_map(&globals),
            "variables": vars,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Inspecting netCDF file: {}", file.path().display());
    println!("\nDimensions: {}", file.num_dimensions()?);

    println!("\nGlobal attributes:");
    print_attributes(&globals, "  ");

    println!("\nVariables:");
    for var in &variables {
        println!("  {} ({})", var.name(), var.nctype);
        print_attributes(&var.attributes()?, "    ");
    }

    Ok(())
}
