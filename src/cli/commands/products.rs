//! Products command - list configured products

use crate::cli::args::{OutputFormat, ProductsArgs};
use crate::config::Configuration;
use crate::error::DevBuildResult;
use console::style;

/// Execute the products command
pub fn execute(args: ProductsArgs, config: &Configuration) -> DevBuildResult<()> {
    if config.products.is_empty() {
        match args.format {
            OutputFormat::Json => println!("{{}}"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No products configured"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(config),
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Plain => print_plain(config),
    }

    Ok(())
}

fn print_table(config: &Configuration) {
    println!(
        "{:<24} {:<48} {:<8}",
        style("PREFIX").bold(),
        style("CLASS").bold(),
        style("MODULES").bold()
    );
    println!("{}", "-".repeat(82));

    for (prefix, spec) in &config.products {
        println!(
            "{:<24} {:<48} {:<8}",
            prefix,
            spec.class_name,
            spec.modules.len()
        );
    }

    println!();
    println!("{} product(s)", config.products.len());
}

fn print_json(config: &Configuration) -> DevBuildResult<()> {
    let json = serde_json::to_string_pretty(&config.products)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(config: &Configuration) {
    for prefix in config.product_keys() {
        println!("{}", prefix);
    }
}
