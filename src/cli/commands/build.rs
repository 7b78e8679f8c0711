//! Build command - build or re-validate products

use crate::builder::{BuilderRegistry, IdeBuilder};
use crate::cli::args::{BuildArgs, OutputFormat};
use crate::config::Configuration;
use crate::error::DevBuildResult;
use crate::server::BuildServer;
use console::style;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Outcome of one request, captured right after it returned
#[derive(Debug, Serialize)]
struct BuildReport {
    prefix: String,
    class: String,
    generation: u64,
    checks: u64,
    run_dir: String,
    classpath: String,
    changed: Vec<String>,
    validated_at: String,
}

impl BuildReport {
    fn capture(builder: &IdeBuilder) -> Self {
        Self {
            prefix: builder.platform_prefix().to_string(),
            class: builder.spec().class_name.clone(),
            generation: builder.generation(),
            checks: builder.check_count(),
            run_dir: builder.run_dir().display().to_string(),
            classpath: builder.classpath_file().display().to_string(),
            changed: builder.last_changes(),
            validated_at: builder.last_validated().to_rfc3339(),
        }
    }
}

/// Execute the build command
pub fn execute(args: BuildArgs, home: &Path, config: Configuration) -> DevBuildResult<()> {
    let server = BuildServer::new(home, config, BuilderRegistry::standard())?;
    debug!("Serving products under {}", server.home().display());

    let mut reports = Vec::with_capacity(args.prefixes.len());
    for prefix in &args.prefixes {
        let builder: Arc<IdeBuilder> = server.check_or_create_ide_builder(prefix)?;
        debug!("{} served (generation {})", prefix, builder.generation());
        reports.push(BuildReport::capture(&builder));
    }

    match args.format {
        OutputFormat::Table => print_table(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Plain => {
            for report in &reports {
                println!("{}", report.classpath);
            }
        }
    }

    Ok(())
}

fn print_table(reports: &[BuildReport]) {
    for report in reports {
        let status = if report.checks == 0 {
            style("built").green()
        } else if report.changed.is_empty() {
            style("up to date").dim()
        } else {
            style("updated").yellow()
        };

        println!(
            "{} {} [{}] generation {}",
            style("•").cyan(),
            style(&report.prefix).bold(),
            status,
            report.generation
        );
        println!("    class:     {}", report.class);
        println!("    run dir:   {}", report.run_dir);
        println!("    classpath: {}", report.classpath);
        if !report.changed.is_empty() {
            println!("    changed:   {}", report.changed.join(", "));
        }
    }
}
