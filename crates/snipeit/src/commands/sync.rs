//! `snipeit sync`

use std::fmt::Write;

use snipeit_core::{SnipeIt, SyncReport, sync_all};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn summary(report: &SyncReport) -> String {
    let mut out = String::new();
    for resource_type in &report.resource_types {
        let count = report
            .resources
            .iter()
            .filter(|r| r.id.resource_type == resource_type.id)
            .count();
        let label = format!("{}s", resource_type.display_name);
        let _ = writeln!(out, "{label:<14}{count}");
    }
    let _ = writeln!(out, "{:<14}{}", "Entitlements", report.entitlements.len());
    let _ = write!(out, "{:<14}{}", "Grants", report.grants.len());
    if let Some(rl) = report.annotations.rate_limit() {
        if let Some(remaining) = rl.remaining {
            let _ = write!(out, "\n{:<14}{remaining}", "Rate budget");
        }
    }
    out
}

pub async fn handle(connector: &SnipeIt, global: &GlobalOpts) -> Result<(), CliError> {
    let report = sync_all(connector).await?;

    let out = output::render_single(&global.output, &report, summary, |r| {
        r.grants
            .iter()
            .map(|g| g.id.clone())
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
