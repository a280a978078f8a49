// recon/src/commands/check.rs
//
// USE CASE: Check every test case description.

use comfy_table::Table;
use std::sync::Arc;

use recon_core::application::{CheckStatus, check_test_cases};
use recon_core::infrastructure::adapters::DuckDbDriver;

use crate::cli::Locations;
use crate::commands::load_workspace;

pub async fn execute(locations: Locations) -> miette::Result<()> {
    println!("⚙️  Loading test descriptions...");
    let workspace = load_workspace(&locations)?;
    println!(
        "   {} test case(s), {} environment(s)",
        workspace.test_cases.len(),
        workspace.environments.len()
    );

    let cases = workspace
        .test_cases
        .into_cases()
        .into_iter()
        .map(Arc::new)
        .collect();
    let reports = check_test_cases(cases, Arc::new(DuckDbDriver::new())).await?;

    let mut table = Table::new();
    table.set_header(vec!["Test", "Status", "Details"]);
    for report in &reports {
        let (status, details) = match &report.status {
            CheckStatus::Valid => ("OK", String::new()),
            CheckStatus::Invalid(errors) => ("INVALID", errors.join("\n")),
            CheckStatus::Failed(error) => ("ERROR", error.clone()),
        };
        table.add_row(vec![report.name.clone(), status.to_string(), details]);
    }
    println!("{table}");

    let failed = reports.iter().filter(|r| !r.is_valid()).count();
    if failed > 0 {
        eprintln!(
            "\n❌ {} of {} test case(s) need attention.",
            failed,
            reports.len()
        );
        std::process::exit(1);
    }

    println!("\n✨ All test cases are ready for comparison.");
    Ok(())
}
