// recon/src/commands/export.rs
//
// USE CASE: Export source/target tables of one or all test cases.

use std::path::PathBuf;

use recon_core::application::export_test_case;
use recon_core::domain::TestCase;
use recon_core::infrastructure::adapters::DuckDbDriver;

use crate::cli::Locations;
use crate::commands::load_workspace;

pub fn execute(
    locations: Locations,
    test: Option<String>,
    out: Option<PathBuf>,
) -> miette::Result<()> {
    let workspace = load_workspace(&locations)?;
    let export_dir = out.unwrap_or_else(|| PathBuf::from(&workspace.config.export_path));
    let driver = DuckDbDriver::new();

    let selected: Vec<&TestCase> = match &test {
        Some(name) => vec![workspace.test_cases.find(name)?],
        None => workspace.test_cases.all().iter().collect(),
    };

    println!(
        "📤 Exporting {} test case(s) to {}",
        selected.len(),
        export_dir.display()
    );

    let mut failures = 0;
    for case in selected {
        match export_test_case(case, &export_dir, &driver) {
            Ok(tables) => println!(
                "   ✅ {}: {} | {}",
                case.name(),
                tables.source.display(),
                tables.target.display()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("   ❌ {}: {}", case.name(), e);
            }
        }
    }

    if failures > 0 {
        eprintln!("\n❌ {} export(s) failed.", failures);
        std::process::exit(1);
    }
    println!("✨ Export finished.");
    Ok(())
}
