// recon/src/commands/list.rs
//
// USE CASE: List discovered test cases.

use comfy_table::Table;

use recon_core::domain::DataOrigin;

use crate::cli::Locations;
use crate::commands::load_workspace;

pub fn execute(locations: Locations) -> miette::Result<()> {
    let workspace = load_workspace(&locations)?;

    let mut table = Table::new();
    table.set_header(vec!["Test", "Source", "Target", "Mapped columns"]);
    for case in workspace.test_cases.all() {
        let mapped = case
            .column_mapping()
            .map(|m| m.len().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            case.name().to_string(),
            describe(case.source()),
            describe(case.target()),
            mapped,
        ]);
    }
    println!("{table}");
    Ok(())
}

fn describe(origin: &DataOrigin) -> String {
    match origin {
        DataOrigin::FlatFile(flat) => match flat.file_path() {
            Some(path) => format!("flat_file: {}", path.display()),
            None => "flat_file".to_string(),
        },
        DataOrigin::Query(query) => {
            format!("sql_query@{}", query.environment().unwrap_or("?"))
        }
        DataOrigin::Misconfigured(_) => "?".to_string(),
    }
}
