// recon-core/src/application/mod.rs

pub mod check;
pub mod export;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use recon_core::application::{check_test_cases, export_test_case};`

pub use check::{CheckReport, CheckStatus, check_one, check_test_cases};
pub use export::{ExportedTables, export_test_case};
