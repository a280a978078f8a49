// recon-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// What the core needs from a SQL database.
pub mod ports;

// 2. Domain
// Origins, environments, column mapping, test cases.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config loaders, filesystem helpers, DuckDB driver.
pub mod infrastructure;

// 4. Application (Use Cases)
// Check and export.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::ReconError;
