// recon-core/src/infrastructure/adapters/duckdb.rs

use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use duckdb::{Config, Connection};
use tracing::debug;

use crate::domain::environment::ConnectionDescriptor;
use crate::error::ReconError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{QueryResult, SqlConnection, SqlDriver};

pub const IN_MEMORY: &str = ":memory:";

/// 1970-01-01 counted from 0001-01-01 (day 1).
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Embedded engine: the environment's `database` is the DuckDB file to open
/// (or `:memory:`). `server` has no meaning for an in-process database.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbDriver;

impl DuckDbDriver {
    pub fn new() -> Self {
        Self
    }
}

pub struct DuckDbConnection {
    conn: Connection,
}

impl SqlDriver for DuckDbDriver {
    fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn SqlConnection>, ReconError> {
        let config = Config::default();
        let opened = if descriptor.database == IN_MEMORY {
            Connection::open_in_memory_with_flags(config)
        } else {
            Connection::open_with_flags(&descriptor.database, config)
        };

        let conn = opened.map_err(|e| {
            InfrastructureError::Database(DatabaseError::Connection {
                target: format!("{}/{}", descriptor.server, descriptor.database),
                reason: e.to_string(),
            })
        })?;

        debug!(environment = %descriptor.environment, database = %descriptor.database, "DuckDB connection opened");
        Ok(Box::new(DuckDbConnection { conn }))
    }

    fn driver_name(&self) -> &str {
        "duckdb"
    }
}

impl SqlConnection for DuckDbConnection {
    fn query(&mut self, sql: &str) -> Result<QueryResult, ReconError> {
        let mut stmt = self.conn.prepare(sql).map_err(InfrastructureError::from)?;
        let mut rows = stmt.query([]).map_err(InfrastructureError::from)?;

        let columns: Vec<String> = rows
            .as_ref()
            .map(|statement| statement.column_names())
            .unwrap_or_default();

        let mut result = QueryResult {
            columns,
            rows: Vec::new(),
        };
        while let Some(row) = rows.next().map_err(InfrastructureError::from)? {
            let mut cells = Vec::with_capacity(result.columns.len());
            for index in 0..result.columns.len() {
                let value: Value = row.get(index).map_err(InfrastructureError::from)?;
                cells.push(render_cell(value));
            }
            result.rows.push(cells);
        }

        Ok(result)
    }
}

/// Text form of a cell as it should appear in the export. NULL has none.
///
/// Calendar values are ISO-8601; nested values follow DuckDB's own
/// `CAST(.. AS VARCHAR)` layout so both sides of a comparison line up.
fn render_cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(render_value(&other)),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::TinyInt(n) => n.to_string(),
        Value::SmallInt(n) => n.to_string(),
        Value::Int(n) => n.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::HugeInt(n) => n.to_string(),
        Value::UTinyInt(n) => n.to_string(),
        Value::USmallInt(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::UBigInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Text(s) | Value::Enum(s) => s.clone(),
        Value::Blob(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        Value::Date32(days) => render_date(*days),
        Value::Time64(unit, value) => render_time(*unit, *value),
        Value::Timestamp(unit, value) => render_timestamp(*unit, *value),
        Value::Interval {
            months,
            days,
            nanos,
        } => render_interval(*months, *days, *nanos),
        Value::List(items) | Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Struct(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(name, v)| format!("'{}': {}", name, render_value(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Value::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}={}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Union(inner) => render_value(inner),
    }
}

/// Days since 1970-01-01 as `YYYY-MM-DD`.
fn render_date(days: i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(days.saturating_add(UNIX_EPOCH_DAYS_FROM_CE))
        .map(|d| d.to_string())
        .unwrap_or_else(|| days.to_string())
}

fn split_seconds(unit: TimeUnit, value: i64) -> (i64, u32) {
    let (per_second, nanos_per_tick) = match unit {
        TimeUnit::Second => (1, 1_000_000_000),
        TimeUnit::Millisecond => (1_000, 1_000_000),
        TimeUnit::Microsecond => (1_000_000, 1_000),
        TimeUnit::Nanosecond => (1_000_000_000, 1),
    };
    let secs = value.div_euclid(per_second);
    let nanos = value.rem_euclid(per_second) * nanos_per_tick;
    (secs, nanos as u32)
}

/// Time of day as `HH:MM:SS[.fff]`.
fn render_time(unit: TimeUnit, value: i64) -> String {
    let (secs, nanos) = split_seconds(unit, value);
    u32::try_from(secs)
        .ok()
        .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos))
        .map(|t| t.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Timestamp without zone as `YYYY-MM-DD HH:MM:SS[.fff]`.
fn render_timestamp(unit: TimeUnit, value: i64) -> String {
    let (secs, nanos) = split_seconds(unit, value);
    DateTime::from_timestamp(secs, nanos)
        .map(|ts| ts.naive_utc().to_string())
        .unwrap_or_else(|| value.to_string())
}

/// ISO-8601 duration, e.g. `P1Y2M3DT4H5M6S`. A zero interval is `PT0S`.
fn render_interval(months: i32, days: i32, nanos: i64) -> String {
    let mut out = String::from("P");
    let (years, months) = (months / 12, months % 12);
    if years != 0 {
        out.push_str(&format!("{years}Y"));
    }
    if months != 0 {
        out.push_str(&format!("{months}M"));
    }
    if days != 0 {
        out.push_str(&format!("{days}D"));
    }

    let total_secs = nanos / 1_000_000_000;
    let frac = (nanos % 1_000_000_000).abs();
    let (hours, minutes, secs) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    if hours != 0 || minutes != 0 || secs != 0 || frac != 0 {
        out.push('T');
        if hours != 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes != 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if secs != 0 || frac != 0 {
            if frac == 0 {
                out.push_str(&format!("{secs}S"));
            } else {
                let frac = format!("{frac:09}");
                out.push_str(&format!("{secs}.{}S", frac.trim_end_matches('0')));
            }
        }
    }

    if out == "P" {
        out.push_str("T0S");
    }
    out
}
