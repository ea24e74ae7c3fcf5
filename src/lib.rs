//! # influxql-builder
//!
//! Fluent builder for InfluxQL SELECT statements. Clause state accumulates
//! through chained calls and is rendered into a single query string by an
//! explicit build step.
//!
//! ## Features
//!
//! - **Fixed clause pipeline**: SELECT, FROM, WHERE, GROUP BY, FILL,
//!   ORDER BY time, LIMIT, OFFSET, always in that order
//! - **Type-aware quoting**: integers, floats and booleans render bare,
//!   strings single-quoted, keys double-quoted
//! - **Field detection**: function calls and arithmetic expressions pass
//!   through unquoted, aliases are always quoted
//! - **Bracket groups**: nested builders render as parenthesized boolean
//!   groups, to any depth
//! - **Fail-soft**: no operation errors; a builder without fields or a
//!   measurement renders the empty string
//!
//! ## Modules
//!
//! - [`builder`]: the query builder and clause rendering
//! - [`criterion`]: comparison criteria and literal quoting
//! - [`duration`]: GROUP BY time-window tokens
//!
//! ## Quick Start
//!
//! ```rust
//! use influxql_builder::{Duration, QueryBuilder};
//!
//! let query = QueryBuilder::new()
//!     .select(&["MEAN(\"temperature\")", "humidity"])
//!     .from("weather")
//!     .where_clause("city", "=", "paris")
//!     .and("temperature", ">", 30)
//!     .group_by_time(Duration::minutes(10))
//!     .fill("none")
//!     .desc()
//!     .limit(100)
//!     .build();
//!
//! assert_eq!(
//!     query,
//!     "SELECT MEAN(\"temperature\"),\"humidity\" FROM \"weather\" \
//!      WHERE \"city\" = 'paris' AND \"temperature\" > 30 \
//!      GROUP BY time(10m) FILL(none) ORDER BY time DESC LIMIT 100"
//! );
//! ```
//!
//! The produced string is a plain value: this crate performs no I/O and
//! does not validate or execute the query.

pub mod builder;
pub mod criterion;
pub mod duration;

pub use crate::builder::{QueryBuilder, QueryState, SortOrder};
pub use crate::criterion::{Criterion, Value};
pub use crate::duration::{Duration, TimeUnit};
