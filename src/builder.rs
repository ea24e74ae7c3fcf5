//! Fluent query builder and clause rendering
//!
//! [`QueryBuilder`] accumulates clause state through chained calls and
//! renders it into a single InfluxQL SELECT statement on [`build`]. The
//! clause order is fixed:
//!
//! ```text
//! SELECT <fields> FROM [<rp>.]<measurement> [WHERE <expr>]
//! [GROUP BY <grouping>] [FILL(<v>)] [ORDER BY time <ASC|DESC>]
//! [LIMIT <n>] [OFFSET <n>]
//! ```
//!
//! Rendering is fail-soft: no operation returns an error, and a builder
//! missing its SELECT fields or its measurement renders the empty string
//! rather than a partial statement.
//!
//! [`build`]: QueryBuilder::build

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::criterion::{Criterion, Value};
use crate::duration::Duration;

/// Matches a function-call field like `MEAN("temperature")`
static FUNCTION_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".+\(.+\)$").expect("function call pattern"));

/// Matches an arithmetic field: an operand followed by `+ - * /`
static ARITHMETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+\s*[-+*/]").expect("arithmetic pattern"));

/// Sort direction on the implicit time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Read-only snapshot of builder state
///
/// Returned by [`QueryBuilder::state`] for introspection without
/// re-parsing the rendered string. `limit`/`offset` distinguish "set to
/// zero" from "never set" via `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// Selected fields/expressions, in insertion order
    pub fields: Vec<String>,
    /// Target measurement, if configured
    pub measurement: Option<String>,
    /// Retention-policy qualifier, if configured
    pub retention_policy: Option<String>,
    /// Effective time-window token (`10m`), raw interval beats Duration
    pub interval: Option<String>,
    /// Grouping tags, in insertion order
    pub group_tags: Vec<String>,
    /// Fill token in bare text form, if configured
    pub fill: Option<String>,
    /// Sort direction, if configured
    pub order: Option<SortOrder>,
    /// Row limit; `Some(0)` is a legitimate explicit limit
    pub limit: Option<u64>,
    /// Row offset; `Some(0)` is a legitimate explicit offset
    pub offset: Option<u64>,
}

/// Fluent builder for InfluxQL SELECT statements
///
/// Every configuration call takes the builder by value and returns it,
/// so calls chain; [`build`](Self::build) renders the current state and
/// may be called any number of times.
///
/// ```
/// use influxql_builder::QueryBuilder;
///
/// let q = QueryBuilder::new()
///     .select(&["temperature", "humidity"])
///     .from("weather")
///     .where_clause("city", "=", "paris")
///     .limit(10)
///     .build();
///
/// assert_eq!(
///     q,
///     "SELECT \"temperature\",\"humidity\" FROM \"weather\" \
///      WHERE \"city\" = 'paris' LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    fields: Vec<String>,
    measurement: Option<String>,
    retention_policy: Option<String>,
    where_criterion: Option<Criterion>,
    and_criteria: Vec<Criterion>,
    or_criteria: Vec<Criterion>,
    where_group: Option<Box<QueryBuilder>>,
    and_groups: Vec<QueryBuilder>,
    or_groups: Vec<QueryBuilder>,
    interval: Option<String>,
    window: Option<Duration>,
    group_tags: Vec<String>,
    fill: Option<Value>,
    order: Option<SortOrder>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl QueryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fields or expressions to the SELECT list
    ///
    /// Repeated calls accumulate. A field may be a bare name, `name AS
    /// alias`, a function call like `MEAN("temperature")`, an arithmetic
    /// expression like `value * 2`, or the wildcard `*`. A wildcard
    /// anywhere in the list collapses the whole clause to `SELECT *`, so
    /// it must not be mixed with named fields.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Set the source measurement
    pub fn from(mut self, measurement: impl Into<String>) -> Self {
        self.measurement = Some(measurement.into());
        self
    }

    /// Set the source measurement qualified by a retention policy
    ///
    /// Renders as `FROM <rp>."<measurement>"`.
    pub fn from_retention_policy(
        mut self,
        retention_policy: impl Into<String>,
        measurement: impl Into<String>,
    ) -> Self {
        self.retention_policy = Some(retention_policy.into());
        self.measurement = Some(measurement.into());
        self
    }

    /// Set the root WHERE criterion (last call wins)
    pub fn where_clause(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.where_criterion = Some(Criterion::new(key, op, value));
        self
    }

    /// Append an AND criterion
    pub fn and(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.and_criteria.push(Criterion::new(key, op, value));
        self
    }

    /// Append an OR criterion
    pub fn or(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.or_criteria.push(Criterion::new(key, op, value));
        self
    }

    /// Install a parenthesized root group (last call wins)
    ///
    /// The sub-builder is taken by value: it belongs to this slot alone
    /// and cannot be mutated after installation. When both a root group
    /// and a flat root criterion are set, the group takes rendering
    /// precedence, regardless of call order. Only the sub-builder's
    /// boolean expression is rendered; its other clauses are ignored,
    /// and a sub-builder with no criteria at all is skipped entirely.
    pub fn where_brackets(mut self, group: QueryBuilder) -> Self {
        self.where_group = Some(Box::new(group));
        self
    }

    /// Append a parenthesized AND group
    pub fn and_brackets(mut self, group: QueryBuilder) -> Self {
        self.and_groups.push(group);
        self
    }

    /// Append a parenthesized OR group
    pub fn or_brackets(mut self, group: QueryBuilder) -> Self {
        self.or_groups.push(group);
        self
    }

    /// Set a raw time-window interval, e.g. `10m`
    ///
    /// Renders as `GROUP BY time(10m)`. Takes precedence over
    /// [`group_by_time`](Self::group_by_time) when both are set.
    pub fn group_by(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Set the time window from a [`Duration`]
    pub fn group_by_time(mut self, window: Duration) -> Self {
        self.window = Some(window);
        self
    }

    /// Append grouping tags
    ///
    /// Accumulates across calls. Tags follow the time window in the
    /// rendered clause: `GROUP BY time(5m),sensorId,location`.
    pub fn group_by_tags(mut self, tags: &[&str]) -> Self {
        self.group_tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Set the fill token, rendered bare inside `FILL(...)`
    pub fn fill(mut self, value: impl Into<Value>) -> Self {
        self.fill = Some(value.into());
        self
    }

    /// Set the row limit; zero is a legitimate explicit limit
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set the row offset; zero is a legitimate explicit offset
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sort oldest first (last call wins over [`desc`](Self::desc))
    pub fn asc(mut self) -> Self {
        self.order = Some(SortOrder::Asc);
        self
    }

    /// Sort newest first (last call wins over [`asc`](Self::asc))
    pub fn desc(mut self) -> Self {
        self.order = Some(SortOrder::Desc);
        self
    }

    /// Discard all accumulated state and return a fresh builder
    pub fn clean(self) -> Self {
        Self::new()
    }

    /// Snapshot the current builder state
    pub fn state(&self) -> QueryState {
        QueryState {
            fields: self.fields.clone(),
            measurement: self.measurement.clone(),
            retention_policy: self.retention_policy.clone(),
            interval: self
                .interval
                .clone()
                .or_else(|| self.window.map(|w| w.interval())),
            group_tags: self.group_tags.clone(),
            fill: self.fill.as_ref().map(|v| v.to_string()),
            order: self.order,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Render the current state into a query string
    ///
    /// Idempotent and side-effect-free. Returns the empty string when
    /// either the SELECT fields or the measurement are missing.
    pub fn build(&self) -> String {
        let select = self.render_select();
        let from = self.render_from();

        if select.is_empty() || from.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        out.push_str(&select);
        out.push_str(&from);
        out.push_str(&self.render_where());
        out.push_str(&self.render_group_by());
        out.push_str(&self.render_fill());
        out.push_str(&self.render_order());
        out.push_str(&self.render_limit());
        out.push_str(&self.render_offset());

        let statement = out.trim().to_string();
        tracing::debug!("rendered query: {}", statement);
        statement
    }

    fn render_select(&self) -> String {
        if self.fields.is_empty() {
            return String::new();
        }

        // A wildcard anywhere collapses the whole clause
        if self.fields.iter().any(|f| f == "*") {
            return "SELECT * ".to_string();
        }

        let fields: Vec<String> = self.fields.iter().map(|f| render_field(f)).collect();

        format!("SELECT {} ", fields.join(","))
    }

    fn render_from(&self) -> String {
        let measurement = match &self.measurement {
            Some(m) => m,
            None => return String::new(),
        };

        match &self.retention_policy {
            Some(rp) => format!("FROM {}.\"{}\" ", rp, measurement),
            None => format!("FROM \"{}\" ", measurement),
        }
    }

    fn render_where(&self) -> String {
        if self.where_criterion.is_none() && self.where_group.is_none() {
            return String::new();
        }

        let condition = self.render_condition();
        if condition.is_empty() {
            return String::new();
        }

        format!("WHERE {} ", condition)
    }

    /// Render the boolean expression without the `WHERE` keyword
    ///
    /// Bracket groups recurse through this path, so a sub-builder that
    /// carries only criteria still renders.
    fn render_condition(&self) -> String {
        let mut parts = Vec::new();

        // Groups with nothing to say are skipped rather than rendered as ()
        let root_group = self
            .where_group
            .as_ref()
            .map(|group| group.render_condition())
            .filter(|condition| !condition.is_empty());

        if let Some(condition) = root_group {
            parts.push(format!("({})", condition));
        } else if let Some(root) = &self.where_criterion {
            parts.push(root.render());
        }

        if !self.and_criteria.is_empty() {
            let joined: Vec<String> = self.and_criteria.iter().map(Criterion::render).collect();
            parts.push(format!("AND {}", joined.join(" AND ")));
        }

        if !self.or_criteria.is_empty() {
            let joined: Vec<String> = self.or_criteria.iter().map(Criterion::render).collect();
            parts.push(format!("OR {}", joined.join(" OR ")));
        }

        for group in &self.and_groups {
            let condition = group.render_condition();
            if !condition.is_empty() {
                parts.push(format!("AND ({})", condition));
            }
        }

        for group in &self.or_groups {
            let condition = group.render_condition();
            if !condition.is_empty() {
                parts.push(format!("OR ({})", condition));
            }
        }

        parts.join(" ")
    }

    fn render_group_by(&self) -> String {
        let time_window = match (&self.interval, &self.window) {
            (Some(raw), _) => Some(format!("time({})", raw)),
            (None, Some(window)) => Some(window.to_string()),
            (None, None) => None,
        };

        let mut parts = Vec::new();
        if let Some(window) = time_window {
            parts.push(window);
        }
        parts.extend(self.group_tags.iter().cloned());

        if parts.is_empty() {
            return String::new();
        }

        format!("GROUP BY {} ", parts.join(","))
    }

    fn render_fill(&self) -> String {
        match &self.fill {
            Some(value) => format!("FILL({}) ", value),
            None => String::new(),
        }
    }

    fn render_order(&self) -> String {
        match self.order {
            Some(order) => format!("ORDER BY time {} ", order),
            None => String::new(),
        }
    }

    fn render_limit(&self) -> String {
        match self.limit {
            Some(n) => format!("LIMIT {} ", n),
            None => String::new(),
        }
    }

    fn render_offset(&self) -> String {
        match self.offset {
            Some(n) => format!("OFFSET {} ", n),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build())
    }
}

/// Render a single SELECT field
///
/// Splits on `" AS "`: the expression part passes through verbatim when
/// it is a function call or arithmetic expression, otherwise it is
/// double-quoted; the alias, when present, is always double-quoted.
fn render_field(field: &str) -> String {
    let (expr, alias) = match field.split_once(" AS ") {
        Some((expr, alias)) => (expr, Some(alias)),
        None => (field, None),
    };

    let rendered = if FUNCTION_CALL.is_match(expr) || ARITHMETIC.is_match(expr) {
        expr.to_string()
    } else {
        format!("\"{}\"", expr)
    };

    match alias {
        Some(alias) => format!("{} AS \"{}\"", rendered, alias),
        None => rendered,
    }
}
