//! Dynamic SQL for partial updates and filtered selects.
//!
//! Statements are assembled from (column, operator, operand) triples and
//! rendered with positional `$n` placeholders. Values never appear in the
//! SQL text; they travel separately in [`BuiltQuery::params`] in placeholder
//! order.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{EndDateChange, SubscriptionFilter, SubscriptionPatch};

/// Table holding subscription rows.
pub const TABLE: &str = "subscriptions";

/// Column list selected for every subscription read.
pub const COLUMNS: &str = "id, service_name, price, user_id, start_date, end_date";

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    BigInt(i64),
    Date(NaiveDate),
}

/// Comparison between a column and its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        };
        write!(f, "{}", s)
    }
}

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Rendered as the next placeholder, value pushed to the params.
    Bind(SqlValue),
    /// Rendered as the literal `NULL`.
    Null,
}

/// One `column <op> operand` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub column: &'static str,
    pub op: Operator,
    pub operand: Operand,
}

impl Clause {
    fn bind(column: &'static str, op: Operator, value: SqlValue) -> Self {
        Self {
            column,
            op,
            operand: Operand::Bind(value),
        }
    }

    fn null(column: &'static str) -> Self {
        Self {
            column,
            op: Operator::Eq,
            operand: Operand::Null,
        }
    }
}

/// Rendered SQL with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryBuildError {
    #[error("nothing to update")]
    EmptyPatch,
}

/// Accumulates placeholders so numbering stays consistent across fragments.
#[derive(Default)]
struct Renderer {
    params: Vec<SqlValue>,
}

impl Renderer {
    fn placeholder(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    fn clause(&mut self, clause: Clause) -> String {
        let rhs = match clause.operand {
            Operand::Bind(value) => self.placeholder(value),
            Operand::Null => "NULL".to_string(),
        };
        format!("{} {} {}", clause.column, clause.op, rhs)
    }

    fn join(&mut self, clauses: Vec<Clause>, separator: &str) -> String {
        clauses
            .into_iter()
            .map(|c| self.clause(c))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// SET assignments for the supplied patch fields.
pub fn update_assignments(patch: &SubscriptionPatch) -> Vec<Clause> {
    let mut clauses = Vec::new();
    if let Some(user_id) = &patch.user_id {
        clauses.push(Clause::bind("user_id", Operator::Eq, SqlValue::Text(user_id.clone())));
    }
    if let Some(service_name) = &patch.service_name {
        clauses.push(Clause::bind(
            "service_name",
            Operator::Eq,
            SqlValue::Text(service_name.clone()),
        ));
    }
    if let Some(price) = patch.price {
        clauses.push(Clause::bind("price", Operator::Eq, SqlValue::BigInt(price)));
    }
    if let Some(start_date) = patch.start_date {
        clauses.push(Clause::bind(
            "start_date",
            Operator::Eq,
            SqlValue::Date(start_date.as_date()),
        ));
    }
    match patch.end_date {
        EndDateChange::Unchanged => {}
        EndDateChange::Clear => clauses.push(Clause::null("end_date")),
        EndDateChange::SetTo(end_date) => clauses.push(Clause::bind(
            "end_date",
            Operator::Eq,
            SqlValue::Date(end_date.as_date()),
        )),
    }
    clauses
}

/// WHERE conditions for the supplied filter fields.
pub fn filter_conditions(filter: &SubscriptionFilter) -> Vec<Clause> {
    let mut clauses = Vec::new();
    if let Some(user_id) = &filter.user_id {
        clauses.push(Clause::bind("user_id", Operator::Eq, SqlValue::Text(user_id.clone())));
    }
    if let Some(service_name) = &filter.service_name {
        clauses.push(Clause::bind(
            "service_name",
            Operator::Eq,
            SqlValue::Text(service_name.clone()),
        ));
    }
    if let Some(start_date) = filter.start_date {
        clauses.push(Clause::bind(
            "start_date",
            Operator::Gte,
            SqlValue::Date(start_date.as_date()),
        ));
    }
    if let Some(end_date) = filter.end_date {
        clauses.push(Clause::bind(
            "end_date",
            Operator::Lte,
            SqlValue::Date(end_date.as_date()),
        ));
    }
    clauses
}

/// `UPDATE subscriptions SET ... WHERE id = $n` for the supplied fields.
///
/// # Errors
///
/// - `EmptyPatch` if the patch supplies no field
pub fn build_update(
    id: SubscriptionId,
    patch: &SubscriptionPatch,
) -> Result<BuiltQuery, QueryBuildError> {
    let assignments = update_assignments(patch);
    if assignments.is_empty() {
        return Err(QueryBuildError::EmptyPatch);
    }

    let mut renderer = Renderer::default();
    let set = renderer.join(assignments, ", ");
    let id_placeholder = renderer.placeholder(SqlValue::BigInt(id.as_i64()));

    Ok(BuiltQuery {
        sql: format!("UPDATE {} SET {} WHERE id = {}", TABLE, set, id_placeholder),
        params: renderer.params,
    })
}

/// `SELECT ... FROM subscriptions [WHERE ...]`, without ordering.
pub fn build_select(filter: Option<&SubscriptionFilter>) -> BuiltQuery {
    let mut sql = format!("SELECT {} FROM {}", COLUMNS, TABLE);
    let conditions = filter.map(filter_conditions).unwrap_or_default();

    let mut renderer = Renderer::default();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&renderer.join(conditions, " AND "));
    }

    BuiltQuery {
        sql,
        params: renderer.params,
    }
}
