//! Structured query predicates accepted by the catalog finders.
//!
//! A [`Condition`] is a serializable tree of conjunctions and disjunctions
//! over `(field, operator, value)` triples. Field names are the public names
//! of the entity being searched (`id`, `name`, `index`, `default`, ...); each
//! storage entity declares which names it understands through
//! [`Filterable`].

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, ColumnType, EntityTrait, Value};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{CatalogError, CatalogResult};

/// Nesting deeper than this is rejected as malformed.
pub const MAX_CONDITION_DEPTH: usize = 16;

/// Comparison applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    /// Case-insensitive (ASCII) substring match on a text field
    Like,
}

/// Predicate tree passed through to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Every child must hold; an empty conjunction matches everything.
    All { conditions: Vec<Condition> },
    /// At least one child must hold.
    Any { conditions: Vec<Condition> },
    Field {
        field: String,
        op: Operator,
        #[serde(default)]
        value: JsonValue,
    },
}

impl Condition {
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn field(field: impl Into<String>, op: Operator, value: impl Into<JsonValue>) -> Self {
        Condition::Field {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::field(field, Operator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::field(field, Operator::Ne, value)
    }

    pub fn like(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::field(field, Operator::Like, needle.into())
    }

    pub fn is_in<V: Into<JsonValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<JsonValue> = values.into_iter().map(Into::into).collect();
        Self::field(field, Operator::In, values)
    }

    /// Translates the tree into a SeaORM condition over the columns of `E`.
    pub fn to_sea_condition<E: Filterable>(&self) -> CatalogResult<sea_orm::Condition> {
        self.translate::<E>(0)
    }

    fn translate<E: Filterable>(&self, depth: usize) -> CatalogResult<sea_orm::Condition> {
        if depth >= MAX_CONDITION_DEPTH {
            return Err(CatalogError::malformed(format!(
                "condition nests deeper than {} levels",
                MAX_CONDITION_DEPTH
            )));
        }

        match self {
            Condition::All { conditions } => {
                let mut out = sea_orm::Condition::all();
                for child in conditions {
                    out = out.add(child.translate::<E>(depth + 1)?);
                }
                Ok(out)
            }
            Condition::Any { conditions } => {
                if conditions.is_empty() {
                    return Err(CatalogError::malformed(
                        "'any' needs at least one branch",
                    ));
                }
                let mut out = sea_orm::Condition::any();
                for child in conditions {
                    out = out.add(child.translate::<E>(depth + 1)?);
                }
                Ok(out)
            }
            Condition::Field { field, op, value } => {
                let column = E::filter_column(field).ok_or_else(|| {
                    CatalogError::malformed(format!(
                        "unknown field '{}' for {}",
                        field,
                        E::default().table_name()
                    ))
                })?;
                Ok(sea_orm::Condition::all().add(field_expr(column, field, *op, value)?))
            }
        }
    }
}

/// Storage entities that can be searched with a [`Condition`].
pub trait Filterable: EntityTrait {
    /// Maps a public field name to its column, `None` when unknown.
    fn filter_column(field: &str) -> Option<Self::Column>;
}

/// Value domain of a column, as far as conditions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    Text,
    Integer,
    Boolean,
    Other,
}

impl FieldType {
    fn of<C: ColumnTrait>(column: &C) -> Self {
        match column.def().get_column_type() {
            ColumnType::String(_) | ColumnType::Text | ColumnType::Char(_) => FieldType::Text,
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned => FieldType::Integer,
            ColumnType::Boolean => FieldType::Boolean,
            _ => FieldType::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldType::Text => "a string",
            FieldType::Integer => "an integer",
            FieldType::Boolean => "a boolean",
            FieldType::Other => "a scalar",
        }
    }
}

fn field_expr<C: ColumnTrait>(
    column: C,
    field: &str,
    op: Operator,
    value: &JsonValue,
) -> CatalogResult<SimpleExpr> {
    let ty = FieldType::of(&column);
    let expr = match op {
        Operator::Eq if value.is_null() => column.is_null(),
        Operator::Ne if value.is_null() => column.is_not_null(),
        Operator::Eq => column.eq(typed(field, ty, value)?),
        Operator::Ne => column.ne(typed(field, ty, value)?),
        Operator::Gt => column.gt(ordered(field, ty, value)?),
        Operator::Gte => column.gte(ordered(field, ty, value)?),
        Operator::Lt => column.lt(ordered(field, ty, value)?),
        Operator::Lte => column.lte(ordered(field, ty, value)?),
        Operator::In => column.is_in(list(field, ty, value)?),
        Operator::NotIn => column.is_not_in(list(field, ty, value)?),
        Operator::Like => {
            if ty != FieldType::Text {
                return Err(CatalogError::malformed(format!(
                    "'like' needs a text field, '{}' is not one",
                    field
                )));
            }
            match value {
                JsonValue::String(needle) => contains_ignore_case(column, needle),
                _ => {
                    return Err(CatalogError::malformed(format!(
                        "'like' on '{}' needs a string value",
                        field
                    )));
                }
            }
        }
    };
    Ok(expr)
}

/// Converts `value` into a bind parameter of the column's type.
fn typed(field: &str, ty: FieldType, value: &JsonValue) -> CatalogResult<Value> {
    let mismatch = || {
        CatalogError::malformed(format!(
            "'{}' needs {} value, got {}",
            field,
            ty.describe(),
            value
        ))
    };
    match (ty, value) {
        (FieldType::Text | FieldType::Other, JsonValue::String(s)) => Ok(s.clone().into()),
        (FieldType::Boolean | FieldType::Other, JsonValue::Bool(b)) => Ok((*b).into()),
        (FieldType::Integer, JsonValue::Number(n)) => {
            n.as_i64().map(Value::from).ok_or_else(mismatch)
        }
        (FieldType::Other, JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(CatalogError::malformed(format!(
                    "number out of range for '{}'",
                    field
                )))
            }
        }
        _ => Err(mismatch()),
    }
}

fn ordered(field: &str, ty: FieldType, value: &JsonValue) -> CatalogResult<Value> {
    if ty == FieldType::Boolean || value.is_boolean() {
        return Err(CatalogError::malformed(format!(
            "ordering comparison on '{}' cannot use a boolean",
            field
        )));
    }
    typed(field, ty, value)
}

fn list(field: &str, ty: FieldType, value: &JsonValue) -> CatalogResult<Vec<Value>> {
    match value {
        JsonValue::Array(items) => items.iter().map(|item| typed(field, ty, item)).collect(),
        _ => Err(CatalogError::malformed(format!(
            "'in'/'not_in' on '{}' needs an array value",
            field
        ))),
    }
}

/// Case-insensitive substring match, identical on SQLite and Postgres.
///
/// Only ASCII letters fold, since SQLite's `LOWER` ignores everything else.
pub(crate) fn contains_ignore_case<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_ascii_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
