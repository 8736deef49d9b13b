//! Filter types for building list queries.
//!
//! Expressions render to the OData `$filter` dialect understood by the
//! hosted list API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// String prefix match.
    StartsWith,
}

impl FilterOp {
    fn keyword(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::StartsWith => "startswith",
        }
    }
}

/// A filter operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A point in time.
    DateTime(DateTime<Utc>),
    /// Null / no value.
    Null,
}

impl FilterValue {
    fn to_odata(&self) -> String {
        match self {
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Integer(i) => i.to_string(),
            // The list API stores yes/no columns as 0/1.
            Self::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
            Self::DateTime(dt) => format!(
                "datetime'{}'",
                dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            ),
            Self::Null => "null".to_string(),
        }
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: FilterValue) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Shorthand for a prefix filter.
    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::new(field, FilterOp::StartsWith, FilterValue::String(prefix.into()))
    }

    /// Render the condition as an OData expression.
    pub fn to_odata(&self) -> String {
        match self.op {
            FilterOp::StartsWith => {
                format!("startswith({},{})", self.field, self.value.to_odata())
            }
            op => format!("{} {} {}", self.field, op.keyword(), self.value.to_odata()),
        }
    }
}

/// A boolean combination of filter conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterExpr {
    /// A single condition.
    Field(FilterField),
    /// All sub-expressions must hold.
    And(Vec<FilterExpr>),
    /// At least one sub-expression must hold.
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Render the expression as an OData `$filter` string.
    pub fn to_odata(&self) -> String {
        match self {
            Self::Field(field) => field.to_odata(),
            Self::And(parts) => Self::join(parts, " and "),
            Self::Or(parts) => Self::join(parts, " or "),
        }
    }

    fn join(parts: &[FilterExpr], sep: &str) -> String {
        parts
            .iter()
            .map(|part| match part {
                Self::Field(_) => part.to_odata(),
                nested => format!("({})", nested.to_odata()),
            })
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl From<FilterField> for FilterExpr {
    fn from(field: FilterField) -> Self {
        Self::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_string_escaping() {
        let f = FilterField::eq("Title", FilterValue::String("O'Brien".into()));
        assert_eq!(f.to_odata(), "Title eq 'O''Brien'");
    }

    #[test]
    fn test_boolean_renders_as_bit() {
        let f = FilterField::eq("HandedOut", FilterValue::Boolean(true));
        assert_eq!(f.to_odata(), "HandedOut eq 1");
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let f = FilterField::new("DestructionDate", FilterOp::Lt, FilterValue::DateTime(dt));
        assert_eq!(
            f.to_odata(),
            "DestructionDate lt datetime'2024-03-01T00:00:00.000Z'"
        );
    }

    #[test]
    fn test_nested_expression() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let expr = FilterExpr::And(vec![
            FilterField::starts_with("ContentTypeId", "0x0100").into(),
            FilterExpr::Or(vec![
                FilterField::new("DestructionDate", FilterOp::Ge, FilterValue::DateTime(dt))
                    .into(),
                FilterField::eq("Indestructible", FilterValue::Boolean(true)).into(),
            ]),
        ]);
        assert_eq!(
            expr.to_odata(),
            "startswith(ContentTypeId,'0x0100') and \
             (DestructionDate ge datetime'2024-03-01T00:00:00.000Z' or Indestructible eq 1)"
        );
    }
}
