//! Column types that convert to and from driver-neutral [`SqlValue`]s, and
//! named-parameter interpolation for logging queries.
//!
//! Database drivers differ in how they hand values over, so the column types
//! here only deal in [`SqlValue`]. An adapter for a concrete driver maps its
//! own value type onto [`SqlValue`] and calls [`FromSqlValue`] /
//! [`ToSqlValue`].

mod boolean;
mod interpolate;
mod list;

pub use boolean::SqlBool;
pub use interpolate::{SqlArg, interpolate};
pub use list::{IntList, StringList};

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SqlError;

/// A value as exchanged with a database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Int(_) => "int",
            SqlValue::Float(_) => "float",
            SqlValue::Bool(_) => "bool",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Text(_) => "text",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    /// Borrow textual content from `Text` or (lossily) from `Bytes`.
    pub(crate) fn as_text(&self) -> Option<std::borrow::Cow<'_, str>> {
        match self {
            SqlValue::Text(s) => Some(std::borrow::Cow::Borrowed(s)),
            SqlValue::Bytes(b) => Some(String::from_utf8_lossy(b)),
            _ => None,
        }
    }
}

/// Conversion into a value a driver can store.
pub trait ToSqlValue {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError>;
}

/// Conversion from a value a driver has read.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError>;
}

/// A column holding trusted HTML markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Html(pub String);

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToSqlValue for Html {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError> {
        Ok(SqlValue::Text(self.0.clone()))
    }
}

impl FromSqlValue for Html {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Null => Ok(Html::default()),
            SqlValue::Text(s) => Ok(Html(s)),
            SqlValue::Bytes(b) => Ok(Html(String::from_utf8_lossy(&b).into_owned())),
            other => Err(SqlError::UnsupportedFormat(other.type_name())),
        }
    }
}
