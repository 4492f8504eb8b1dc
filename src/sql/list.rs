use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::{FromSqlValue, SqlValue, ToSqlValue};
use crate::error::SqlError;
use crate::slices;

/// Integers stored as a single comma separated column, e.g. `"1, 2, 3"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntList(pub Vec<i64>);

/// Strings stored as a single comma separated column. Items must not contain
/// commas; empty items are dropped on the way in and out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

fn items(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}

impl ToSqlValue for IntList {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError> {
        Ok(SqlValue::Text(slices::join_int(&self.0)))
    }
}

impl FromSqlValue for IntList {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        if let SqlValue::Int(i) = value {
            return Ok(IntList(vec![i]));
        }
        if value == SqlValue::Null {
            return Ok(IntList::default());
        }
        let text = value
            .as_text()
            .ok_or(SqlError::UnsupportedFormat(value.type_name()))?;

        items(&text)
            .map(|item| {
                item.parse().map_err(|source| SqlError::InvalidInteger {
                    value: item.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(IntList)
    }
}

impl ToSqlValue for StringList {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError> {
        let kept: Vec<&str> = self
            .0
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        Ok(SqlValue::Text(kept.join(",")))
    }
}

impl FromSqlValue for StringList {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        if value == SqlValue::Null {
            return Ok(StringList::default());
        }
        let text = value
            .as_text()
            .ok_or(SqlError::UnsupportedFormat(value.type_name()))?;
        Ok(StringList(items(&text).map(str::to_string).collect()))
    }
}

impl Deref for IntList {
    type Target = Vec<i64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for IntList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Deref for StringList {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StringList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<i64>> for IntList {
    fn from(ints: Vec<i64>) -> Self {
        IntList(ints)
    }
}

impl From<Vec<String>> for StringList {
    fn from(strings: Vec<String>) -> Self {
        StringList(strings)
    }
}
