use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{FromSqlValue, SqlValue, ToSqlValue};
use crate::error::SqlError;

/// A boolean column that tolerates the many ways databases and clients
/// spell true and false: numbers, single bytes, and text such as `"1"` or
/// `" TRUE "`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SqlBool(pub bool);

impl SqlBool {
    // Column text: bare `true`/`1` or `false`/`0` only.
    fn scan_text(text: &str) -> Result<bool, SqlError> {
        match text.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(SqlError::InvalidValue(other.to_string())),
        }
    }
}

impl From<bool> for SqlBool {
    fn from(b: bool) -> Self {
        SqlBool(b)
    }
}

impl From<SqlBool> for bool {
    fn from(b: SqlBool) -> Self {
        b.0
    }
}

impl fmt::Display for SqlBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

impl FromStr for SqlBool {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed);
        SqlBool::scan_text(unquoted).map(SqlBool)
    }
}

impl ToSqlValue for SqlBool {
    fn to_sql_value(&self) -> Result<SqlValue, SqlError> {
        Ok(SqlValue::Bool(self.0))
    }
}

impl FromSqlValue for SqlBool {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        let b = match value {
            SqlValue::Null => false,
            SqlValue::Int(i) => i != 0,
            SqlValue::Float(f) => f != 0.0,
            SqlValue::Bool(b) => b,
            SqlValue::Bytes(raw) if raw.as_slice() == [0x1] => true,
            SqlValue::Bytes(raw) if raw.as_slice() == [0x0] => false,
            SqlValue::Bytes(raw) => SqlBool::scan_text(&String::from_utf8_lossy(&raw))?,
            SqlValue::Text(text) => SqlBool::scan_text(&text)?,
            SqlValue::Timestamp(_) => return Err(SqlError::UnsupportedFormat("timestamp")),
        };
        Ok(SqlBool(b))
    }
}

impl Serialize for SqlBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for SqlBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SqlBoolVisitor)
    }
}

struct SqlBoolVisitor;

impl Visitor<'_> for SqlBoolVisitor {
    type Value = SqlBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0 or 1, or a boolean string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SqlBool, E> {
        Ok(SqlBool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SqlBool, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SqlBool, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SqlBool, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan() {
        let cases = [
            (SqlValue::Bytes(b"true".to_vec()), true),
            (SqlValue::Float(1.0), true),
            (SqlValue::Bytes(vec![0x1]), true),
            (SqlValue::Int(1), true),
            (SqlValue::Text("true".into()), true),
            (SqlValue::Bool(true), true),
            (SqlValue::Text("1".into()), true),
            (SqlValue::Text(" TRUE ".into()), true),
            (SqlValue::Bytes(b"false".to_vec()), false),
            (SqlValue::Float(0.0), false),
            (SqlValue::Bytes(vec![0x0]), false),
            (SqlValue::Int(0), false),
            (SqlValue::Text("false".into()), false),
            (SqlValue::Bool(false), false),
            (SqlValue::Text("0".into()), false),
            (SqlValue::Null, false),
        ];
        for (input, want) in cases {
            let got = SqlBool::from_sql_value(input.clone()).unwrap();
            assert_eq!(got, SqlBool(want), "input {input:?}");
        }
    }

    #[test]
    fn test_scan_errors() {
        assert_eq!(
            SqlBool::from_sql_value(SqlValue::Text("maybe".into())),
            Err(SqlError::InvalidValue("maybe".into()))
        );
        assert_eq!(
            SqlBool::from_sql_value(SqlValue::Bytes(vec![0x2])).unwrap_err().to_string(),
            "invalid value '\u{2}'"
        );
        assert_eq!(
            SqlBool::from_sql_value(SqlValue::Text("\"true\"".into())),
            Err(SqlError::InvalidValue("\"true\"".into()))
        );
        assert!(SqlBool::from_sql_value(SqlValue::Bytes(b"\"false\"".to_vec())).is_err());
        let timestamp = chrono::NaiveDateTime::default();
        assert_eq!(
            SqlBool::from_sql_value(SqlValue::Timestamp(timestamp)),
            Err(SqlError::UnsupportedFormat("timestamp"))
        );
    }

    #[test]
    fn test_value() {
        assert_eq!(SqlBool(true).to_sql_value().unwrap(), SqlValue::Bool(true));
        assert_eq!(SqlBool(false).to_sql_value().unwrap(), SqlValue::Bool(false));
    }

    #[test]
    fn test_display() {
        assert_eq!(SqlBool(true).to_string(), "true");
        assert_eq!(SqlBool(false).to_string(), "false");
    }

    #[test]
    fn test_from_str() {
        let cases = [
            ("true", true),
            ("1", true),
            ("\"true\"", true),
            ("  True\n", true),
            ("false", false),
            ("0", false),
            ("\"false\"", false),
        ];
        for (input, want) in cases {
            assert_eq!(input.parse::<SqlBool>().unwrap(), SqlBool(want), "input {input:?}");
        }
        assert!("yes".parse::<SqlBool>().is_err());
        assert!("".parse::<SqlBool>().is_err());
    }

    #[test]
    fn test_json() {
        assert_eq!(serde_json::to_string(&SqlBool(true)).unwrap(), "true");

        let cases = [("true", true), ("false", false), ("1", true), ("0", false), ("\"true\"", true)];
        for (input, want) in cases {
            let got: SqlBool = serde_json::from_str(input).unwrap();
            assert_eq!(got, SqlBool(want), "input {input}");
        }
        assert!(serde_json::from_str::<SqlBool>("2").is_err());
        assert!(serde_json::from_str::<SqlBool>("\"nope\"").is_err());
    }
}
