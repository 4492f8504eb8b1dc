use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::slices;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A named parameter for [`interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Str(String),
    StrList(Vec<String>),
    Int(i64),
    IntList(Vec<i64>),
    Float(f64),
    FloatList(Vec<f64>),
    Bool(bool),
    BoolList(Vec<bool>),
    Time(DateTime<Utc>),
    TimeList(Vec<DateTime<Utc>>),
}

impl SqlArg {
    fn render(&self) -> String {
        match self {
            SqlArg::Str(s) => quote(s),
            SqlArg::StrList(list) => quote(&list.join("', '")),
            SqlArg::Int(i) => i.to_string(),
            SqlArg::IntList(list) => slices::join(list, ", "),
            SqlArg::Float(f) => f.to_string(),
            SqlArg::FloatList(list) => slices::join(list, ", "),
            SqlArg::Bool(b) => b.to_string(),
            SqlArg::BoolList(list) => slices::join(list, ", "),
            SqlArg::Time(t) => quote(&t.format(TIME_FORMAT).to_string()),
            SqlArg::TimeList(list) => {
                let formatted: Vec<String> = list
                    .iter()
                    .map(|t| t.format(TIME_FORMAT).to_string())
                    .collect();
                quote(&formatted.join("', '"))
            }
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{s}'")
}

/// Replace `:name` placeholders in `query` with literal values.
///
/// Longer names are replaced first so that `:id` does not clobber the start
/// of `:id_list`. Values are not escaped; the output is meant for logs and
/// debugging, never for execution.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use utilbelt::sql::{SqlArg, interpolate};
///
/// let params = HashMap::from([
///     ("id".to_string(), SqlArg::Int(7)),
///     ("name".to_string(), SqlArg::from("bob")),
/// ]);
/// assert_eq!(
///     interpolate("SELECT * FROM users WHERE id = :id AND name = :name", &params),
///     "SELECT * FROM users WHERE id = 7 AND name = 'bob'",
/// );
/// ```
pub fn interpolate(query: &str, params: &HashMap<String, SqlArg>) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut query = query.to_string();
    for key in keys {
        let placeholder = format!(":{key}");
        query = query.replace(&placeholder, &params[key].render());
    }
    query
}

impl From<&str> for SqlArg {
    fn from(s: &str) -> Self {
        SqlArg::Str(s.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(s: String) -> Self {
        SqlArg::Str(s)
    }
}

impl From<Vec<String>> for SqlArg {
    fn from(list: Vec<String>) -> Self {
        SqlArg::StrList(list)
    }
}

impl From<i64> for SqlArg {
    fn from(i: i64) -> Self {
        SqlArg::Int(i)
    }
}

impl From<Vec<i64>> for SqlArg {
    fn from(list: Vec<i64>) -> Self {
        SqlArg::IntList(list)
    }
}

impl From<f64> for SqlArg {
    fn from(f: f64) -> Self {
        SqlArg::Float(f)
    }
}

impl From<bool> for SqlArg {
    fn from(b: bool) -> Self {
        SqlArg::Bool(b)
    }
}

impl From<DateTime<Utc>> for SqlArg {
    fn from(t: DateTime<Utc>) -> Self {
        SqlArg::Time(t)
    }
}
