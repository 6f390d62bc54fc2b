//! Builds the dynamic `SET` clause for partial updates.
//!
//! Column identifiers come only from the caller's whitelist (or the field name itself, which the
//! typed update structs also fix at compile time). Values are always positional parameters.

use crate::error::AppError;
use crate::sql::BindValue;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Output of [`sql_for_partial_update`]: `"col1"=$1, "col2"=$2` and the aligned values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<BindValue>,
}

impl PartialUpdate {
    /// Placeholder index for the first parameter after the `SET` values (the row key).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Consume into the parameter list with trailing key/scope values appended in order.
    pub fn into_params(self, trailing: impl IntoIterator<Item = BindValue>) -> Vec<BindValue> {
        let mut params = self.values;
        params.extend(trailing);
        params
    }
}

/// Turn an ordered sparse field map into a `SET` fragment.
///
/// `js_to_sql` maps API field names to column names; a field without a mapping uses its own
/// name as the column. Fails with `BadRequest` when `data` is empty.
pub fn sql_for_partial_update(
    data: &[(&str, BindValue)],
    js_to_sql: &[(&str, &str)],
) -> Result<PartialUpdate, AppError> {
    if data.is_empty() {
        return Err(AppError::bad_request("No data"));
    }
    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.iter().enumerate() {
        let column = js_to_sql
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, c)| *c)
            .unwrap_or(*field);
        cols.push(format!("{}=${}", quoted(column), idx + 1));
        values.push(value.clone());
    }
    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn maps_fields_and_falls_back_to_key() {
        let data = [("firstName", BindValue::from("Aliya")), ("age", BindValue::from(32))];
        let out = sql_for_partial_update(&data, &[("firstName", "first_name")]).unwrap();
        assert_eq!(out.set_cols, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(out.values, vec![BindValue::from("Aliya"), BindValue::from(32)]);
        assert_eq!(out.next_placeholder(), 3);
    }

    #[test]
    fn empty_map_is_bad_request() {
        let err = sql_for_partial_update(&[], &[("title", "title")]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "No data"));
    }

    #[rstest]
    #[case(&["make"])]
    #[case(&["model_year", "make"])]
    #[case(&["body", "title", "route_link", "description"])]
    fn one_placeholder_per_key_in_input_order(#[case] keys: &[&str]) {
        let data: Vec<(&str, BindValue)> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (*k, BindValue::Text(format!("v{i}"))))
            .collect();
        let out = sql_for_partial_update(&data, &[]).unwrap();
        let expected: Vec<String> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| format!("\"{}\"=${}", k, i + 1))
            .collect();
        assert_eq!(out.set_cols, expected.join(", "));
        assert_eq!(out.values.len(), keys.len());
        for (i, v) in out.values.iter().enumerate() {
            assert_eq!(v, &BindValue::Text(format!("v{i}")));
        }
    }

    #[test]
    fn trailing_params_follow_set_values() {
        let data = [("body", BindValue::from("new text"))];
        let out = sql_for_partial_update(&data, &[("title", "title"), ("body", "body")]).unwrap();
        assert_eq!(out.next_placeholder(), 2);
        let params = out.into_params([BindValue::from(7), BindValue::from(3)]);
        assert_eq!(
            params,
            vec![BindValue::from("new text"), BindValue::from(7), BindValue::from(3)]
        );
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
    }
}
