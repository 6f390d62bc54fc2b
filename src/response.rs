//! Response envelope helpers: every body is a single-key object such as `{"drive": {...}}`.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// `{ key: value }`.
pub struct Keyed<T> {
    key: &'static str,
    value: T,
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

pub fn keyed<T: Serialize>(status: StatusCode, key: &'static str, value: T) -> (StatusCode, Json<Keyed<T>>) {
    (status, Json(Keyed { key, value }))
}

pub fn ok<T: Serialize>(key: &'static str, value: T) -> (StatusCode, Json<Keyed<T>>) {
    keyed(StatusCode::OK, key, value)
}

pub fn created<T: Serialize>(key: &'static str, value: T) -> (StatusCode, Json<Keyed<T>>) {
    keyed(StatusCode::CREATED, key, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_value_under_key() {
        let (status, Json(body)) = created("deleted", "Sunday run");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"deleted":"Sunday run"}"#);
    }
}
