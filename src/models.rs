//! Row types returned by the repositories and the typed request payloads that replace
//! runtime JSON schemas.
//!
//! Update payloads only carry the whitelisted mutable fields of each entity and reject any
//! other key at deserialization time.

use crate::sql::BindValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Car {
    pub id: i32,
    pub owner_id: i32,
    pub make: String,
    pub model: String,
    pub model_year: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Drive {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub route_link: String,
    pub creator_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// What a post delete reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct DeletedPost {
    pub id: i32,
    pub title: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub model_year: i32,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CarUpdate {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<i32>,
}

impl CarUpdate {
    pub const COLUMNS: &'static [(&'static str, &'static str)] =
        &[("make", "make"), ("model", "model"), ("model_year", "model_year")];

    /// Present fields in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, BindValue)> {
        let mut out = Vec::new();
        if let Some(v) = &self.make {
            out.push(("make", BindValue::from(v.as_str())));
        }
        if let Some(v) = &self.model {
            out.push(("model", BindValue::from(v.as_str())));
        }
        if let Some(v) = self.model_year {
            out.push(("model_year", BindValue::from(v)));
        }
        out
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewDrive {
    pub title: String,
    pub description: String,
    pub route_link: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DriveUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub route_link: Option<String>,
}

impl DriveUpdate {
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("title", "title"),
        ("description", "description"),
        ("route_link", "route_link"),
    ];

    pub fn fields(&self) -> Vec<(&'static str, BindValue)> {
        let mut out = Vec::new();
        if let Some(v) = &self.title {
            out.push(("title", BindValue::from(v.as_str())));
        }
        if let Some(v) = &self.description {
            out.push(("description", BindValue::from(v.as_str())));
        }
        if let Some(v) = &self.route_link {
            out.push(("route_link", BindValue::from(v.as_str())));
        }
        out
    }
}

/// Query filters for listing drives. `title` matches case-insensitively anywhere in the title;
/// `created_at` is the calendar day (UTC) the drive was created.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DriveSearch {
    pub title: Option<String>,
    pub created_at: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostUpdate {
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[("title", "title"), ("body", "body")];

    pub fn fields(&self) -> Vec<(&'static str, BindValue)> {
        let mut out = Vec::new();
        if let Some(v) = &self.title {
            out.push(("title", BindValue::from(v.as_str())));
        }
        if let Some(v) = &self.body {
            out.push(("body", BindValue::from(v.as_str())));
        }
        out
    }
}
