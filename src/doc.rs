//! OpenAPI document describing the JSON payloads.

use crate::models::{Car, CarUpdate, DeletedPost, Drive, DriveSearch, DriveUpdate, NewCar, NewDrive, NewPost, Post, PostUpdate};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme used by every resource route.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme("BearerToken", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Garage drives API",
        description = "Cars, group drives and posts."
    ),
    security(("BearerToken" = [])),
    components(schemas(
        Car, NewCar, CarUpdate,
        Drive, NewDrive, DriveUpdate, DriveSearch,
        Post, NewPost, PostUpdate, DeletedPost
    ))
)]
pub struct ApiDoc;
