//! Request validation for the typed payloads. Every violation is collected so the client gets
//! the full list in one 400 response.

use crate::error::AppError;
use crate::models::{CarUpdate, DriveSearch, DriveUpdate, NewCar, NewDrive, NewPost, PostUpdate};
use chrono::{Datelike, Utc};
use regex::Regex;

const ROUTE_LINK_PATTERN: &str = r"^https?://[^\s]+$";
const FIRST_MODEL_YEAR: i32 = 1886;

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Collects violations; converts into `AppError::Validation` when non-empty.
#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            if min == 1 {
                self.0.push(format!("{} must not be empty", field));
            } else {
                self.0.push(format!("{} must be at least {} characters", field, min));
            }
        } else if len > max {
            self.0.push(format!("{} must be at most {} characters", field, max));
        }
    }

    fn pattern(&mut self, field: &str, value: &str, pattern: &str) {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(value) => {}
            Ok(_) => self.0.push(format!("{} does not match required pattern", field)),
            Err(_) => self.0.push(format!("invalid pattern for {}", field)),
        }
    }

    fn range(&mut self, field: &str, value: i32, min: i32, max: i32) {
        if value < min || value > max {
            self.0.push(format!("{} must be between {} and {}", field, min, max));
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

fn latest_model_year() -> i32 {
    Utc::now().year() + 1
}

fn check_route_link(v: &mut Violations, link: &str) {
    v.length("route_link", link, 1, 500);
    v.pattern("route_link", link, ROUTE_LINK_PATTERN);
}

impl Validate for NewCar {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        v.length("make", &self.make, 1, 50);
        v.length("model", &self.model, 1, 50);
        v.range("model_year", self.model_year, FIRST_MODEL_YEAR, latest_model_year());
        v.finish()
    }
}

impl Validate for CarUpdate {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        if let Some(make) = &self.make {
            v.length("make", make, 1, 50);
        }
        if let Some(model) = &self.model {
            v.length("model", model, 1, 50);
        }
        if let Some(year) = self.model_year {
            v.range("model_year", year, FIRST_MODEL_YEAR, latest_model_year());
        }
        v.finish()
    }
}

impl Validate for NewDrive {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        v.length("title", &self.title, 1, 100);
        v.length("description", &self.description, 0, 2000);
        check_route_link(&mut v, &self.route_link);
        v.finish()
    }
}

impl Validate for DriveUpdate {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        if let Some(title) = &self.title {
            v.length("title", title, 1, 100);
        }
        if let Some(description) = &self.description {
            v.length("description", description, 0, 2000);
        }
        if let Some(link) = &self.route_link {
            check_route_link(&mut v, link);
        }
        v.finish()
    }
}

impl Validate for DriveSearch {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        if let Some(title) = &self.title {
            v.length("title", title, 1, 100);
        }
        v.finish()
    }
}

impl Validate for NewPost {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        v.length("title", &self.title, 1, 100);
        v.length("body", &self.body, 1, 5000);
        v.finish()
    }
}

impl Validate for PostUpdate {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::default();
        if let Some(title) = &self.title {
            v.length("title", title, 1, 100);
        }
        if let Some(body) = &self.body {
            v.length("body", body, 1, 5000);
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn errors(res: Result<(), AppError>) -> Vec<String> {
        match res {
            Err(AppError::Validation(errs)) => errs,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_drive_passes() {
        let d = NewDrive {
            title: "Sunday canyon run".into(),
            description: "Meet at the gas station".into(),
            route_link: "https://maps.example.com/r/1".into(),
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let d = NewDrive {
            title: String::new(),
            description: String::new(),
            route_link: "not a link".into(),
        };
        let errs = errors(d.validate());
        assert_eq!(
            errs,
            vec![
                "title must not be empty".to_string(),
                "route_link does not match required pattern".to_string(),
            ]
        );
    }

    #[rstest]
    #[case(1885, false)]
    #[case(1886, true)]
    #[case(2004, true)]
    #[case(3000, false)]
    fn model_year_bounds(#[case] year: i32, #[case] ok: bool) {
        let car = NewCar {
            make: "Volvo".into(),
            model: "240".into(),
            model_year: year,
        };
        assert_eq!(car.validate().is_ok(), ok);
    }

    #[test]
    fn empty_update_is_valid_here() {
        // emptiness is the update builder's concern
        assert!(PostUpdate::default().validate().is_ok());
    }

    #[test]
    fn partial_update_checks_present_fields_only() {
        let upd = CarUpdate {
            make: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(errors(upd.validate()), vec!["make must not be empty".to_string()]);
    }
}
