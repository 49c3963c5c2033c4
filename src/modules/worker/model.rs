use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::worker::filter::{FilterState, LastActiveWindow};
use crate::modules::worker::schema::AvailabilityType;
use crate::utils::double_option;

/// Query-string shape of the search endpoint. Skills arrive as one
/// comma-separated parameter (`skills=WordPress,PHP`).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WorkerSearchQuery {
    pub search: Option<String>,
    pub country: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub min_hours: Option<i32>,
    pub max_hours: Option<i32>,
    pub verified_only: Option<bool>,
    pub last_active: Option<LastActiveWindow>,
    pub skills: Option<String>,
    #[validate(range(min = 1, max = 200, message = "Limit must be between 1 and 200"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: Option<i64>,
}

impl WorkerSearchQuery {
    pub fn into_filter(self) -> (FilterState, Option<i64>, Option<i64>) {
        let defaults = FilterState::default();
        let skills = self
            .skills
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let filter = FilterState {
            search: self.search.unwrap_or_default(),
            country: self.country.unwrap_or(defaults.country),
            min_rate: self.min_rate.unwrap_or(defaults.min_rate),
            max_rate: self.max_rate.unwrap_or(defaults.max_rate),
            min_hours: self.min_hours.unwrap_or(defaults.min_hours),
            max_hours: self.max_hours.unwrap_or(defaults.max_hours),
            verified_only: self.verified_only.unwrap_or(false),
            last_active: self.last_active.unwrap_or_default(),
            skills,
        };

        (filter, self.limit, self.offset)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkerProfileModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,
    #[validate(length(min = 2, max = 2, message = "Country code must be 2 letters"))]
    pub country_code: String,
    #[validate(length(min = 1, message = "Headline cannot be empty"))]
    pub headline: String,
    pub skills: Vec<String>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_min: f64,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_max: f64,
    #[validate(range(min = 1, max = 12, message = "Availability must be 1-12 hours per day"))]
    pub availability_hours: i32,
    pub availability_type: AvailabilityType,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkerProfileModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 2, max = 2, message = "Country code must be 2 letters"))]
    pub country_code: Option<String>,
    #[validate(length(min = 1, message = "Headline cannot be empty"))]
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_max: Option<f64>,
    #[validate(range(min = 1, max = 12, message = "Availability must be 1-12 hours per day"))]
    pub availability_hours: Option<i32>,
    pub availability_type: Option<AvailabilityType>,
    pub bio: Option<String>,
}

impl UpdateWorkerProfileModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar_url.is_none()
            && self.country.is_none()
            && self.country_code.is_none()
            && self.headline.is_none()
            && self.skills.is_none()
            && self.hourly_rate_min.is_none()
            && self.hourly_rate_max.is_none()
            && self.availability_hours.is_none()
            && self.availability_type.is_none()
            && self.bio.is_none()
    }
}

pub struct InsertWorkerProfile {
    pub user_id: Uuid,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub headline: String,
    pub skills: Vec<String>,
    pub hourly_rate_min: f64,
    pub hourly_rate_max: f64,
    pub availability_hours: i32,
    pub availability_type: AvailabilityType,
    pub bio: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}
