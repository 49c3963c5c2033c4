use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::double_option;

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobSort {
    #[default]
    Newest,
    RateHigh,
    RateLow,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct JobSearchQuery {
    pub search: Option<String>,
    pub skill: Option<String>,
    pub sort: Option<JobSort>,
    #[validate(range(min = 1, max = 200, message = "Limit must be between 1 and 200"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: Option<i64>,
}

/// Resolved search parameters handed to the repositories.
#[derive(Debug, Default, Clone)]
pub struct JobSearch {
    pub search: String,
    pub skill: Option<String>,
    pub sort: JobSort,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobModel {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    pub skills: Vec<String>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_min: f64,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_max: f64,
    #[validate(range(min = 1, max = 12, message = "Availability must be 1-12 hours per day"))]
    pub availability_hours: i32,
    pub country_preference: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateJobModel {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_min: Option<f64>,
    #[validate(range(min = 0.0, message = "Rate cannot be negative"))]
    pub hourly_rate_max: Option<f64>,
    #[validate(range(min = 1, max = 12, message = "Availability must be 1-12 hours per day"))]
    pub availability_hours: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub country_preference: Option<Option<String>>,
}

impl UpdateJobModel {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.skills.is_none()
            && self.hourly_rate_min.is_none()
            && self.hourly_rate_max.is_none()
            && self.availability_hours.is_none()
            && self.country_preference.is_none()
    }
}

pub struct InsertJob {
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub hourly_rate_min: f64,
    pub hourly_rate_max: f64,
    pub availability_hours: i32,
    pub country_preference: Option<String>,
}
