use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::double_option;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployerProfileModel {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,
    #[validate(length(min = 2, max = 2, message = "Country code must be 2 letters"))]
    pub country_code: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEmployerProfileModel {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 2, max = 2, message = "Country code must be 2 letters"))]
    pub country_code: Option<String>,
    pub bio: Option<String>,
}

impl UpdateEmployerProfileModel {
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.avatar_url.is_none()
            && self.country.is_none()
            && self.country_code.is_none()
            && self.bio.is_none()
    }
}

pub struct InsertEmployerProfile {
    pub user_id: Uuid,
    pub company_name: String,
    pub country: String,
    pub country_code: String,
    pub bio: String,
}
