pub mod context;
pub mod handle;
pub mod route;

use serde::{Deserialize, Serialize};
use sqlx::prelude::Type;

/// Which side of the marketplace a user is on. Assigned at signup by the
/// external identity provider and carried in the JWT.
#[derive(Debug, PartialEq, Clone, Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sqlx(rename = "WORKER")]
    Worker,
    #[sqlx(rename = "EMPLOYER")]
    Employer,
}
