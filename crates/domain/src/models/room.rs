//! Room (location) domain model.

use serde::{Deserialize, Serialize};
use shared::validation::CODE_REGEX;
use validator::Validate;

/// A room or site an asset can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub pic_name: Option<String>,
    pub description: Option<String>,
}

/// POST /api/rooms body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(
        length(min = 1, max = 32, message = "Code must be 1-32 characters"),
        regex(path = *CODE_REGEX, message = "Code may only contain letters, digits and -_./")
    )]
    pub code: String,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(max = 120, message = "Responsible person must be at most 120 characters"))]
    pub pic_name: Option<String>,

    pub description: Option<String>,
}
