use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::Profile;

// Request payload for profile creation.
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub guest_id: u64,
    pub display_name: String,
    pub metadata: Option<Value>,
}

impl From<CreateProfileRequest> for Profile {
    fn from(req: CreateProfileRequest) -> Self {
        Profile {
            guest_id: req.guest_id,
            display_name: req.display_name,
            metadata: req.metadata,
        }
    }
}
