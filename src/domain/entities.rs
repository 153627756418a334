use serde::{Deserialize, Serialize};
use serde_json::Value;

// Guest profile record accepted by the profile endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub guest_id: u64,
    pub display_name: String,
    pub metadata: Option<Value>,
}
