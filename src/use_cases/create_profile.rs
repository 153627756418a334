use axum::http::StatusCode;
use serde_json::{Map, Value};

use crate::domain::entities::Profile;
use crate::domain::errors::{AppError, UnclassifiedFailure, ValidationFailure};
use crate::domain::ports::ProfileStore;

// Profile creation use case with an injected store.
pub struct CreateProfileUseCase<S> {
    pub store: S,
}

impl<S> CreateProfileUseCase<S>
where
    S: ProfileStore,
{
    pub async fn execute(&self, profile: Profile) -> Result<Profile, AppError> {
        // Collect every failing field so the client can fix them in one pass.
        let mut details = Map::new();
        if profile.guest_id == 0 {
            details.insert("guest_id".to_string(), Value::from("must be non-zero"));
        }
        if let Err(reason) = validate_display_name(&profile.display_name) {
            details.insert("display_name".to_string(), Value::from(reason));
        }
        if !details.is_empty() {
            return Err(ValidationFailure::new("Profile payload is invalid.")
                .with_details(details)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .into());
        }

        self.store
            .insert(profile.clone())
            .await
            .map_err(|err| UnclassifiedFailure::named("StorageError", err))?;

        Ok(profile)
    }
}

fn validate_display_name(value: &str) -> Result<(), &'static str> {
    // Keep names compact and readable for UI and logs.
    const MIN_LEN: usize = 3;
    const MAX_LEN: usize = 32;

    let len = value.chars().count();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err("must be between 3 and 32 characters");
    }
    if value.trim() != value {
        return Err("must not start or end with whitespace");
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
    {
        return Err("may only contain letters, digits, spaces, '_' and '-'");
    }

    Ok(())
}
