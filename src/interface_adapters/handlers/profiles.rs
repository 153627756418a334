use crate::domain::entities::Profile;
use crate::domain::envelope::ApiResponse;
use crate::domain::errors::AppError;
use crate::interface_adapters::protocol::CreateProfileRequest;
use crate::interface_adapters::response::AppJson;
use crate::interface_adapters::state::AppState;
use crate::use_cases::create_profile::CreateProfileUseCase;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

#[tracing::instrument(
    name = "create_profile",
    skip_all,
    fields(guest_id = body.guest_id)
)]
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Profile>>), AppError> {
    let use_case = CreateProfileUseCase {
        store: state.profiles.clone(),
    };

    let profile = use_case.execute(body.into()).await?;

    tracing::info!("profile created.");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Profile", "Profile created.", profile)),
    ))
}
