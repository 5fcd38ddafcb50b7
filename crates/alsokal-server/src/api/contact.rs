use alsokal_core::{Inquiry, InquiryStatus};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{json_payload, respond, ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct ContactRequest {
    name: String,
    email: String,
    company: String,
    message: String,
    budget_range: String,
    campaign_type: String,
    platforms: Vec<String>,
    timeline: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactResponse {
    id: String,
}

impl ContactRequest {
    /// First failing required field, if any.
    fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("company", &self.company),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        if !self.email.contains('@') {
            return Err("email is not valid".to_string());
        }
        Ok(())
    }

    fn into_inquiry(self) -> Inquiry {
        Inquiry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            budget_range: self.budget_range.trim().to_string(),
            campaign_type: self.campaign_type.trim().to_string(),
            platforms: self
                .platforms
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            timeline: self.timeline.trim().to_string(),
            message: self.message.trim().to_string(),
            status: InquiryStatus::New,
        }
    }
}

pub(super) async fn submit_inquiry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = json_payload(&req_id, body)?;
    if let Err(message) = body.validate() {
        return Err(ApiError::new(req_id.0, "validation_error", message));
    }

    let inquiry = body.into_inquiry();
    let id = inquiry.id.clone();
    let company = inquiry.company.clone();

    state.store.append_inquiry(inquiry).await.map_err(|e| {
        tracing::error!(error = %e, "failed to store inquiry");
        ApiError::new(req_id.0.clone(), "internal_error", "could not store inquiry")
    })?;

    tracing::info!(inquiry_id = %id, company = %company, "new brand inquiry");

    Ok((StatusCode::CREATED, respond(req_id, ContactResponse { id })).into_response())
}
