// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Announcement handlers.

use axum::{extract::State, Json};
use campus_core::{NewAnnouncement, RecordId};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiResult, ValidationErrors};
use crate::extractors::ValidatedJson;
use crate::response::{created_record, Created};
use crate::state::AppState;

/// Announcement request body.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    /// Headline.
    pub title: Option<String>,
    /// Body text.
    pub content: Option<String>,
    /// Course the announcement is scoped to; none means campus-wide.
    pub course_id: Option<RecordId>,
}

/// POST /api/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAnnouncementRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let title = errors.require("title", request.title);
    let content = errors.require("content", request.content);
    let (Some(title), Some(content)) = (title, content) else {
        return Err(errors.into_error());
    };

    let announcement = state
        .store()
        .create_announcement(NewAnnouncement {
            title,
            content,
            course_id: request.course_id,
        })
        .await?;
    tracing::info!(announcement_id = announcement.id, "Announcement posted");

    Ok(created_record(
        "Announcement created successfully",
        "announcement_id",
        announcement.id,
    ))
}

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let announcements = state.store().list_announcements().await?;
    Ok(Json(json!({ "announcements": announcements })))
}
