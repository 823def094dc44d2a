// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Department handlers.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{created_record, Created, MessageResponse};
use crate::state::AppState;

/// Department creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Department name.
    pub department_name: Option<String>,
}

/// GET /api/departments
pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let departments = state.store().list_departments().await?;
    Ok(Json(json!({ "departments": departments })))
}

/// POST /api/departments
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDepartmentRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let Some(name) = errors.require("department_name", request.department_name) else {
        return Err(errors.into_error());
    };

    let department = state.store().create_department(name).await?;
    tracing::info!(department_id = department.id, "Department created");

    Ok(created_record(
        "Department created successfully",
        "department_id",
        department.id,
    ))
}

/// DELETE /api/departments/{department_id}
pub async fn delete_department(
    State(state): State<AppState>,
    PathId(department_id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.store().delete_department(department_id).await?;
    tracing::info!(department_id, "Department deleted");

    Ok(Json(MessageResponse::new("Department deleted successfully")))
}
