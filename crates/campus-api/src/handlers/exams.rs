// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Exam and exam result handlers.

use axum::{extract::State, Json};
use campus_core::{NewExam, RecordId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{created_record, Created, ExamGrade, ExamResultList};
use crate::state::AppState;

/// Highest grade accepted.
pub const MAX_GRADE: f64 = 100.0;

// =============================================================================
// Exams
// =============================================================================

/// Exam creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateExamRequest {
    /// Kind of exam (midterm, final, ...).
    pub exam_type: Option<String>,
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) or `YYYY-MM-DD`.
    pub exam_date: Option<String>,
    /// Course the exam belongs to.
    pub course_id: Option<RecordId>,
}

/// POST /api/exams
pub async fn create_exam(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateExamRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let exam_type = errors.require("exam_type", request.exam_type);
    let exam_date = errors.require("exam_date", request.exam_date);
    let course_id = errors.require("course_id", request.course_id);
    let (Some(exam_type), Some(exam_date), Some(course_id)) = (exam_type, exam_date, course_id)
    else {
        return Err(errors.into_error());
    };

    let exam_date = parse_exam_date(&exam_date).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid exam_date '{}': expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD",
            exam_date
        ))
    })?;

    let exam = state
        .store()
        .create_exam(NewExam {
            exam_type,
            exam_date,
            course_id,
        })
        .await?;
    tracing::info!(exam_id = exam.id, course_id, "Exam created");

    Ok(created_record("Exam created successfully", "exam_id", exam.id))
}

/// Parses an exam date. Inputs without an offset are taken as UTC.
pub fn parse_exam_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// =============================================================================
// Exam Results
// =============================================================================

/// Exam result request body.
#[derive(Debug, Deserialize)]
pub struct CreateExamResultRequest {
    /// Student record id.
    pub student_id: Option<RecordId>,
    /// Exam id.
    pub exam_id: Option<RecordId>,
    /// Grade in `0..=100`.
    pub grade: Option<f64>,
}

/// POST /api/exam_results
pub async fn create_exam_result(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateExamResultRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let student_id = errors.require("student_id", request.student_id);
    let exam_id = errors.require("exam_id", request.exam_id);
    let grade = errors.require("grade", request.grade);
    if matches!(grade, Some(g) if !is_valid_grade(g)) {
        errors.add("grade", "must be a number between 0 and 100");
    }
    let (Some(student_id), Some(exam_id), Some(grade), true) =
        (student_id, exam_id, grade, errors.is_empty())
    else {
        return Err(errors.into_error());
    };

    let result = state
        .store()
        .create_exam_result(student_id, exam_id, grade)
        .await?;
    tracing::info!(exam_result_id = result.id, student_id, exam_id, "Exam result recorded");

    Ok(created_record(
        "Exam result recorded successfully",
        "exam_result_id",
        result.id,
    ))
}

/// GET /api/exam_results/student/{student_id}
///
/// An unknown student and a student without results are both 404.
pub async fn student_exam_results(
    State(state): State<AppState>,
    PathId(student_id): PathId,
) -> ApiResult<Json<ExamResultList>> {
    if state.store().find_student(student_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "Student {} not found",
            student_id
        )));
    }

    let results = state.store().results_for_student(student_id).await?;
    if results.is_empty() {
        return Err(ApiError::not_found(
            "No exam results found for this student",
        ));
    }

    Ok(Json(ExamResultList {
        exam_results: results
            .into_iter()
            .map(|r| ExamGrade {
                exam_id: r.exam_id,
                grade: r.grade,
            })
            .collect(),
    }))
}

fn is_valid_grade(grade: f64) -> bool {
    grade.is_finite() && (0.0..=MAX_GRADE).contains(&grade)
}

// =============================================================================
// Tests
// =============================================================================
