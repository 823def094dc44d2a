// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Record types.
//!
//! Stored records carry the id assigned by the store. The `New*` types are
//! the inputs accepted by the matching `create_*` store operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::PasswordHash;
use crate::role::RoleName;

/// Numeric record id. Ids are positive and never reused within a table.
pub type RecordId = i64;

// =============================================================================
// Users
// =============================================================================

/// A stored user account.
///
/// The password is only ever held as a one-way hash, and `User` is not
/// serializable so it cannot leak into a response body by accident.
#[derive(Debug, Clone)]
pub struct User {
    /// User id.
    pub id: RecordId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Role reference.
    pub role_id: RecordId,
    /// Hashed password.
    pub password: PasswordHash,
}

/// A user joined with the name of its role.
///
/// This is what the access guard resolves for every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id.
    pub id: RecordId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role reference.
    pub role_id: RecordId,
    /// Resolved role name.
    pub role: RoleName,
}

impl Identity {
    /// Returns `true` if the identity holds the given role.
    pub fn has_role(&self, role: RoleName) -> bool {
        self.role == role
    }
}

/// Input for creating a user with an explicit role.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role reference.
    pub role_id: RecordId,
    /// Hashed password.
    pub password: PasswordHash,
}

/// Account fields for users created together with a student or professor
/// record. The role is implied by the record kind.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Hashed password.
    pub password: PasswordHash,
}

/// Partial update of a user. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New login name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password hash.
    pub password: Option<PasswordHash>,
}

impl UserUpdate {
    /// Returns `true` if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

// =============================================================================
// Departments
// =============================================================================

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department id.
    pub id: RecordId,
    /// Unique department name.
    pub department_name: String,
}

// =============================================================================
// Students & Professors
// =============================================================================

/// A student record linked one-to-one with a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Record id.
    pub id: RecordId,
    /// Institutional student number (unique).
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Owning user account.
    pub user_id: RecordId,
    /// Department reference.
    pub department_id: RecordId,
}

/// Input for creating a student record.
#[derive(Debug, Clone)]
pub struct NewStudent {
    /// Institutional student number.
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Department reference.
    pub department_id: RecordId,
}

/// A professor record linked one-to-one with a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Record id.
    pub id: RecordId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Academic title.
    pub title: Option<String>,
    /// Owning user account.
    pub user_id: RecordId,
    /// Department reference.
    pub department_id: RecordId,
}

/// Input for creating a professor record.
#[derive(Debug, Clone)]
pub struct NewProfessor {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Academic title.
    pub title: Option<String>,
    /// Department reference.
    pub department_id: RecordId,
}

// =============================================================================
// Courses & Registrations
// =============================================================================

/// A course offered by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course id.
    pub id: RecordId,
    /// Unique course code.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Credit count.
    pub credits: i32,
    /// Department reference.
    pub department_id: RecordId,
    /// Teaching professor, if assigned.
    pub professor_id: Option<RecordId>,
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    /// Unique course code.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Credit count.
    pub credits: i32,
    /// Department reference.
    pub department_id: RecordId,
    /// Teaching professor, if assigned.
    pub professor_id: Option<RecordId>,
}

/// A student's registration in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Registration id.
    pub id: RecordId,
    /// Student record reference.
    pub student_id: RecordId,
    /// Course reference.
    pub course_id: RecordId,
    /// When the registration was recorded.
    pub registration_date: DateTime<Utc>,
}

// =============================================================================
// Exams
// =============================================================================

/// An exam held for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Exam id.
    pub id: RecordId,
    /// Exam kind (midterm, final, ...).
    pub exam_type: String,
    /// Scheduled date.
    pub exam_date: DateTime<Utc>,
    /// Course reference.
    pub course_id: RecordId,
}

/// Input for creating an exam.
#[derive(Debug, Clone)]
pub struct NewExam {
    /// Exam kind.
    pub exam_type: String,
    /// Scheduled date.
    pub exam_date: DateTime<Utc>,
    /// Course reference.
    pub course_id: RecordId,
}

/// A student's grade for an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    /// Result id.
    pub id: RecordId,
    /// Student record reference.
    pub student_id: RecordId,
    /// Exam reference.
    pub exam_id: RecordId,
    /// Grade on a 0..=100 scale.
    pub grade: f64,
}

// =============================================================================
// Announcements
// =============================================================================

/// A posted announcement, optionally scoped to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Announcement id.
    pub id: RecordId,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When it was posted.
    pub date_posted: DateTime<Utc>,
    /// Course scope, if any.
    pub course_id: Option<RecordId>,
}

/// Input for creating an announcement.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Course scope, if any.
    pub course_id: Option<RecordId>,
}

// =============================================================================
// Demo Data
// =============================================================================

/// One linked record of every kind, written by [`Store::seed_demo`].
///
/// Ids are assigned by the store, so references between the records are
/// implied: the professor and student join the department, the course
/// belongs to the department and is taught by the professor, and so on.
///
/// [`Store::seed_demo`]: crate::store::Store::seed_demo
#[derive(Debug, Clone)]
pub struct DemoData {
    /// Department name.
    pub department_name: String,
    /// Professor login.
    pub professor_account: NewAccount,
    /// Professor given name.
    pub professor_first_name: String,
    /// Professor family name.
    pub professor_last_name: String,
    /// Professor title.
    pub professor_title: Option<String>,
    /// Student login.
    pub student_account: NewAccount,
    /// Student number.
    pub student_number: String,
    /// Student given name.
    pub student_first_name: String,
    /// Student family name.
    pub student_last_name: String,
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Course credits.
    pub credits: i32,
    /// Exam kind.
    pub exam_type: String,
    /// Exam date.
    pub exam_date: DateTime<Utc>,
    /// The student's grade in the exam.
    pub grade: f64,
    /// Announcement title.
    pub announcement_title: String,
    /// Announcement body.
    pub announcement_content: String,
}

/// Records created by [`Store::seed_demo`].
///
/// [`Store::seed_demo`]: crate::store::Store::seed_demo
#[derive(Debug, Clone)]
pub struct DemoRecords {
    /// Demo department.
    pub department: Department,
    /// Demo professor.
    pub professor: Professor,
    /// Demo student.
    pub student: Student,
    /// Demo course, taught by the demo professor.
    pub course: Course,
    /// Demo exam for the course.
    pub exam: Exam,
}
