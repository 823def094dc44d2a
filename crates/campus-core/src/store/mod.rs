// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Record store abstraction.
//!
//! # Guarantees
//!
//! - **Atomic writes**: every write validates references and uniqueness
//!   before mutating anything. A failed write leaves no partial state, even
//!   for writes spanning several records (student + user, cascading deletes,
//!   demo data).
//! - **Uniqueness at the storage layer**: concurrent creates racing on the
//!   same username, email or code resolve to one success and one
//!   [`CoreError::Conflict`](crate::CoreError::Conflict).
//! - **Typed lookups**: finders return `Ok(None)` for absent records;
//!   writes that reference absent records fail with
//!   [`CoreError::NotFound`](crate::CoreError::NotFound).

mod memory;

pub use memory::MemoryStore;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::credentials::PasswordHash;
use crate::error::CoreResult;
use crate::role::{Role, RoleName};
use crate::types::*;

// =============================================================================
// Store Trait
// =============================================================================

/// Data access for every record kind.
#[async_trait]
pub trait Store: Send + Sync + Debug {
    // ----- Roles -----

    /// Returns the role with the given name, creating it if missing.
    async fn ensure_role(&self, name: RoleName) -> CoreResult<Role>;

    /// Lists all roles.
    async fn list_roles(&self) -> CoreResult<Vec<Role>>;

    /// Finds a role by id.
    async fn find_role(&self, id: RecordId) -> CoreResult<Option<Role>>;

    // ----- Users -----

    /// Creates a user with an explicit role.
    async fn create_user(&self, new: NewUser) -> CoreResult<User>;

    /// Finds a user by id.
    async fn find_user(&self, id: RecordId) -> CoreResult<Option<User>>;

    /// Finds a user by username.
    async fn find_user_by_username(&self, username: &str) -> CoreResult<Option<User>>;

    /// Resolves a user together with its role name.
    async fn find_identity(&self, id: RecordId) -> CoreResult<Option<Identity>>;

    /// Lists all users.
    async fn list_users(&self) -> CoreResult<Vec<User>>;

    /// Applies a partial update to a user.
    async fn update_user(&self, id: RecordId, update: UserUpdate) -> CoreResult<User>;

    /// Replaces a user's password hash.
    async fn set_password(&self, id: RecordId, password: PasswordHash) -> CoreResult<()>;

    /// Deletes a user that is not linked to a student or professor record.
    async fn delete_user(&self, id: RecordId) -> CoreResult<()>;

    // ----- Departments -----

    /// Creates a department.
    async fn create_department(&self, department_name: String) -> CoreResult<Department>;

    /// Finds a department by id.
    async fn find_department(&self, id: RecordId) -> CoreResult<Option<Department>>;

    /// Lists all departments.
    async fn list_departments(&self) -> CoreResult<Vec<Department>>;

    /// Deletes a department no record refers to.
    async fn delete_department(&self, id: RecordId) -> CoreResult<()>;

    // ----- Students -----

    /// Creates a Student-role user and its student record in one write.
    async fn create_student(
        &self,
        account: NewAccount,
        student: NewStudent,
    ) -> CoreResult<(User, Student)>;

    /// Finds a student record by id.
    async fn find_student(&self, id: RecordId) -> CoreResult<Option<Student>>;

    /// Finds the student record linked to a user.
    async fn find_student_by_user(&self, user_id: RecordId) -> CoreResult<Option<Student>>;

    /// Lists all student records.
    async fn list_students(&self) -> CoreResult<Vec<Student>>;

    /// Deletes a student record, its registrations and results, and its user.
    async fn delete_student(&self, id: RecordId) -> CoreResult<()>;

    // ----- Professors -----

    /// Creates a Professor-role user and its professor record in one write.
    async fn create_professor(
        &self,
        account: NewAccount,
        professor: NewProfessor,
    ) -> CoreResult<(User, Professor)>;

    /// Finds a professor record by id.
    async fn find_professor(&self, id: RecordId) -> CoreResult<Option<Professor>>;

    /// Finds the professor record linked to a user.
    async fn find_professor_by_user(&self, user_id: RecordId) -> CoreResult<Option<Professor>>;

    /// Lists all professor records.
    async fn list_professors(&self) -> CoreResult<Vec<Professor>>;

    /// Deletes a professor record and its user, unassigning their courses.
    async fn delete_professor(&self, id: RecordId) -> CoreResult<()>;

    // ----- Courses -----

    /// Creates a course.
    async fn create_course(&self, new: NewCourse) -> CoreResult<Course>;

    /// Finds a course by id.
    async fn find_course(&self, id: RecordId) -> CoreResult<Option<Course>>;

    /// Lists all courses.
    async fn list_courses(&self) -> CoreResult<Vec<Course>>;

    /// Deletes a course with its registrations, exams, results and
    /// course announcements.
    async fn delete_course(&self, id: RecordId) -> CoreResult<()>;

    // ----- Registrations -----

    /// Registers a student in a course.
    async fn create_registration(
        &self,
        student_id: RecordId,
        course_id: RecordId,
    ) -> CoreResult<Registration>;

    /// Lists all registrations.
    async fn list_registrations(&self) -> CoreResult<Vec<Registration>>;

    // ----- Exams -----

    /// Creates an exam.
    async fn create_exam(&self, new: NewExam) -> CoreResult<Exam>;

    /// Finds an exam by id.
    async fn find_exam(&self, id: RecordId) -> CoreResult<Option<Exam>>;

    /// Records a student's grade for an exam.
    async fn create_exam_result(
        &self,
        student_id: RecordId,
        exam_id: RecordId,
        grade: f64,
    ) -> CoreResult<ExamResult>;

    /// Lists a student's exam results.
    async fn results_for_student(&self, student_id: RecordId) -> CoreResult<Vec<ExamResult>>;

    // ----- Announcements -----

    /// Posts an announcement.
    async fn create_announcement(&self, new: NewAnnouncement) -> CoreResult<Announcement>;

    /// Lists all announcements.
    async fn list_announcements(&self) -> CoreResult<Vec<Announcement>>;

    // ----- Demo data -----

    /// Writes every demo record in one atomic step, creating missing roles.
    ///
    /// Returns `Ok(None)` without writing when departments and users both
    /// already exist. Any conflict fails the whole write.
    async fn seed_demo(&self, demo: DemoData) -> CoreResult<Option<DemoRecords>>;
}
