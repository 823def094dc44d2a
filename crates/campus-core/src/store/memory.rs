// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store implementation.
//!
//! All tables live behind a single `parking_lot::RwLock`. Every write takes
//! the write lock once, runs all of its checks, and only then mutates, so
//! writes are atomic and isolated from each other. Data is lost when the
//! store is dropped.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::Store;
use crate::credentials::PasswordHash;
use crate::error::{CoreError, CoreResult};
use crate::role::{Role, RoleName};
use crate::types::*;

// =============================================================================
// Table
// =============================================================================

/// Rows keyed by id, with a monotonically increasing id sequence.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    last_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    fn insert(&mut self, id: RecordId, row: T) {
        self.rows.insert(id, row);
    }

    fn remove(&mut self, id: RecordId) -> Option<T> {
        self.rows.remove(&id)
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.rows.values().find(|row| predicate(*row))
    }

    fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(predicate)
    }

    fn retain(&mut self, predicate: impl Fn(&T) -> bool) {
        self.rows.retain(|_, row| predicate(&*row));
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    roles: Table<Role>,
    users: Table<User>,
    departments: Table<Department>,
    students: Table<Student>,
    professors: Table<Professor>,
    courses: Table<Course>,
    registrations: Table<Registration>,
    exams: Table<Exam>,
    exam_results: Table<ExamResult>,
    announcements: Table<Announcement>,
}

impl Tables {
    fn ensure_role(&mut self, name: RoleName) -> Role {
        if let Some(role) = self.roles.find(|r| r.name == name) {
            return *role;
        }

        let id = self.roles.next_id();
        let role = Role { id, name };
        self.roles.insert(id, role);
        debug!(role = %name, id, "Role created");
        role
    }

    fn role_id(&self, name: RoleName) -> CoreResult<RecordId> {
        self.roles
            .find(|role| role.name == name)
            .map(|role| role.id)
            .ok_or_else(|| CoreError::internal(format!("role {} has not been seeded", name)))
    }

    fn identity(&self, user: &User) -> CoreResult<Identity> {
        let role = self.roles.get(user.role_id).ok_or_else(|| {
            CoreError::internal(format!("user {} references missing role {}", user.id, user.role_id))
        })?;

        Ok(Identity {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: role.id,
            role: role.name,
        })
    }

    fn check_account_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<RecordId>,
    ) -> CoreResult<()> {
        let other = |user: &User| Some(user.id) != except;

        if self.users.any(|u| other(u) && u.username == username) {
            return Err(CoreError::conflict(format!(
                "username '{}' is already taken",
                username
            )));
        }
        if self.users.any(|u| other(u) && u.email == email) {
            return Err(CoreError::conflict(format!("email '{}' is already in use", email)));
        }
        Ok(())
    }

    fn require_department(&self, id: RecordId) -> CoreResult<()> {
        if self.departments.contains(id) {
            Ok(())
        } else {
            Err(CoreError::not_found("Department", id))
        }
    }

    fn require_student(&self, id: RecordId) -> CoreResult<()> {
        if self.students.contains(id) {
            Ok(())
        } else {
            Err(CoreError::not_found("Student", id))
        }
    }

    fn require_course(&self, id: RecordId) -> CoreResult<()> {
        if self.courses.contains(id) {
            Ok(())
        } else {
            Err(CoreError::not_found("Course", id))
        }
    }

    fn insert_account(&mut self, account: NewAccount, role_id: RecordId) -> User {
        let id = self.users.next_id();
        let user = User {
            id,
            username: account.username,
            email: account.email,
            role_id,
            password: account.password,
        };
        self.users.insert(id, user.clone());
        user
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// A thread-safe in-memory [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    // ----- Roles -----

    async fn ensure_role(&self, name: RoleName) -> CoreResult<Role> {
        Ok(self.tables.write().ensure_role(name))
    }

    async fn list_roles(&self) -> CoreResult<Vec<Role>> {
        Ok(self.tables.read().roles.all())
    }

    async fn find_role(&self, id: RecordId) -> CoreResult<Option<Role>> {
        Ok(self.tables.read().roles.get(id).copied())
    }

    // ----- Users -----

    async fn create_user(&self, new: NewUser) -> CoreResult<User> {
        let mut tables = self.tables.write();
        if !tables.roles.contains(new.role_id) {
            return Err(CoreError::validation(format!(
                "role {} does not exist",
                new.role_id
            )));
        }
        tables.check_account_unique(&new.username, &new.email, None)?;

        let account = NewAccount {
            username: new.username,
            email: new.email,
            password: new.password,
        };
        let user = tables.insert_account(account, new.role_id);
        debug!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn find_user(&self, id: RecordId) -> CoreResult<Option<User>> {
        Ok(self.tables.read().users.get(id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_identity(&self, id: RecordId) -> CoreResult<Option<Identity>> {
        let tables = self.tables.read();
        match tables.users.get(id) {
            Some(user) => tables.identity(user).map(Some),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> CoreResult<Vec<User>> {
        Ok(self.tables.read().users.all())
    }

    async fn update_user(&self, id: RecordId, update: UserUpdate) -> CoreResult<User> {
        let mut tables = self.tables.write();
        let current = tables
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("User", id))?;

        let username = update.username.unwrap_or(current.username);
        let email = update.email.unwrap_or(current.email);
        tables.check_account_unique(&username, &email, Some(id))?;

        let user = User {
            id,
            username,
            email,
            role_id: current.role_id,
            password: update.password.unwrap_or(current.password),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn set_password(&self, id: RecordId, password: PasswordHash) -> CoreResult<()> {
        let mut tables = self.tables.write();
        let mut user = tables
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("User", id))?;
        user.password = password;
        tables.users.insert(id, user);
        Ok(())
    }

    async fn delete_user(&self, id: RecordId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains(id) {
            return Err(CoreError::not_found("User", id));
        }
        if tables.students.any(|s| s.user_id == id) {
            return Err(CoreError::conflict(format!(
                "user {} is linked to a student record; delete the student instead",
                id
            )));
        }
        if tables.professors.any(|p| p.user_id == id) {
            return Err(CoreError::conflict(format!(
                "user {} is linked to a professor record; delete the professor instead",
                id
            )));
        }

        tables.users.remove(id);
        debug!(user_id = id, "User deleted");
        Ok(())
    }

    // ----- Departments -----

    async fn create_department(&self, department_name: String) -> CoreResult<Department> {
        let mut tables = self.tables.write();
        if tables
            .departments
            .any(|d| d.department_name == department_name)
        {
            return Err(CoreError::conflict(format!(
                "department '{}' already exists",
                department_name
            )));
        }

        let id = tables.departments.next_id();
        let department = Department {
            id,
            department_name,
        };
        tables.departments.insert(id, department.clone());
        Ok(department)
    }

    async fn find_department(&self, id: RecordId) -> CoreResult<Option<Department>> {
        Ok(self.tables.read().departments.get(id).cloned())
    }

    async fn list_departments(&self) -> CoreResult<Vec<Department>> {
        Ok(self.tables.read().departments.all())
    }

    async fn delete_department(&self, id: RecordId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        tables.require_department(id)?;

        let referenced = tables.students.any(|s| s.department_id == id)
            || tables.professors.any(|p| p.department_id == id)
            || tables.courses.any(|c| c.department_id == id);
        if referenced {
            return Err(CoreError::conflict(format!(
                "department {} is still referenced by students, professors or courses",
                id
            )));
        }

        tables.departments.remove(id);
        Ok(())
    }

    // ----- Students -----

    async fn create_student(
        &self,
        account: NewAccount,
        student: NewStudent,
    ) -> CoreResult<(User, Student)> {
        let mut tables = self.tables.write();
        let role_id = tables.role_id(RoleName::Student)?;
        tables.check_account_unique(&account.username, &account.email, None)?;
        if tables.students.any(|s| s.student_id == student.student_id) {
            return Err(CoreError::conflict(format!(
                "student number '{}' is already assigned",
                student.student_id
            )));
        }
        tables.require_department(student.department_id)?;

        let user = tables.insert_account(account, role_id);
        let id = tables.students.next_id();
        let record = Student {
            id,
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
            user_id: user.id,
            department_id: student.department_id,
        };
        tables.students.insert(id, record.clone());
        debug!(student_id = id, user_id = user.id, "Student created");
        Ok((user, record))
    }

    async fn find_student(&self, id: RecordId) -> CoreResult<Option<Student>> {
        Ok(self.tables.read().students.get(id).cloned())
    }

    async fn find_student_by_user(&self, user_id: RecordId) -> CoreResult<Option<Student>> {
        Ok(self
            .tables
            .read()
            .students
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn list_students(&self) -> CoreResult<Vec<Student>> {
        Ok(self.tables.read().students.all())
    }

    async fn delete_student(&self, id: RecordId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        let student = tables
            .students
            .remove(id)
            .ok_or_else(|| CoreError::not_found("Student", id))?;

        tables.registrations.retain(|r| r.student_id != id);
        tables.exam_results.retain(|r| r.student_id != id);
        tables.users.remove(student.user_id);
        debug!(student_id = id, user_id = student.user_id, "Student deleted");
        Ok(())
    }

    // ----- Professors -----

    async fn create_professor(
        &self,
        account: NewAccount,
        professor: NewProfessor,
    ) -> CoreResult<(User, Professor)> {
        let mut tables = self.tables.write();
        let role_id = tables.role_id(RoleName::Professor)?;
        tables.check_account_unique(&account.username, &account.email, None)?;
        tables.require_department(professor.department_id)?;

        let user = tables.insert_account(account, role_id);
        let id = tables.professors.next_id();
        let record = Professor {
            id,
            first_name: professor.first_name,
            last_name: professor.last_name,
            title: professor.title,
            user_id: user.id,
            department_id: professor.department_id,
        };
        tables.professors.insert(id, record.clone());
        debug!(professor_id = id, user_id = user.id, "Professor created");
        Ok((user, record))
    }

    async fn find_professor(&self, id: RecordId) -> CoreResult<Option<Professor>> {
        Ok(self.tables.read().professors.get(id).cloned())
    }

    async fn find_professor_by_user(&self, user_id: RecordId) -> CoreResult<Option<Professor>> {
        Ok(self
            .tables
            .read()
            .professors
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_professors(&self) -> CoreResult<Vec<Professor>> {
        Ok(self.tables.read().professors.all())
    }

    async fn delete_professor(&self, id: RecordId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        let professor = tables
            .professors
            .remove(id)
            .ok_or_else(|| CoreError::not_found("Professor", id))?;

        for course in tables.courses.rows.values_mut() {
            if course.professor_id == Some(id) {
                course.professor_id = None;
            }
        }
        tables.users.remove(professor.user_id);
        debug!(professor_id = id, user_id = professor.user_id, "Professor deleted");
        Ok(())
    }

    // ----- Courses -----

    async fn create_course(&self, new: NewCourse) -> CoreResult<Course> {
        let mut tables = self.tables.write();
        if tables.courses.any(|c| c.course_code == new.course_code) {
            return Err(CoreError::conflict(format!(
                "course code '{}' already exists",
                new.course_code
            )));
        }
        tables.require_department(new.department_id)?;
        if let Some(professor_id) = new.professor_id {
            if !tables.professors.contains(professor_id) {
                return Err(CoreError::not_found("Professor", professor_id));
            }
        }

        let id = tables.courses.next_id();
        let course = Course {
            id,
            course_code: new.course_code,
            course_name: new.course_name,
            credits: new.credits,
            department_id: new.department_id,
            professor_id: new.professor_id,
        };
        tables.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn find_course(&self, id: RecordId) -> CoreResult<Option<Course>> {
        Ok(self.tables.read().courses.get(id).cloned())
    }

    async fn list_courses(&self) -> CoreResult<Vec<Course>> {
        Ok(self.tables.read().courses.all())
    }

    async fn delete_course(&self, id: RecordId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        tables
            .courses
            .remove(id)
            .ok_or_else(|| CoreError::not_found("Course", id))?;

        let exam_ids: Vec<RecordId> = tables
            .exams
            .rows
            .values()
            .filter(|e| e.course_id == id)
            .map(|e| e.id)
            .collect();

        tables.exam_results.retain(|r| !exam_ids.contains(&r.exam_id));
        tables.exams.retain(|e| e.course_id != id);
        tables.registrations.retain(|r| r.course_id != id);
        tables.announcements.retain(|a| a.course_id != Some(id));
        debug!(course_id = id, exams = exam_ids.len(), "Course deleted");
        Ok(())
    }

    // ----- Registrations -----

    async fn create_registration(
        &self,
        student_id: RecordId,
        course_id: RecordId,
    ) -> CoreResult<Registration> {
        let mut tables = self.tables.write();
        tables.require_student(student_id)?;
        tables.require_course(course_id)?;
        if tables
            .registrations
            .any(|r| r.student_id == student_id && r.course_id == course_id)
        {
            return Err(CoreError::conflict(format!(
                "student {} is already registered in course {}",
                student_id, course_id
            )));
        }

        let id = tables.registrations.next_id();
        let registration = Registration {
            id,
            student_id,
            course_id,
            registration_date: Utc::now(),
        };
        tables.registrations.insert(id, registration.clone());
        Ok(registration)
    }

    async fn list_registrations(&self) -> CoreResult<Vec<Registration>> {
        Ok(self.tables.read().registrations.all())
    }

    // ----- Exams -----

    async fn create_exam(&self, new: NewExam) -> CoreResult<Exam> {
        let mut tables = self.tables.write();
        tables.require_course(new.course_id)?;

        let id = tables.exams.next_id();
        let exam = Exam {
            id,
            exam_type: new.exam_type,
            exam_date: new.exam_date,
            course_id: new.course_id,
        };
        tables.exams.insert(id, exam.clone());
        Ok(exam)
    }

    async fn find_exam(&self, id: RecordId) -> CoreResult<Option<Exam>> {
        Ok(self.tables.read().exams.get(id).cloned())
    }

    async fn create_exam_result(
        &self,
        student_id: RecordId,
        exam_id: RecordId,
        grade: f64,
    ) -> CoreResult<ExamResult> {
        let mut tables = self.tables.write();
        tables.require_student(student_id)?;
        if !tables.exams.contains(exam_id) {
            return Err(CoreError::not_found("Exam", exam_id));
        }
        if tables
            .exam_results
            .any(|r| r.student_id == student_id && r.exam_id == exam_id)
        {
            return Err(CoreError::conflict(format!(
                "a result for student {} in exam {} already exists",
                student_id, exam_id
            )));
        }

        let id = tables.exam_results.next_id();
        let result = ExamResult {
            id,
            student_id,
            exam_id,
            grade,
        };
        tables.exam_results.insert(id, result.clone());
        Ok(result)
    }

    async fn results_for_student(&self, student_id: RecordId) -> CoreResult<Vec<ExamResult>> {
        Ok(self
            .tables
            .read()
            .exam_results
            .rows
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    // ----- Announcements -----

    async fn create_announcement(&self, new: NewAnnouncement) -> CoreResult<Announcement> {
        let mut tables = self.tables.write();
        if let Some(course_id) = new.course_id {
            tables.require_course(course_id)?;
        }

        let id = tables.announcements.next_id();
        let announcement = Announcement {
            id,
            title: new.title,
            content: new.content,
            date_posted: Utc::now(),
            course_id: new.course_id,
        };
        tables.announcements.insert(id, announcement.clone());
        Ok(announcement)
    }

    async fn list_announcements(&self) -> CoreResult<Vec<Announcement>> {
        Ok(self.tables.read().announcements.all())
    }

    // ----- Demo data -----

    async fn seed_demo(&self, demo: DemoData) -> CoreResult<Option<DemoRecords>> {
        let mut tables = self.tables.write();
        if !tables.departments.rows.is_empty() && !tables.users.rows.is_empty() {
            return Ok(None);
        }

        if tables
            .departments
            .any(|d| d.department_name == demo.department_name)
        {
            return Err(CoreError::conflict(format!(
                "department '{}' already exists",
                demo.department_name
            )));
        }
        for account in [&demo.professor_account, &demo.student_account] {
            tables.check_account_unique(&account.username, &account.email, None)?;
        }
        if tables.students.any(|s| s.student_id == demo.student_number) {
            return Err(CoreError::conflict(format!(
                "student number '{}' is already assigned",
                demo.student_number
            )));
        }
        if tables.courses.any(|c| c.course_code == demo.course_code) {
            return Err(CoreError::conflict(format!(
                "course code '{}' already exists",
                demo.course_code
            )));
        }

        // Nothing below can fail.
        for name in RoleName::ALL {
            tables.ensure_role(name);
        }
        let professor_role = tables.ensure_role(RoleName::Professor).id;
        let student_role = tables.ensure_role(RoleName::Student).id;

        let department_id = tables.departments.next_id();
        let department = Department {
            id: department_id,
            department_name: demo.department_name,
        };
        tables.departments.insert(department_id, department.clone());

        let professor_user = tables.insert_account(demo.professor_account, professor_role);
        let professor_id = tables.professors.next_id();
        let professor = Professor {
            id: professor_id,
            first_name: demo.professor_first_name,
            last_name: demo.professor_last_name,
            title: demo.professor_title,
            user_id: professor_user.id,
            department_id,
        };
        tables.professors.insert(professor_id, professor.clone());

        let student_user = tables.insert_account(demo.student_account, student_role);
        let student_id = tables.students.next_id();
        let student = Student {
            id: student_id,
            student_id: demo.student_number,
            first_name: demo.student_first_name,
            last_name: demo.student_last_name,
            user_id: student_user.id,
            department_id,
        };
        tables.students.insert(student_id, student.clone());

        let course_id = tables.courses.next_id();
        let course = Course {
            id: course_id,
            course_code: demo.course_code,
            course_name: demo.course_name,
            credits: demo.credits,
            department_id,
            professor_id: Some(professor_id),
        };
        tables.courses.insert(course_id, course.clone());

        let now = Utc::now();
        let registration_id = tables.registrations.next_id();
        tables.registrations.insert(
            registration_id,
            Registration {
                id: registration_id,
                student_id,
                course_id,
                registration_date: now,
            },
        );

        let exam_id = tables.exams.next_id();
        let exam = Exam {
            id: exam_id,
            exam_type: demo.exam_type,
            exam_date: demo.exam_date,
            course_id,
        };
        tables.exams.insert(exam_id, exam.clone());

        let result_id = tables.exam_results.next_id();
        tables.exam_results.insert(
            result_id,
            ExamResult {
                id: result_id,
                student_id,
                exam_id,
                grade: demo.grade,
            },
        );

        let announcement_id = tables.announcements.next_id();
        tables.announcements.insert(
            announcement_id,
            Announcement {
                id: announcement_id,
                title: demo.announcement_title,
                content: demo.announcement_content,
                date_posted: now,
                course_id: Some(course_id),
            },
        );

        debug!(department_id, course_id, "Demo records written");
        Ok(Some(DemoRecords {
            department,
            professor,
            student,
            course,
            exam,
        }))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credentials, HashConfig};

    fn password() -> PasswordHash {
        Credentials::new(HashConfig::for_testing())
            .unwrap()
            .hash("password123")
            .unwrap()
    }

    fn account(name: &str) -> NewAccount {
        NewAccount {
            username: name.to_string(),
            email: format!("{}@campus.test", name),
            password: password(),
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        for role in RoleName::ALL {
            store.ensure_role(role).await.unwrap();
        }
        store
    }

    async fn store_with_department() -> (MemoryStore, Department) {
        let store = seeded_store().await;
        let department = store
            .create_department("Computer Engineering".to_string())
            .await
            .unwrap();
        (store, department)
    }

    fn new_student(number: &str, department_id: RecordId) -> NewStudent {
        NewStudent {
            student_id: number.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            department_id,
        }
    }

    #[tokio::test]
    async fn test_ensure_role_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.ensure_role(RoleName::Admin).await.unwrap();
        let second = store.ensure_role(RoleName::Admin).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_roles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_user_and_resolve_identity() {
        let store = seeded_store().await;
        let user = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "alice@campus.test".to_string(),
                role_id: 1,
                password: password(),
            })
            .await
            .unwrap();

        let identity = store.find_identity(user.id).await.unwrap().unwrap();
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, RoleName::Admin);
        assert!(store.find_identity(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates_and_unknown_role() {
        let store = seeded_store().await;
        let new = |username: &str, email: &str, role_id| NewUser {
            username: username.to_string(),
            email: email.to_string(),
            role_id,
            password: password(),
        };

        store.create_user(new("bob", "bob@x", 2)).await.unwrap();

        let err = store.create_user(new("bob", "other@x", 2)).await.unwrap_err();
        assert!(err.is_conflict());

        let err = store.create_user(new("other", "bob@x", 2)).await.unwrap_err();
        assert!(err.is_conflict());

        let err = store.create_user(new("carol", "carol@x", 42)).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_user_checks_uniqueness_against_others_only() {
        let (store, department) = store_with_department().await;
        let (alice, _) = store
            .create_student(account("alice"), new_student("1", department.id))
            .await
            .unwrap();
        store
            .create_user(NewUser {
                username: "bob".to_string(),
                email: "bob@campus.test".to_string(),
                role_id: 3,
                password: password(),
            })
            .await
            .unwrap();

        // Re-submitting own username is fine.
        let updated = store
            .update_user(
                alice.id,
                UserUpdate {
                    username: Some("alice".to_string()),
                    email: Some("alice@new.test".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "alice@new.test");

        let err = store
            .update_user(
                alice.id,
                UserUpdate {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let err = store
            .update_user(999, UserUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_student_is_atomic() {
        let (store, department) = store_with_department().await;
        store
            .create_student(account("first"), new_student("2024001", department.id))
            .await
            .unwrap();

        // Duplicate student number: neither user nor student may be written.
        let err = store
            .create_student(account("second"), new_student("2024001", department.id))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(store.find_user_by_username("second").await.unwrap().is_none());

        // Unknown department: same.
        let err = store
            .create_student(account("third"), new_student("2024003", 999))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.find_user_by_username("third").await.unwrap().is_none());
        assert_eq!(store.list_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_student_requires_seeded_role() {
        let store = MemoryStore::new();
        let department = store.create_department("D".to_string()).await.unwrap();
        let err = store
            .create_student(account("orphan"), new_student("1", department.id))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Internal { .. }));
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_student_cascades() {
        let (store, department) = store_with_department().await;
        let (user, student) = store
            .create_student(account("stu"), new_student("1", department.id))
            .await
            .unwrap();
        let course = store
            .create_course(NewCourse {
                course_code: "CS101".to_string(),
                course_name: "Intro".to_string(),
                credits: 3,
                department_id: department.id,
                professor_id: None,
            })
            .await
            .unwrap();
        let exam = store
            .create_exam(NewExam {
                exam_type: "Midterm".to_string(),
                exam_date: Utc::now(),
                course_id: course.id,
            })
            .await
            .unwrap();
        store.create_registration(student.id, course.id).await.unwrap();
        store.create_exam_result(student.id, exam.id, 90.0).await.unwrap();

        store.delete_student(student.id).await.unwrap();

        assert!(store.find_user(user.id).await.unwrap().is_none());
        assert!(store.list_registrations().await.unwrap().is_empty());
        assert!(store.results_for_student(student.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_linked_to_student_conflicts() {
        let (store, department) = store_with_department().await;
        let (user, _) = store
            .create_student(account("linked"), new_student("1", department.id))
            .await
            .unwrap();

        let err = store.delete_user(user.id).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.find_user(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_department_in_use_conflicts() {
        let (store, department) = store_with_department().await;
        store
            .create_student(account("s"), new_student("1", department.id))
            .await
            .unwrap();

        assert!(store.delete_department(department.id).await.unwrap_err().is_conflict());
        assert!(store.delete_department(999).await.unwrap_err().is_not_found());

        let empty = store.create_department("Empty".to_string()).await.unwrap();
        store.delete_department(empty.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_professor_unassigns_courses() {
        let (store, department) = store_with_department().await;
        let (user, professor) = store
            .create_professor(
                account("prof"),
                NewProfessor {
                    first_name: "Alan".to_string(),
                    last_name: "Turing".to_string(),
                    title: Some("Dr.".to_string()),
                    department_id: department.id,
                },
            )
            .await
            .unwrap();
        let course = store
            .create_course(NewCourse {
                course_code: "CS200".to_string(),
                course_name: "Computability".to_string(),
                credits: 4,
                department_id: department.id,
                professor_id: Some(professor.id),
            })
            .await
            .unwrap();

        store.delete_professor(professor.id).await.unwrap();

        let course = store.find_course(course.id).await.unwrap().unwrap();
        assert_eq!(course.professor_id, None);
        assert!(store.find_user(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_course_cascades() {
        let (store, department) = store_with_department().await;
        let (_, student) = store
            .create_student(account("s"), new_student("1", department.id))
            .await
            .unwrap();
        let course = store
            .create_course(NewCourse {
                course_code: "CS101".to_string(),
                course_name: "Intro".to_string(),
                credits: 3,
                department_id: department.id,
                professor_id: None,
            })
            .await
            .unwrap();
        let exam = store
            .create_exam(NewExam {
                exam_type: "Final".to_string(),
                exam_date: Utc::now(),
                course_id: course.id,
            })
            .await
            .unwrap();
        store.create_exam_result(student.id, exam.id, 70.0).await.unwrap();
        store.create_registration(student.id, course.id).await.unwrap();
        store
            .create_announcement(NewAnnouncement {
                title: "Scoped".to_string(),
                content: "Course news".to_string(),
                course_id: Some(course.id),
            })
            .await
            .unwrap();
        store
            .create_announcement(NewAnnouncement {
                title: "Global".to_string(),
                content: "Campus news".to_string(),
                course_id: None,
            })
            .await
            .unwrap();

        store.delete_course(course.id).await.unwrap();

        assert!(store.find_exam(exam.id).await.unwrap().is_none());
        assert!(store.results_for_student(student.id).await.unwrap().is_empty());
        assert!(store.list_registrations().await.unwrap().is_empty());
        let remaining = store.list_announcements().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Global");
    }

    #[tokio::test]
    async fn test_duplicate_registration_and_result_conflict() {
        let (store, department) = store_with_department().await;
        let (_, student) = store
            .create_student(account("s"), new_student("1", department.id))
            .await
            .unwrap();
        let course = store
            .create_course(NewCourse {
                course_code: "CS101".to_string(),
                course_name: "Intro".to_string(),
                credits: 3,
                department_id: department.id,
                professor_id: None,
            })
            .await
            .unwrap();
        let exam = store
            .create_exam(NewExam {
                exam_type: "Quiz".to_string(),
                exam_date: Utc::now(),
                course_id: course.id,
            })
            .await
            .unwrap();

        store.create_registration(student.id, course.id).await.unwrap();
        assert!(store
            .create_registration(student.id, course.id)
            .await
            .unwrap_err()
            .is_conflict());

        store.create_exam_result(student.id, exam.id, 0.0).await.unwrap();
        assert!(store
            .create_exam_result(student.id, exam.id, 50.0)
            .await
            .unwrap_err()
            .is_conflict());

        assert!(store
            .create_registration(999, course.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.create_department("A".to_string()).await.unwrap();
        store.delete_department(first.id).await.unwrap();
        let second = store.create_department("B".to_string()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_set_password_replaces_hash() {
        let credentials = Credentials::new(HashConfig::for_testing()).unwrap();
        let store = seeded_store().await;
        let user = store
            .create_user(NewUser {
                username: "pw".to_string(),
                email: "pw@x".to_string(),
                role_id: 1,
                password: credentials.hash("old-password").unwrap(),
            })
            .await
            .unwrap();

        store
            .set_password(user.id, credentials.hash("new-password").unwrap())
            .await
            .unwrap();

        let stored = store.find_user(user.id).await.unwrap().unwrap();
        assert!(credentials.verify(&stored.password, "new-password"));
        assert!(!credentials.verify(&stored.password, "old-password"));
    }
}
