// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role seeding, admin bootstrap and demo data.

use chrono::Utc;
use tracing::info;

use crate::credentials::{Credentials, PasswordHash};
use crate::error::CoreResult;
use crate::role::{Role, RoleName};
use crate::store::Store;
use crate::types::*;

// =============================================================================
// Roles
// =============================================================================

/// Ensures every [`RoleName`] has a stored role. Idempotent.
pub async fn seed_roles(store: &dyn Store) -> CoreResult<Vec<Role>> {
    let mut roles = Vec::with_capacity(RoleName::ALL.len());
    for name in RoleName::ALL {
        roles.push(store.ensure_role(name).await?);
    }
    Ok(roles)
}

// =============================================================================
// Admin Bootstrap
// =============================================================================

/// Result of [`ensure_admin`].
#[derive(Debug)]
pub enum AdminBootstrap {
    /// A new admin account was created.
    Created(User),
    /// A user with the requested username already existed.
    AlreadyPresent,
}

/// Creates the bootstrap admin account unless the username is taken.
pub async fn ensure_admin(
    store: &dyn Store,
    username: &str,
    email: &str,
    password: PasswordHash,
) -> CoreResult<AdminBootstrap> {
    if store.find_user_by_username(username).await?.is_some() {
        info!(username, "Admin account already present");
        return Ok(AdminBootstrap::AlreadyPresent);
    }

    let role = store.ensure_role(RoleName::Admin).await?;
    let user = store
        .create_user(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            role_id: role.id,
            password,
        })
        .await?;

    info!(user_id = user.id, username, "Admin account created");
    Ok(AdminBootstrap::Created(user))
}

// =============================================================================
// Demo Data
// =============================================================================

/// Hashed passwords for the demo accounts.
///
/// Hashing is expensive, so callers on an async runtime build this off the
/// executor.
#[derive(Debug, Clone)]
pub struct DemoPasswords {
    /// Password of the demo professor.
    pub professor: PasswordHash,
    /// Password of the demo student.
    pub student: PasswordHash,
}

impl DemoPasswords {
    /// Hashes the shared demo password once per account.
    pub fn hash(credentials: &Credentials, password: &str) -> CoreResult<Self> {
        Ok(Self {
            professor: credentials.hash(password)?,
            student: credentials.hash(password)?,
        })
    }
}

/// Result of [`seed_demo_data`].
#[derive(Debug)]
pub enum SeedOutcome {
    /// Demo records were created.
    Created(Box<DemoRecords>),
    /// Departments and users already existed; nothing was added.
    AlreadyPresent,
}

/// Returns true when departments and users both exist, in which case
/// [`seed_demo_data`] adds nothing.
pub async fn demo_data_present(store: &dyn Store) -> CoreResult<bool> {
    let has_departments = !store.list_departments().await?.is_empty();
    Ok(has_departments && !store.list_users().await?.is_empty())
}

/// The demo records: one department, professor, student, course,
/// registration, exam, result and announcement.
pub fn demo_data(passwords: DemoPasswords) -> DemoData {
    DemoData {
        department_name: "Computer Engineering".to_string(),
        professor_account: NewAccount {
            username: "prof.turing".to_string(),
            email: "prof.turing@campus.local".to_string(),
            password: passwords.professor,
        },
        professor_first_name: "Alan".to_string(),
        professor_last_name: "Turing".to_string(),
        professor_title: Some("Dr.".to_string()),
        student_account: NewAccount {
            username: "ada.lovelace".to_string(),
            email: "ada.lovelace@campus.local".to_string(),
            password: passwords.student,
        },
        student_number: "2024001".to_string(),
        student_first_name: "Ada".to_string(),
        student_last_name: "Lovelace".to_string(),
        course_code: "CS101".to_string(),
        course_name: "Introduction to Programming".to_string(),
        credits: 3,
        exam_type: "Midterm".to_string(),
        exam_date: Utc::now(),
        grade: 85.5,
        announcement_title: "Lecture notes".to_string(),
        announcement_content: "New lecture notes are available.".to_string(),
    }
}

/// Populates every table with one linked demo record in a single write.
///
/// Skipped when departments and users already exist. On a conflict nothing
/// is written.
pub async fn seed_demo_data(
    store: &dyn Store,
    passwords: DemoPasswords,
) -> CoreResult<SeedOutcome> {
    match store.seed_demo(demo_data(passwords)).await? {
        Some(records) => {
            info!(
                department_id = records.department.id,
                course_id = records.course.id,
                "Demo data created"
            );
            Ok(SeedOutcome::Created(Box::new(records)))
        }
        None => {
            info!("Demo data skipped: records already present");
            Ok(SeedOutcome::AlreadyPresent)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
