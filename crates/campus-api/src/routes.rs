// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The operation table.
//!
//! Every API operation is declared once, together with its access policy.
//! The router is built from this table alone, so an operation cannot be
//! served without a policy and the table can be inspected without HTTP.

use std::fmt;

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
    Router,
};
use campus_core::RoleName;

use crate::auth::{Ownership, Policy, RoleSet};
use crate::handlers;
use crate::middleware::AccessGuardLayer;
use crate::state::AppState;

/// Admin, Professor.
const STAFF: RoleSet = RoleSet::staff();
/// Admin only.
const ADMIN: RoleSet = RoleSet::admin();

// =============================================================================
// Operation
// =============================================================================

/// One routable API operation.
pub struct Operation {
    /// Stable operation name, used in logs.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Route path, with `{param}` placeholders.
    pub path: &'static str,
    /// Who may invoke the operation.
    pub policy: Policy,
    endpoint: MethodRouter<AppState>,
}

macro_rules! operation_ctor {
    ($($fn_name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Declares a `", stringify!($method), "` operation.")]
            pub fn $fn_name<H, T>(
                name: &'static str,
                path: &'static str,
                policy: Policy,
                handler: H,
            ) -> Self
            where
                H: Handler<T, AppState>,
                T: 'static,
            {
                Self {
                    name,
                    method: Method::$method,
                    path,
                    policy,
                    endpoint: routing::$fn_name(handler),
                }
            }
        )*
    };
}

impl Operation {
    operation_ctor! {
        get => GET,
        post => POST,
        put => PUT,
        delete => DELETE,
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Table
// =============================================================================

/// Returns every API operation.
pub fn operations() -> Vec<Operation> {
    use handlers::*;

    let self_or_admin = || Policy::SelfOrRoles {
        roles: ADMIN,
        ownership: Ownership::self_identity("user_id"),
    };
    let student_or_staff = || Policy::SelfOrRoles {
        roles: STAFF,
        ownership: Ownership::student("student_id"),
    };

    vec![
        // Authentication
        Operation::post("login", "/api/login", Policy::Public, login),
        Operation::get("protected", "/api/protected", Policy::AnyAuthenticated, protected),
        Operation::get("current_profile", "/api/me", Policy::AnyAuthenticated, current_profile),
        // Users
        Operation::get("list_users", "/api/users", Policy::Roles(ADMIN), list_users),
        Operation::post("create_user", "/api/users", Policy::Roles(ADMIN), create_user),
        Operation::get("get_user", "/api/users/{user_id}", self_or_admin(), get_user),
        Operation::put("update_user", "/api/users/{user_id}", self_or_admin(), update_user),
        Operation::delete("delete_user", "/api/users/{user_id}", Policy::Roles(ADMIN), delete_user),
        // Departments
        Operation::get("list_departments", "/api/departments", Policy::Public, list_departments),
        Operation::post(
            "create_department",
            "/api/departments",
            Policy::Roles(ADMIN),
            create_department,
        ),
        Operation::delete(
            "delete_department",
            "/api/departments/{department_id}",
            Policy::Roles(ADMIN),
            delete_department,
        ),
        // Courses
        Operation::get("list_courses", "/api/courses", Policy::Public, list_courses),
        Operation::post("create_course", "/api/courses", Policy::Roles(STAFF), create_course),
        Operation::delete(
            "delete_course",
            "/api/courses/{course_id}",
            Policy::Roles(ADMIN),
            delete_course,
        ),
        // Students
        Operation::post("create_student", "/api/students", Policy::Roles(ADMIN), create_student),
        Operation::get("list_students", "/api/students", Policy::Roles(STAFF), list_students),
        Operation::get(
            "get_student",
            "/api/students/{student_id}",
            student_or_staff(),
            get_student,
        ),
        Operation::delete(
            "delete_student",
            "/api/students/{student_id}",
            Policy::Roles(ADMIN),
            delete_student,
        ),
        // Professors
        Operation::post(
            "create_professor",
            "/api/professors",
            Policy::Roles(ADMIN),
            create_professor,
        ),
        Operation::get("list_professors", "/api/professors", Policy::Public, list_professors),
        Operation::get(
            "get_professor",
            "/api/professors/{professor_id}",
            Policy::SelfOrRoles {
                roles: ADMIN.with(RoleName::Student),
                ownership: Ownership::professor("professor_id"),
            },
            get_professor,
        ),
        Operation::delete(
            "delete_professor",
            "/api/professors/{professor_id}",
            Policy::Roles(ADMIN),
            delete_professor,
        ),
        // Registrations
        Operation::post(
            "create_registration",
            "/api/registrations",
            Policy::Roles(STAFF),
            create_registration,
        ),
        Operation::get(
            "list_registrations",
            "/api/registrations",
            Policy::Roles(STAFF),
            list_registrations,
        ),
        // Exams
        Operation::post("create_exam", "/api/exams", Policy::Roles(STAFF), create_exam),
        Operation::post(
            "create_exam_result",
            "/api/exam_results",
            Policy::Roles(STAFF),
            create_exam_result,
        ),
        Operation::get(
            "student_exam_results",
            "/api/exam_results/student/{student_id}",
            student_or_staff(),
            student_exam_results,
        ),
        // Announcements
        Operation::post(
            "create_announcement",
            "/api/announcements",
            Policy::Roles(STAFF),
            create_announcement,
        ),
        Operation::get(
            "list_announcements",
            "/api/announcements",
            Policy::Public,
            list_announcements,
        ),
        // Seeding
        Operation::post("seed_data", "/api/seed_data", Policy::Roles(ADMIN), seed_data),
    ]
}

/// Builds the router from the operation table, each operation behind its
/// own access guard.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", routing::get(handlers::welcome))
        .route("/health", routing::get(handlers::health));

    for op in operations() {
        let guard = AccessGuardLayer::new(
            op.name,
            op.policy,
            state.tokens.clone(),
            state.store.clone(),
        );
        router = router.route(op.path, op.endpoint.route_layer(guard));
    }

    router.with_state(state)
}

// =============================================================================
// Tests
// =============================================================================
