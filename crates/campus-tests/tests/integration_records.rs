// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Record Operation Integration Tests
//!
//! Create, list and delete flows for every record kind, with the
//! validation, not-found and conflict contracts.

use campus_core::Store;
use campus_tests::prelude::*;

// =============================================================================
// Academic flow
// =============================================================================

#[tokio::test]
async fn test_full_academic_flow() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    // Department
    let department = app
        .post(
            "/api/departments",
            Some(&admin),
            json!({ "department_name": "Mathematics" }),
        )
        .await;
    department
        .assert_status(StatusCode::CREATED)
        .assert_message("Department created successfully");
    let department_id = department.id("department_id");
    assert_eq!(app.get("/api/departments", None).await.len_of("departments"), 2);

    // Professor and student accounts
    let professor = app
        .post(
            "/api/professors",
            Some(&admin),
            professor_payload("hopper", department_id),
        )
        .await;
    professor
        .assert_status(StatusCode::CREATED)
        .assert_message("Professor and user account created successfully");
    let professor_id = professor.id("professor_id");

    let student = app
        .post(
            "/api/students",
            Some(&admin),
            student_payload("ada", "M-001", department_id),
        )
        .await;
    student
        .assert_status(StatusCode::CREATED)
        .assert_message("Student and user account created successfully");
    let student_id = student.id("student_id");

    let professor_token = app.login("hopper", USER_PASSWORD).await;
    let student_token = app.login("ada", USER_PASSWORD).await;

    // Course, taught by the professor
    let course = app
        .post(
            "/api/courses",
            Some(&professor_token),
            course_payload("MA101", department_id, Some(professor_id)),
        )
        .await;
    course
        .assert_status(StatusCode::CREATED)
        .assert_message("Course created successfully");
    let course_id = course.id("course_id");

    // Registration
    let registration = json!({ "student_id": student_id, "course_id": course_id });
    app.post("/api/registrations", Some(&professor_token), registration.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .assert_message("Course registration created successfully");
    app.post("/api/registrations", Some(&professor_token), registration)
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");
    assert_eq!(
        app.get("/api/registrations", Some(&admin))
            .await
            .len_of("registrations"),
        1
    );

    // Exam and result
    let exam = app
        .post(
            "/api/exams",
            Some(&professor_token),
            json!({ "exam_type": "Midterm", "exam_date": "2025-06-01", "course_id": course_id }),
        )
        .await;
    exam.assert_status(StatusCode::CREATED)
        .assert_message("Exam created successfully");
    let exam_id = exam.id("exam_id");

    let result = json!({ "student_id": student_id, "exam_id": exam_id, "grade": 88.5 });
    app.post("/api/exam_results", Some(&professor_token), result.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .assert_message("Exam result recorded successfully");
    app.post("/api/exam_results", Some(&professor_token), result)
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    let results = app
        .get(
            &format!("/api/exam_results/student/{}", student_id),
            Some(&student_token),
        )
        .await;
    results.assert_status(StatusCode::OK);
    assert_eq!(results.len_of("exam_results"), 1);
    assert_eq!(results.body["exam_results"][0]["exam_id"], exam_id);
    assert_eq!(results.body["exam_results"][0]["grade"], 88.5);

    // Announcement
    app.post(
        "/api/announcements",
        Some(&professor_token),
        json!({ "title": "Welcome", "content": "First lecture on Monday", "course_id": course_id }),
    )
    .await
    .assert_status(StatusCode::CREATED)
    .assert_message("Announcement created successfully");
    let announcements = app.get("/api/announcements", None).await;
    assert_eq!(announcements.len_of("announcements"), 1);
    assert_eq!(announcements.body["announcements"][0]["title"], "Welcome");

    // Deleting the course removes what hangs off it
    app.delete(&format!("/api/courses/{}", course_id), Some(&admin))
        .await
        .assert_status(StatusCode::OK)
        .assert_message("Course deleted successfully");
    assert!(app.store.list_registrations().await.unwrap().is_empty());
    assert!(app.store.list_announcements().await.unwrap().is_empty());
    assert!(app.store.results_for_student(student_id).await.unwrap().is_empty());
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_course_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let response = app.post("/api/courses", Some(&admin), json!({})).await;
    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(response.body["details"]["fields"].as_array().unwrap().len(), 4);

    let mut zero_credits = course_payload("CS000", app.department.id, None);
    zero_credits["credits"] = json!(0);
    app.post("/api/courses", Some(&admin), zero_credits)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.post("/api/courses", Some(&admin), course_payload("CS404", 9999, None))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exam_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, student) = app.create_student("stud", "S-1").await;

    app.post(
        "/api/exams",
        Some(&admin),
        json!({ "exam_type": "Final", "exam_date": "next tuesday", "course_id": 1 }),
    )
    .await
    .assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    app.post(
        "/api/exam_results",
        Some(&admin),
        json!({ "student_id": student.id, "exam_id": 1, "grade": 101 }),
    )
    .await
    .assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    app.post(
        "/api/exam_results",
        Some(&admin),
        json!({ "student_id": student.id, "exam_id": 9999, "grade": 50 }),
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_validation_and_conflicts() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let department_id = app.department.id;

    let mut missing = student_payload("ada", "S-1", department_id);
    missing.as_object_mut().unwrap().remove("student_id");
    app.post("/api/students", Some(&admin), missing)
        .await
        .assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    app.post("/api/students", Some(&admin), student_payload("ada", "S-1", department_id))
        .await
        .assert_status(StatusCode::CREATED);

    // Same username, different student number
    app.post("/api/students", Some(&admin), student_payload("ada", "S-2", department_id))
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    // Failed writes leave nothing behind
    assert_eq!(app.store.list_students().await.unwrap().len(), 1);
    assert_eq!(app.store.list_users().await.unwrap().len(), 2);

    // A valid account with an unknown department creates neither row
    app.post("/api/students", Some(&admin), student_payload("bob", "S-3", 9999))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(app.store.find_user_by_username("bob").await.unwrap().is_none());
    assert_eq!(app.store.list_users().await.unwrap().len(), 2);
    assert_eq!(app.store.list_students().await.unwrap().len(), 1);

    app.post(
        "/api/professors",
        Some(&admin),
        professor_payload("carol", 9999),
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);
    assert!(app.store.find_user_by_username("carol").await.unwrap().is_none());
    assert!(app.store.list_professors().await.unwrap().is_empty());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let listed = app.get("/api/users", Some(&admin)).await;
    listed.assert_status(StatusCode::OK);
    assert_eq!(listed.len_of("users"), 1);

    app.post(
        "/api/users",
        Some(&admin),
        json!({ "username": "x", "email": "x@campus.test", "password": "pw", "role_id": 999 }),
    )
    .await
    .assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
    .assert_error_text("Unknown role_id 999");

    let created = app
        .post(
            "/api/users",
            Some(&admin),
            json!({
                "username": "registrar",
                "email": "registrar@campus.test",
                "password": "registrar-pw",
                "role_id": app.admin.role_id,
            }),
        )
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.body["role_name"], "Admin");
    let user_id = created.id("user_id");
    let uri = format!("/api/users/{}", user_id);

    app.put(&uri, Some(&admin), json!({}))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    app.put(&uri, Some(&admin), json!({ "password": "new-registrar-pw" }))
        .await
        .assert_status(StatusCode::OK);
    app.login("registrar", "new-registrar-pw").await;

    app.put(&uri, Some(&admin), json!({ "username": ADMIN_USERNAME }))
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    app.delete(&uri, Some(&admin))
        .await
        .assert_status(StatusCode::OK)
        .assert_message("User deleted successfully");
    app.get(&uri, Some(&admin))
        .await
        .assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_linked_user_cannot_be_deleted_directly() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, student) = app.create_student("stud", "S-1").await;

    app.delete(&format!("/api/users/{}", user.id), Some(&admin))
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    app.delete(&format!("/api/students/{}", student.id), Some(&admin))
        .await
        .assert_status(StatusCode::OK);
    assert!(app.store.find_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_professor_delete_unassigns_courses() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, professor) = app.create_professor("prof").await;

    app.post(
        "/api/courses",
        Some(&admin),
        course_payload("CS201", app.department.id, Some(professor.id)),
    )
    .await
    .assert_status(StatusCode::CREATED);

    app.delete(&format!("/api/professors/{}", professor.id), Some(&admin))
        .await
        .assert_status(StatusCode::OK)
        .assert_message("Professor and associated user account deleted successfully");

    let courses = app.get("/api/courses", None).await;
    assert_eq!(courses.len_of("courses"), 1);
    assert!(courses.body["courses"][0]["professor_id"].is_null());
    assert!(app.store.find_user(user.id).await.unwrap().is_none());
    assert_eq!(app.get("/api/professors", None).await.len_of("professors"), 0);
}

#[tokio::test]
async fn test_department_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_student("stud", "S-1").await;

    app.delete(&format!("/api/departments/{}", app.department.id), Some(&admin))
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    app.delete("/api/departments/9999", Some(&admin))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Seeding
// =============================================================================

#[tokio::test]
async fn test_seed_data_is_idempotent() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    // Seeding is skipped while departments and users both exist.
    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_status(StatusCode::OK);
    app.delete(&format!("/api/departments/{}", app.department.id), Some(&admin))
        .await
        .assert_status(StatusCode::OK);

    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_status(StatusCode::CREATED)
        .assert_message("All essential data created successfully.");

    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_status(StatusCode::OK)
        .assert_message("Initial data already exists. No new data added.");

    assert!(!app.get("/api/courses", None).await.body["courses"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_seed_data_conflict_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.delete(&format!("/api/departments/{}", app.department.id), Some(&admin))
        .await
        .assert_status(StatusCode::OK);

    // Takes the username of the demo student
    let taken = app
        .post(
            "/api/users",
            Some(&admin),
            json!({
                "username": "ada.lovelace",
                "email": "ada@elsewhere.test",
                "password": "taken-password",
                "role_id": app.admin.role_id,
            }),
        )
        .await;
    taken.assert_status(StatusCode::CREATED);

    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_error(StatusCode::CONFLICT, "CONFLICT");

    assert_eq!(app.get("/api/departments", None).await.len_of("departments"), 0);
    assert_eq!(app.get("/api/professors", None).await.len_of("professors"), 0);
    assert_eq!(app.get("/api/courses", None).await.len_of("courses"), 0);
    assert_eq!(app.get("/api/announcements", None).await.len_of("announcements"), 0);
    assert!(app.store.find_user_by_username("prof.turing").await.unwrap().is_none());
    assert_eq!(app.store.list_users().await.unwrap().len(), 2);

    // Once the name is free the seed completes in full
    app.delete(&format!("/api/users/{}", taken.id("user_id")), Some(&admin))
        .await
        .assert_status(StatusCode::OK);
    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(app.get("/api/professors", None).await.len_of("professors"), 1);
    assert_eq!(app.store.list_registrations().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_seed_data_requires_configured_password() {
    let mut config = test_api_config();
    config.demo_password = None;
    let app = TestApp::with_config(config).await;
    let admin = app.admin_token().await;

    app.post("/api/seed_data", Some(&admin), json!({}))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "BAD_REQUEST");
}
