#[cfg(test)]
mod integration_tests {
    use crate::handlers::attendance::UpdateAttendanceRequest;
    use crate::handlers::categories::{CreateCategoryRequest, UpdateCategoryRequest};
    use crate::handlers::sessions::{CreateSessionRequest, RegisterRequest, UpdateSessionRequest};
    use crate::handlers::users::{CreateUserRequest, UpdateUserRequest};
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// Create a user through the API and return its id.
    async fn create_user(server: &TestServer, name: &str, email: &str, role: &str) -> i64 {
        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: "$argon2id$test".to_string(),
                role: role.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    /// Create a session through the API and return the response data.
    async fn create_session(
        server: &TestServer,
        trainer_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        max_participants: i32,
    ) -> serde_json::Value {
        let response = server
            .post("/api/v1/training-sessions")
            .json(&CreateSessionRequest {
                trainer_id: trainer_id as i32,
                start_time: start,
                end_time: end,
                max_participants,
                notes: None,
                category_id: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data
    }

    async fn register(server: &TestServer, session_id: i64, user_id: i64) -> axum_test::TestResponse {
        server
            .post(&format!("/api/v1/training-sessions/{}/register", session_id))
            .json(&RegisterRequest {
                user_id: user_id as i32,
            })
            .await
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                role: "athlete".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.data["email"], "alice@example.com");
        assert_eq!(body.data["role"], "athlete");
        assert!(body.data["id"].as_i64().unwrap() > 0);
        // The hash must never appear in a response
        assert!(body.data.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_user(&server, "Alice", "alice@example.com", "athlete").await;

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                name: "Other Alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                role: "trainer".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "EMAIL_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_create_user_rejects_unknown_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                role: "superuser".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                name: "Alice".to_string(),
                email: "not-an-email".to_string(),
                password_hash: "$argon2id$test".to_string(),
                role: "athlete".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_users() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_user(&server, "Alice", "alice@example.com", "athlete").await;
        create_user(&server, "Bob", "bob@example.com", "trainer").await;

        let response = server.get("/api/v1/users").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);
        assert!(body.data.iter().any(|u| u["email"] == "bob@example.com"));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/users/99999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_user_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "Alice", "alice@example.com", "athlete").await;

        let response = server
            .put(&format!("/api/v1/users/{}", user_id))
            .json(&UpdateUserRequest {
                name: None,
                email: None,
                role: Some("trainer".to_string()),
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["role"], "trainer");
        // Untouched fields survive a partial update
        assert_eq!(body.data["name"], "Alice");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "Alice", "alice@example.com", "athlete").await;

        let response = server.delete(&format!("/api/v1/users/{}", user_id)).await;
        response.assert_status(StatusCode::OK);

        let response = server.get(&format!("/api/v1/users/{}", user_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_last_admin_is_refused() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let admin_id = create_user(&server, "Root", "root@example.com", "admin").await;

        let response = server.delete(&format!("/api/v1/users/{}", admin_id)).await;
        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "LAST_ADMIN_PROTECTED");

        // The admin is still there
        let response = server.get(&format!("/api/v1/users/{}", admin_id)).await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_admin_with_another_remaining() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = create_user(&server, "Root", "root@example.com", "admin").await;
        create_user(&server, "Backup", "backup@example.com", "admin").await;

        let response = server.delete(&format!("/api/v1/users/{}", first)).await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_session() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;

        assert_eq!(session["trainer_id"].as_i64().unwrap(), trainer);
        assert_eq!(session["max_participants"], 8);
        assert_eq!(session["roster"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_create_session_rejects_backwards_times() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;

        let response = server
            .post("/api/v1/training-sessions")
            .json(&CreateSessionRequest {
                trainer_id: trainer as i32,
                start_time: at(2030, 1, 10, 12),
                end_time: at(2030, 1, 10, 10),
                max_participants: 8,
                notes: None,
                category_id: None,
            })
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_session_unknown_trainer() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/training-sessions")
            .json(&CreateSessionRequest {
                trainer_id: 12345,
                start_time: at(2030, 1, 10, 10),
                end_time: at(2030, 1, 10, 12),
                max_participants: 8,
                notes: None,
                category_id: None,
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_sessions_ordered_by_start_time() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        // Created out of order on purpose
        create_session(&server, trainer, at(2030, 3, 1, 10), at(2030, 3, 1, 12), 8).await;
        create_session(&server, trainer, at(2030, 1, 1, 10), at(2030, 1, 1, 12), 8).await;
        create_session(&server, trainer, at(2030, 2, 1, 10), at(2030, 2, 1, 12), 8).await;

        let response = server.get("/api/v1/training-sessions").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 3);
        let starts: Vec<&str> = body
            .data
            .iter()
            .map(|s| s["start_time"].as_str().unwrap())
            .collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[tokio::test]
    async fn test_update_session_by_owner() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/training-sessions/{}", session_id))
            .json(&UpdateSessionRequest {
                acting_user_id: trainer as i32,
                start_time: at(2030, 1, 10, 11),
                end_time: at(2030, 1, 10, 13),
                max_participants: 12,
                notes: Some("bring water".to_string()),
                category_id: None,
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["max_participants"], 12);
        assert_eq!(body.data["notes"], "bring water");
    }

    #[tokio::test]
    async fn test_update_session_by_other_trainer_forbidden() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let intruder = create_user(&server, "Rival", "rival@example.com", "trainer").await;
        let session =
            create_session(&server, owner, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/training-sessions/{}", session_id))
            .json(&UpdateSessionRequest {
                acting_user_id: intruder as i32,
                start_time: at(2030, 1, 10, 11),
                end_time: at(2030, 1, 10, 13),
                max_participants: 12,
                notes: None,
                category_id: None,
            })
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_delete_session_by_owner_removes_roster() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        register(&server, session_id, athlete).await.assert_status(StatusCode::OK);

        let response = server
            .delete(&format!(
                "/api/v1/training-sessions/{}?acting_user_id={}",
                session_id, trainer
            ))
            .await;
        response.assert_status(StatusCode::OK);

        let response = server.get("/api/v1/training-sessions").await;
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_delete_session_by_other_trainer_forbidden() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let intruder = create_user(&server, "Rival", "rival@example.com", "trainer").await;
        let session =
            create_session(&server, owner, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let response = server
            .delete(&format!(
                "/api/v1/training-sessions/{}?acting_user_id={}",
                session_id, intruder
            ))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_register_adds_user_to_roster() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let response = register(&server, session_id, athlete).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let roster = body.data["roster"].as_array().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0]["user"]["email"], "alice@example.com");
        assert_eq!(roster[0]["status"], "registered");
    }

    #[tokio::test]
    async fn test_register_twice_is_idempotent() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        register(&server, session_id, athlete).await.assert_status(StatusCode::OK);
        let response = register(&server, session_id, athlete).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["roster"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_full_session_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let first = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let second = create_user(&server, "Bob", "bob@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 1).await;
        let session_id = session["id"].as_i64().unwrap();

        register(&server, session_id, first).await.assert_status(StatusCode::OK);

        let response = register(&server, session_id, second).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "CAPACITY_EXCEEDED");
    }

    #[tokio::test]
    async fn test_concurrent_registrations_cannot_exceed_capacity() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let alice = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let bob = create_user(&server, "Bob", "bob@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 1).await;
        let session_id = session["id"].as_i64().unwrap();

        // Two distinct users race for the single spot
        let (first, second) = tokio::join!(
            register(&server, session_id, alice),
            register(&server, session_id, bob)
        );

        let statuses = [first.status_code(), second.status_code()];
        let wins = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        assert_eq!(wins, 1);

        let sessions: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/training-sessions").await.json();
        assert_eq!(sessions.data[0]["roster"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_full_roster_reopens_after_unregister() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let first = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let second = create_user(&server, "Bob", "bob@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 1).await;
        let session_id = session["id"].as_i64().unwrap();

        register(&server, session_id, first).await.assert_status(StatusCode::OK);
        register(&server, session_id, second)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        // Freeing the spot lets the next registration through
        let response = server
            .delete(&format!(
                "/api/v1/training-sessions/{}/register?user_id={}",
                session_id, first
            ))
            .await;
        response.assert_status(StatusCode::OK);

        let response = register(&server, session_id, second).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let roster = body.data["roster"].as_array().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0]["user"]["email"], "bob@example.com");
    }

    #[tokio::test]
    async fn test_unregister_unknown_user_is_noop() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let response = server
            .delete(&format!(
                "/api/v1/training-sessions/{}/register?user_id=4242",
                session_id
            ))
            .await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_attendance_status() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let register_response = register(&server, session_id, athlete).await;
        let register_body: ApiResponse<serde_json::Value> = register_response.json();
        let record_id = register_body.data["roster"][0]["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/attendance-records/{}", record_id))
            .json(&UpdateAttendanceRequest {
                acting_user_id: trainer as i32,
                status: "present".to_string(),
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "present");
        assert_eq!(body.data["user"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn test_set_attendance_status_rejects_unknown_value() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let register_response = register(&server, session_id, athlete).await;
        let register_body: ApiResponse<serde_json::Value> = register_response.json();
        let record_id = register_body.data["roster"][0]["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/attendance-records/{}", record_id))
            .json(&UpdateAttendanceRequest {
                acting_user_id: trainer as i32,
                status: "maybe".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_STATUS");
    }

    #[tokio::test]
    async fn test_set_attendance_status_by_other_trainer_forbidden() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let intruder = create_user(&server, "Rival", "rival@example.com", "trainer").await;
        let athlete = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let session =
            create_session(&server, owner, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let session_id = session["id"].as_i64().unwrap();

        let register_response = register(&server, session_id, athlete).await;
        let register_body: ApiResponse<serde_json::Value> = register_response.json();
        let record_id = register_body.data["roster"][0]["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/attendance-records/{}", record_id))
            .json(&UpdateAttendanceRequest {
                acting_user_id: intruder as i32,
                status: "present".to_string(),
            })
            .await;

        response.assert_status(StatusCode::FORBIDDEN);

        // The stored status is untouched
        let sessions: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/training-sessions").await.json();
        assert_eq!(sessions.data[0]["roster"][0]["status"], "registered");
    }

    #[tokio::test]
    async fn test_set_attendance_status_record_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;

        let response = server
            .put("/api/v1/attendance-records/99999")
            .json(&UpdateAttendanceRequest {
                acting_user_id: trainer as i32,
                status: "present".to_string(),
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_category_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Create
        let response = server
            .post("/api/v1/categories")
            .json(&CreateCategoryRequest {
                name: "Serve & Attack Training".to_string(),
                description: Some("Serving and attacking skills".to_string()),
                color: Some("#EF4444".to_string()),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let category_id = body.data["id"].as_i64().unwrap();

        // Duplicate name is a conflict
        let response = server
            .post("/api/v1/categories")
            .json(&CreateCategoryRequest {
                name: "Serve & Attack Training".to_string(),
                description: None,
                color: None,
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);

        // Update
        let response = server
            .put(&format!("/api/v1/categories/{}", category_id))
            .json(&UpdateCategoryRequest {
                name: None,
                description: None,
                color: Some("#10B981".to_string()),
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["color"], "#10B981");

        // List and fetch
        let response = server.get("/api/v1/categories").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);

        let response = server.get(&format!("/api/v1/categories/{}", category_id)).await;
        response.assert_status(StatusCode::OK);

        // Delete
        let response = server
            .delete(&format!("/api/v1/categories/{}", category_id))
            .await;
        response.assert_status(StatusCode::OK);

        let response = server.get(&format!("/api/v1/categories/{}", category_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_with_unknown_category_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;

        let response = server
            .post("/api/v1/training-sessions")
            .json(&CreateSessionRequest {
                trainer_id: trainer as i32,
                start_time: at(2030, 1, 10, 10),
                end_time: at(2030, 1, 10, 12),
                max_participants: 8,
                notes: None,
                category_id: Some(777),
            })
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analytics_empty_store() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/analytics").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total_sessions"], 0);
        assert_eq!(body.data["total_participants"], 0);
        assert_eq!(body.data["average_attendance"], 0);
        assert_eq!(body.data["upcoming_sessions"], 0);
    }

    #[tokio::test]
    async fn test_analytics_summary() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let trainer = create_user(&server, "Coach", "coach@example.com", "trainer").await;
        let alice = create_user(&server, "Alice", "alice@example.com", "athlete").await;
        let bob = create_user(&server, "Bob", "bob@example.com", "athlete").await;

        // One past and one upcoming session
        let past =
            create_session(&server, trainer, at(2020, 1, 10, 10), at(2020, 1, 10, 12), 8).await;
        create_session(&server, trainer, at(2030, 1, 10, 10), at(2030, 1, 10, 12), 8).await;
        let past_id = past["id"].as_i64().unwrap();

        let register_response = register(&server, past_id, alice).await;
        let register_body: ApiResponse<serde_json::Value> = register_response.json();
        let alice_record = register_body.data["roster"][0]["id"].as_i64().unwrap();
        register(&server, past_id, bob).await.assert_status(StatusCode::OK);

        // Mark one of the two records present
        server
            .put(&format!("/api/v1/attendance-records/{}", alice_record))
            .json(&UpdateAttendanceRequest {
                acting_user_id: trainer as i32,
                status: "present".to_string(),
            })
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/analytics").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total_sessions"], 2);
        assert_eq!(body.data["total_participants"], 2);
        assert_eq!(body.data["average_attendance"], 50);
        assert_eq!(body.data["upcoming_sessions"], 1);
    }
}
