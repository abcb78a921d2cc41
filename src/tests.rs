#[cfg(test)]
mod integration_tests {
    use crate::handlers::auth::{LoginRequest, SignupRequest};
    use crate::handlers::prediction::PredictionRequest;
    use crate::handlers::profiles::{SetRoleRequest, UpsertProfileRequest};
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    fn sample_prediction() -> PredictionRequest {
        PredictionRequest {
            year: 2024,
            season: "Maha".to_string(),
            district: "KURUNEGALA".to_string(),
            sown_hect: 120_000.0,
            previous_yield: 4.2,
            previous_production: 470_000.0,
        }
    }

    /// Registers an account and returns (uid, token).
    async fn signup_user(server: &TestServer, name: &str, email: &str) -> (String, String) {
        let response = server
            .post("/api/v1/auth/signup")
            .json(&SignupRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: "paddy-fields".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: ApiResponse<serde_json::Value> = response.json();
        let uid = body.data["uid"].as_str().unwrap().to_string();
        let token = body.data["token"].as_str().unwrap().to_string();
        (uid, token)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_signup_creates_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/signup")
            .json(&SignupRequest {
                name: "Amara Silva".to_string(),
                email: "Amara@Example.LK".to_string(),
                password: "paddy-fields".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Account created successfully");

        // Emails are stored lowercased.
        assert_eq!(body.data["email"], "amara@example.lk");
        assert_eq!(body.data["name"], "Amara Silva");
        assert!(!body.data["uid"].as_str().unwrap().is_empty());
        assert!(!body.data["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/signup")
            .json(&SignupRequest {
                name: "Amara".to_string(),
                email: "amara@example.lk".to_string(),
                password: "12345".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "WEAK_PASSWORD");
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .post("/api/v1/auth/signup")
            .json(&SignupRequest {
                name: "Another Amara".to_string(),
                email: "amara@example.lk".to_string(),
                password: "different-pass".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "EMAIL_ALREADY_REGISTERED");
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (uid, _) = signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                email: "amara@example.lk".to_string(),
                password: "paddy-fields".to_string(),
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.message, "Signed in successfully");
        assert_eq!(body.data["uid"], uid.as_str());

        // The fresh token must be accepted by the identity endpoint.
        let token = body.data["token"].as_str().unwrap().to_string();
        let me = server
            .get("/api/v1/auth/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        me.assert_status(StatusCode::OK);
        let me_body: ApiResponse<serde_json::Value> = me.json();
        assert_eq!(me_body.data["uid"], uid.as_str());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                email: "amara@example.lk".to_string(),
                password: "not-the-password".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_email() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/login")
            .json(&LoginRequest {
                email: "nobody@example.lk".to_string(),
                password: "whatever-pass".to_string(),
            })
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/auth/me").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        let first = server
            .post("/api/v1/auth/logout")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        first.assert_status(StatusCode::OK);

        // A second logout with the same token still succeeds.
        let second = server
            .post("/api/v1/auth/logout")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        second.assert_status(StatusCode::OK);

        // But the session is gone for protected endpoints.
        let me = server
            .get("/api/v1/auth/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        me.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = me.json();
        assert_eq!(body.code, "SESSION_REVOKED");
    }

    #[tokio::test]
    async fn test_logout_rejects_garbage_token() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/logout")
            .add_header(header::AUTHORIZATION, bearer("not.a.jwt"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (uid, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        // No profile until onboarding creates one.
        let missing = server
            .get("/api/v1/profiles/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let missing_body: ErrorResponse = missing.json();
        assert_eq!(missing_body.code, "PROFILE_NOT_FOUND");

        // Create-if-absent.
        let created = server
            .put("/api/v1/profiles/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&UpsertProfileRequest {
                email: "amara@example.lk".to_string(),
                name: "Amara".to_string(),
            })
            .await;
        created.assert_status(StatusCode::OK);
        let created_body: ApiResponse<serde_json::Value> = created.json();
        assert_eq!(created_body.data["uid"], uid.as_str());
        assert!(created_body.data["role"].is_null());
        assert!(created_body.data["role_set_at"].is_null());

        // First role confirmation wins.
        let assigned = server
            .post("/api/v1/profiles/me/role")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&SetRoleRequest {
                role: "farmer".to_string(),
            })
            .await;
        assigned.assert_status(StatusCode::OK);
        let assigned_body: ApiResponse<serde_json::Value> = assigned.json();
        assert_eq!(assigned_body.message, "Role assigned successfully");
        assert_eq!(assigned_body.data["role"], "farmer");
        assert!(!assigned_body.data["role_set_at"].is_null());

        // The second confirmation is refused and changes nothing.
        let refused = server
            .post("/api/v1/profiles/me/role")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&SetRoleRequest {
                role: "researcher".to_string(),
            })
            .await;
        refused.assert_status(StatusCode::CONFLICT);
        let refused_body: ErrorResponse = refused.json();
        assert_eq!(refused_body.code, "ROLE_ALREADY_SET");

        let after = server
            .get("/api/v1/profiles/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        after.assert_status(StatusCode::OK);
        let after_body: ApiResponse<serde_json::Value> = after.json();
        assert_eq!(after_body.data["role"], "farmer");
    }

    #[tokio::test]
    async fn test_upsert_profile_keeps_existing_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        server
            .put("/api/v1/profiles/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&UpsertProfileRequest {
                email: "amara@example.lk".to_string(),
                name: "Amara".to_string(),
            })
            .await
            .assert_status(StatusCode::OK);

        server
            .post("/api/v1/profiles/me/role")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&SetRoleRequest {
                role: "officer".to_string(),
            })
            .await
            .assert_status(StatusCode::OK);

        // Re-running onboarding refreshes contact fields but not the role.
        let refreshed = server
            .put("/api/v1/profiles/me")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&UpsertProfileRequest {
                email: "amara@example.lk".to_string(),
                name: "Amara S.".to_string(),
            })
            .await;
        refreshed.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = refreshed.json();
        assert_eq!(body.data["name"], "Amara S.");
        assert_eq!(body.data["role"], "officer");
    }

    #[tokio::test]
    async fn test_set_role_rejects_unknown_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .post("/api/v1/profiles/me/role")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&SetRoleRequest {
                role: "astronaut".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_ROLE");
    }

    #[tokio::test]
    async fn test_set_role_requires_profile() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .post("/api/v1/profiles/me/role")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&SetRoleRequest {
                role: "farmer".to_string(),
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "PROFILE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_predict_anonymous() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/production/predict")
            .json(&sample_prediction())
            .await;

        response.assert_status(StatusCode::OK);

        // The forecast is served bare, without the ApiResponse envelope.
        let body: serde_json::Value = response.json();
        assert!(body.get("data").is_none());
        assert!(body.get("success").is_none());
        assert!(body["predicted_harvested_extent"].as_f64().unwrap() > 0.0);
        assert!(body["predicted_total_production"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_predict_rejects_bad_season() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = sample_prediction();
        request.season = "yala".to_string();

        let response = server.post("/api/v1/production/predict").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_SEASON");
        assert_eq!(body.error, "Invalid season. Use 'Yala' or 'Maha'.");
    }

    #[tokio::test]
    async fn test_predict_rejects_unknown_district() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = sample_prediction();
        request.district = "ATLANTIS".to_string();

        let response = server.post("/api/v1/production/predict").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_DISTRICT");
        assert_eq!(body.error, "District 'ATLANTIS' not found.");
    }

    #[tokio::test]
    async fn test_predict_accepts_any_district_casing() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut lowercase = sample_prediction();
        lowercase.district = "kurunegala".to_string();

        let canonical = server
            .post("/api/v1/production/predict")
            .json(&sample_prediction())
            .await;
        let relaxed = server
            .post("/api/v1/production/predict")
            .json(&lowercase)
            .await;

        canonical.assert_status(StatusCode::OK);
        relaxed.assert_status(StatusCode::OK);
        let canonical_body: serde_json::Value = canonical.json();
        let relaxed_body: serde_json::Value = relaxed.json();
        assert_eq!(canonical_body, relaxed_body);
    }

    #[tokio::test]
    async fn test_predict_rejects_invalid_token() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // No token is fine, a broken one is not.
        let response = server
            .post("/api/v1/production/predict")
            .add_header(header::AUTHORIZATION, bearer("not.a.jwt"))
            .json(&sample_prediction())
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_predict_records_history_for_authenticated_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        let mut second = sample_prediction();
        second.year = 2025;
        second.season = "Yala".to_string();
        second.district = "colombo".to_string();

        server
            .post("/api/v1/production/predict")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&sample_prediction())
            .await
            .assert_status(StatusCode::OK);
        let second_response = server
            .post("/api/v1/production/predict")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&second)
            .await;
        second_response.assert_status(StatusCode::OK);
        let second_body: serde_json::Value = second_response.json();

        let activity = server
            .get("/api/v1/activity")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        activity.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = activity.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);

        // Newest first, with canonical season and district spellings.
        assert_eq!(body.data[0]["year"], 2025);
        assert_eq!(body.data[0]["season"], "Yala");
        assert_eq!(body.data[0]["district"], "COLOMBO");
        assert_eq!(
            body.data[0]["predicted_production"],
            second_body["predicted_total_production"]
        );
        assert_eq!(body.data[1]["year"], 2024);
    }

    #[tokio::test]
    async fn test_activity_requires_auth() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/activity").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_activity_returns_five_most_recent() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        for year in 2018..2025 {
            let mut request = sample_prediction();
            request.year = year;
            server
                .post("/api/v1/production/predict")
                .add_header(header::AUTHORIZATION, bearer(&token))
                .json(&request)
                .await
                .assert_status(StatusCode::OK);
        }

        let response = server
            .get("/api/v1/activity")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 5);
        let years: Vec<i64> = body
            .data
            .iter()
            .map(|record| record["year"].as_i64().unwrap())
            .collect();
        assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020]);

        // An explicit limit can reach further back.
        let wide = server
            .get("/api/v1/activity?limit=50")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        wide.assert_status(StatusCode::OK);
        let wide_body: ApiResponse<Vec<serde_json::Value>> = wide.json();
        assert_eq!(wide_body.data.len(), 7);
    }

    #[tokio::test]
    async fn test_activity_rejects_out_of_range_limit() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        let response = server
            .get("/api/v1/activity?limit=0")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_activity_serves_from_cache() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (_, token) = signup_user(&server, "Amara", "amara@example.lk").await;

        server
            .post("/api/v1/production/predict")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&sample_prediction())
            .await
            .assert_status(StatusCode::OK);

        let first = server
            .get("/api/v1/activity")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        first.assert_status(StatusCode::OK);
        let first_body: ApiResponse<Vec<serde_json::Value>> = first.json();
        assert_eq!(first_body.message, "Recent activity retrieved successfully");

        let second = server
            .get("/api/v1/activity")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        second.assert_status(StatusCode::OK);
        let second_body: ApiResponse<Vec<serde_json::Value>> = second.json();
        assert_eq!(second_body.message, "Recent activity retrieved from cache");
        assert_eq!(second_body.data, first_body.data);

        // A new prediction invalidates the cached feed.
        let mut request = sample_prediction();
        request.year = 2025;
        server
            .post("/api/v1/production/predict")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&request)
            .await
            .assert_status(StatusCode::OK);

        let third = server
            .get("/api/v1/activity")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        third.assert_status(StatusCode::OK);
        let third_body: ApiResponse<Vec<serde_json::Value>> = third.json();
        assert_eq!(third_body.message, "Recent activity retrieved successfully");
        assert_eq!(third_body.data.len(), 2);
    }
}
