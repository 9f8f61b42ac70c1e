#[cfg(test)]
mod tests {
    use crate::app_state::AppState;
    use crate::routes::app;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use qline_config::{AppConfig, DemoUserConfig};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn demo_user(token: &str, role: &str, phone: Option<&str>, has_profile: bool) -> DemoUserConfig {
        DemoUserConfig {
            token: token.to_string(),
            id: format!("u-{}", token),
            email: format!("{}@qline.test", token),
            role: role.to_string(),
            display_name: token.to_string(),
            phone: phone.map(str::to_string),
            has_profile,
        }
    }

    fn test_app() -> Router {
        let config = AppConfig {
            demo_users: vec![
                demo_user("admin", "admin", None, true),
                demo_user("shop", "business", None, true),
                demo_user("amina", "customer", Some("0712 345 678"), true),
                demo_user("ghost", "admin", None, false),
            ],
            ..Default::default()
        };
        app(AppState::from_config(Arc::new(config)).expect("valid config"))
    }

    async fn get(uri: &str, token: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        test_app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(uri: &str, body: Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        test_app().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_calendar_renders_requested_month() {
        let response = get(
            "/api/calendar?year=2024&month=2&today=2024-02-01&disabled=2024-02-10,2024-02-12&booked=2024-02-14",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["month"], "2024-02");
        assert_eq!(body["label"], "February 2024");
        assert_eq!(body["weeks"].as_array().unwrap().len(), 5);
        // Saturday Feb 10th, second row
        assert_eq!(body["weeks"][1][6]["state"], "disabled_explicit");
        assert_eq!(body["weeks"][1][6]["selectable"], false);
        assert_eq!(body["weeks"][2][3]["state"], "booked_limited");
    }

    #[tokio::test]
    async fn test_calendar_opens_on_selected_month() {
        let response = get("/api/calendar?selected=2025-01-03&today=2024-12-30", None).await;
        let body = json_body(response).await;
        assert_eq!(body["month"], "2025-01");
        assert_eq!(body["weeks"][0][5]["state"], "selected");
    }

    #[tokio::test]
    async fn test_calendar_rejects_bad_input() {
        for uri in [
            "/api/calendar?min=2024-05-01&max=2024-04-01",
            "/api/calendar?year=2024&month=13",
            "/api/calendar?year=2024",
            "/api/calendar?disabled=2024-02-30",
        ] {
            let response = get(uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], 400);
        }
    }

    #[tokio::test]
    async fn test_navigate_crosses_year_boundaries() {
        let response = post_json(
            "/api/calendar/navigate",
            json!({"month": "2024-12", "direction": "next"}),
        )
        .await;
        assert_eq!(
            json_body(response).await,
            json!({"month": "2025-01", "label": "January 2025"})
        );

        let response = post_json(
            "/api/calendar/navigate",
            json!({"month": "2025-01", "direction": "previous"}),
        )
        .await;
        assert_eq!(json_body(response).await["month"], "2024-12");
    }

    #[tokio::test]
    async fn test_group_slots() {
        let response = post_json(
            "/api/slots/group",
            json!({
                "slots": [
                    {"time": "9:00 AM", "total_capacity": 10, "booked_count": 1},
                    {"time": "5:30 PM", "total_capacity": 10, "booked_count": 10},
                    {"time": "10:00 AM", "total_capacity": 10, "booked_count": 7, "closed": false}
                ],
                "selected_time": "10:00 AM"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let periods: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["period"].as_str().unwrap())
            .collect();
        assert_eq!(periods, vec!["morning", "evening"]);
        assert_eq!(body[0]["slots"][0]["tier_label"], "many spots");
        assert_eq!(body[0]["slots"][1]["selected"], true);
        assert_eq!(body[0]["slots"][1]["tier_label"], "few spots");
        assert_eq!(body[1]["slots"][0]["disabled"], true);
        assert_eq!(body[1]["slots"][0]["offering"]["status"], "full");
    }

    #[tokio::test]
    async fn test_group_slots_rejects_invalid_slot() {
        let response = post_json(
            "/api/slots/group",
            json!({"slots": [{"time": "9:00 PM", "total_capacity": 2}]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_group_slots_rejects_repeated_times() {
        let response = post_json(
            "/api/slots/group",
            json!({"slots": [
                {"time": "9:00 AM", "total_capacity": 2, "booked_count": 2},
                {"time": "9:00 AM", "total_capacity": 2}
            ]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Validation error: Time slot 9:00 AM is listed more than once"
        );
    }

    #[tokio::test]
    async fn test_admin_page_requires_session() {
        let response = get("/api/admin", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_wrong_role_is_sent_home() {
        let response = get("/api/admin", Some("amina")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/customer");

        let response = get("/api/customer", Some("shop")).await;
        assert_eq!(location(&response), "/business/dashboard");
    }

    #[tokio::test]
    async fn test_allowed_role_sees_page() {
        let response = get("/api/admin", Some("admin")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["page"], "admin");
        assert_eq!(body["user"]["role"], "admin");

        let response = get("/api/business/dashboard", Some("shop")).await;
        assert_eq!(json_body(response).await["page"], "business_dashboard");
    }

    #[tokio::test]
    async fn test_missing_profile_only_reaches_customer_pages() {
        let response = get("/api/admin", Some("ghost")).await;
        assert_eq!(location(&response), "/customer");

        let response = get("/api/customer", Some("ghost")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["user"]["role"], "customer");
    }

    #[tokio::test]
    async fn test_me_normalizes_phone() {
        let response = get("/api/me", Some("amina")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["phone"], "+254712345678");
        assert_eq!(body["user"]["phone"], "0712 345 678");

    }

    #[tokio::test]
    async fn test_me_without_session_is_json_401() {
        for token in [None, Some("nobody")] {
            let response = get("/api/me", token).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().get(header::LOCATION).is_none());
            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], 401);
            assert_eq!(body["error"]["message"], "Authentication error: No active session");
        }
    }

    #[tokio::test]
    async fn test_calendar_reports_unparsable_date_keys() {
        let response = get("/api/calendar?booked=2024-02-14,not-a-date", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = json_body(response).await["error"]["message"].clone();
        assert!(message.as_str().unwrap().starts_with("Failed to parse data:"));
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json_404() {
        let response = get("/api/bookings", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], 404);
    }

    #[cfg(feature = "openapi")]
    #[tokio::test]
    async fn test_openapi_document_lists_every_api_route() {
        let response = get("/docs/openapi.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc = json_body(response).await;
        assert_eq!(doc["servers"][0]["url"], "/api");
        for path in [
            "/calendar",
            "/calendar/navigate",
            "/slots/group",
            "/admin",
            "/business/dashboard",
            "/customer",
            "/me",
        ] {
            assert!(doc["paths"].get(path).is_some(), "{} is documented", path);
        }
        assert!(doc["components"]["securitySchemes"].get("bearer").is_some());
    }
}
