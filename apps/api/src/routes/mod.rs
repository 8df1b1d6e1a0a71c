pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        // Profile Capture
        .route(
            "/api/v1/sessions/:id/form",
            get(handlers::handle_get_form).patch(handlers::handle_edit_form),
        )
        // Assessment (submit / re-assess)
        .route(
            "/api/v1/sessions/:id/assessment",
            post(handlers::handle_submit_assessment).delete(handlers::handle_reset),
        )
        .route(
            "/api/v1/sessions/:id/dashboard",
            get(handlers::handle_get_dashboard),
        )
        // Payment Gate
        .route(
            "/api/v1/sessions/:id/payment",
            post(handlers::handle_open_payment).delete(handlers::handle_cancel_payment),
        )
        .route(
            "/api/v1/sessions/:id/payment/start",
            post(handlers::handle_start_payment),
        )
        .route(
            "/api/v1/sessions/:id/payment/retry",
            post(handlers::handle_retry_payment),
        )
        // Booking Modal
        .route(
            "/api/v1/sessions/:id/booking",
            post(handlers::handle_open_booking).delete(handlers::handle_close_booking),
        )
        .route(
            "/api/v1/sessions/:id/booking/proceed",
            post(handlers::handle_booking_proceed),
        )
        .route(
            "/api/v1/sessions/:id/booking/back",
            post(handlers::handle_booking_back),
        )
        .route(
            "/api/v1/sessions/:id/booking/contact",
            get(handlers::handle_booking_contact),
        )
        .route(
            "/api/v1/sessions/:id/notification",
            delete(handlers::handle_dismiss_notification),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::llm_client::LlmError;
    use crate::state::test_state;

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn assessment_reply() -> Value {
        json!({
            "score": "背景良好",
            "suitability": {"study": 80, "ttps": 60, "qmas": 45},
            "analysis": "...",
            "recommendedPath": "...",
            "nextSteps": ["a", "b"]
        })
    }

    async fn new_session(router: &Router) -> String {
        let (status, body) = send(router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_session_exposes_form() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let id = new_session(&router).await;

        let (status, body) =
            send(&router, Method::GET, &format!("/api/v1/sessions/{id}/form"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"].as_array().unwrap().len(), 4);
        assert_eq!(body["submit"]["disabled"], false);
    }

    #[tokio::test]
    async fn test_edit_then_submit_then_reset() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .reply(assessment_reply())
                .reply(assessment_reply()),
        );
        let router = build_router(test_state(backend.clone()));
        let id = new_session(&router).await;

        let (status, _) = send(
            &router,
            Method::PATCH,
            &format!("/api/v1/sessions/{id}/form"),
            Some(json!({"updates": [
                {"field": "name", "value": "Yuki"},
                {"field": "age", "value": 31}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assessment"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"]["name"], "assessed");
        assert_eq!(body["dashboard"]["assessment"]["score"], "背景良好");
        assert_eq!(body["dashboard"]["paid"]["kind"], "upsell");
        assert!(backend.prompts()[0].contains("Yuki"));

        let (status, body) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/sessions/{id}/assessment"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"]["name"], "idle");
        assert!(body.get("dashboard").is_none());

        // The next submission starts from a fresh form: nothing leaks from "Yuki".
        send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assessment"),
            None,
        )
        .await;
        let second = &backend.prompts()[1];
        assert!(!second.contains("Yuki"));
        assert!(second.contains("匿名精英"));
    }

    #[tokio::test]
    async fn test_submit_failure_returns_bad_gateway_and_notification() {
        let backend = Arc::new(ScriptedBackend::new().fail(LlmError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));
        let router = build_router(test_state(backend));
        let id = new_session(&router).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assessment"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");

        let (_, session) =
            send(&router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(session["phase"]["name"], "idle");
        assert_eq!(session["notification"]["message"], "分析出錯，請稍後再試。");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/sessions/{id}/notification"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_submit_with_full_profile_body() {
        let backend = Arc::new(ScriptedBackend::new().reply(assessment_reply()));
        let router = build_router(test_state(backend.clone()));
        let id = new_session(&router).await;

        let (status, _) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assessment"),
            Some(json!({"profile": {"name": "Noor", "lastYearIncomeHKD": 3000000}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let prompt = &backend.prompts()[0];
        assert!(prompt.contains("Noor"));
        assert!(prompt.contains("3000000 HKD"));
    }

    #[tokio::test]
    async fn test_malformed_profile_body_is_rejected_without_a_call() {
        let backend = Arc::new(ScriptedBackend::new().reply(assessment_reply()));
        let router = build_router(test_state(backend.clone()));
        let id = new_session(&router).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/assessment"),
            Some(json!({"profile": {"name": "Noor", "education": "大專", "age": "thirty"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(backend.prompts().is_empty());

        let (_, session) =
            send(&router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(session["phase"]["name"], "idle");
    }

    #[tokio::test]
    async fn test_booking_proceed_on_closed_modal_is_conflict() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let id = new_session(&router).await;

        for action in ["proceed", "back"] {
            let (status, body) = send(
                &router,
                Method::POST,
                &format!("/api/v1/sessions/{id}/booking/{action}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(body["error"]["code"], "CONFLICT");
        }
    }

    #[tokio::test]
    async fn test_upgrade_before_assessment_is_conflict() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let id = new_session(&router).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/payment"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_payment_start_returns_single_navigation() {
        let backend = Arc::new(ScriptedBackend::new().reply(assessment_reply()));
        let router = build_router(test_state(backend));
        let id = new_session(&router).await;
        send(&router, Method::POST, &format!("/api/v1/sessions/{id}/assessment"), None).await;

        let (status, body) =
            send(&router, Method::POST, &format!("/api/v1/sessions/{id}/payment"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["step"], "order");
        assert_eq!(body["payment"]["order"]["price"], "¥999");

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/payment/start"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["navigation"]["url"],
            crate::config::DEFAULT_PAYMENT_LINK
        );
        assert_eq!(body["session"]["payment"]["step"], "processing");

        let (status, _) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/payment/start"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_booking_flow_without_roadmap() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let id = new_session(&router).await;

        let (_, body) =
            send(&router, Method::POST, &format!("/api/v1/sessions/{id}/booking"), None).await;
        assert_eq!(body["booking"]["open"], true);
        assert_eq!(body["booking"]["steps"][1]["status"], "current");

        let (_, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/booking/proceed"),
            None,
        )
        .await;
        assert_eq!(body["outcome"]["action"], "scroll_to");
        assert_eq!(body["outcome"]["anchor"], "assessment-anchor");
        assert_eq!(body["session"]["booking"]["open"], false);

        let (_, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/booking/contact"),
            None,
        )
        .await;
        assert_eq!(body["handle"], "HK_Path_Expert");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let (status, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/sessions/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dashboard_requires_assessment() {
        let router = build_router(test_state(Arc::new(ScriptedBackend::new())));
        let id = new_session(&router).await;
        let (status, _) = send(
            &router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/dashboard"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
