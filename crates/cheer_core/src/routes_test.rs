#[cfg(test)]
mod tests {
    use crate::mock::{FixedRandom, InMemoryStore, RecordingPush};
    use crate::routes::routes;
    use crate::service::CheerService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use cheer_config::CheerConfig;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &InMemoryStore, push: &RecordingPush) -> Router {
        routes(CheerService::with_random(
            store.clone(),
            push.clone(),
            Arc::new(CheerConfig::default()),
            Arc::new(FixedRandom::new(&[0, 0])),
        ))
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
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

    fn register_body(id: &str) -> Value {
        json!({
            "installationId": id,
            "appName": "Christmas Cheer",
            "appIdentifier": "io.loganwright.ChristmasCheer",
            "deviceToken": format!("token-{}", id)
        })
    }

    fn send_body(id: &str) -> Value {
        json!({
            "fromUserId": format!("user-{}", id),
            "fromInstallationId": id,
            "fromName": "Comet",
            "fromLocation": "Reykjavik"
        })
    }

    #[tokio::test]
    async fn test_register_then_send_then_return_over_http() {
        let store = InMemoryStore::new();
        let push = RecordingPush::new();

        let (status, body) = call(app(&store, &push), "POST", "/installations", Some(register_body("A1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isNewRecord"], true);
        call(app(&store, &push), "POST", "/installations", Some(register_body("B1"))).await;

        let (status, body) = call(
            app(&store, &push),
            "POST",
            "/functions/sendRandomCheer",
            Some(send_body("A1")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "SUCCESS" }));

        let (status, received) = call(app(&store, &push), "GET", "/installations/B1/cheers", None).await;
        assert_eq!(status, StatusCode::OK);
        let original_id = received[0]["id"].as_str().unwrap().to_string();
        assert_eq!(received[0]["fromInstallationId"], "A1");
        assert_eq!(received[0]["hasBeenRespondedTo"], false);

        let mut return_body = send_body("B1");
        return_body["originalNoteId"] = json!(original_id);
        let (status, body) = call(
            app(&store, &push),
            "POST",
            "/functions/returnCheer",
            Some(return_body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["result"],
            "Succesfully returned christmas cheer push from installation id: B1 to installationId:A1"
        );

        let (status, original) = call(
            app(&store, &push),
            "GET",
            &format!("/cheers/{}", original_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(original["hasBeenRespondedTo"], true);
        assert_eq!(push.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_send_with_nobody_else_is_503() {
        let store = InMemoryStore::new();
        let push = RecordingPush::new();
        call(app(&store, &push), "POST", "/installations", Some(register_body("A1"))).await;

        let (status, body) = call(
            app(&store, &push),
            "POST",
            "/functions/sendRandomCheer",
            Some(send_body("A1")),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 503);
    }

    #[tokio::test]
    async fn test_missing_parameter_is_400() {
        let store = InMemoryStore::new();
        let push = RecordingPush::new();

        let (status, body) = call(
            app(&store, &push),
            "POST",
            "/functions/sendRandomCheer",
            Some(json!({ "fromInstallationId": "A1" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing parameter"));
    }

    #[tokio::test]
    async fn test_return_of_unknown_cheer_is_404() {
        let store = InMemoryStore::new();
        let push = RecordingPush::new();
        let mut body = send_body("B1");
        body["originalNoteId"] = json!("nope");

        let (status, _) = call(app(&store, &push), "POST", "/functions/returnCheer", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_push_failure_is_502() {
        let store = InMemoryStore::new();
        store.register_ref("A1").await;
        store.register_ref("B1").await;
        let push = RecordingPush::failing();

        let (status, _) = call(
            app(&store, &push),
            "POST",
            "/functions/sendRandomCheer",
            Some(send_body("A1")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(store.cheers().len(), 1);
    }

    #[tokio::test]
    async fn test_feedback_route() {
        let store = InMemoryStore::new();
        let push = RecordingPush::new();

        let (status, _) = call(
            app(&store, &push),
            "POST",
            "/feedback",
            Some(json!({ "text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            app(&store, &push),
            "POST",
            "/feedback",
            Some(json!({
                "text": "Ho ho ho",
                "userId": "u1",
                "installationId": "A1",
                "name": "Dancer",
                "locationDescription": "Nuuk"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["text"], "Ho ho ho");
        assert_eq!(body["locationDescription"], "Nuuk");
    }

    #[tokio::test]
    async fn test_health_reports_count() {
        let store = InMemoryStore::new();
        store.register_ref("A1").await;
        let push = RecordingPush::new();

        let (status, body) = call(app(&store, &push), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["installations"], 1);
        assert_eq!(body["environment"], "production");

        let (status, _) = call(
            app(&InMemoryStore::without_counter(), &push),
            "GET",
            "/health",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
