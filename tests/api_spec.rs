mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use plan_wizard::api::{create_router, AppState, ErrorBody};
use plan_wizard::db::{Database, MemoryStore};
use plan_wizard::models::*;
use serde_json::{json, Value};

use common::{generator, Stub, StubBackend};

fn setup_with(stub: Stub) -> TestServer {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        generator(StubBackend::new(stub)),
    );
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn setup() -> TestServer {
    setup_with(Stub::Fail)
}

fn project_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Plans software projects end to end",
        "type": "web",
        "features": [{ "id": "auth", "name": "User Authentication" }],
        "techStack": [{ "id": "react", "name": "React" }],
        "timeline": [],
        "createdAt": "2024-05-13T09:30:00.000Z",
    })
}

async fn create_test_project(server: &TestServer, name: &str) -> ProjectRecord {
    server
        .post("/api/projects")
        .json(&project_body(name))
        .await
        .json::<ProjectRecord>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }
}

mod projects {
    use super::*;

    #[tokio::test]
    async fn list_is_empty_initially() {
        let server = setup();
        let response = server.get("/api/projects").await;
        response.assert_status_ok();
        assert!(response.json::<Vec<ProjectRecord>>().is_empty());
    }

    #[tokio::test]
    async fn create_returns_created_with_first_id() {
        let server = setup();
        let response = server
            .post("/api/projects")
            .json(&project_body("My App"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let project: ProjectRecord = response.json();
        assert_eq!(project.id, 1);
        assert_eq!(project.name, "My App");
        assert_eq!(project.tech_stack[0]["id"], "react");
    }

    #[tokio::test]
    async fn create_rejects_schema_violations() {
        let server = setup();
        let mut body = project_body("My App");
        body["features"] = Value::Null;
        body.as_object_mut().unwrap().remove("type");

        let response = server.post("/api/projects").json(&body).await;

        response.assert_status_bad_request();
        let error: ErrorBody = response.json();
        assert_eq!(error.message, "Invalid project data");
        let fields: Vec<_> = error
            .errors
            .expect("Missing field errors")
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["type", "features"]);
    }

    #[tokio::test]
    async fn get_returns_project() {
        let server = setup();
        let created = create_test_project(&server, "My App").await;

        let response = server.get(&format!("/api/projects/{}", created.id)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<ProjectRecord>(), created);
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let server = setup();
        let response = server.get("/api/projects/99").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<ErrorBody>().message, "Project not found");
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request() {
        let server = setup();
        let response = server.get("/api/projects/abc").await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorBody>().message, "Invalid project ID");
    }

    #[tokio::test]
    async fn update_replaces_and_keeps_id() {
        let server = setup();
        let created = create_test_project(&server, "Before").await;

        let response = server
            .put(&format!("/api/projects/{}", created.id))
            .json(&project_body("After"))
            .await;

        response.assert_status_ok();
        let updated: ProjectRecord = response.json();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "After");
    }

    #[tokio::test]
    async fn update_missing_returns_not_found() {
        let server = setup();
        server
            .put("/api/projects/7")
            .json(&project_body("Ghost"))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn update_rejects_schema_violations() {
        let server = setup();
        let created = create_test_project(&server, "Before").await;

        server
            .put(&format!("/api/projects/{}", created.id))
            .json(&json!({ "name": "Only a name" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_not_found() {
        let server = setup();
        let created = create_test_project(&server, "Doomed").await;

        server
            .delete(&format!("/api/projects/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .delete(&format!("/api/projects/{}", created.id))
            .await
            .assert_status_not_found();

        server
            .get(&format!("/api/projects/{}", created.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn works_over_sqlite_store() {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let state = AppState::new(Arc::new(db), generator(StubBackend::new(Stub::Fail)));
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        let created = create_test_project(&server, "My App").await;
        assert_eq!(created.id, 1);

        let listed: Vec<ProjectRecord> = server.get("/api/projects").await.json();
        assert_eq!(listed, vec![created]);
    }
}

mod generation {
    use super::*;

    #[tokio::test]
    async fn plan_requires_project_info() {
        let server = setup();
        let response = server.post("/api/generate/plan").json(&json!({})).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorBody>().message,
            "Project information is required"
        );
    }

    #[tokio::test]
    async fn timeline_requires_features() {
        let server = setup();
        let response = server
            .post("/api/generate/timeline")
            .json(&json!({ "projectInfo": { "name": "My App" } }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorBody>().message,
            "Project information and features are required"
        );
    }

    #[tokio::test]
    async fn plan_embeds_project_info_in_prompt() {
        let server = setup_with(Stub::Echo);
        let response = server
            .post("/api/generate/plan")
            .json(&json!({ "projectInfo": { "name": "My App" } }))
            .await;

        response.assert_status_ok();
        let reply: Value = response.json();
        assert!(reply["user"]
            .as_str()
            .unwrap()
            .contains(r#"{"name":"My App"}"#));
    }

    #[tokio::test]
    async fn timeline_reply_is_passed_through() {
        let reply = json!({ "timeline": [{ "id": "1", "name": "Kickoff" }] });
        let server = setup_with(Stub::Reply(reply.clone()));

        let response = server
            .post("/api/generate/timeline")
            .json(&json!({ "projectInfo": { "name": "My App" }, "features": [] }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), reply);
    }

    #[tokio::test]
    async fn failures_return_server_error_with_message() {
        let server = setup_with(Stub::Fail);
        let cases = [
            ("/api/generate/plan", "Failed to generate project plan"),
            ("/api/generate/timeline", "Failed to generate timeline"),
            ("/api/generate/features", "Failed to suggest features"),
            ("/api/generate/tech-stack", "Failed to suggest tech stack"),
        ];

        for (path, message) in cases {
            let response = server
                .post(path)
                .json(&json!({ "projectInfo": { "name": "My App" }, "features": [] }))
                .await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            let error: ErrorBody = response.json();
            assert_eq!(error.message, message);
            assert!(error.error.unwrap().contains("service unavailable"));
        }
    }

    #[tokio::test]
    async fn tech_stack_prompt_includes_features() {
        let server = setup_with(Stub::Echo);
        let response = server
            .post("/api/generate/tech-stack")
            .json(&json!({
                "projectInfo": { "name": "My App" },
                "features": [{ "id": "auth" }]
            }))
            .await;

        response.assert_status_ok();
        let reply: Value = response.json();
        assert!(reply["user"]
            .as_str()
            .unwrap()
            .contains(r#"Selected Features: [{"id":"auth"}]"#));
    }
}
