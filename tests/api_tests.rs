//! Integration tests for the HTTP API.
//!
//! Each test starts a server on an ephemeral port over a fresh in-memory
//! store and talks to it with reqwest.

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tasky::server::{ServerHandle, start_server};
use tasky::store::MemoryStore;

/// Helper to start a server with an empty store.
async fn setup_server() -> (ServerHandle, reqwest::Client) {
    let store = Arc::new(MemoryStore::new());
    let handle = start_server(store, "127.0.0.1:0".parse().unwrap())
        .await
        .expect("Failed to start server");
    (handle, reqwest::Client::new())
}

/// Helper to POST a task and return the created record.
async fn create(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/tasks", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

mod root_tests {
    use super::*;

    #[tokio::test]
    async fn api_root_greets() {
        let (server, client) = setup_server().await;
        let body: Value = client
            .get(server.api_url())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!({ "message": "API - 👋🌎🌍🌏" }));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (server, client) = setup_server().await;
        let body: Value = client
            .get(format!("{}/health", server.api_url()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "healthy");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let (server, client) = setup_server().await;
        let response = client
            .get(format!("http://{}/nope", server.addr()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Not found" }));
        server.shutdown().await;
    }
}

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn create_applies_defaults() {
        let (server, client) = setup_server().await;
        let base = server.api_url();

        let task = create(&client, &base, json!({ "title": "Write docs" })).await;
        assert_eq!(task["title"], "Write docs");
        assert_eq!(task["description"], "");
        assert_eq!(task["status"], "todo");
        assert_eq!(task["priority"], "medium");
        assert!(!task["id"].as_str().unwrap().is_empty());
        assert_eq!(task["createdAt"], task["updatedAt"]);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn create_keeps_given_fields() {
        let (server, client) = setup_server().await;
        let base = server.api_url();

        let task = create(
            &client,
            &base,
            json!({
                "title": "Ship it",
                "description": "Release 1.0",
                "status": "in-progress",
                "priority": "high"
            }),
        )
        .await;
        assert_eq!(task["status"], "in-progress");
        assert_eq!(task["priority"], "high");
        assert_eq!(task["description"], "Release 1.0");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let (server, client) = setup_server().await;
        let base = server.api_url();

        let a = create(&client, &base, json!({ "title": "A" })).await;
        let b = create(&client, &base, json!({ "title": "B" })).await;
        assert_ne!(a["id"], b["id"]);

        let list: Vec<Value> = client
            .get(format!("{}/tasks", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn missing_or_blank_title_is_rejected() {
        let (server, client) = setup_server().await;
        let base = server.api_url();

        for body in [json!({}), json!({ "title": "" }), json!({ "title": "   " })] {
            let response = client
                .post(format!("{}/tasks", base))
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error: Value = response.json().await.unwrap();
            assert_eq!(error, json!({ "error": "Title is required" }));
        }

        let list: Vec<Value> = client
            .get(format!("{}/tasks", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(list.is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (server, client) = setup_server().await;
        let response = client
            .post(format!("{}/tasks", server.api_url()))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Invalid request body");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn blank_title_wins_over_bad_priority() {
        let (server, client) = setup_server().await;
        let response = client
            .post(format!("{}/tasks", server.api_url()))
            .json(&json!({ "title": "  ", "priority": "urgent" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Title is required" }));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let (server, client) = setup_server().await;
        let response = client
            .post(format!("{}/tasks", server.api_url()))
            .json(&json!({ "title": "X", "status": "done" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Invalid status");
        server.shutdown().await;
    }
}

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_404_even_with_invalid_fields() {
        let (server, client) = setup_server().await;
        let response = client
            .put(format!("{}/tasks/does-not-exist", server.api_url()))
            .json(&json!({ "status": "done", "title": "" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Task not found" }));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn existing_task_with_unknown_status_is_400() {
        let (server, client) = setup_server().await;
        let base = server.api_url();
        let task = create(&client, &base, json!({ "title": "Real" })).await;

        let response = client
            .put(format!("{}/tasks/{}", base, task["id"].as_str().unwrap()))
            .json(&json!({ "status": "done" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Invalid status" }));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let (server, client) = setup_server().await;
        let base = server.api_url();
        let task = create(
            &client,
            &base,
            json!({ "title": "Original", "description": "Keep me", "priority": "low" }),
        )
        .await;
        let id = task["id"].as_str().unwrap();

        let response = client
            .put(format!("{}/tasks/{}", base, id))
            .json(&json!({ "status": "completed" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Value = response.json().await.unwrap();

        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["title"], "Original");
        assert_eq!(updated["description"], "Keep me");
        assert_eq!(updated["priority"], "low");
        assert_eq!(updated["id"], task["id"]);
        assert_eq!(updated["createdAt"], task["createdAt"]);

        let created: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(task["createdAt"].clone()).unwrap();
        let touched: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(updated["updatedAt"].clone()).unwrap();
        assert!(touched >= created);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn blank_title_update_is_rejected() {
        let (server, client) = setup_server().await;
        let base = server.api_url();
        let task = create(&client, &base, json!({ "title": "Keep" })).await;
        let id = task["id"].as_str().unwrap();

        let response = client
            .put(format!("{}/tasks/{}", base, id))
            .json(&json!({ "title": "  " }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Title cannot be empty" }));

        let current: Value = client
            .get(format!("{}/tasks/{}", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(current, task);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn update_missing_task_is_404() {
        let (server, client) = setup_server().await;
        let response = client
            .put(format!("{}/tasks/does-not-exist", server.api_url()))
            .json(&json!({ "title": "x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Task not found" }));
        server.shutdown().await;
    }
}

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let (server, client) = setup_server().await;
        let base = server.api_url();
        let task = create(&client, &base, json!({ "title": "Temp" })).await;
        let url = format!("{}/tasks/{}", base, task["id"].as_str().unwrap());

        let response = client.delete(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.bytes().await.unwrap().is_empty());

        let response = client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = client.delete(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        server.shutdown().await;
    }
}

mod client_tests {
    use super::*;
    use tasky::client::{HttpClient, TaskApi};
    use tasky::types::{NewTask, TaskPatch, TaskPriority, TaskStatus};

    #[tokio::test]
    async fn http_client_round_trip() {
        let (server, _) = setup_server().await;
        let api = HttpClient::new(&server.api_url()).unwrap();

        let created = api
            .create_task(&NewTask::new("Client task").with_priority(TaskPriority::High))
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::Todo);

        let updated = api
            .update_task(&created.id, &TaskPatch::status(TaskStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.priority, TaskPriority::High);

        assert_eq!(api.get_task(&created.id).await.unwrap(), updated);
        assert_eq!(api.list_tasks().await.unwrap(), vec![updated]);

        api.delete_task(&created.id).await.unwrap();
        assert!(api.list_tasks().await.unwrap().is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn http_client_keeps_server_detail() {
        let (server, _) = setup_server().await;
        let api = HttpClient::new(&server.api_url()).unwrap();

        let err = api.create_task(&NewTask::new("")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to create task");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Title is required"));

        let err = api.delete_task("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete task");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("Task not found"));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unreachable_server_has_no_status() {
        let (server, _) = setup_server().await;
        let url = server.api_url();
        server.shutdown().await;

        let api = HttpClient::new(&url).unwrap();
        let err = api.list_tasks().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch tasks");
        assert_eq!(err.status(), None);
    }
}

mod cli_tests {
    use super::*;
    use tasky::cli::StatusArg;
    use tasky::cli::tasks::{self, DeleteArgs, StatusArgs, UpdateArgs};
    use tasky::client::{HttpClient, TaskApi};
    use tasky::types::{NewTask, TaskPriority, TaskStatus};

    #[tokio::test]
    async fn status_command_updates_one_task() {
        let (server, _) = setup_server().await;
        let url = server.api_url();
        let api = HttpClient::new(&url).unwrap();
        let task = api.create_task(&NewTask::new("Row")).await.unwrap();

        let args = StatusArgs {
            id: task.id.clone(),
            status: StatusArg::Completed,
        };
        tasks::status(&url, &args).await.unwrap();
        assert_eq!(api.get_task(&task.id).await.unwrap().status, TaskStatus::Completed);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn status_command_reports_missing_task() {
        let (server, _) = setup_server().await;
        let args = StatusArgs {
            id: "missing".into(),
            status: StatusArg::Todo,
        };
        let err = tasks::status(&server.api_url(), &args).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update task: Task not found");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn update_command_keeps_other_fields() {
        let (server, _) = setup_server().await;
        let url = server.api_url();
        let api = HttpClient::new(&url).unwrap();
        let task = api
            .create_task(&NewTask::new("Draft").with_description("Notes"))
            .await
            .unwrap();

        let args = UpdateArgs {
            id: task.id.clone(),
            title: None,
            description: None,
            status: None,
            priority: Some(tasky::cli::PriorityArg::High),
        };
        tasks::update(&url, &args).await.unwrap();

        let current = api.get_task(&task.id).await.unwrap();
        assert_eq!(current.priority, TaskPriority::High);
        assert_eq!(current.title, "Draft");
        assert_eq!(current.description, "Notes");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn delete_command_with_yes_removes_task() {
        let (server, _) = setup_server().await;
        let url = server.api_url();
        let api = HttpClient::new(&url).unwrap();
        let task = api.create_task(&NewTask::new("Gone")).await.unwrap();

        let args = DeleteArgs {
            id: task.id.clone(),
            yes: true,
        };
        tasks::delete(&url, &args).await.unwrap();
        assert_eq!(api.get_task(&task.id).await.unwrap_err().status(), Some(404));
        server.shutdown().await;
    }
}
