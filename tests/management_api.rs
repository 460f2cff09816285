//! Integration tests for the proxy-definition management API.

use std::net::SocketAddr;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_crud_flow() {
    let proxy_addr: SocketAddr = "127.0.0.1:28512".parse().unwrap();
    let shutdown = common::spawn_gateway("mgmt-crud", proxy_addr, &[]).await;
    let client = common::test_client();
    let base = format!("http://{}/_rproxy/proxies", proxy_addr);

    // Empty store lists as empty.
    let list: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(list, json!([]));

    // Create derives the id from the name.
    let created = client
        .post(&base)
        .json(&json!({ "name": "My App", "target_url": "http://10.0.0.5:3000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["id"], "my-app");
    assert_eq!(created["enabled"], true);

    // Duplicate ids are rejected.
    let duplicate = client
        .post(&base)
        .json(&json!({ "name": "My App", "target_url": "http://10.0.0.5:4000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), 400);

    // Partial update flips one field and keeps the rest.
    let updated = client
        .put(format!("{}/my-app", base))
        .json(&json!({ "enabled": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["enabled"], false);
    assert_eq!(updated["target_url"], "http://10.0.0.5:3000");

    // The persisted state is what the proxy pipeline will see.
    let list: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["enabled"], false);

    // Delete, then the id is gone.
    let deleted = client
        .delete(format!("{}/my-app", base))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
    let deleted: Value = deleted.json().await.unwrap();
    assert_eq!(deleted["success"], true);

    let missing = client
        .delete(format!("{}/my-app", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    let missing = client
        .put(format!("{}/my-app", base))
        .json(&json!({ "enabled": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_created_proxy_is_visible_to_the_pipeline() {
    let upstream_addr: SocketAddr = "127.0.0.1:28521".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28522".parse().unwrap();

    common::start_upstream(upstream_addr, "text/plain", "live", &[]).await;
    let shutdown = common::spawn_gateway("mgmt-live", proxy_addr, &[]).await;
    let client = common::test_client();

    // Unknown until created — the pipeline reads the store per request.
    let before = client
        .get(format!("http://{}/proxy/live-app/status", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(before.status(), 404);

    let created = client
        .post(format!("http://{}/_rproxy/proxies", proxy_addr))
        .json(&json!({
            "name": "Live App",
            "id": "live-app",
            "target_url": format!("http://{}", upstream_addr),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let after = client
        .get(format!("http://{}/proxy/live-app/status", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), 200);
    assert_eq!(after.text().await.unwrap(), "live");

    shutdown.trigger();
}
