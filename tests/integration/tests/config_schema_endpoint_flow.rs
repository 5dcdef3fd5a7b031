use std::{fs, net::SocketAddr, path::Path, time::Duration};

use anyhow::{Context, Result};
use claw_config::{base_config_schema, BASE_CONFIG_PROPERTY_KEYS};
use claw_gateway::{build_gateway_http_router, ConfigSchemaSources, CONFIG_SCHEMA_ENDPOINT};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::tempdir;
use tokio::net::TcpListener;

fn write_plugin(root: &Path, directory: &str, manifest: Value) {
    let plugin_dir = root.join(directory);
    fs::create_dir_all(&plugin_dir).expect("create plugin dir");
    fs::write(
        plugin_dir.join("openclaw.plugin.json"),
        serde_json::to_string_pretty(&manifest).expect("serialize manifest"),
    )
    .expect("write manifest");
}

async fn spawn_schema_server(
    state_dir: &Path,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let sources = ConfigSchemaSources::for_state_dir(state_dir, state_dir.join("openclaw.json"));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind ephemeral listener")?;
    let addr = listener.local_addr().context("resolve listener addr")?;
    let app = build_gateway_http_router(sources);
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok((addr, handle))
}

#[tokio::test]
async fn integration_schema_endpoint_merges_discovered_plugins_and_builtin_channels() {
    let temp = tempdir().expect("tempdir");
    let state_dir = temp.path();
    write_plugin(
        &state_dir.join("extensions"),
        "voice-call",
        json!({
            "id": "voice-call",
            "name": "Voice Call",
            "description": "Places phone calls.",
            "configSchema": {
                "type": "object",
                "properties": { "provider": { "type": "string", "enum": ["twilio", "telnyx"] } }
            },
            "uiHints": { "provider": { "label": "Provider" } }
        }),
    );
    write_plugin(
        &state_dir.join("workspace").join(".openclaw").join("extensions"),
        "memory-lancedb",
        json!({ "id": "memory-lancedb" }),
    );

    let (addr, handle) = spawn_schema_server(state_dir).await.expect("spawn server");
    let response = Client::new()
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::OK);
    let document = response.json::<Value>().await.expect("parse schema");

    let namespace = &document["properties"]["extensions"];
    let mut ids = namespace["properties"]
        .as_object()
        .expect("extension entries")
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    ids.sort();
    assert_eq!(
        ids,
        vec![
            "discord",
            "memory-lancedb",
            "slack",
            "telegram",
            "voice-call",
            "whatsapp"
        ]
    );
    assert_eq!(
        namespace["properties"]["voice-call"]["properties"]["provider"]["enum"],
        json!(["twilio", "telnyx"])
    );
    assert_eq!(namespace["properties"]["memory-lancedb"], json!({}));
    let metadata = &namespace["x-contributions"];
    assert_eq!(metadata["voice-call"]["displayName"], "Voice Call");
    assert_eq!(metadata["voice-call"]["uiHints"]["provider"]["label"], "Provider");
    assert_eq!(metadata["memory-lancedb"]["displayName"], "memory-lancedb");
    assert_eq!(metadata["telegram"]["source"], "channel");
    for key in BASE_CONFIG_PROPERTY_KEYS {
        assert!(
            document["properties"][*key].is_object(),
            "base key '{key}' missing from served schema"
        );
    }

    let again = Client::new()
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send second request")
        .json::<Value>()
        .await
        .expect("parse second schema");
    assert_eq!(again, document);

    handle.abort();
}

#[tokio::test]
async fn integration_schema_endpoint_rejects_plugin_shadowing_builtin_channel() {
    let temp = tempdir().expect("tempdir");
    write_plugin(
        &temp.path().join("extensions"),
        "telegram-fork",
        json!({ "id": "telegram", "name": "Telegram fork" }),
    );

    let (addr, handle) = spawn_schema_server(temp.path())
        .await
        .expect("spawn server");
    let response = Client::new()
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = response.json::<Value>().await.expect("parse error");
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("'telegram'"));

    handle.abort();
}

#[tokio::test]
async fn integration_schema_endpoint_honours_plugin_allow_and_deny_lists() {
    let temp = tempdir().expect("tempdir");
    let extensions = temp.path().join("extensions");
    write_plugin(&extensions, "voice-call", json!({ "id": "voice-call" }));
    write_plugin(&extensions, "matrix", json!({ "id": "matrix" }));
    write_plugin(&extensions, "broken", json!(["not", "an", "object"]));
    fs::write(
        temp.path().join("openclaw.json"),
        r#"{ "plugins": { "deny": ["matrix"] } }"#,
    )
    .expect("write config");

    let (addr, handle) = spawn_schema_server(temp.path())
        .await
        .expect("spawn server");
    let document = Client::new()
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send request")
        .json::<Value>()
        .await
        .expect("parse schema");
    let entries = document["properties"]["extensions"]["properties"]
        .as_object()
        .expect("extension entries");
    assert!(entries.contains_key("voice-call"));
    assert!(!entries.contains_key("matrix"));

    handle.abort();
}

#[tokio::test]
async fn integration_head_succeeds_even_when_config_is_malformed() {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("openclaw.json"), "{ not json").expect("write config");

    let (addr, handle) = spawn_schema_server(temp.path())
        .await
        .expect("spawn server");
    let client = Client::new();

    let head = client
        .head(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send head");
    assert_eq!(head.status(), StatusCode::OK);
    assert_eq!(
        head.headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json; charset=utf-8")
    );
    assert!(head.bytes().await.expect("read head body").is_empty());

    let get = client
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send get");
    assert_eq!(get.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = get.json::<Value>().await.expect("parse error");
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("failed to load config"));

    handle.abort();
}

#[tokio::test]
async fn integration_schema_endpoint_leaves_base_schema_untouched_outside_extensions() {
    let temp = tempdir().expect("tempdir");
    let (addr, handle) = spawn_schema_server(temp.path())
        .await
        .expect("spawn server");
    let mut document = Client::new()
        .get(format!("http://{addr}{CONFIG_SCHEMA_ENDPOINT}"))
        .send()
        .await
        .expect("send request")
        .json::<Value>()
        .await
        .expect("parse schema");

    let extensions = document["properties"]
        .as_object_mut()
        .expect("properties")
        .remove("extensions")
        .expect("built-in channels contribute");
    assert_eq!(extensions["x-contributions"]["slack"]["source"], "channel");
    assert_eq!(document, base_config_schema());

    handle.abort();
}
