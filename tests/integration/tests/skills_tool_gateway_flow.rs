use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use claw_agent_core::AgentTool;
use claw_gateway::{
    build_gateway_rpc_response_frame, parse_gateway_rpc_request_frame, GatewayRpcRequestFrame,
    WsGatewayRpcClient,
};
use claw_tools::SkillsTool;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type RecordedFrames = Arc<Mutex<Vec<GatewayRpcRequestFrame>>>;

async fn handle_gateway_ws(State(frames): State<RecordedFrames>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| serve_gateway_socket(socket, frames))
}

async fn serve_gateway_socket(mut socket: WebSocket, frames: RecordedFrames) {
    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(text) = message else {
            continue;
        };
        let frame = parse_gateway_rpc_request_frame(text.as_str()).expect("request frame");
        frames.lock().expect("frames lock").push(frame.clone());
        let result = match frame.kind.as_str() {
            "skills.bins" => json!({ "bins": ["jq", "ffmpeg"] }),
            "skills.install" => json!({ "ok": true, "installId": frame.payload["installId"] }),
            _ => json!({ "ok": true }),
        };
        let response = build_gateway_rpc_response_frame(&frame.request_id, "response", result);
        let raw = serde_json::to_string(&response).expect("serialize response");
        if socket.send(Message::Text(raw.into())).await.is_err() {
            return;
        }
    }
}

async fn spawn_gateway() -> Result<(SocketAddr, RecordedFrames, tokio::task::JoinHandle<()>)> {
    let frames = RecordedFrames::default();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind ephemeral listener")?;
    let addr = listener.local_addr().context("resolve listener addr")?;
    let app = Router::new()
        .route("/", get(handle_gateway_ws))
        .with_state(frames.clone());
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok((addr, frames, handle))
}

#[tokio::test]
async fn integration_skills_tool_round_trips_through_websocket_gateway() {
    let (addr, frames, handle) = spawn_gateway().await.expect("spawn gateway");
    let tool = SkillsTool::new(Arc::new(WsGatewayRpcClient::default()));
    let gateway_url = format!("ws://{addr}/");

    let bins = tool
        .execute(json!({ "action": "bins", "gatewayUrl": gateway_url }))
        .await;
    assert!(!bins.is_error, "bins failed: {}", bins.as_text());
    assert_eq!(
        bins.content,
        json!({ "tool": "skills", "action": "bins", "result": { "bins": ["jq", "ffmpeg"] } })
    );

    let install = tool
        .execute(json!({
            "action": "install",
            "gatewayUrl": gateway_url,
            "name": "weather",
            "installId": "brew",
            "timeoutMs": 2500.7,
        }))
        .await;
    assert!(!install.is_error, "install failed: {}", install.as_text());
    assert_eq!(install.content["result"]["installId"], "brew");

    let update = tool
        .execute(json!({
            "action": "update",
            "gatewayUrl": gateway_url,
            "skillKey": "weather",
            "enabled": false,
            "env": { "WEATHER_API_KEY": "" },
        }))
        .await;
    assert!(!update.is_error, "update failed: {}", update.as_text());

    let recorded = frames.lock().expect("frames lock").clone();
    let kinds = recorded
        .iter()
        .map(|frame| frame.kind.as_str())
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["skills.bins", "skills.install", "skills.update"]);
    assert_eq!(recorded[0].payload, json!({}));
    assert_eq!(
        recorded[1].payload,
        json!({ "name": "weather", "installId": "brew", "timeoutMs": 2500 })
    );
    assert_eq!(
        recorded[2].payload,
        json!({ "skillKey": "weather", "enabled": false, "env": { "WEATHER_API_KEY": "" } })
    );

    handle.abort();
}

#[tokio::test]
async fn integration_skills_tool_validation_failure_never_reaches_gateway() {
    let (addr, frames, handle) = spawn_gateway().await.expect("spawn gateway");
    let tool = SkillsTool::new(Arc::new(WsGatewayRpcClient::default()));

    let result = tool
        .execute(json!({
            "action": "update",
            "gatewayUrl": format!("ws://{addr}/"),
            "skillKey": "weather",
            "env": [],
        }))
        .await;
    assert!(result.is_error);
    assert_eq!(result.content["reason_code"], "invalid_parameter");
    assert!(frames.lock().expect("frames lock").is_empty());

    let unreachable: Value = tool
        .execute(json!({ "action": "bins", "gatewayUrl": "ws://127.0.0.1:1/", "timeoutMs": 500 }))
        .await
        .content;
    assert_eq!(unreachable["reason_code"], "gateway_transport_error");

    handle.abort();
}
