// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end smoke tests that spawn the real `agentdir` binary and exercise
//! the REST routes and the tool-call endpoint over TCP.

use std::time::Duration;

use serde_json::{json, Value};

use agentdir_specs::AgentdirProcess;

const TIMEOUT: Duration = Duration::from_secs(10);

async fn rpc(
    client: &reqwest::Client,
    url: &str,
    id: u64,
    method: &str,
    params: Value,
) -> anyhow::Result<Value> {
    let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
    Ok(client.post(url).json(&body).send().await?.json().await?)
}

// -- HTTP ---------------------------------------------------------------------

#[tokio::test]
async fn http_health() -> anyhow::Result<()> {
    let agentdir = AgentdirProcess::start(&[])?;
    agentdir.wait_healthy(TIMEOUT).await?;

    let resp: Value =
        reqwest::get(format!("{}/api/v1/health", agentdir.base_url())).await?.json().await?;

    assert_eq!(resp["status"], "running");
    assert_eq!(resp["agent_count"], 0);
    Ok(())
}

#[tokio::test]
async fn http_publish_list_get() -> anyhow::Result<()> {
    let agentdir = AgentdirProcess::start(&[])?;
    agentdir.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    let base = agentdir.base_url();
    let card = json!({ "name": "weather-bot", "locator": "https://x/card.json" });

    let published: Value = client
        .post(format!("{base}/api/v1/agents"))
        .json(&json!({ "name": "weather-bot", "card": card.clone() }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(published["uri"], "agent://weather-bot");

    let dup = client
        .post(format!("{base}/api/v1/agents"))
        .json(&json!({ "name": "weather-bot", "card": "other" }))
        .send()
        .await?;
    assert_eq!(dup.status(), reqwest::StatusCode::CONFLICT);

    let list: Vec<Value> = client.get(format!("{base}/api/v1/agents")).send().await?.json().await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["card"], card);

    let missing = client.get(format!("{base}/api/v1/agents/unknown")).send().await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

// -- Tool calls ---------------------------------------------------------------

#[tokio::test]
async fn mcp_weather_bot_scenario() -> anyhow::Result<()> {
    let agentdir = AgentdirProcess::start(&["--name", "smoke-registry"])?;
    agentdir.wait_healthy(TIMEOUT).await?;

    let client = reqwest::Client::new();
    let url = agentdir.mcp_url();

    let init = rpc(&client, &url, 1, "initialize", json!({})).await?;
    assert_eq!(init["result"]["serverInfo"]["name"], "smoke-registry");

    let card = json!({ "name": "weather-bot", "locator": "https://x/card.json" });
    let args =
        json!({ "name": "publish_card", "arguments": { "name": "weather-bot", "card": card } });
    let published = rpc(&client, &url, 2, "tools/call", args.clone()).await?;
    assert_eq!(published["result"]["content"][0]["text"], "agent://weather-bot");

    let read =
        rpc(&client, &url, 3, "resources/read", json!({ "uri": "agent://weather-bot" })).await?;
    assert_eq!(read["result"]["contents"][0]["uri"], "agent://weather-bot");

    let unknown =
        rpc(&client, &url, 4, "resources/read", json!({ "uri": "agent://unknown" })).await?;
    assert_eq!(unknown["error"]["code"], -32002);

    let duplicate = rpc(&client, &url, 5, "tools/call", args).await?;
    assert_eq!(duplicate["result"]["isError"], true);
    Ok(())
}

// -- Lifecycle ----------------------------------------------------------------

#[tokio::test]
async fn sigterm_shuts_down_cleanly() -> anyhow::Result<()> {
    let mut agentdir = AgentdirProcess::start(&[])?;
    agentdir.wait_healthy(TIMEOUT).await?;

    agentdir.terminate()?;
    let status = agentdir.wait_exit(TIMEOUT).await?;
    assert!(status.success(), "exit status: {status}");
    Ok(())
}

#[tokio::test]
async fn invalid_log_format_exits_with_usage_error() -> anyhow::Result<()> {
    let mut agentdir = AgentdirProcess::start(&["--log-format", "xml"])?;
    let status = agentdir.wait_exit(TIMEOUT).await?;
    assert_eq!(status.code(), Some(2));
    Ok(())
}
