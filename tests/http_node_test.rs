use httpmock::prelude::*;
use project_submission::config::toml_config::TomlConfig;
use project_submission::core::connect::{connect, contract_source};
use project_submission::utils::validation::Validate;
use project_submission::{App, ProjectHash, ProjectStatus};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

const CONTRACT: &str = "0xcfeb869f69431e42cdb54a4f4f105c19c080a601";
const OWNER: &str = "0x627306090abab3a6e1400e9345bc60c78a8bef57";

fn write_artifact(dir: &Path, network_id: &str) -> String {
    let artifact = format!(
        r#"{{"contractName": "ProjectSubmission", "abi": [], "networks": {{"{}": {{"address": "{}"}}}}}}"#,
        network_id, CONTRACT
    );
    let path = dir.join("ProjectSubmission.json");
    std::fs::write(&path, artifact).unwrap();
    path.to_str().unwrap().replace('\\', "/")
}

fn write_config(dir: &Path, rpc_url: &str, artifact: &str) -> TomlConfig {
    let content = format!(
        r#"
[network]
rpc_url = "{}"
request_timeout_seconds = 5

[contract]
artifact = "{}"

[transactions]
receipt_poll_interval_ms = 10
receipt_timeout_seconds = 2

[account]
default = "{}"
"#,
        rpc_url, artifact, OWNER
    );
    let path = dir.join("client.toml");
    std::fs::write(&path, content).unwrap();
    TomlConfig::from_file(&path).unwrap()
}

fn mock_net_version(server: &MockServer, id: &str) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body_partial(r#"{"method": "net_version"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": id}));
    });
}

async fn app_for(server: &MockServer, dir: &TempDir) -> App {
    let artifact = write_artifact(dir.path(), "5777");
    let config = write_config(dir.path(), &server.url("/"), &artifact);
    config.validate().unwrap();

    let web3 = connect(&config).unwrap();
    let mut app = App::new(contract_source(&config).unwrap());
    assert!(app.init(web3).await.is_some());
    app
}

#[tokio::test]
async fn test_init_resolves_deployment_from_artifact() {
    let server = MockServer::start();
    mock_net_version(&server, "5777");
    let dir = TempDir::new().unwrap();

    let app = app_for(&server, &dir).await;

    assert_eq!(app.network_id.as_deref(), Some("5777"));
    let address = app.contract.as_ref().unwrap().address();
    assert_eq!(format!("{:?}", address), CONTRACT);
}

#[tokio::test]
async fn test_init_fails_quietly_on_unknown_network() {
    let server = MockServer::start();
    mock_net_version(&server, "1");
    let dir = TempDir::new().unwrap();

    let artifact = write_artifact(dir.path(), "5777");
    let config = write_config(dir.path(), &server.url("/"), &artifact);
    let web3 = connect(&config).unwrap();
    let mut app = App::new(contract_source(&config).unwrap());

    assert!(app.init(web3).await.is_none());
    assert!(app.contract.is_none());
    assert!(app.web3.is_some());
    // 網路 ID 在查找部署之前就已記錄
    assert_eq!(app.network_id.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_read_owner_over_http() {
    let server = MockServer::start();
    mock_net_version(&server, "5777");
    let call_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body_partial(r#"{"method": "eth_call"}"#);
        then.status(200).json_body(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "result": format!("0x{}{}", "0".repeat(24), OWNER.trim_start_matches("0x"))
        }));
    });
    let dir = TempDir::new().unwrap();

    let mut app = app_for(&server, &dir).await;
    let owner = app.read_owner_address().await.unwrap();

    assert_eq!(format!("{:?}", owner), OWNER);
    assert_eq!(app.contract_owner, Some(owner));
    call_mock.assert();
}

#[tokio::test]
async fn test_review_project_waits_for_receipt() {
    let server = MockServer::start();
    mock_net_version(&server, "5777");
    let tx_hash = format!("0x{}", "aa".repeat(32));
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body_partial(r#"{"method": "eth_sendTransaction"}"#);
        then.status(200)
            .json_body(json!({"jsonrpc": "2.0", "id": 2, "result": tx_hash}));
    });
    let receipt_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body_partial(r#"{"method": "eth_getTransactionReceipt"}"#);
        then.status(200).json_body(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "result": {
                "transactionHash": tx_hash,
                "blockNumber": "0x5",
                "from": OWNER,
                "to": CONTRACT,
                "status": "0x1",
                "logs": []
            }
        }));
    });
    let dir = TempDir::new().unwrap();

    let app = app_for(&server, &dir).await;
    let outcome = app
        .review_project(ProjectHash::repeat_byte(0x01), ProjectStatus::Rejected)
        .await;

    let outcome = outcome.unwrap();
    assert_eq!(format!("{:?}", outcome.tx), tx_hash);
    assert!(outcome.receipt.succeeded());
    send_mock.assert();
    receipt_mock.assert();
}

#[tokio::test]
async fn test_node_error_is_swallowed() {
    let server = MockServer::start();
    mock_net_version(&server, "5777");
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body_partial(r#"{"method": "eth_sendTransaction"}"#);
        then.status(200).json_body(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32000, "message": "sender account not recognized"}
        }));
    });
    let dir = TempDir::new().unwrap();

    let app = app_for(&server, &dir).await;

    assert!(app.withdraw().await.is_none());
    send_mock.assert();
}

#[tokio::test]
async fn test_unreachable_node_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let artifact = write_artifact(dir.path(), "5777");
    // 沒有服務監聽的埠
    let config = write_config(dir.path(), "http://127.0.0.1:9", &artifact);
    let web3 = connect(&config).unwrap();
    let mut app = App::new(contract_source(&config).unwrap());

    assert!(app.init(web3).await.is_none());
    assert!(app.network_id.is_none());
}
