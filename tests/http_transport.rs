use std::net::TcpListener;

use irys_checker::errors::LookupError;
use irys_checker::rpc::{HttpTransport, RpcClient, TransactionCountSource};
use mockito::{Matcher, Server};
use reqwest::Url;
use serde_json::json;

const ADDRESS: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";

fn localhost_binding_permitted() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &Server) -> RpcClient<HttpTransport> {
    let url = Url::parse(&server.url()).unwrap();
    RpcClient::new(HttpTransport::new(url))
}

#[tokio::test]
async fn sends_exact_envelope_and_parses_count() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "jsonrpc": "2.0",
            "method": "eth_getTransactionCount",
            "params": [ADDRESS, "latest"],
            "id": 1,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x3e8"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.transaction_count(ADDRESS).await, Ok(1000));

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(502)
        .with_body("upstream down")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.transaction_count(ADDRESS).await.unwrap_err();

    assert_eq!(
        err,
        LookupError::Http {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Network error: 502 Bad Gateway");
}

#[tokio::test]
async fn rpc_error_through_http() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument 0"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.lookup(ADDRESS).await;

    assert!(!result.is_success());
    assert_eq!(result.address(), ADDRESS);
    assert_eq!(
        client.transaction_count(ADDRESS).await.unwrap_err().to_string(),
        "invalid argument 0"
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    if !localhost_binding_permitted() {
        return;
    }
    // bind then drop to get a port nobody is listening on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
    let client = RpcClient::new(HttpTransport::new(url));

    let err = client.transaction_count(ADDRESS).await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
    assert!(!err.to_string().is_empty());
}
