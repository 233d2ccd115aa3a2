use bgw::cli::{commands, Cli};
use bgw::core::config::{BgwConfig, DEFAULT_API_KEY, DEFAULT_PARTNER_CODE};
use bgw::core::errors::BgwError;
use bgw::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
use bgw::core::types::ApiResult;
use bgw::exchanges::bgw::{BgwBuilder, BgwRestClient, BgwSigner};
use clap::Parser;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{any, body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN_PATH: &str = "/bgw-pro/market/v3/coin/batchGetBaseInfo";
const TOP_PATH: &str = "/bgw-pro/market/v3/topRank/detail";
const SWAP_PATH: &str = "/bgw-pro/swapx/pro/quote";
const POOL_PATH: &str = "/bgw-pro/market/v3/poolList";

fn client_for(server: &MockServer) -> BgwRestClient<ReqwestRest> {
    BgwBuilder::new()
        .with_base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

async fn run_cli(server: &MockServer, args: &[&str]) -> (Result<(), BgwError>, String) {
    let cli = Cli::try_parse_from(std::iter::once("bgw").chain(args.iter().copied())).unwrap();
    let client = client_for(server);
    let mut out = Vec::new();
    let result = commands::run(&cli, &client, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_price_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(header("content-type", "application/json"))
            .and(header("x-api-key", DEFAULT_API_KEY))
            .and(header_exists("x-api-timestamp"))
            .and(header_exists("x-api-signature"))
            .and(body_json(json!({"list": [{"chain": "eth", "contract": "0xabc"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"list": [{"symbol": "X", "price": "1234.5", "change_24h": "2.1"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["price", "eth", "0xabc"]).await;
        result.unwrap();
        assert!(out.contains('X'));
        assert!(out.contains("$1,234.50"));
        assert!(out.contains("🟢"));
        assert!(out.contains("+2.10%"));
    }

    #[tokio::test]
    async fn test_top_gainers_limit() {
        let server = MockServer::start().await;
        let items: Vec<Value> = (1..=5)
            .map(|i| json!({"symbol": format!("TOK{}", i), "price": "1", "change_24h": "5", "turnover_24h": "1000"}))
            .collect();
        Mock::given(method("POST"))
            .and(path(TOP_PATH))
            .and(body_json(json!({"name": "topGainers"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"list": items}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["top", "gainers", "-n", "3"]).await;
        result.unwrap();

        let rows: Vec<&str> = out
            .lines()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            let mut columns = row.split_whitespace();
            assert_eq!(columns.next(), Some((i + 1).to_string().as_str()));
            assert_eq!(columns.next(), Some(format!("TOK{}", i + 1).as_str()));
        }
    }

    #[tokio::test]
    async fn test_http_500_becomes_failure_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(POOL_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .mount(&server)
            .await;

        let config = BgwConfig::default();
        let rest = RestClientBuilder::new(RestClientConfig::new(server.uri()))
            .with_signer(Arc::new(BgwSigner::from_config(&config)))
            .build()
            .unwrap();

        let body = json!({"chain": "eth", "contract": "0xabc"});
        let result = rest.post(POOL_PATH, Some(&body)).await.unwrap();
        match result {
            ApiResult::Failure(failure) => {
                assert_eq!(failure.error, "HTTP 500");
                assert_eq!(failure.message, "server error");
            }
            ApiResult::Success(other) => panic!("expected failure, got {}", other),
        }

        // list commands report it and carry on
        let (result, out) = run_cli(&server, &["lp", "eth", "0xabc"]).await;
        result.unwrap();
        assert!(out.contains("HTTP 500"));
        assert!(out.contains("server error"));
    }

    #[tokio::test]
    async fn test_error_body_truncated() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(2000)))
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["--json", "tx", "eth", "0xabc"]).await;
        result.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["error"], json!("HTTP 502"));
        assert_eq!(parsed["message"].as_str().unwrap().len(), 500);
    }

    #[tokio::test]
    async fn test_signature_covers_transmitted_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"list": []}})))
            .mount(&server)
            .await;

        let (result, _) = run_cli(&server, &["audit", "bnb", "0xdef"]).await;
        result.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        let body = String::from_utf8(request.body.clone()).unwrap();
        assert_eq!(
            body,
            r#"{"list":[{"chain":"bnb","contract":"0xdef"}],"source":"bg"}"#
        );

        let timestamp = request.headers["x-api-timestamp"].to_str().unwrap();
        assert!(timestamp.parse::<u64>().is_ok());
        let expected = BgwSigner::from_config(&BgwConfig::default())
            .sign(request.url.path(), &body, timestamp)
            .unwrap();
        assert_eq!(request.headers["x-api-signature"].to_str().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_partner_code_sent_only_for_swap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SWAP_PATH))
            .and(header("Partner-Code", DEFAULT_PARTNER_CODE))
            .and(body_json(json!({
                "fromChain": "eth",
                "fromContract": "",
                "toChain": "eth",
                "toContract": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "fromAmount": "0.1",
                "estimateGas": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"toAmount": "301.2", "market": "bgwevmaggregator", "slippage": "0.5", "gasLimit": "180000"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(|req: &Request| !req.headers.contains_key("partner-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"list": [{"symbol": "ETH", "price": 3000}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (result, out) = run_cli(
            &server,
            &[
                "swap",
                "--from-chain",
                "eth",
                "--to-contract",
                "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "--amount",
                "0.1",
            ],
        )
        .await;
        result.unwrap();
        assert!(out.contains("301.2 (eth)"));
        assert!(out.contains("bgwevmaggregator"));

        let (result, out) = run_cli(&server, &["price", "eth"]).await;
        result.unwrap();
        assert!(out.starts_with("ETH  $3,000.00"));
    }

    #[tokio::test]
    async fn test_unknown_chain_rejected_before_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["price", "polygon", "0xabc"]).await;
        assert!(matches!(result, Err(BgwError::UnsupportedChain(_))));
        assert!(out.is_empty());

        let (result, _) = run_cli(
            &server,
            &["swap", "--from-chain", "eth", "--to-chain", "mars", "--to-contract", "0x1", "--amount", "1"],
        )
        .await;
        assert!(result.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_missing_token_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"list": []}})))
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["info", "sui", "0x2::sui::SUI"]).await;
        assert!(matches!(result, Err(BgwError::NotFound(ref msg)) if msg.contains("sui")));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_key_renders_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0})))
            .mount(&server)
            .await;

        let (result, out) = run_cli(&server, &["kline", "eth", "0xabc", "-p", "1d"]).await;
        result.unwrap();
        assert_eq!(out, "No kline data.\n");
    }

    #[tokio::test]
    async fn test_invalid_json_on_200_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let (result, _) = run_cli(&server, &["tx", "eth", "0xabc"]).await;
        assert!(matches!(result, Err(BgwError::DeserializationError(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = BgwBuilder::new()
            .with_base_url("http://127.0.0.1:1".to_string())
            .unwrap()
            .with_timeout(5)
            .build()
            .unwrap();
        let cli = Cli::try_parse_from(["bgw", "top"]).unwrap();
        let mut out = Vec::new();

        let result = commands::run(&cli, &client, &mut out).await;
        assert!(matches!(result, Err(BgwError::NetworkError(_))));
        assert!(out.is_empty());
    }
}
