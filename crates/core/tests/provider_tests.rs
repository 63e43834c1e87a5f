// ═══════════════════════════════════════════════════════════════════
// Provider Tests: HttpPriceSource wire format against a local server
// ═══════════════════════════════════════════════════════════════════

use std::collections::BTreeSet;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use price_history_core::errors::CoreError;
use price_history_core::models::price::PriceInterval;
use price_history_core::models::query::{DateRange, Selection};
use price_history_core::providers::http::HttpPriceSource;
use price_history_core::providers::traits::PriceSource;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: one-shot HTTP server
// ═══════════════════════════════════════════════════════════════════

/// Serve a single request with `status` and JSON `body`.
/// Resolves to (request line, request body).
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let request_line = head.lines().next().unwrap_or_default().to_string();
        let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();
        (request_line, request_body)
    });

    (format!("http://{addr}"), handle)
}

fn stores(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// Prices
// ═══════════════════════════════════════════════════════════════════

mod prices {
    use super::*;

    #[tokio::test]
    async fn parses_stores_and_sale_prices() {
        let body = serde_json::json!({
            "stores": [{
                "id": "v1",
                "skus": [{
                    "sku": "SKU1",
                    "prices": [{"start": 10, "end": 20, "price": 100}],
                    "salePrices": [{"start": 12, "end": 13, "price": 80}]
                }, {
                    "sku": "SKU2",
                    "prices": []
                }]
            }]
        })
        .to_string();
        let (base, server) = serve_once("200 OK", body).await;

        let source = HttpPriceSource::new(base);
        let resp = source
            .get_prices(&Selection::new(["SKU1", "SKU2"], ["v1"]))
            .await
            .unwrap();

        assert_eq!(resp.vendors.len(), 1);
        let v = &resp.vendors[0];
        assert_eq!(v.vendor_id, "v1");
        assert_eq!(v.products[0].product_code, "SKU1");
        assert_eq!(v.products[0].regular, vec![PriceInterval::new(10, 20, 100)]);
        assert_eq!(v.products[0].sale, Some(vec![PriceInterval::new(12, 13, 80)]));
        assert_eq!(v.products[1].sale, None);

        let (line, request) = server.await.unwrap();
        assert!(line.starts_with("POST /api/prices"));
        let request: serde_json::Value = serde_json::from_str(&request).unwrap();
        assert_eq!(request, serde_json::json!({"skus": ["SKU1", "SKU2"], "stores": ["v1"]}));
    }

    #[tokio::test]
    async fn sends_date_range_bounds() {
        let (base, server) = serve_once("200 OK", "{}".into()).await;
        let source = HttpPriceSource::new(format!("{base}/"));
        let selection = Selection::new(["SKU1"], ["v1"]).with_date_range(DateRange::new(None, Some(99)));

        let resp = source.get_prices(&selection).await.unwrap();
        assert!(resp.vendors.is_empty());

        let (_, request) = server.await.unwrap();
        let request: serde_json::Value = serde_json::from_str(&request).unwrap();
        assert_eq!(request["end"], 99);
        assert!(request.get("start").is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}".into()).await;
        let err = HttpPriceSource::new(base)
            .get_prices(&Selection::new(["SKU1"], ["v1"]))
            .await
            .unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "PriceApi");
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_api_error() {
        let (base, _server) = serve_once("200 OK", "not json".into()).await;
        let err = HttpPriceSource::new(base)
            .get_prices(&Selection::new(["SKU1"], ["v1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpPriceSource::new(format!("http://{addr}"))
            .get_prices(&Selection::new(["SKU1"], ["v1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Autocomplete
// ═══════════════════════════════════════════════════════════════════

mod autocomplete {
    use super::*;

    #[tokio::test]
    async fn returns_terms_capped_at_twenty() {
        let terms: Vec<String> = (0..25).map(|i| format!("SKU{i}")).collect();
        let body = serde_json::json!({ "terms": terms }).to_string();
        let (base, server) = serve_once("200 OK", body).await;

        let out = HttpPriceSource::new(base)
            .get_suggestions("SKU", &stores(&["v1", "v2"]))
            .await
            .unwrap();
        assert_eq!(out.len(), 20);
        assert_eq!(out[0], "SKU0");

        let (line, request) = server.await.unwrap();
        assert!(line.starts_with("POST /api/autocomplete"));
        let request: serde_json::Value = serde_json::from_str(&request).unwrap();
        assert_eq!(request, serde_json::json!({"term": "SKU", "stores": ["v1", "v2"]}));
    }

    #[tokio::test]
    async fn empty_prefix_sends_no_request() {
        // Nothing listens here; a request would fail.
        let source = HttpPriceSource::new("http://127.0.0.1:9");
        let out = source.get_suggestions("", &stores(&["v1"])).await.unwrap();
        assert!(out.is_empty());
    }
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let source = HttpPriceSource::new("https://prices.example/");
    assert_eq!(source.base_url(), "https://prices.example");
    assert_eq!(source.name(), "PriceApi");
}
