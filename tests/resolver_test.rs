mod common;

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use unsplash_gallery::{
    config::Config, resolver::SearchResolver, SearchError, SearchOutcome, SearchRequest,
};

const API_PATH: &str = r"^/api/search/photos";
const PROXY_PATH: &str = r"^/napi/search/photos";

fn config(server: &ServerGuard, access_key: Option<&str>) -> Config {
    Config {
        access_key: access_key.map(str::to_string),
        api_base_url: format!("{}/api", server.url()),
        proxy_base_url: format!("{}/napi", server.url()),
        per_page: 12,
    }
}

fn resolver(server: &ServerGuard, access_key: Option<&str>) -> SearchResolver {
    SearchResolver::from_config(&config(server, access_key)).unwrap()
}

fn search_params(query: &str, page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("query".into(), query.into()),
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), "12".into()),
        Matcher::UrlEncoded("orientation".into(), "landscape".into()),
    ])
}

fn payload(ids: &[&str], total: u64) -> String {
    let results: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "likes": 7,
                "description": null,
                "alt_description": format!("photo {}", id),
                "urls": { "small": format!("https://images.example/{}?w=400", id), "regular": format!("https://images.example/{}?w=1080", id) },
                "links": { "html": format!("https://unsplash.com/photos/{}", id) },
                "user": { "name": "Ana Lee" }
            })
        })
        .collect();

    json!({ "total": total, "total_pages": 1, "results": results }).to_string()
}

async fn official_mock(server: &mut ServerGuard, status: usize, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", Matcher::Regex(API_PATH.into()))
        .match_query(search_params("mountains", 2))
        .match_header("authorization", "Client-ID test-key")
        .match_header("accept-version", "v1")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

async fn proxy_mock(server: &mut ServerGuard, status: usize, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", Matcher::Regex(PROXY_PATH.into()))
        .match_query(search_params("mountains", 2))
        .match_header("authorization", Matcher::Missing)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

fn request() -> SearchRequest {
    SearchRequest::new("mountains", 2, 12).unwrap()
}

#[tokio::test]
async fn official_success_skips_proxy() {
    let mut server = Server::new_async().await;
    let official = official_mock(&mut server, 200, &payload(&["a", "b"], 144), 1).await;
    let proxy = proxy_mock(&mut server, 200, &payload(&["p"], 1), 0).await;

    let page = resolver(&server, Some("test-key"))
        .resolve(&request())
        .await
        .unwrap();

    official.assert_async().await;
    proxy.assert_async().await;

    assert_eq!(page.total, 144);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].id, "a");
    assert_eq!(page.results[0].author_name, "Ana Lee");
    assert_eq!(page.results[0].like_count, 7);
    assert_eq!(page.results[0].thumbnail_url, "https://images.example/a?w=400");
    assert_eq!(page.results[0].permalink, "https://unsplash.com/photos/a");
}

#[tokio::test]
async fn no_key_uses_only_the_proxy() {
    let mut server = Server::new_async().await;
    let official = official_mock(&mut server, 200, &payload(&["a"], 1), 0).await;
    let proxy = proxy_mock(&mut server, 200, &payload(&["p1", "p2", "p3"], 36), 1).await;

    let page = resolver(&server, None).resolve(&request()).await.unwrap();

    official.assert_async().await;
    proxy.assert_async().await;
    assert_eq!(page.total, 36);
    assert_eq!(page.results.len(), 3);
}

#[tokio::test]
async fn unauthorized_key_falls_back_once() {
    for status in [401, 403] {
        let mut server = Server::new_async().await;
        let official = official_mock(
            &mut server,
            status,
            &json!({ "errors": ["OAuth error: The access token is invalid"] }).to_string(),
            1,
        )
        .await;
        let proxy = proxy_mock(&mut server, 200, &payload(&["p"], 5), 1).await;

        let page = resolver(&server, Some("test-key"))
            .resolve(&request())
            .await
            .unwrap();

        official.assert_async().await;
        proxy.assert_async().await;
        assert_eq!(page.results[0].id, "p");
        assert_eq!(page.total, 5);
    }
}

#[tokio::test]
async fn fallback_failure_is_reported_with_status() {
    let mut server = Server::new_async().await;
    let official = official_mock(&mut server, 401, "{}", 1).await;
    let proxy = proxy_mock(&mut server, 502, "<html>bad gateway</html>", 1).await;

    let err = resolver(&server, Some("test-key"))
        .resolve(&request())
        .await
        .unwrap_err();

    official.assert_async().await;
    proxy.assert_async().await;
    assert_eq!(
        err,
        SearchError::Provider {
            status: 502,
            message: "Unsplash fallback failed with status 502".into()
        }
    );
}

#[tokio::test]
async fn other_official_errors_are_terminal() {
    let mut server = Server::new_async().await;
    let official = official_mock(
        &mut server,
        429,
        &json!({ "errors": ["Rate Limit", "Exceeded"] }).to_string(),
        1,
    )
    .await;
    let proxy = proxy_mock(&mut server, 200, &payload(&["p"], 1), 0).await;

    let err = resolver(&server, Some("test-key"))
        .resolve(&request())
        .await
        .unwrap_err();

    official.assert_async().await;
    proxy.assert_async().await;
    assert_eq!(err.to_string(), "Rate Limit Exceeded");
}

#[tokio::test]
async fn official_error_without_messages_uses_status() {
    let mut server = Server::new_async().await;
    let official = official_mock(&mut server, 500, "not json", 1).await;
    let proxy = proxy_mock(&mut server, 200, &payload(&["p"], 1), 0).await;

    let err = resolver(&server, Some("test-key"))
        .resolve(&request())
        .await
        .unwrap_err();

    official.assert_async().await;
    proxy.assert_async().await;
    assert_eq!(err.to_string(), "Unsplash request failed with status 500");
}

#[tokio::test]
async fn malformed_success_payload_reads_as_empty() {
    let mut server = Server::new_async().await;
    let proxy = proxy_mock(
        &mut server,
        200,
        &json!({ "results": "nope", "total": "lots" }).to_string(),
        1,
    )
    .await;

    let page = resolver(&server, None).resolve(&request()).await.unwrap();

    proxy.assert_async().await;
    assert!(page.results.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    let config = Config {
        access_key: None,
        api_base_url: "http://127.0.0.1:1".into(),
        proxy_base_url: "http://127.0.0.1:1/napi".into(),
        per_page: 12,
    };

    let err = SearchResolver::from_config(&config)
        .unwrap()
        .resolve(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
    let outcome = SearchOutcome::from_result(Err(err)).unwrap();
    assert!(outcome.error().is_some());
}

#[tokio::test]
async fn cut_off_unauthorized_body_still_falls_back() {
    let api = common::spawn_raw_server(|_| Some(common::truncated_response("401 Unauthorized"))).await;
    let mut server = Server::new_async().await;
    let proxy = proxy_mock(&mut server, 200, &payload(&["p"], 3), 1).await;

    let config = Config {
        api_base_url: format!("http://{}/api", api),
        ..config(&server, Some("test-key"))
    };
    let page = SearchResolver::from_config(&config)
        .unwrap()
        .resolve(&request())
        .await
        .unwrap();

    proxy.assert_async().await;
    assert_eq!(page.results[0].id, "p");
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn cut_off_success_body_reads_as_empty() {
    let proxy = common::spawn_raw_server(|_| Some(common::truncated_response("200 OK"))).await;
    let config = Config {
        access_key: None,
        api_base_url: format!("http://{}/api", proxy),
        proxy_base_url: format!("http://{}/napi", proxy),
        per_page: 12,
    };

    let page = SearchResolver::from_config(&config)
        .unwrap()
        .resolve(&request())
        .await
        .unwrap();

    assert!(page.results.is_empty());
    assert_eq!(page.total, 0);
}
