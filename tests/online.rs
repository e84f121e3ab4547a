#![cfg(feature = "online")]
// Integration tests for the blocking HTTP client against a local mock server.
// Blocking calls run on tokio's blocking pool so they never stall the runtime.

use datutils::{
    misc::Expiry,
    online::{CacheConfig, FetchConfig, Fetcher, Payload, Stream},
    Error,
};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(Fetcher) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(Fetcher::new(FetchConfig::default()).unwrap()))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn json_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "BE1", "level": 1})))
        .mount(&server)
        .await;

    let url = format!("{}/nuts.json", server.uri());
    let value = blocking(move |f| f.read_json(&url)).await.unwrap();
    assert_eq!(value, json!({"id": "BE1", "level": 1}));
}

#[tokio::test(flavor = "multi_thread")]
async fn text_and_bytes_streams() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/readme.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let url = format!("{}/readme.txt", server.uri());
    let (text, bytes) = blocking(move |f| {
        (f.read(&url, Stream::Text), f.read(&url, Stream::Bytes))
    }).await;
    assert_eq!(text.unwrap(), Payload::Text("plain text".into()));
    assert_eq!(bytes.unwrap(), Payload::Bytes(b"plain text".to_vec()));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_carries_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.json", server.uri());
    let err = blocking(move |f| f.get(&url)).await.unwrap_err();
    match err {
        Error::Status { status, reason, .. } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_and_unreachable_are_distinct() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"truncated\": "))
        .mount(&server)
        .await;

    let url = format!("{}/broken.json", server.uri());
    let malformed = blocking(move |f| f.read_json(&url)).await.unwrap_err();
    assert!(malformed.is_malformed(), "{malformed}");
    assert!(!malformed.is_unreachable());

    let unreachable = blocking(|f| f.read_json("http://127.0.0.1:1/data.json")).await.unwrap_err();
    assert!(unreachable.is_unreachable(), "{unreachable}");
    assert!(!unreachable.is_malformed());
}

#[tokio::test(flavor = "multi_thread")]
async fn exists_uses_head_then_range_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD")).and(path("/present.zip"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server).await;
    Mock::given(method("HEAD")).and(path("/gone.zip"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server).await;
    Mock::given(method("HEAD")).and(path("/nohead.zip"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server).await;
    Mock::given(method("GET")).and(path("/nohead.zip")).and(header("range", "bytes=0-0"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(vec![0x50]))
        .mount(&server).await;

    let base = server.uri();
    let (present, gone, nohead) = blocking(move |f| (
        f.exists(&format!("{base}/present.zip")),
        f.exists(&format!("{base}/gone.zip")),
        f.exists(&format!("{base}/nohead.zip")),
    )).await;
    assert!(present.unwrap());
    assert!(!gone.unwrap());
    assert!(nohead.unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn download_is_atomic_and_respects_force() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/data.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
        .mount(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sub/data.csv");
    let url = format!("{}/data.csv", server.uri());

    let (first, second, forced) = {
        let out = out.clone();
        blocking(move |f| (
            f.download(&url, &out, false),
            f.download(&url, &out, false),
            f.download(&url, &out, true),
        )).await
    };
    first.unwrap();
    assert!(second.is_err());
    forced.unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a,b\n1,2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn cache_serves_repeated_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/cached.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&server).await;

    let store = tempfile::tempdir().unwrap();
    let store_path = store.path().to_path_buf();
    let url = format!("{}/cached.json", server.uri());

    let (a, b) = tokio::task::spawn_blocking(move || {
        let config = FetchConfig::default().with_cache(CacheConfig::new(store_path).expire(Expiry::Never));
        let fetcher = Fetcher::new(config).unwrap();
        (fetcher.read_json(&url), fetcher.read_json(&url))
    }).await.unwrap();

    assert_eq!(a.unwrap(), json!([1, 2, 3]));
    assert_eq!(b.unwrap(), json!([1, 2, 3]));
    assert_eq!(std::fs::read_dir(store.path()).unwrap().count(), 1);
}

async fn fetch_twice(url: String, cache: CacheConfig) -> (datutils::Result<Vec<u8>>, datutils::Result<Vec<u8>>) {
    tokio::task::spawn_blocking(move || {
        let fetcher = Fetcher::new(FetchConfig::default().with_cache(cache)).unwrap();
        (fetcher.get(&url), fetcher.get(&url))
    }).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_entries_are_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/always.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1]"))
        .expect(2)
        .mount(&server).await;
    Mock::given(method("GET")).and(path("/aged.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[2]"))
        .expect(2)
        .mount(&server).await;

    let store = tempfile::tempdir().unwrap();
    let (a, b) = fetch_twice(
        format!("{}/always.json", server.uri()),
        CacheConfig::new(store.path()).expire(Expiry::Always),
    ).await;
    assert_eq!(a.unwrap(), b"[1]");
    assert_eq!(b.unwrap(), b"[1]");

    let (a, b) = fetch_twice(
        format!("{}/aged.json", server.uri()),
        CacheConfig::new(store.path()).expire(Expiry::After(std::time::Duration::ZERO)),
    ).await;
    assert_eq!(a.unwrap(), b"[2]");
    assert_eq!(b.unwrap(), b"[2]");
}

#[tokio::test(flavor = "multi_thread")]
async fn force_bypasses_a_fresh_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/forced.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server).await;

    let store = tempfile::tempdir().unwrap();
    let (a, b) = fetch_twice(
        format!("{}/forced.json", server.uri()),
        CacheConfig::new(store.path()).expire(Expiry::Never).force(true),
    ).await;
    assert_eq!(a.unwrap(), b"{}");
    assert_eq!(b.unwrap(), b"{}");
    assert_eq!(std::fs::read_dir(store.path()).unwrap().count(), 1);
}
