use httpmock::MockServer;
use url::Url;

use blogview::application::store::{FeedLocation, HttpPostSource, LoadError, PostStore};

const FEED: &str = r#"[
    {"title": "Intro to Go", "category": "tech", "date": "2024-01-05", "excerpt": "", "url": "/a"},
    {"title": "My Day", "category": "diary", "date": "2024-02-01", "excerpt": "", "url": "/b"}
]"#;

fn feed_url(server: &MockServer, path: &str) -> Url {
    Url::parse(&server.url(path)).expect("mock url")
}

#[tokio::test]
async fn loads_feed_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/blog/posts.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(FEED);
    });

    let source = HttpPostSource::new(feed_url(&server, "/blog/posts.json"));
    let store = PostStore::load(&source).await.expect("feed loads");

    mock.assert();
    assert_eq!(store.len(), 2);
    assert_eq!(store.posts()[1].title, "My Day");
}

#[tokio::test]
async fn relative_location_is_fetched_from_base() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/blog/posts.json");
        then.status(200).body(FEED);
    });

    let base = feed_url(&server, "/blog/index.html");
    let location = FeedLocation::resolve("./posts.json", Some(&base)).expect("joined location");
    let store = PostStore::load(location.source().as_ref())
        .await
        .expect("feed loads");

    mock.assert();
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn error_status_is_a_fetch_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts.json");
        then.status(404);
    });

    let source = HttpPostSource::new(feed_url(&server, "/posts.json"));
    let err = PostStore::load(&source).await.expect_err("404 fails");
    assert!(matches!(err, LoadError::Fetch { .. }));
}

#[tokio::test]
async fn html_body_is_a_payload_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts.json");
        then.status(200).body("<html>maintenance</html>");
    });

    let source = HttpPostSource::new(feed_url(&server, "/posts.json"));
    let err = PostStore::load(&source).await.expect_err("not json");
    assert!(matches!(err, LoadError::Payload { .. }));
}
