mod common;

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use cinescope::{
    client::{Aggregator, ClientError, ErrorKind, HttpTransport, Listing, ProxyRoute, ProxyTransport},
    MediaType,
};
use common::{listing, FakeTransport};

#[tokio::test]
async fn test_http_transport_returns_payload() {
    let mut proxy = mockito::Server::new_async().await;
    let mock = proxy
        .mock("GET", "/api/v1/tv/search")
        .match_query(Matcher::UrlEncoded("query".into(), "the office".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"page":1,"results":[{"id":2316,"name":"The Office"}]}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(format!("{}/", proxy.url()));
    let body = transport
        .get_json(&ProxyRoute::listing(MediaType::Tv, " the office "))
        .await
        .unwrap();

    assert_eq!(body["results"][0]["name"], "The Office");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_transport_reads_proxy_error_body() {
    let mut proxy = mockito::Server::new_async().await;
    proxy
        .mock("GET", "/api/v1/movie/1")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Failed to fetch data from the metadata API."}"#)
        .create_async()
        .await;
    proxy
        .mock("GET", "/api/v1/movie/1/credits")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let transport = HttpTransport::new(proxy.url());

    let error = transport
        .get_json(&ProxyRoute::Details {
            media_type: MediaType::Movie,
            id: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Error 404: Failed to fetch data from the metadata API."
    );

    let error = transport
        .get_json(&ProxyRoute::Credits {
            media_type: MediaType::Movie,
            id: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(
        error,
        ClientError::Upstream {
            status: 502,
            message: "Request failed.".to_string()
        }
    );
}

#[tokio::test]
async fn test_http_transport_network_failure() {
    let transport = HttpTransport::new("http://127.0.0.1:9");
    let error = transport
        .get_json(&ProxyRoute::Popular {
            media_type: MediaType::Movie,
        })
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_listing_popular_and_search_routes() {
    let transport = FakeTransport::new()
        .respond("/api/v1/movie/popular", listing(&[(550, "Fight Club")]))
        .respond("/api/v1/movie/search", listing(&[(268, "Batman")]));
    let aggregator = Aggregator::new(transport);

    match aggregator.load_listing(MediaType::Movie, "").await.unwrap() {
        Listing::Results(items) => assert_eq!(items[0].display_title(), "Fight Club"),
        Listing::NoResults => panic!("expected results"),
    }
    match aggregator.load_listing(MediaType::Movie, "batman").await.unwrap() {
        Listing::Results(items) => assert_eq!(items[0].id, 268),
        Listing::NoResults => panic!("expected results"),
    }

    assert_eq!(
        aggregator.transport().calls(),
        vec![
            ProxyRoute::Popular {
                media_type: MediaType::Movie
            },
            ProxyRoute::Search {
                media_type: MediaType::Movie,
                query: "batman".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_listing_without_results_is_not_an_error() {
    let transport = FakeTransport::new().respond("/api/v1/tv/search", listing(&[]));
    let aggregator = Aggregator::new(transport);

    let listing = aggregator.load_listing(MediaType::Tv, "zzzzzz").await.unwrap();
    assert_eq!(listing, Listing::NoResults);
}

#[tokio::test]
async fn test_listing_with_malformed_payload() {
    let transport =
        FakeTransport::new().respond("/api/v1/movie/popular", json!({ "results": "nope" }));
    let aggregator = Aggregator::new(transport);

    let error = aggregator.load_listing(MediaType::Movie, "").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_details_issues_all_four_calls_concurrently() {
    // The barrier only opens once all four calls are in flight together
    let transport = FakeTransport::new()
        .rendezvous(4)
        .respond(
            "/api/v1/movie/550",
            json!({ "id": 550, "title": "Fight Club", "runtime": 139, "budget": 63000000 }),
        )
        .respond(
            "/api/v1/movie/550/credits",
            json!({ "cast": [{ "name": "Edward Norton", "character": "The Narrator" }] }),
        )
        .respond(
            "/api/v1/movie/550/recommendations",
            listing(&[(680, "Pulp Fiction")]),
        )
        .respond(
            "/api/v1/movie/550/watch/providers",
            json!({ "results": { "BR": { "flatrate": [{ "provider_name": "Netflix" }] } } }),
        );
    let aggregator = Aggregator::new(transport).with_timeout(Duration::from_secs(2));

    let bundle = assert_ok!(aggregator.load_details(MediaType::Movie, 550).await);

    assert_eq!(bundle.media_type, MediaType::Movie);
    assert_eq!(bundle.item.display_title(), "Fight Club");
    assert_eq!(bundle.cast[0].name, "Edward Norton");
    assert_eq!(bundle.recommendations[0].id, 680);
    assert_eq!(bundle.providers.flatrate("BR").unwrap()[0].provider_name, "Netflix");
    assert_eq!(aggregator.transport().calls().len(), 4);
}

#[tokio::test]
async fn test_details_fail_when_any_call_fails() {
    let transport = FakeTransport::new()
        .with_detail_set("/api/v1/tv/1399", json!({ "id": 1399, "name": "Game of Thrones" }))
        .fail(
            "/api/v1/tv/1399/credits",
            ClientError::Upstream {
                status: 500,
                message: "Internal server error.".to_string(),
            },
        );
    let aggregator = Aggregator::new(transport);

    let error = assert_err!(aggregator.load_details(MediaType::Tv, 1399).await);

    assert_eq!(error.kind(), ErrorKind::Upstream);
    assert_eq!(error.to_string(), "Error 500: Internal server error.");
    // The other calls still ran to completion
    assert_eq!(aggregator.transport().calls().len(), 4);
}

#[tokio::test]
async fn test_details_without_target_region_succeed() {
    let transport = FakeTransport::new()
        .with_detail_set("/api/v1/movie/13", json!({ "id": 13, "title": "Forrest Gump" }))
        .respond(
            "/api/v1/movie/13/watch/providers",
            json!({ "results": { "US": { "flatrate": [{ "provider_name": "Paramount+" }] } } }),
        );
    let aggregator = Aggregator::new(transport);

    let bundle = assert_ok!(aggregator.load_details(MediaType::Movie, 13).await);
    assert!(bundle.providers.flatrate("BR").is_none());
    assert!(bundle.cast.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_call_times_out() {
    let transport = FakeTransport::new()
        .respond("/api/v1/movie/popular", listing(&[(550, "Fight Club")]))
        .delay("/api/v1/movie/popular", Duration::from_secs(30));
    let aggregator = Aggregator::new(transport);

    let started = tokio::time::Instant::now();
    let error = aggregator.load_listing(MediaType::Movie, "").await.unwrap_err();

    assert_eq!(error, ClientError::Timeout);
    assert_eq!(error.to_string(), "The request timed out.");
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_one_slow_detail_call_fails_the_view() {
    let transport = FakeTransport::new()
        .with_detail_set("/api/v1/movie/550", json!({ "id": 550, "title": "Fight Club" }))
        .delay("/api/v1/movie/550/watch/providers", Duration::from_secs(60));
    let aggregator = Aggregator::new(transport);

    let error = aggregator.load_details(MediaType::Movie, 550).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Timeout);
}
