use httpmock::prelude::*;
use profile_feed::config::Settings;
use profile_feed::domain::model::{Envelope, PlatformEntry};
use profile_feed::{InboundRequest, RequestRouter, StaticIdentity};
use std::sync::Arc;

const ORCID_ID: &str = "0000-0002-1825-0097";
const MEDIUM_ID: &str = "someone";

fn activities() -> serde_json::Value {
    serde_json::json!({
        "educations": {
            "affiliation-group": [
                {"summaries": [{"education-summary": {
                    "start-date": {"year": {"value": "2016"}},
                    "end-date": {"year": {"value": "2020"}},
                    "role-title": "PhD Candidate",
                    "department-name": "Informatics",
                    "organization": {"name": "First University"}
                }}]},
                {"summaries": [{"education-summary": {
                    "start-date": {"year": {"value": "2012"}},
                    "end-date": null,
                    "role-title": "BSc",
                    "department-name": "Mathematics",
                    "organization": {"name": "Second University"}
                }}]}
            ]
        },
        "works": {
            "group": [
                {"work-summary": [{
                    "title": {"title": {"value": "A Study"}},
                    "journal-title": {"value": "Journal"},
                    "publication-date": {"year": {"value": "2019"}},
                    "url": {"value": "https://pub/doi/10?a=1"}
                }]}
            ]
        }
    })
}

fn feed(count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| {
            format!(
                r#"<item>
  <title><![CDATA[Post {i}]]></title>
  <link>https://medium.com/@u/post-{i}?source=rss</link>
  <pubDate>Mon, 0{d} Jan 2024 10:00:00 GMT</pubDate>
  <content:encoded><![CDATA[<figure><img alt="cover" src="https://cdn/{i}.png"></figure><p>body</p>]]></content:encoded>
</item>"#,
                i = i,
                d = (i % 9) + 1
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:content="http://purl.org/rss/1.0/modules/content/" version="2.0"><channel>
<title>Stories</title>
{}
</channel></rss>"#,
        items
    )
}

fn router_for(server: &MockServer, identity: StaticIdentity) -> RequestRouter {
    let mut settings = Settings::default();
    settings.upstream.orcid_base_url = server.base_url();
    settings.upstream.medium_base_url = server.base_url();
    settings.upstream.timeout_seconds = 5;
    settings.platforms = vec![
        PlatformEntry {
            name: "GitHub".to_string(),
            url: "https://github.com/someone".to_string(),
        },
        PlatformEntry {
            name: "LinkedIn".to_string(),
            url: "https://www.linkedin.com/in/someone".to_string(),
        },
    ];

    RequestRouter::from_settings(settings, Arc::new(identity)).unwrap()
}

fn get() -> InboundRequest {
    InboundRequest::new(http::Method::GET, "https://profile.example/")
}

#[tokio::test]
async fn test_end_to_end_aggregation() {
    let server = MockServer::start();
    let orcid_mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v3.0/{}/activities", ORCID_ID))
            .header("accept", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(activities());
    });
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/feed/@{}", MEDIUM_ID));
        then.status(200)
            .header("Content-Type", "text/xml")
            .body(feed(3));
    });

    let router = router_for(&server, StaticIdentity::new(Some(ORCID_ID), Some(MEDIUM_ID)));
    let response = router.handle(&get()).await;

    orcid_mock.assert();
    feed_mock.assert();
    assert_eq!(response.status, http::StatusCode::OK);

    let envelope: Envelope = serde_json::from_slice(&response.body).unwrap();
    let data = envelope.data.unwrap();

    assert_eq!(data.education.len(), 2);
    assert_eq!(data.education[0].university, "First University");
    assert_eq!(data.education[1].end_year, "");
    assert_eq!(data.publication.len(), 1);
    assert_eq!(data.platform.len(), 2);
    assert_eq!(data.platform[1].name, "LinkedIn");
    assert_eq!(data.medium.url, "https://medium.com/@someone");
    assert_eq!(data.medium.posts.len(), 3);
    assert_eq!(data.medium.posts[0].title, "Post 1");
    assert_eq!(data.medium.posts[0].image.as_deref(), Some("https://cdn/1.png"));
}

#[tokio::test]
async fn test_publication_url_verbatim_but_medium_link_stripped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/v3.0/{}/activities", ORCID_ID));
        then.status(200).json_body(activities());
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/feed/@{}", MEDIUM_ID));
        then.status(200).body(
            r#"<rss version="2.0"><channel><item>
<title>Only</title><link>https://medium.com/@u/post?source=x</link>
</item></channel></rss>"#,
        );
    });

    let router = router_for(&server, StaticIdentity::new(Some(ORCID_ID), Some(MEDIUM_ID)));
    let response = router.handle(&get()).await;
    let data = serde_json::from_slice::<Envelope>(&response.body)
        .unwrap()
        .data
        .unwrap();

    assert_eq!(data.publication[0].url.as_deref(), Some("https://pub/doi/10?a=1"));
    assert_eq!(data.medium.posts[0].url, "https://medium.com/@u/post");
    assert_eq!(data.medium.posts[0].image, None);
}

#[tokio::test]
async fn test_orcid_outage_keeps_request_successful() {
    let server = MockServer::start();
    let orcid_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v3.0/{}/activities", ORCID_ID));
        then.status(503).body("Service Unavailable");
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/feed/@{}", MEDIUM_ID));
        then.status(200).body(feed(2));
    });

    let router = router_for(&server, StaticIdentity::new(Some(ORCID_ID), Some(MEDIUM_ID)));
    let response = router.handle(&get()).await;

    orcid_mock.assert();
    assert_eq!(response.status, http::StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(json["data"]["education"], serde_json::json!([]));
    assert_eq!(json["data"]["publication"], serde_json::json!([]));
    assert_eq!(json["data"]["platform"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["medium"]["posts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_feed_outage_keeps_orcid_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/v3.0/{}/activities", ORCID_ID));
        then.status(200).json_body(activities());
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/feed/@{}", MEDIUM_ID));
        then.status(404).body("Not found");
    });

    let router = router_for(&server, StaticIdentity::new(Some(ORCID_ID), Some(MEDIUM_ID)));
    let response = router.handle(&get()).await;

    assert_eq!(response.status, http::StatusCode::OK);
    let data = serde_json::from_slice::<Envelope>(&response.body)
        .unwrap()
        .data
        .unwrap();
    assert!(data.medium.posts.is_empty());
    assert_eq!(data.medium.url, "https://medium.com/@someone");
    assert_eq!(data.education.len(), 2);
}

#[tokio::test]
async fn test_posts_never_exceed_twelve() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/v3.0/{}/activities", ORCID_ID));
        then.status(200).json_body(activities());
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/feed/@{}", MEDIUM_ID));
        then.status(200).body(feed(15));
    });

    let router = router_for(&server, StaticIdentity::new(Some(ORCID_ID), Some(MEDIUM_ID)));
    let response = router.handle(&get()).await;
    let data = serde_json::from_slice::<Envelope>(&response.body)
        .unwrap()
        .data
        .unwrap();

    assert_eq!(data.medium.posts.len(), 12);
    assert_eq!(data.medium.posts[11].title, "Post 12");
}

#[tokio::test]
async fn test_missing_configuration_calls_nothing() {
    let server = MockServer::start();
    let orcid_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/activities");
        then.status(200).json_body(activities());
    });
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/feed/");
        then.status(200).body(feed(1));
    });

    let router = router_for(&server, StaticIdentity::new(None, None));
    let response = router.handle(&get()).await;

    assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header("content-type"), Some("application/json"));
    orcid_mock.assert_hits(0);
    feed_mock.assert_hits(0);

    let envelope: Envelope = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(envelope.application, "profile-feed");
    assert!(envelope.message.starts_with("Missing environment variable(s)"));
    assert!(envelope.data.is_none());
}
