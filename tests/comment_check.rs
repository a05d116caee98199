use std::{sync::Arc, time::Duration};

use akismet_spam_filter::{
    admin::AdminNotifier,
    akismet::{AkismetClient, HttpTransport},
    config::AkismetConfig,
    domain::{AdminEntry, ADMIN_RIGHTS},
    options::{MemoryOptionStore, AKISMET_KEY_OPTION},
    testing::{RecordingDiagnostics, RecordingMailer, StaticDirectory},
    CommentSubmission, ContentObject, FilterError, SpamFilter, Verdict,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_HOST: &str = "rest.akismet.test";
const API_KEY: &str = "abc123";

struct Fixture {
    filter: SpamFilter,
    mailer: Arc<RecordingMailer>,
    diagnostics: Arc<RecordingDiagnostics>,
}

fn akismet_config() -> AkismetConfig {
    AkismetConfig {
        service_host: SERVICE_HOST.to_string(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_millis(500),
    }
}

fn fixture(server: &MockServer, key: &str) -> Fixture {
    let http = HttpTransport::client_builder(&akismet_config())
        .resolve(&format!("{API_KEY}.{SERVICE_HOST}"), *server.address())
        .resolve(SERVICE_HOST, *server.address())
        .build()
        .unwrap();
    let client = AkismetClient::new(Arc::new(HttpTransport::new(http)), SERVICE_HOST);

    let store = Arc::new(MemoryOptionStore::new());
    store.set_option(AKISMET_KEY_OPTION, key);

    let mailer = Arc::new(RecordingMailer::new());
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let directory = StaticDirectory::new(vec![
        AdminEntry {
            user: "root".into(),
            name: Some("Site Owner".into()),
            email: Some("owner@example.com".into()),
            rights: ADMIN_RIGHTS,
            group: false,
        },
        AdminEntry {
            user: "moderators".into(),
            name: None,
            email: None,
            rights: ADMIN_RIGHTS,
            group: true,
        },
        AdminEntry {
            user: "guest".into(),
            name: Some("Guest".into()),
            email: Some("guest@example.com".into()),
            rights: 0,
            group: false,
        },
    ]);
    let notifier = Arc::new(AdminNotifier::new(
        Arc::new(directory),
        mailer.clone(),
        diagnostics.clone(),
        "Gallery",
    ));

    let filter = SpamFilter::new(
        client,
        store,
        "http://gallery.example.com/",
        notifier,
        diagnostics.clone(),
    );
    Fixture {
        filter,
        mailer,
        diagnostics,
    }
}

fn comment() -> CommentSubmission {
    CommentSubmission::new(
        "viagra-test-123",
        "spammer@example.com",
        "http://spam.example.com",
        "Buy now & save",
        "203.0.113.9",
    )
    .with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
    .with_referrer("http://gallery.example.com/sunsets/")
}

fn image() -> ContentObject {
    ContentObject::Image {
        link: "/sunsets/beach.jpg".into(),
    }
}

#[tokio::test]
async fn posts_form_to_key_subdomain() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/comment-check"))
        .and(header("host", "abc123.rest.akismet.test"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("comment_type=comment"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    let verdict = fx.filter.classify(&comment(), &image()).await.unwrap();
    assert_eq!(verdict, Verdict::Spam);
    assert_eq!(fx.mailer.attempts(), 0);

    let requests = server.received_requests().await.unwrap();
    let fields: Vec<(String, String)> = url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect();
    let get = |name: &str| {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("blog"), Some("http://gallery.example.com"));
    assert_eq!(get("user_ip"), Some("203.0.113.9"));
    assert_eq!(get("user_agent"), Some("Mozilla/5.0 (X11; Linux x86_64)"));
    assert_eq!(get("referrer"), Some("http://gallery.example.com/sunsets/"));
    assert_eq!(
        get("permalink"),
        Some("http://gallery.example.com/sunsets/beach.jpg")
    );
    assert_eq!(get("comment_author"), Some("viagra-test-123"));
    assert_eq!(get("comment_author_email"), Some("spammer@example.com"));
    assert_eq!(get("comment_author_url"), Some("http://spam.example.com"));
    assert_eq!(get("comment_content"), Some("Buy now & save"));
}

#[tokio::test]
async fn false_is_not_spam() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/comment-check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    let verdict = fx.filter.classify(&comment(), &image()).await.unwrap();
    assert_eq!(verdict, Verdict::NotSpam);
    assert_eq!(fx.mailer.attempts(), 0);
    assert!(fx.diagnostics.fatals().is_empty());
}

#[tokio::test]
async fn server_error_mails_admins_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/comment-check"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Akismet is down for maintenance"))
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    let verdict = fx.filter.classify(&comment(), &image()).await.unwrap();
    assert_eq!(verdict, Verdict::PossibleSpam);

    let sent = fx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.contains("Akismet is down for maintenance"));
    let emails: Vec<_> = sent[0].recipients.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, vec!["owner@example.com"]);
    assert!(fx.diagnostics.fatals().is_empty());
}

#[tokio::test]
async fn unexpected_body_raises_fatal_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/comment-check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maybe"))
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    let verdict = fx.filter.classify(&comment(), &image()).await.unwrap();
    assert_eq!(verdict, Verdict::PossibleSpam);
    assert_eq!(fx.mailer.attempts(), 1);
    assert_eq!(fx.diagnostics.fatals().len(), 1);
}

#[tokio::test]
async fn slow_service_times_out_to_possible_spam() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/comment-check"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("false")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    let verdict = fx.filter.classify(&comment(), &image()).await.unwrap();
    assert_eq!(verdict, Verdict::PossibleSpam);
    assert_eq!(fx.mailer.attempts(), 1);
    assert!(fx.mailer.sent()[0].body.contains("timed out"));
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .expect(0)
        .mount(&server)
        .await;

    let fx = fixture(&server, "");
    let err = fx.filter.classify(&comment(), &image()).await.unwrap_err();
    assert!(matches!(err, FilterError::MissingApiKey));
    assert_eq!(fx.mailer.attempts(), 0);
}

#[tokio::test]
async fn verify_key_uses_bare_service_host() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/verify-key"))
        .and(header("host", "rest.akismet.test"))
        .and(body_string_contains("key=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("valid"))
        .expect(1)
        .mount(&server)
        .await;

    let fx = fixture(&server, API_KEY);
    assert!(fx.filter.verify_key().await.unwrap());
}
