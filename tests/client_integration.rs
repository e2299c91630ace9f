//! Integration tests for the client against a mocked Webshare API.
//!
//! Exercises the real HTTP transport: request shape, status handling,
//! memoization of salt/login, and error mapping.

use webshare_core::{
    AccountTier, ApiAction, ApiError, ApiTransport, CookiePolicy, DownloadErrorKind,
    DownloadOutcome, HostConfig, HttpTransport, WebshareClient,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const SALT: &str = "Ab3dE6gH";
const TOKEN: &str = "tok-123";
const FILE_PAGE: &str = "https://webshare.cz/#/file/AbC123xyz/some-name";
const DIRECT: &str = "https://vip.7.dl.webshare.cz/AbC123xyz";

fn xml(fields: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>{fields}</response>"
    ))
}

fn config_for(server: &MockServer) -> HostConfig {
    HostConfig {
        api_base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
        ..HostConfig::default()
    }
}

fn client_for(server: &MockServer, link: &str) -> WebshareClient {
    WebshareClient::new(link, "user", "secret", config_for(server)).unwrap()
}

async fn mount_login(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .and(body_string_contains("username_or_email=user"))
        .respond_with(xml(&format!("<status>OK</status><salt>{SALT}</salt>")))
        .expect(expected_calls)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(xml(&format!("<status>OK</status><token>{TOKEN}</token>")))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_transport_sends_form_post_with_json_accept() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username_or_email=jan%40example.com"))
        .respond_with(xml("<status>OK</status><salt>xyz</salt>"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let response = transport
        .request(ApiAction::Salt, &[("username_or_email", "jan@example.com")])
        .await
        .unwrap();
    assert_eq!(response.require("salt").unwrap(), "xyz");
}

#[tokio::test]
async fn test_transport_sends_configured_user_agent() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(header("user-agent", "synology"))
        .respond_with(xml("<status>OK</status>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = HostConfig {
        user_agent: "synology".to_string(),
        ..config_for(&server)
    };
    let transport = HttpTransport::new(&config).unwrap();
    assert!(transport.request(ApiAction::UserData, &[]).await.is_ok());
}

#[tokio::test]
async fn test_transport_reads_status_from_body_not_http_code() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<response><status>FATAL</status><message>File not found.</message></response>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user_data/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();

    let err = transport.request(ApiAction::FileLink, &[]).await.unwrap_err();
    assert!(
        matches!(err, ApiError::Status { ref status, .. } if status == "FATAL"),
        "got {err:?}"
    );

    let err = transport.request(ApiAction::UserData, &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_transport_timeout_is_transport_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(xml("<status>OK</status>").set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = HostConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let transport = HttpTransport::new(&config).unwrap();
    let err = transport.request(ApiAction::Salt, &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_login_sends_derived_credentials() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .respond_with(xml(&format!("<status>OK</status><salt>{SALT}</salt>")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_string_contains("password=a977137f043bb6633883b8460882dba3d4de2103"))
        .and(body_string_contains("digest=919c14a75060425805863bf3d47dc5b4"))
        .respond_with(xml(&format!("<status>OK</status><token>{TOKEN}</token>")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user_data/"))
        .and(body_string_contains(format!("wst={TOKEN}")))
        .respond_with(xml("<status>OK</status><vip>1</vip>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(client.verify().await, AccountTier::Premium);
}

#[tokio::test]
async fn test_verify_free_account() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/user_data/"))
        .respond_with(xml("<status>OK</status><vip>0</vip>"))
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(client.verify().await, AccountTier::Free);
}

#[tokio::test]
async fn test_verify_login_failed_when_salt_rejected() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .respond_with(xml("<status>FATAL</status><code>SALT_FATAL_1</code>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(xml(&format!("<status>OK</status><token>{TOKEN}</token>")))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(client.verify().await, AccountTier::LoginFailed);
    assert_eq!(client.verify().await, AccountTier::LoginFailed);
}

#[tokio::test]
async fn test_direct_link_makes_no_requests() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(xml("<status>OK</status>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, "https://vip.3.dl.webshare.cz/file123");
    assert_eq!(
        client.get_download_info().await,
        DownloadOutcome::Url("https://vip.3.dl.webshare.cz/file123".to_string())
    );
}

#[tokio::test]
async fn test_unsupported_link_makes_no_requests() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(xml("<status>OK</status>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, "not-a-url");
    assert_eq!(
        client.get_download_info().await,
        DownloadOutcome::Failed(DownloadErrorKind::UnsupportedLink)
    );
}

#[tokio::test]
async fn test_file_page_resolves_to_direct_link() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .and(body_string_contains(format!("wst={TOKEN}")))
        .and(body_string_contains("ident=AbC123xyz"))
        .respond_with(xml(&format!("<status>OK</status><link>{DIRECT}</link>")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, "https://webshare.cz/file/AbC123xyz/some-name");
    assert_eq!(
        client.get_download_info().await,
        DownloadOutcome::Url(DIRECT.to_string())
    );
}

#[tokio::test]
async fn test_file_link_failure_is_file_not_found() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .respond_with(xml("<status>FATAL</status><code>FILE_LINK_FATAL_1</code>"))
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(
        client.get_download_info().await,
        DownloadOutcome::Failed(DownloadErrorKind::FileNotFound)
    );
}

#[tokio::test]
async fn test_login_failure_skips_file_link() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .respond_with(xml(&format!("<status>OK</status><salt>{SALT}</salt>")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(xml(
            "<status>FATAL</status><message>Incorrect username or password</message>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .respond_with(xml(&format!("<status>OK</status><link>{DIRECT}</link>")))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(
        client.get_download_info().await,
        DownloadOutcome::Failed(DownloadErrorKind::LoginFailed)
    );
}

#[tokio::test]
async fn test_repeated_calls_reuse_salt_and_token() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/user_data/"))
        .respond_with(xml("<status>OK</status><vip>1</vip>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .respond_with(xml(&format!("<status>OK</status><link>{DIRECT}</link>")))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client_for(&server, FILE_PAGE);
    assert_eq!(client.verify().await, AccountTier::Premium);
    assert_eq!(client.get_download_info().await.url(), Some(DIRECT));
    assert_eq!(client.get_download_info().await.url(), Some(DIRECT));
}

#[tokio::test]
async fn test_separate_clients_do_not_share_session() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_login(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .respond_with(xml(&format!("<status>OK</status><link>{DIRECT}</link>")))
        .expect(2)
        .mount(&server)
        .await;

    for _ in 0..2 {
        let mut client = client_for(&server, FILE_PAGE);
        assert_eq!(client.get_download_info().await.url(), Some(DIRECT));
    }
}

#[tokio::test]
async fn test_isolated_cookie_jar_is_not_shared_between_clients() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .and(header("cookie", "session=first"))
        .respond_with(xml("<status>FATAL</status>"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .respond_with(
            xml(&format!("<status>OK</status><salt>{SALT}</salt>"))
                .insert_header("set-cookie", "session=first; Path=/"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = HostConfig {
        cookies: CookiePolicy::Isolated,
        ..config_for(&server)
    };
    for _ in 0..2 {
        let transport = HttpTransport::new(&config).unwrap();
        assert!(transport.request(ApiAction::Salt, &[]).await.is_ok());
    }
}
