use indoc::indoc;
use integration_tests::TestServer;
use serde_json::json;

const CONFIG: &str = indoc! {r#"
    [authentication]
    redirect = "/login"
"#};

#[tokio::test]
async fn valid_form_credentials() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server
        .client
        .post_form("/session", &[("username", "foo"), ("password", "bar")])
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "details": {},
      "identity": "foo",
      "roles": []
    }
    "#);

    assert_eq!(server.accounts.attempts(), 1);
}

#[tokio::test]
async fn valid_json_credentials() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server
        .client
        .post_json("/session", &json!({ "username": "foo", "password": "bar" }))
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["identity"], "foo");
}

#[tokio::test]
async fn invalid_credentials_redirect() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server
        .client
        .post_form("/session", &[("username", "foo"), ("password", "baz")])
        .await;

    assert_eq!(response.status(), 301);
    assert_eq!(response.headers()["location"], "/login");
    assert_eq!(server.accounts.attempts(), 1);
}

#[tokio::test]
async fn unknown_account_redirects() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server
        .client
        .post_form("/session", &[("username", "mallory"), ("password", "bar")])
        .await;

    assert_eq!(response.status(), 301);
}

#[tokio::test]
async fn missing_fields_skip_verification() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server.client.post_form("/session", &[("username", "foo")]).await;
    assert_eq!(response.status(), 301);

    let response = server.client.post_form("/session", &[("password", "bar")]).await;
    assert_eq!(response.status(), 301);

    let response = server.client.post_json("/session", &json!({ "username": "foo", "password": null })).await;
    assert_eq!(response.status(), 301);

    assert_eq!(server.accounts.attempts(), 0);
}

#[tokio::test]
async fn unsupported_body_skips_verification() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server
        .client
        .request(reqwest::Method::POST, "/session")
        .header("Content-Type", "text/plain")
        .body("username=foo&password=bar")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 301);
    assert_eq!(server.accounts.attempts(), 0);
}

#[tokio::test]
async fn custom_field_names() {
    let config = indoc! {r#"
        [authentication]
        redirect = "/login"
        username = "email"
        password = "passphrase"
    "#};

    let server = TestServer::builder()
        .account("foo@example.com", "bar")
        .build(config)
        .await;

    let response = server
        .client
        .post_form("/session", &[("username", "foo@example.com"), ("password", "bar")])
        .await;

    assert_eq!(response.status(), 301);
    assert_eq!(server.accounts.attempts(), 0);

    let response = server
        .client
        .post_form("/session", &[("email", "foo@example.com"), ("passphrase", "bar")])
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["identity"], "foo@example.com");
}

#[tokio::test]
async fn login_establishes_identity_for_later_requests() {
    let server = TestServer::builder().account("foo", "bar").build(CONFIG).await;

    let response = server.client.get("/").await;
    assert_eq!(response.status(), 301);

    let response = server
        .client
        .post_form("/session", &[("username", "foo"), ("password", "bar")])
        .await;

    assert_eq!(response.status(), 200);

    let response = server.client.get("/").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["identity"], "foo");
}
