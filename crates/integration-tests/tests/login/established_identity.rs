use indoc::indoc;
use integration_tests::TestServer;

const CONFIG: &str = indoc! {r#"
    [authentication]
    redirect = "/login"
"#};

#[tokio::test]
async fn get_with_identity() {
    let server = TestServer::builder().logged_in_as("alice").build(CONFIG).await;

    let response = server.client.get("/").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "details": {},
      "identity": "alice",
      "roles": []
    }
    "#);

    assert_eq!(server.accounts.attempts(), 0);
}

#[tokio::test]
async fn repeated_get_gives_the_same_user() {
    let server = TestServer::builder().logged_in_as("alice").build(CONFIG).await;

    let first: serde_json::Value = server.client.get("/").await.json().await.unwrap();
    let second: serde_json::Value = server.client.get("/").await.json().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn post_without_credentials_ignores_identity() {
    let server = TestServer::builder()
        .account("foo", "bar")
        .logged_in_as("alice")
        .build(CONFIG)
        .await;

    let response = server.client.post_form("/session", &[]).await;

    assert_eq!(response.status(), 301);
    assert_eq!(server.accounts.attempts(), 0);
}

#[tokio::test]
async fn post_with_new_credentials_switches_identity() {
    let server = TestServer::builder()
        .account("foo", "bar")
        .logged_in_as("alice")
        .build(CONFIG)
        .await;

    let response = server
        .client
        .post_form("/session", &[("username", "foo"), ("password", "bar")])
        .await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["identity"], "foo");

    let body: serde_json::Value = server.client.get("/").await.json().await.unwrap();
    assert_eq!(body["identity"], "foo");
}

#[tokio::test]
async fn logout_ends_access() {
    let server = TestServer::builder().logged_in_as("alice").build(CONFIG).await;

    assert_eq!(server.client.get("/").await.status(), 200);

    server.accounts.logout();

    assert_eq!(server.client.get("/").await.status(), 301);
}
