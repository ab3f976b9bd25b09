use indoc::indoc;
use integration_tests::TestServer;

#[tokio::test]
async fn unauthenticated_get_redirects() {
    let config = indoc! {r#"
        [authentication]
        redirect = "https://sso.example.com/login?next=%2F"
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/").await;

    assert_eq!(response.status(), 301);
    assert_eq!(response.headers()["location"], "https://sso.example.com/login?next=%2F");
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn redirect_ignores_request_content() {
    let config = indoc! {r#"
        [authentication]
        redirect = "/login"
    "#};

    let server = TestServer::start(config).await;

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = server
            .client
            .request(method.clone(), "/")
            .header("Accept", "application/json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 301, "{method}");
        assert_eq!(response.headers()["location"], "/login", "{method}");
    }
}

#[tokio::test]
async fn failed_login_redirects_despite_established_identity() {
    let config = indoc! {r#"
        [authentication]
        redirect = "/login"
    "#};

    let server = TestServer::builder().account("foo", "bar").build(config).await;

    server.accounts.login_as("alice");

    let response = server
        .client
        .post_form("/session", &[("username", "foo"), ("password", "wrong")])
        .await;

    assert_eq!(response.status(), 301);
    assert_eq!(response.headers()["location"], "/login");
}
