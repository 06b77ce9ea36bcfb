use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::{json, Value};
use tracing_test::traced_test;
mod tools;

use tools::{memory_store, random_email, register, AppData, PASSWORD};
use wishlist::utils::auth::{
    create_anonymous_user, errors::AuthError, get_current_user, try_register_user,
    verify_user_credentials,
};

#[traced_test]
#[tokio::test]
async fn registration_health_check() {
    let store = memory_store();
    let email = random_email();
    let user_id = register(&store, &email).await;

    let user = get_current_user(&*store, user_id).await.unwrap();
    assert_eq!(user.email, Some(email));
}

#[traced_test]
#[tokio::test]
async fn registration_rejects_taken_email() {
    let store = memory_store();
    let email = random_email();
    register(&store, &email).await;

    let res = try_register_user(&*store, &email, SecretString::new(PASSWORD.to_string())).await;
    match res {
        Err(AuthError::UserAlreadyExists) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[traced_test]
#[tokio::test]
async fn registration_rejects_invalid_input() {
    let store = memory_store();

    let res = try_register_user(&*store, "not-an-email", SecretString::new(PASSWORD.to_string())).await;
    match res {
        Err(AuthError::InvalidInput(_)) => (),
        _ => panic!("Test gives the result {:?}", res),
    }

    let res = try_register_user(&*store, &random_email(), SecretString::new("12345".to_string())).await;
    match res {
        Err(AuthError::InvalidInput(_)) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[traced_test]
#[tokio::test]
async fn login_checks_password() {
    let store = memory_store();
    let email = random_email();
    let user_id = register(&store, &email).await;

    let res = verify_user_credentials(&*store, &email, SecretString::new(PASSWORD.to_string())).await;
    assert_eq!(res.unwrap(), user_id);

    let res = verify_user_credentials(&*store, &email, SecretString::new("wrong-pass".to_string())).await;
    match res {
        Err(AuthError::WrongEmailOrPassword) => (),
        _ => panic!("Test gives the result {:?}", res),
    }

    let res = verify_user_credentials(&*store, &random_email(), SecretString::new(PASSWORD.to_string())).await;
    match res {
        Err(AuthError::WrongEmailOrPassword) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[traced_test]
#[tokio::test]
async fn anonymous_users_have_no_email() {
    let store = memory_store();
    let user_id = create_anonymous_user(&*store).await.unwrap();

    let user = get_current_user(&*store, user_id).await.unwrap();
    assert_eq!(user.email, None);
}

#[traced_test]
#[tokio::test]
async fn session_lifecycle() {
    let app = AppData::new().await;
    let email = random_email();
    let (client, user_id) = app.signed_in(&email).await;

    let res = client.get(app.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = res.json().await.unwrap();
    assert_eq!(me["user_id"], json!(user_id));
    assert_eq!(me["email"], json!(email));

    let res = client.post(app.api("/auth/refresh")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(app.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.post(app.api("/auth/logout")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(app.api("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[traced_test]
#[tokio::test]
async fn login_over_http() {
    let app = AppData::new().await;
    let email = random_email();
    app.signed_in(&email).await;

    let client = app.client();
    let res = client
        .post(app.api("/auth/login"))
        .json(&json!({ "email": email, "password": "wrong-pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(app.api("/auth/login"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app.api("/auth/register"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[traced_test]
#[tokio::test]
async fn protected_routes_require_session() {
    let app = AppData::new().await;
    let client = app.client();

    for uri in ["/auth/me", "/wishes", "/invitations", "/invitations/incoming"] {
        let res = client.get(app.api(uri)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let res = client.post(app.api("/auth/anonymous")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = client
        .get(app.api("/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], Value::Null);
}

#[traced_test]
#[tokio::test]
async fn padded_password_is_kept_verbatim() {
    let app = AppData::new().await;
    let email = random_email();
    let credentials = json!({ "email": email, "password": "  secret12  " });
    let client = app.client();

    let res = client
        .post(app.api("/auth/register"))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app.api("/auth/login"))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(app.api("/auth/login"))
        .json(&json!({ "email": email, "password": "secret12" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
