use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use sportsday::config::Config;
use sportsday::database::models::{AuthProvider, CredentialsInput};
use sportsday::AdminRepository;
use sportsday::error::AppError;

#[macro_use]
mod common;

use common::{PASSWORD, TestContext, random_admin_id, with_session};

#[actix_rt::test]
async fn test_signup_sets_session_cookie_and_returns_empty_event_list() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let app = test_app!(ctx);
    let id = random_admin_id();

    let req = test::TestRequest::post()
        .uri("/api/auth/create")
        .set_json(json!({ "id": id, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["eventList"], json!([]));
    assert_eq!(body["data"]["access_token"], cookie.value());
}

#[actix_rt::test]
async fn test_duplicate_signup_is_conflict() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;

    let result = ctx
        .state
        .auth_service
        .register(CredentialsInput {
            id: admin.id.clone(),
            password: "Another12345".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[actix_rt::test]
async fn test_signup_rejects_short_credentials() {
    let ctx = TestContext::new().await.unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/create")
        .set_json(json!({ "id": "short", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "validation_error");
    assert_eq!(ctx.count("admins").await, 0);
}

#[actix_rt::test]
async fn test_login_issues_additional_token() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "체육대회").await;

    let response = ctx
        .state
        .auth_service
        .login(CredentialsInput {
            id: admin.id.clone(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    assert_ne!(response.access_token, admin.access_token);
    assert_eq!(response.event_list.len(), 1);
    assert_eq!(ctx.count("admin_tokens").await, 2);
}

#[actix_rt::test]
async fn test_login_failures_are_unauthorized() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    let app = test_app!(ctx);

    for (id, password) in [
        (admin.id.as_str(), "WrongPassword1"),
        ("nobody12345", PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "id": id, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unauthorized");
    }

    assert_eq!(ctx.count("admin_tokens").await, 1);
}

#[actix_rt::test]
async fn test_logout_removes_only_that_token() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    let second = ctx
        .state
        .auth_service
        .login(CredentialsInput {
            id: admin.id.clone(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    let admins = AdminRepository::new(ctx.pool.clone());
    assert_eq!(admins.list_tokens(&admin.id).await.unwrap().len(), 2);
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::delete().uri(&format!("/api/auth/logout/{}", admin.id)),
        &admin.access_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        admins.list_tokens(&admin.id).await.unwrap(),
        vec![second.access_token.clone()]
    );
    assert!(ctx.state.auth_service.authenticate(&admin.access_token).await.is_err());
    assert!(ctx.state.auth_service.authenticate(&second.access_token).await.is_ok());

    let event_list = format!("/api/get-eventList/{}", admin.id);
    let req = with_session(test::TestRequest::get().uri(&event_list), &admin.access_token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = with_session(test::TestRequest::get().uri(&event_list), &second.access_token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let again = ctx
        .state
        .auth_service
        .logout(&admin.id, &admin.access_token)
        .await;
    assert!(matches!(again, Err(AppError::Validation(_))));
}

#[actix_rt::test]
async fn test_logout_of_another_admin_is_forbidden_and_keeps_tokens() {
    let ctx = TestContext::new().await.unwrap();
    let owner = ctx.register_admin().await;
    let other = ctx.register_admin().await;
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::delete().uri(&format!("/api/auth/logout/{}", owner.id)),
        &other.access_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert!(ctx.state.auth_service.authenticate(&owner.access_token).await.is_ok());
    assert!(ctx.state.auth_service.authenticate(&other.access_token).await.is_ok());
}

#[actix_rt::test]
async fn test_gated_endpoints_require_session_and_ownership() {
    let ctx = TestContext::new().await.unwrap();
    let owner = ctx.register_admin().await;
    let other = ctx.register_admin().await;
    let app = test_app!(ctx);
    let uri = format!("/api/get-eventList/{}", owner.id);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = with_session(test::TestRequest::get().uri(&uri), &other.access_token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", format!("Bearer {}", owner.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_google_login_provisions_google_admin() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .state
        .auth_service
        .google_login("google:coach@example.com")
        .await
        .unwrap();
    assert_eq!(response.id, "coach@example.com");

    let admin = ctx
        .state
        .auth_service
        .authenticate(&response.access_token)
        .await
        .unwrap();
    assert_eq!(admin.auth_provider, AuthProvider::Google);

    let password_login = ctx
        .state
        .auth_service
        .login(CredentialsInput {
            id: "coach@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;
    assert!(matches!(password_login, Err(AppError::Validation(_))));

    let again = ctx
        .state
        .auth_service
        .google_login("google:coach@example.com")
        .await
        .unwrap();
    assert_eq!(again.id, response.id);
    assert_eq!(ctx.count("admins").await, 1);
}

#[actix_rt::test]
async fn test_password_login_to_google_account_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    ctx.state
        .auth_service
        .google_login("google:coach1234")
        .await
        .unwrap();

    let result = ctx
        .state
        .auth_service
        .login(CredentialsInput {
            id: "coach1234".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    match result {
        Err(AppError::Unauthorized(message)) => assert!(message.contains("구글 로그인")),
        other => panic!("expected unauthorized, got {:?}", other.map(|r| r.id)),
    }
}

#[actix_rt::test]
async fn test_google_login_for_local_account_is_forbidden() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/google-auth")
        .set_json(json!({ "access_token": format!("google:{}", admin.id) }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_google_verification_failure_is_internal_error() {
    let ctx = TestContext::new().await.unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/google-auth")
        .set_json(json!({ "access_token": "forged" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "internal");
    assert_eq!(ctx.count("admins").await, 0);
}

#[actix_rt::test]
async fn test_google_login_disabled_without_audience() {
    let mut config = Config::test_config();
    config.google_audience = String::new();
    let ctx = TestContext::with_config(config).await.unwrap();

    let result = ctx
        .state
        .auth_service
        .google_login("google:coach@example.com")
        .await;

    match result {
        Err(AppError::InternalServerError(Some(message))) => {
            assert_eq!(message, "구글 로그인이 설정되지 않았습니다.")
        }
        other => panic!("expected internal error, got {:?}", other.map(|r| r.id)),
    }
}

#[actix_rt::test]
async fn test_auth_endpoints_are_rate_limited_per_ip() {
    let mut config = Config::test_config();
    config.auth_rate_limit_max = 2;
    let ctx = TestContext::with_config(config).await.unwrap();
    let app = test_app!(ctx);
    let peer = "10.1.2.3:40000".parse().unwrap();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer)
            .set_json(json!({ "id": "nobody12345", "password": PASSWORD }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::UNAUTHORIZED,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );
}
