use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use sportsday::error::AppError;

#[macro_use]
mod common;

use common::{TestContext, with_session};

#[actix_rt::test]
async fn test_insert_activity_adds_key_to_every_team_of_that_event_only() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "sportsday").await;
    ctx.create_event(&admin.id, "other").await;
    ctx.add_team(&admin.id, "sportsday", "red").await;
    ctx.add_team(&admin.id, "sportsday", "blue").await;
    ctx.add_team(&admin.id, "other", "red").await;
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::post()
            .uri(&format!("/api/insert-activity/{}?eventName=sportsday", admin.id)),
        &admin.access_token,
    )
    .set_json(json!({ "activityName": "줄다리기" }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["activityList"], json!(["줄다리기"]));
    assert_eq!(body["data"]["scores"][0]["activities"], json!({ "줄다리기": 0 }));
    assert_eq!(body["data"]["scores"][1]["activities"], json!({ "줄다리기": 0 }));

    let other = ctx
        .state
        .team_repository
        .find_team(&admin.id, "other", "red")
        .await
        .unwrap()
        .unwrap();
    assert!(other.activities.is_empty());
}

#[actix_rt::test]
async fn test_duplicate_activity_is_conflict() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "sportsday").await;
    ctx.add_activity(&admin.id, "sportsday", "relay").await;

    let result = ctx
        .state
        .activity_repository
        .insert_activity(&admin.id, "sportsday", "relay")
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[actix_rt::test]
async fn test_insert_activity_into_missing_event_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;

    let result = ctx
        .state
        .activity_repository
        .insert_activity(&admin.id, "missing", "relay")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_delete_activity_reaggregates_every_team() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "sportsday").await;
    ctx.add_activity(&admin.id, "sportsday", "relay").await;
    ctx.add_activity(&admin.id, "sportsday", "quiz").await;
    ctx.add_team(&admin.id, "sportsday", "red").await;
    ctx.add_team(&admin.id, "sportsday", "blue").await;

    let scores = &ctx.state.score_repository;
    scores.update_score(&admin.id, "sportsday", "red", "relay", 10).await.unwrap();
    scores.update_score(&admin.id, "sportsday", "red", "quiz", 5).await.unwrap();
    scores.update_score(&admin.id, "sportsday", "blue", "relay", 7).await.unwrap();
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::delete().uri(&format!(
            "/api/delete-activity/relay?id={}&eventName=sportsday",
            admin.id
        )),
        &admin.access_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["activityList"], json!(["quiz"]));
    assert_eq!(
        body["data"]["scores"],
        json!([
            {
                "teamName": "red",
                "totalScore": 5,
                "participateNum": 1,
                "activities": { "quiz": 5 },
                "snack": [false, false, false, false, false]
            },
            {
                "teamName": "blue",
                "totalScore": 0,
                "participateNum": 0,
                "activities": { "quiz": 0 },
                "snack": [false, false, false, false, false]
            }
        ])
    );
}

#[actix_rt::test]
async fn test_delete_multiple_activities() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "sportsday").await;
    for activity in ["relay", "quiz", "dance"] {
        ctx.add_activity(&admin.id, "sportsday", activity).await;
    }
    ctx.add_team(&admin.id, "sportsday", "red").await;
    ctx.state
        .score_repository
        .update_score(&admin.id, "sportsday", "red", "dance", 9)
        .await
        .unwrap();
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::delete().uri(&format!(
            "/api/delete-multiple-activities/{}?eventName=sportsday",
            admin.id
        )),
        &admin.access_token,
    )
    .set_json(json!(["relay", "dance"]))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["activityList"], json!(["quiz"]));
    assert_eq!(body["data"]["scores"][0]["totalScore"], 0);
    assert_eq!(ctx.count("team_scores").await, 1);
}

#[actix_rt::test]
async fn test_delete_missing_activity_leaves_others_untouched() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    ctx.create_event(&admin.id, "sportsday").await;
    ctx.add_activity(&admin.id, "sportsday", "relay").await;

    let result = ctx
        .state
        .activity_repository
        .delete_activities(&admin.id, "sportsday", &["relay".to_string(), "ghost".to_string()])
        .await;

    match result {
        Err(AppError::NotFound(message)) => assert!(message.contains("ghost")),
        other => panic!("expected not found, got {:?}", other),
    }
    assert_eq!(
        ctx.state
            .activity_repository
            .list_activities(&admin.id, "sportsday")
            .await
            .unwrap(),
        vec!["relay".to_string()]
    );
}

#[actix_rt::test]
async fn test_activity_list_requires_existing_event() {
    let ctx = TestContext::new().await.unwrap();
    let admin = ctx.register_admin().await;
    let app = test_app!(ctx);

    let req = with_session(
        test::TestRequest::get().uri(&format!("/api/get-activityList/{}?eventName=missing", admin.id)),
        &admin.access_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
