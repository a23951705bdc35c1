use actix_web::web;

use crate::handlers::activities;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/get-activityList/{id}",
        web::get().to(activities::get_activity_list),
    )
    .route(
        "/insert-activity/{id}",
        web::post().to(activities::insert_activity),
    )
    .route(
        "/delete-activity/{activity_name}",
        web::delete().to(activities::delete_activity),
    )
    .route(
        "/delete-multiple-activities/{id}",
        web::delete().to(activities::delete_multiple_activities),
    );
}
