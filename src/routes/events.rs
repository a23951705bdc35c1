use actix_web::web;

use crate::handlers::events;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-eventList/{id}", web::get().to(events::get_event_list))
        .route("/insert-event", web::post().to(events::insert_event))
        .route("/delete-event/{id}", web::delete().to(events::delete_event))
        .route("/get-scores/{id}", web::get().to(events::get_scores))
        .route("/get-event-data/{id}", web::get().to(events::get_scores))
        .route("/get-public-data/{id}", web::get().to(events::get_public_data));
}
