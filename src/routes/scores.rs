use actix_web::web;

use crate::handlers::scores;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/update-score-by-activity",
        web::put().to(scores::update_score_by_activity),
    )
    .route(
        "/get-score-and-participation/{id}",
        web::get().to(scores::get_score_and_participation),
    );
}
