use actix_web::web;

use crate::handlers::teams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/insert-team/{id}", web::post().to(teams::insert_team))
        .route("/delete-team/{team_name}", web::delete().to(teams::delete_team))
        .route(
            "/delete-multiple-teams/{id}",
            web::delete().to(teams::delete_multiple_teams),
        )
        .route("/teams/{id}", web::get().to(teams::team_names))
        .route("/update-snack", web::post().to(teams::update_snack));
}
