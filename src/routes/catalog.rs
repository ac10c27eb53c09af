//! Catalog routes. Pens get static routes; the four lookup entities share
//! parameterized routes and the handlers resolve the entity from the path
//! segment (static segments win over parameters, so `/pens` never reaches
//! the lookup handlers).

use crate::handlers::{lookup, pen};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/pens", get(pen::list).post(pen::create))
        .route(
            "/pen/:id",
            get(pen::read)
                .put(pen::update)
                .patch(pen::update)
                .delete(pen::delete),
        )
        .route("/:collection", get(lookup::list).post(lookup::create))
        .route(
            "/:resource/:id",
            get(lookup::read)
                .put(lookup::update)
                .patch(lookup::update)
                .delete(lookup::delete),
        )
        .with_state(state)
}
