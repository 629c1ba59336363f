use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use crate::json::PrettyJson;
use crate::models::Banner;

use super::AppState;

const BANNERS: [(&str, &str, &str); 3] = [
    ("Burger", "burger.jpg", "Tasty Burger at your door step"),
    ("Spices", "food.jpg", "All Cuisines"),
    (
        "New York",
        "tasty.jpg",
        "Food is incomplete without a tasty dessert",
    ),
];

pub fn router() -> Router<AppState> {
    Router::new().route("/api/banners/", get(list_banners))
}

#[utoipa::path(
    get,
    path = "/api/banners/",
    responses(
        (status = 200, description = "Landing page banners", body = [Banner]),
    ),
    tag = "banners"
)]
#[instrument(skip(state))]
pub async fn list_banners(State(state): State<AppState>) -> PrettyJson<Vec<Banner>> {
    PrettyJson(
        BANNERS
            .iter()
            .map(|(title, image, text)| Banner {
                title: title.to_string(),
                src: state.config.static_asset(image),
                text: text.to_string(),
            })
            .collect(),
    )
}
