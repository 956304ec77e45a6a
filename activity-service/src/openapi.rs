use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::errors::ErrorResponse;
use common::models::{ActivityKind, ActivityScore, City, DailyWeather};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::city_suggestions,
        handlers::weather_forecast,
        handlers::activity_ranking,
    ),
    components(schemas(
        City,
        DailyWeather,
        ActivityKind,
        ActivityScore,
        ErrorResponse,
    )),
    tags(
        (name = "cities", description = "City search"),
        (name = "weather", description = "Daily weather forecasts"),
        (name = "activities", description = "Activity ranking from forecasts"),
    ),
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
