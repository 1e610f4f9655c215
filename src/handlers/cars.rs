use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::constants::{API_NAME, NOT_JSON_MESSAGE};
use crate::error::AppError;
use crate::models::{CarList, NewCar};
use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new().route("/cars", get(list_cars).post(create_car))
}

/// True for `application/json` and `application/*+json`, parameters ignored.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

async fn create_car(
    State(service): State<CarService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // Non-JSON bodies are answered with a 200 carrying an error payload.
    if !is_json_content_type(&headers) {
        tracing::warn!("{} Rejected car payload that is not declared as JSON", API_NAME);
        return Ok(Json(json!({ "error": NOT_JSON_MESSAGE })));
    }

    let payload: Value = serde_json::from_slice(&body)?;
    let new_car = NewCar::from_json(payload)?;

    tracing::info!("{} Received car: {} {}", API_NAME, new_car.name, new_car.model);

    let name = new_car.name.clone();
    service.create_car(new_car).await?;

    Ok(Json(json!({
        "message": format!("car {} has been created successfully.", name)
    })))
}

async fn list_cars(State(service): State<CarService>) -> Result<Json<CarList>, AppError> {
    let cars = service.list_cars().await?;
    Ok(Json(cars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        headers
    }

    #[test]
    fn json_media_types_are_detected() {
        for content_type in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "application/vnd.api+json",
        ] {
            assert!(is_json_content_type(&headers_with(content_type)), "{}", content_type);
        }
    }

    #[test]
    fn other_media_types_are_not_json() {
        for content_type in ["text/plain", "text/html", "text/json", "application/xml", ""] {
            assert!(!is_json_content_type(&headers_with(content_type)), "{}", content_type);
        }
    }

    #[test]
    fn missing_content_type_is_not_json() {
        assert!(!is_json_content_type(&HeaderMap::new()));
    }
}
