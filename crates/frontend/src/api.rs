use quake_shared::config::MapConfig;
use quake_shared::filter::Filter;
use quake_shared::models::{ApiErrorBody, EarthquakeEvent, FetchError};

/// Full request URL for a filtered earthquake query.
pub fn build_events_url(endpoint: &str, filter: &Filter) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}{}", endpoint, sep, filter.query_string())
}

/// Decode a 2xx body into events.
pub fn decode_events(body: &str) -> Result<Vec<EarthquakeEvent>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Turn a non-2xx response into an error, keeping the backend's message when
/// it sent one.
pub fn decode_failure(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => FetchError::Server {
            status,
            message: err.error,
        },
        Err(_) => FetchError::Status(status),
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub async fn fetch_events(
    config: &MapConfig,
    filter: &Filter,
) -> Result<Vec<EarthquakeEvent>, FetchError> {
    let url = build_events_url(&config.endpoint(&page_origin()), filter);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(decode_failure(status.as_u16(), &body));
    }
    decode_events(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filter() -> Filter {
        Filter {
            min_magnitude: 4.5,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
        }
    }

    // --- URL builder ---

    #[test]
    fn test_build_events_url() {
        assert_eq!(
            build_events_url("http://localhost:5000/api/sismos_filtrados", &filter()),
            "http://localhost:5000/api/sismos_filtrados?min_magnitud=4.5&start_time=2025-07-12&end_time=2025-07-20"
        );
    }

    #[test]
    fn test_build_events_url_existing_query() {
        assert_eq!(
            build_events_url("https://quakes.example.com/api?v=2", &filter()),
            "https://quakes.example.com/api?v=2&min_magnitud=4.5&start_time=2025-07-12&end_time=2025-07-20"
        );
    }

    // --- Response decoding ---

    #[test]
    fn test_decode_events() {
        let json = r#"[
            {"lat":-33.45,"lng":-70.66,"lugar":"Santiago","magnitud":5.1,"profundidad":10.0,"fecha":"2025-07-13 01:02:03"},
            {"lat":35.68,"lng":139.69,"lugar":"Tokyo","magnitud":6.2,"profundidad":45.5,"fecha":"2025-07-14 04:05:06"}
        ]"#;
        let events = decode_events(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].place, "Santiago");
        assert_eq!(events[1].depth_km, 45.5);
    }

    #[test]
    fn test_decode_events_empty_array() {
        assert!(decode_events("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_events_rejects_object() {
        let err = decode_events(r#"{"error":"boom"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_decode_events_rejects_empty_body() {
        assert!(matches!(decode_events(""), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_failure_with_error_body() {
        let err = decode_failure(
            500,
            r#"{"error":"No se pudieron cargar los datos: file not found"}"#,
        );
        assert_eq!(
            err,
            FetchError::Server {
                status: 500,
                message: "No se pudieron cargar los datos: file not found".to_string()
            }
        );
    }

    #[test]
    fn test_decode_failure_without_body() {
        assert_eq!(decode_failure(404, "<html>Not Found</html>"), FetchError::Status(404));
    }
}
