//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rotaboard_domain::RotaboardError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RotaboardError);

impl From<InfraError> for RotaboardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RotaboardError> for InfraError {
    fn from(value: RotaboardError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRotaboardError {
    fn into_rotaboard(self) -> RotaboardError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RotaboardError */
/* -------------------------------------------------------------------------- */

impl IntoRotaboardError for HttpError {
    fn into_rotaboard(self) -> RotaboardError {
        if self.is_timeout() {
            return RotaboardError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return RotaboardError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return RotaboardError::Widget(format!("Invalid response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => RotaboardError::NotFound(message),
                429 => RotaboardError::Network(message),
                400..=499 => RotaboardError::InvalidInput(message),
                _ => RotaboardError::Network(message),
            };
        }

        if self.is_builder() {
            return RotaboardError::Config(format!("Invalid HTTP request: {self}"));
        }

        RotaboardError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_rotaboard())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::{Client, StatusCode};
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(status)).mount(&server).await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[test]
    fn http_status_404_maps_to_not_found() {
        Runtime::new().unwrap().block_on(async {
            let mapped: RotaboardError =
                InfraError::from(status_error(StatusCode::NOT_FOUND).await).into();
            match mapped {
                RotaboardError::NotFound(msg) => assert!(msg.contains("404")),
                other => panic!("expected not found, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_503_maps_to_network_error() {
        Runtime::new().unwrap().block_on(async {
            let mapped: RotaboardError =
                InfraError::from(status_error(StatusCode::SERVICE_UNAVAILABLE).await).into();
            match mapped {
                RotaboardError::Network(msg) => assert!(msg.contains("503")),
                other => panic!("expected network error, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_400_maps_to_invalid_input() {
        Runtime::new().unwrap().block_on(async {
            let mapped: RotaboardError =
                InfraError::from(status_error(StatusCode::BAD_REQUEST).await).into();
            assert!(matches!(mapped, RotaboardError::InvalidInput(_)));
        });
    }

    #[test]
    fn http_timeout_maps_to_network_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
                .mount(&server)
                .await;

            let client =
                Client::builder().no_proxy().timeout(Duration::from_millis(50)).build().unwrap();
            let error = client.get(server.uri()).send().await.unwrap_err();

            let mapped: RotaboardError = InfraError::from(error).into();
            assert_eq!(mapped, RotaboardError::Network("HTTP request timed out".into()));
        });
    }

    #[test]
    fn domain_error_round_trips_through_newtype() {
        let original = RotaboardError::Widget("boom".into());
        let back: RotaboardError = InfraError::from(original.clone()).into();
        assert_eq!(back, original);
    }
}
