use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{ApiError, HealthReport, PredictionRequest, PredictionResponse};

/// Failures that terminate a submission. Two kinds reach the user: the
/// service rejecting the request with its own message, and everything that
/// broke on the way there or back.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success status carrying a server-supplied error message.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Network-level failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, ClientError>;

    async fn health(&self) -> Result<HealthReport, ClientError>;
}

pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Sends the request and decodes the JSON body. The body is decoded
    /// before the status check, so a non-JSON error page surfaces as a
    /// decode failure rather than an application error.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = serde_json::from_str(&body)?;

        if !status.is_success() {
            let message = serde_json::from_value::<ApiError>(value)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("prediction service returned {status}"));
            return Err(ClientError::Api { status, message });
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    #[tracing::instrument(skip(self, request), fields(field_count = request.fields.len()))]
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, ClientError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(%url, "Sending prediction request");
        self.fetch_json(self.http.post(url).json(&request)).await
    }

    async fn health(&self) -> Result<HealthReport, ClientError> {
        let url = format!("{}/health", self.base_url);
        self.fetch_json(self.http.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    // Reads one HTTP request, headers plus content-length worth of body.
    fn read_http_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data).to_ascii_lowercase();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:")?.trim().parse().ok())
                    .unwrap_or(0usize);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    // One-shot canned HTTP server, answers the first connection and exits.
    fn start_mock_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = read_http_request(&mut stream);
                let resp = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    // Like start_mock_server, but also hands back the raw request bytes.
    fn start_capture_server(body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_http_request(&mut stream);
                let _ = tx.send(request);
                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes());
            }
        });
        (format!("http://{addr}"), rx)
    }

    const OK_BODY: &str = r#"{
        "prediction": 1,
        "attrition_probability": 0.8763,
        "retention_probability": 0.1237,
        "risk_level": "High"
    }"#;

    #[tokio::test]
    async fn predict_parses_successful_response() {
        let endpoint = start_mock_server("200 OK", OK_BODY);
        let client = HttpPredictionClient::new(&endpoint);

        let response = client.predict(PredictionRequest::default()).await.unwrap();
        assert_eq!(response.prediction, 1);
        assert_eq!(response.attrition_probability, 0.8763);
        assert_eq!(response.retention_probability, 0.1237);
        assert_eq!(response.risk_level, "High");
    }

    #[tokio::test]
    async fn predict_posts_json_form_to_predict_path() {
        let (endpoint, rx) = start_capture_server(OK_BODY);
        let client = HttpPredictionClient::new(&endpoint);

        let form: PredictionRequest =
            [("customer_age".to_string(), "45".to_string())].into_iter().collect();
        client.predict(form).await.unwrap();

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /predict HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#"{"customer_age":"45"}"#));
    }

    #[tokio::test]
    async fn non_success_status_surfaces_server_error_message() {
        let endpoint =
            start_mock_server("400 Bad Request", r#"{"error": "model unavailable"}"#);
        let client = HttpPredictionClient::new(&endpoint);

        let err = client.predict(PredictionRequest::default()).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "model unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_failure() {
        let endpoint = start_mock_server("500 Internal Server Error", "upstream exploded");
        let client = HttpPredictionClient::new(&endpoint);

        let err = client.predict(PredictionRequest::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_failure() {
        // Bind to grab a free port, then drop the listener so connects fail.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpPredictionClient::new(&format!("http://{addr}"));
        let err = client.predict(PredictionRequest::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn health_parses_report() {
        let endpoint = start_mock_server(
            "200 OK",
            r#"{"status": "healthy", "model_loaded": true, "features_count": 32}"#,
        );
        let client = HttpPredictionClient::new(&endpoint);

        let report = client.health().await.unwrap();
        assert_eq!(report.status, "healthy");
        assert!(report.model_loaded);
        assert_eq!(report.features_count, 32);
    }
}
