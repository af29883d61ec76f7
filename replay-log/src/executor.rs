use crate::{
    error::Error, extract, json_text, render, transcript::Transcript, util, HttpClient, HttpMethod,
    RequestData, ResponseData,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Issues calls one at a time against a single base URL, writing each one to the transcript as a
/// `CURL` line followed by a `Response:` line.
#[derive(Debug)]
pub struct RequestExecutor {
    base_url: String,
    http_client: Arc<dyn HttpClient + Send + Sync>,
    transcript: Transcript,
    calls: usize,
    error_responses: usize,
}

impl RequestExecutor {
    pub fn new<S: Into<String>>(
        base_url: S,
        http_client: Arc<dyn HttpClient + Send + Sync>,
        transcript: Transcript,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            transcript,
            calls: 0,
            error_responses: 0,
        }
    }

    /// Executes one call and records it.
    ///
    /// # Arguments
    /// `method` - the HTTP verb.
    /// `path` - the path appended to the base URL.
    /// `payload` - the JSON body, if any.
    /// `query` - query parameters, kept in the given order.
    ///
    /// # Returns
    /// The status and body of whatever the server answered. HTTP error statuses are returned as
    /// regular responses; only transport and transcript failures are errors.
    pub async fn execute(
        &mut self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<ResponseData, Error> {
        let uri = util::build_url("", path, query);
        let url = format!("{}{}", self.base_url, uri);
        let body = payload.map(json_text::to_ascii_json).transpose()?;

        self.transcript.write_line(render::render_command(
            method,
            &url,
            Some(JSON_CONTENT_TYPE),
            body.as_deref(),
        ))?;

        let request_data = RequestData {
            uri,
            method,
            headers: vec![(String::from("Content-Type"), String::from(JSON_CONTENT_TYPE))],
            body,
        };

        debug!(%method, %url, "sending request");
        self.calls += 1;
        let response_data = self
            .http_client
            .make_request(&self.base_url, &request_data)
            .await?;

        self.transcript
            .write_line(format!("Response: {}", response_data.body))?;

        if response_data.is_error() {
            self.error_responses += 1;
            let envelope = extract::extract_envelope(&response_data.body).unwrap_or_default();
            warn!(
                %method,
                %url,
                status = response_data.status_code,
                code = envelope.code.as_deref().unwrap_or(""),
                message = envelope.message.as_deref().unwrap_or(""),
                "request answered with an error status"
            );
        } else {
            info!(%method, %url, status = response_data.status_code, "request completed");
        }

        Ok(response_data)
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn error_responses(&self) -> usize {
        self.error_responses
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::RequestExecutor;
    use crate::{
        error::Error, transcript::Transcript, HttpClient, HttpMethod, RequestData, ResponseData,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::{
        collections::{HashMap, VecDeque},
        fs, io,
        sync::{Arc, Mutex},
    };

    #[derive(Debug, Default)]
    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<(u16, String)>>,
        requests: Mutex<Vec<(String, RequestData)>>,
    }

    impl ScriptedHttpClient {
        fn answering(responses: &[(u16, &str)]) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .iter()
                        .map(|(status, body)| (*status, String::from(*body)))
                        .collect(),
                ),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedHttpClient {
        async fn make_request(
            &self,
            base_url: &str,
            request_data: &RequestData,
        ) -> Result<ResponseData, Error> {
            self.requests
                .lock()
                .unwrap()
                .push((base_url.into(), request_data.clone()));

            match self.responses.lock().unwrap().pop_front() {
                Some((status_code, body)) => Ok(ResponseData {
                    status_code,
                    headers: HashMap::new(),
                    body,
                }),
                None => Err(Error::IoError(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    #[tokio::test]
    async fn writes_command_then_response() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_calls.log");
        let client = Arc::new(ScriptedHttpClient::answering(&[(201, r#"{"data": {"id": 1}}"#)]));
        let mut executor = RequestExecutor::new(
            "http://localhost:8080",
            client.clone(),
            Transcript::open(&path).unwrap(),
        );

        let payload = json!({"name": "cold brew", "price": 4500});
        let response = executor
            .execute(HttpMethod::Post, "/api/products", Some(&payload), &[])
            .await
            .unwrap();
        executor.into_transcript().close().unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "CURL -XPOST 'http://localhost:8080/api/products' -H 'Content-Type: application/json' \
             -d '{\"name\": \"cold brew\", \"price\": 4500}'\n\
             Response: {\"data\": {\"id\": 1}}\n"
        );

        let requests = client.requests.lock().unwrap();
        let (base_url, request) = &requests[0];
        assert_eq!(base_url, "http://localhost:8080");
        assert_eq!(request.uri, "/api/products");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"name": "cold brew", "price": 4500}"#)
        );
    }

    #[tokio::test]
    async fn error_status_is_recorded_like_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_calls.log");
        let client = Arc::new(ScriptedHttpClient::answering(&[(
            409,
            r#"{"status": 409, "code": "INVALID_STATUS_CHANGE", "data": null}"#,
        )]));
        let mut executor =
            RequestExecutor::new("http://h", client, Transcript::open(&path).unwrap());

        let payload = json!({"status": "CANCELED"});
        let response = executor
            .execute(HttpMethod::Patch, "/api/orders/3/status", Some(&payload), &[])
            .await
            .unwrap();

        assert_eq!(response.status_code, 409);
        assert_eq!(executor.calls(), 1);
        assert_eq!(executor.error_responses(), 1);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("CURL -XPATCH 'http://h/api/orders/3/status'"));
        assert_eq!(
            lines[1],
            r#"Response: {"status": 409, "code": "INVALID_STATUS_CHANGE", "data": null}"#
        );
    }

    #[tokio::test]
    async fn query_is_encoded_into_url_and_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_calls.log");
        let client = Arc::new(ScriptedHttpClient::answering(&[(200, "")]));
        let mut executor =
            RequestExecutor::new("http://h", client.clone(), Transcript::open(&path).unwrap());

        executor
            .execute(
                HttpMethod::Get,
                "/api/orders",
                None,
                &[("start", String::from("2024-01-01T09:59:00"))],
            )
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "CURL -XGET 'http://h/api/orders?start=2024-01-01T09%3A59%3A00' \
             -H 'Content-Type: application/json'\nResponse: \n"
        );
        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].1.uri, "/api/orders?start=2024-01-01T09%3A59%3A00");
        assert!(requests[0].1.body.is_none());
    }

    #[tokio::test]
    async fn transport_failure_propagates_after_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_calls.log");
        let client = Arc::new(ScriptedHttpClient::answering(&[]));
        let mut executor = RequestExecutor::new("http://h", client, Transcript::open(&path).unwrap());

        let result = executor.execute(HttpMethod::Get, "/api/orders", None, &[]).await;

        match result {
            Err(Error::IoError(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("expected a transport failure, got {:?}", other),
        }
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "CURL -XGET 'http://h/api/orders' -H 'Content-Type: application/json'\n"
        );
    }
}
