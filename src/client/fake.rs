use std::sync::{Arc, Mutex};

use super::http::{ApiRequest, BoxError, BoxFuture, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<ApiRequest>,
    response: Result<(u16, String), String>,
}

impl FakeTransport {
    pub(crate) fn new(response_status: u16, response_body: impl Into<String>) -> Self {
        Self::with_response(Ok((response_status, response_body.into())))
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_response(Err(message.into()))
    }

    fn with_response(response: Result<(u16, String), String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                response,
            })),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(&'a self, request: ApiRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                state.response.clone()
            };
            match response {
                Ok((status, body)) => Ok(HttpResponse {
                    status,
                    headers: vec![("content-type".to_owned(), "application/json".to_owned())],
                    body,
                }),
                Err(message) => Err(message.into()),
            }
        })
    }
}
