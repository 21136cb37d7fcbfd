use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::LookupError;

/// Raw response handed back by a transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP GET with query parameters.
pub trait HttpTransport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<HttpResponse, LookupError>;
}

/// `reqwest` transport with a fixed per-request timeout.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lrcput/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<HttpResponse, LookupError> {
        let response = self.client.get(url).query(params).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
