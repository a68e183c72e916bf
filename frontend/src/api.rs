use futures::future::LocalBoxFuture;
use gloo_net::http::{Method, RequestBuilder};
use web_sys::RequestCredentials;

use posts_core::http::{self, ApiRequest, ApiResponse, Transport, TransportError};

fn method_of(m: http::Method) -> Method {
    match m {
        http::Method::Get => Method::GET,
        http::Method::Post => Method::POST,
        http::Method::Put => Method::PUT,
        http::Method::Delete => Method::DELETE,
    }
}

/* Transport gloo-net : cookies envoyés (credentials: include) */
pub struct GlooTransport;

impl GlooTransport {
    async fn fetch(request: ApiRequest) -> Result<ApiResponse, gloo_net::Error> {
        let mut builder = RequestBuilder::new(&request.url)
            .method(method_of(request.method))
            .credentials(RequestCredentials::Include);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let req = match request.body {
            Some(body) => builder.body(body)?,
            None => builder.build()?,
        };

        let resp   = req.send().await?;
        let status = resp.status();
        let body   = resp.text().await?;
        Ok(ApiResponse { status, body })
    }
}

impl Transport for GlooTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        Box::pin(async move {
            Self::fetch(request)
                .await
                .map_err(|e| TransportError(e.to_string()))
        })
    }
}
