//! Call wrappers that keep network failures inside `Result`.
//!
//! [`safe_api_call`] guards an async call so nothing unwinds past it, and
//! [`send_http_request`] runs one blocking request, scoping the response to
//! the success transform.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::io::{self, Read};
use std::panic::AssertUnwindSafe;
use std::sync::OnceLock;
use std::time::Duration;

use futures::FutureExt;
use reqwest::Method;

use super::ApiError;

/// Run `call`, converting a panic anywhere inside it into
/// [`ApiError::Call`] carrying `error_message`. Results produced by the call
/// pass through untouched.
pub async fn safe_api_call<T, F, Fut>(call: F, error_message: &str) -> Result<T, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match AssertUnwindSafe(async move { call().await })
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(payload) => {
            let cause = CallPanicked::from_payload(payload);
            tracing::warn!(%cause, "{error_message}");
            Err(ApiError::call(error_message, cause))
        }
    }
}

/// Cause attached to [`ApiError::Call`] when the wrapped call panicked.
#[derive(Debug)]
pub struct CallPanicked {
    message: String,
}

impl CallPanicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self { message }
    }
}

impl fmt::Display for CallPanicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call panicked: {}", self.message)
    }
}

impl Error for CallPanicked {}

/// Describes a request independently of the client that sends it.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Response body. The underlying connection is released when this drops.
pub struct Body {
    reader: Box<dyn Read + Send>,
}

impl Body {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    pub fn string(&mut self) -> io::Result<String> {
        let mut out = String::new();
        self.reader.read_to_string(&mut out)?;
        Ok(out)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Body")
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A blocking HTTP client.
pub trait HttpFetch: Send + Sync {
    fn fetch(&self, request: &Request) -> io::Result<Response>;
}

/// Send `request` through `client`. On success `on_success` sees the response,
/// which is dropped as soon as the transform returns. On an I/O failure
/// `on_error` receives the error instead.
///
/// Blocks the calling thread; never call this from the UI task.
pub fn send_http_request<C, T>(
    client: &C,
    request: &Request,
    on_success: impl FnOnce(&mut Response) -> T,
    on_error: impl FnOnce(io::Error) -> T,
) -> T
where
    C: HttpFetch + ?Sized,
{
    match client.fetch(request) {
        Ok(mut response) => {
            let out = on_success(&mut response);
            drop(response);
            out
        }
        Err(e) => on_error(e),
    }
}

/// [`HttpFetch`] over `reqwest::blocking`. Every instance shares one client,
/// built the first time a request goes out.
#[derive(Debug, Clone)]
pub struct BlockingHttp {
    default_timeout: Duration,
}

impl BlockingHttp {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }
}

impl Default for BlockingHttp {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl HttpFetch for BlockingHttp {
    fn fetch(&self, request: &Request) -> io::Result<Response> {
        let mut builder = shared_client()?
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout.unwrap_or(self.default_timeout));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let resp = builder.send().map_err(to_io_error)?;

        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();

        Ok(Response {
            status: resp.status().as_u16(),
            headers,
            body: Body::new(resp),
        })
    }
}

/// The blocking client owns a runtime thread of its own. Keeping it in a
/// static means it is built off the UI task and never dropped inside one.
fn shared_client() -> io::Result<&'static reqwest::blocking::Client> {
    static CLIENT: OnceLock<reqwest::blocking::Client> = OnceLock::new();
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(to_io_error)?;
    Ok(CLIENT.get_or_init(|| client))
}

fn to_io_error(err: reqwest::Error) -> io::Error {
    let kind = if err.is_timeout() {
        io::ErrorKind::TimedOut
    } else if err.is_connect() {
        io::ErrorKind::ConnectionRefused
    } else if err.is_decode() {
        io::ErrorKind::InvalidData
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, err)
}
