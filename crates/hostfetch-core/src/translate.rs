//! Mapping of wire requests onto host client call parameters

use crate::body::BodyStream;
use crate::client::{CookiePolicy, HostRequest, HttpMethod, Redirect};
use crate::headers::Headers;
use crate::message::{Method, Request};
use std::time::Duration;

impl From<Method> for HttpMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => HttpMethod::Get,
            Method::Post => HttpMethod::Post,
            Method::Head => HttpMethod::Head,
            Method::Options => HttpMethod::Options,
            Method::Delete => HttpMethod::Delete,
            Method::Put => HttpMethod::Put,
            Method::Trace => HttpMethod::Trace,
            Method::Connect => HttpMethod::Connect,
        }
    }
}

/// Translate a decoded request into host client call parameters
///
/// The body, when present, is exposed as a [`BodyStream`] over the request's
/// own bytes.
pub fn translate(request: &Request) -> HostRequest<'_> {
    let mut headers = Headers::new();
    for header in &request.headers {
        headers.append(header.name.as_str(), header.value.as_str());
    }

    HostRequest {
        url: &request.url,
        method: request.method.into(),
        headers,
        connect_timeout: Duration::from_secs(u64::from(request.connect_timeout_secs)),
        read_timeout: Duration::from_secs(u64::from(request.read_timeout_secs)),
        body: request.body.as_deref().map(BodyStream::new),
        redirect: if request.follow_redirects {
            Redirect::Follow
        } else {
            Redirect::Manual
        },
        cookie_policy: if request.include_cookies {
            CookiePolicy::Include
        } else {
            CookiePolicy::Omit
        },
        use_caches: request.use_caches,
    }
}
