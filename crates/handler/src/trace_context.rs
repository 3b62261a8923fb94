//! W3C Trace Context propagation on outbound provider requests.
//!
//! With no global propagator registered the injection adds no headers.

use opentelemetry::propagation::Injector;
use opentelemetry::{Context, global};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

struct HeaderInjector<'a>(&'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes())
            && let Ok(val) = HeaderValue::from_str(&value)
        {
            self.0.insert(name, val);
        }
    }
}

/// Add `traceparent` / `tracestate` for the current context to `request`.
pub fn inject_trace_context(request: &mut reqwest::Request) {
    let cx = Context::current();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut HeaderInjector(request.headers_mut()));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headers_without_propagator() {
        let client = reqwest::Client::new();
        let mut request = client.post("http://127.0.0.1:1/token").build().unwrap();
        let before = request.headers().len();

        inject_trace_context(&mut request);

        assert_eq!(request.headers().len(), before);
        assert!(request.headers().get("traceparent").is_none());
    }
}
