//! Content store client: transport seam plus the caching fetch path.

use crate::cache::{CacheStatus, QueryCache, SharedFetch};
use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::query::ContentQuery;
use async_trait::async_trait;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Executes a query against the content store and returns the raw
/// `result` payload.
///
/// The transport is the only seam that touches the network; everything
/// above it (caching, de-duplication, decoding) is host-independent.
#[async_trait(?Send)]
pub trait ContentTransport {
    async fn execute(&self, query: &ContentQuery) -> Result<Value, ContentError>;
}

/// Caching client over a transport.
///
/// All state lives on the single UI thread; interior mutability is a
/// `RefCell`, never a lock.
pub struct ContentClient {
    transport: Rc<dyn ContentTransport>,
    cache: RefCell<QueryCache>,
}

impl ContentClient {
    /// Create a client over the given transport.
    pub fn new(transport: Rc<dyn ContentTransport>) -> Self {
        Self {
            transport,
            cache: RefCell::new(QueryCache::new()),
        }
    }

    /// Fetch the raw JSON payload for a query, consulting the request
    /// cache and joining any in-flight fetch for the same key.
    pub async fn fetch_value(&self, query: ContentQuery) -> Result<Rc<Value>, ContentError> {
        let key = query.cache_key();
        let policy = query.class.cache_policy();

        if let Some(hit) = self.cache.borrow().lookup(&key, Instant::now()) {
            tracing::debug!(key = %key, status = %CacheStatus::Hit, "content query");
            return Ok(hit);
        }

        // Join an in-flight fetch or start one. The borrow must end
        // before awaiting: the future itself never touches the cache.
        let (fetch, status) = {
            let mut cache = self.cache.borrow_mut();
            match cache.inflight(&key) {
                Some(fetch) => (fetch, CacheStatus::Joined),
                None => {
                    let transport = Rc::clone(&self.transport);
                    let fetch: SharedFetch = async move {
                        transport.execute(&query).await.map(Rc::new)
                    }
                    .boxed_local()
                    .shared();
                    cache.start(key.clone(), fetch.clone());
                    (fetch, CacheStatus::Miss)
                }
            }
        };
        tracing::debug!(key = %key, status = %status, "content query");

        let result = fetch.await;

        let mut cache = self.cache.borrow_mut();
        match &result {
            Ok(value) => {
                cache.store(&key, Rc::clone(value), Instant::now(), policy.entry_ttl());
            }
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "content query failed");
                cache.fail(&key);
            }
        }

        result
    }

    /// Fetch and decode a typed result.
    pub async fn fetch<T: DeserializeOwned>(&self, query: ContentQuery) -> Result<T, ContentError> {
        let class = query.class;
        let value = self.fetch_value(query).await?;
        serde_json::from_value((*value).clone()).map_err(|error| ContentError::Decode {
            query: class.name().to_string(),
            detail: error.to_string(),
        })
    }

    /// Drop every cached entry (test and admin hook).
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

/// Build the GET URL for a query: URL-encoded GROQ plus `$name` JSON
/// parameter values.
pub fn query_url(config: &ContentConfig, query: &ContentQuery) -> String {
    let mut url = format!(
        "{}?query={}",
        config.query_endpoint(),
        percent_encode(&query.groq)
    );
    for (name, value) in &query.params {
        let encoded = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
        url.push_str(&format!("&%24{}={}", name, percent_encode(&encoded)));
    }
    url
}

/// Minimal percent-encoding for query string values.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Transport that reads from the store's CDN endpoint.
#[cfg(target_arch = "wasm32")]
pub struct CdnTransport {
    config: ContentConfig,
}

#[cfg(target_arch = "wasm32")]
impl CdnTransport {
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl ContentTransport for CdnTransport {
    async fn execute(&self, query: &ContentQuery) -> Result<Value, ContentError> {
        use spin_sdk::http::{Method, Request};

        let url = query_url(&self.config, query);
        let request = Request::builder()
            .method(Method::Get)
            .uri(&url)
            .header("accept", "application/json")
            .build();

        let response: spin_sdk::http::Response = spin_sdk::http::send(request)
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        let status = *response.status();
        if status != 200 {
            return Err(ContentError::Http {
                status,
                query: query.class.name().to_string(),
            });
        }

        let body: Value =
            serde_json::from_slice(response.body()).map_err(|e| ContentError::Decode {
                query: query.class.name().to_string(),
                detail: e.to_string(),
            })?;

        // The store wraps payloads in a {"result": ...} envelope.
        match body {
            Value::Object(mut map) => Ok(map.remove("result").unwrap_or(Value::Null)),
            _ => Err(ContentError::Decode {
                query: query.class.name().to_string(),
                detail: "missing result envelope".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Yields once so interleavings actually interleave under `join!`.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    fn yield_once() -> YieldOnce {
        YieldOnce(false)
    }

    /// Counting transport; optionally fails the first N calls.
    struct MockTransport {
        calls: Cell<u32>,
        fail_first: Cell<u32>,
        payload: Value,
    }

    impl MockTransport {
        fn new(payload: Value) -> Self {
            Self {
                calls: Cell::new(0),
                fail_first: Cell::new(0),
                payload,
            }
        }

        fn failing_first(payload: Value, failures: u32) -> Self {
            let transport = Self::new(payload);
            transport.fail_first.set(failures);
            transport
        }
    }

    #[async_trait(?Send)]
    impl ContentTransport for MockTransport {
        async fn execute(&self, _query: &ContentQuery) -> Result<Value, ContentError> {
            yield_once().await;
            self.calls.set(self.calls.get() + 1);
            let remaining = self.fail_first.get();
            if remaining > 0 {
                self.fail_first.set(remaining - 1);
                return Err(ContentError::Transport("injected failure".to_string()));
            }
            Ok(self.payload.clone())
        }
    }

    fn client_with(transport: MockTransport) -> (Rc<MockTransport>, ContentClient) {
        let transport = Rc::new(transport);
        let shared: Rc<dyn ContentTransport> = transport.clone();
        (transport, ContentClient::new(shared))
    }

    #[test]
    fn test_concurrent_same_key_fetches_join() {
        let (transport, client) = client_with(MockTransport::new(Value::from(vec![1, 2, 3])));

        let (a, b) = block_on(async {
            futures::join!(
                client.fetch_value(ContentQuery::all_products()),
                client.fetch_value(ContentQuery::all_products()),
            )
        });

        assert_eq!(transport.calls.get(), 1);
        let a = a.unwrap();
        let b = b.unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sequential_fetch_served_from_cache() {
        let (transport, client) = client_with(MockTransport::new(Value::from("cached")));

        block_on(async {
            client.fetch_value(ContentQuery::categories()).await.unwrap();
            client.fetch_value(ContentQuery::categories()).await.unwrap();
            client.fetch_value(ContentQuery::categories()).await.unwrap();
        });

        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_different_keys_fetch_separately() {
        let (transport, client) = client_with(MockTransport::new(Value::Array(vec![])));

        block_on(async {
            client.fetch_value(ContentQuery::search("jam")).await.unwrap();
            client.fetch_value(ContentQuery::search("rye")).await.unwrap();
        });

        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let (transport, client) =
            client_with(MockTransport::failing_first(Value::from("ok"), 1));

        block_on(async {
            let first = client.fetch_value(ContentQuery::all_products()).await;
            assert!(matches!(first, Err(ContentError::Transport(_))));

            let second = client.fetch_value(ContentQuery::all_products()).await;
            assert_eq!(*second.unwrap(), Value::from("ok"));
        });

        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_concurrent_failure_delivered_to_all_callers() {
        let (transport, client) =
            client_with(MockTransport::failing_first(Value::from("ok"), 1));

        let (a, b) = block_on(async {
            futures::join!(
                client.fetch_value(ContentQuery::homepage()),
                client.fetch_value(ContentQuery::homepage()),
            )
        });

        assert_eq!(transport.calls.get(), 1);
        assert!(a.is_err());
        assert!(b.is_err());
    }

    #[test]
    fn test_typed_fetch_decode_error() {
        let (_transport, client) = client_with(MockTransport::new(Value::from("not a list")));

        let result: Result<Vec<u32>, _> =
            block_on(client.fetch(ContentQuery::product_paths()));
        match result {
            Err(ContentError::Decode { query, .. }) => assert_eq!(query, "product-paths"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_query_url_encodes_params() {
        let config = ContentConfig::new("abc123");
        let query = ContentQuery::search("rye bread");
        let url = query_url(&config, &query);

        assert!(url.starts_with("https://abc123.apicdn.sanity.io/"));
        assert!(url.contains("?query=%2A%5B"));
        // $term arrives URL-encoded as %24term with a JSON string value.
        assert!(url.contains("&%24term=%22rye%20bread%22"));
    }
}
