//! Tower middleware applying [`RetryPolicy`] to an inner service.

use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use tower::{Layer, Service, ServiceExt};

use crate::resilience::outcome::Failure;
use crate::resilience::retries::RetryPolicy;

/// Layer wrapping services in [`Retry`].
#[derive(Debug, Clone, Copy)]
pub struct RetryLayer {
    policy: RetryPolicy,
}

impl RetryLayer {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = Retry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Retry::new(inner, self.policy)
    }
}

/// Service that retries requests whose inner call failed with a 500.
#[derive(Debug, Clone)]
pub struct Retry<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> Retry<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S, Req> Service<Req> for Retry<S>
where
    S: Service<Req, Error = Failure> + Clone + Send + 'static,
    S::Response: Send + 'static,
    S::Future: Send + 'static,
    Req: Clone + Send + Sync + 'static,
{
    type Response = S::Response;
    type Error = Failure;
    type Future = BoxFuture<'static, Result<S::Response, Failure>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Req) -> Self::Future {
        let template = self.inner.clone();
        let ready = std::mem::replace(&mut self.inner, template.clone());
        let policy = self.policy;

        Box::pin(async move {
            // Only the first attempt may use the service `poll_ready` prepared.
            let mut ready = Some(ready);
            policy
                .execute(&request, move |req: &Req| {
                    let first = ready.take();
                    let next = template.clone();
                    let req = req.clone();
                    async move {
                        match first {
                            Some(mut svc) => svc.call(req).await,
                            None => next.oneshot(req).await,
                        }
                    }
                })
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tower::{service_fn, ServiceBuilder};

    type Script = Arc<Mutex<VecDeque<Result<&'static str, u16>>>>;

    fn backend(
        script: Vec<Result<&'static str, u16>>,
    ) -> (
        impl Service<
                String,
                Response = &'static str,
                Error = Failure,
                Future = impl Future<Output = Result<&'static str, Failure>> + Send,
            > + Clone,
        Arc<AtomicU32>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let script: Script = Arc::new(Mutex::new(VecDeque::from(script)));
        let counter = calls.clone();
        let svc = service_fn(move |request: String| {
            assert_eq!(request, "POST /login");
            counter.fetch_add(1, Ordering::SeqCst);
            let next = script.lock().unwrap().pop_front().expect("unscripted call");
            async move {
                next.map_err(|code| Failure::from_status(StatusCode::from_u16(code).unwrap()))
            }
        });
        (svc, calls)
    }

    #[tokio::test]
    async fn test_layer_retries_internal_server_errors() {
        let (inner, calls) = backend(vec![Err(500), Err(500), Ok("welcome")]);
        let svc = ServiceBuilder::new()
            .layer(RetryLayer::new(RetryPolicy::new(3)))
            .service(inner);

        let response = svc.oneshot("POST /login".to_string()).await;
        assert_eq!(response, Ok("welcome"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_layer_gives_up_after_limit() {
        let (inner, calls) = backend(vec![Err(500); 4]);
        let svc = RetryLayer::new(RetryPolicy::new(3)).layer(inner);

        let failure = svc.oneshot("POST /login".to_string()).await.unwrap_err();
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_layer_forwards_unauthorized() {
        let (inner, calls) = backend(vec![Err(500), Err(401)]);
        let svc = RetryLayer::new(RetryPolicy::new(3)).layer(inner);

        let failure = svc.oneshot("POST /login".to_string()).await.unwrap_err();
        assert_eq!(failure.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_layer_service_is_reusable() {
        let (inner, calls) = backend(vec![Err(500), Ok("first"), Err(400)]);
        let mut svc = RetryLayer::new(RetryPolicy::new(1)).layer(inner);

        let first = ServiceExt::<String>::ready(&mut svc)
            .await
            .unwrap()
            .call("POST /login".to_string())
            .await;
        assert_eq!(first, Ok("first"));

        let second = ServiceExt::<String>::ready(&mut svc)
            .await
            .unwrap()
            .call("POST /login".to_string())
            .await;
        assert_eq!(second.unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_dropped_call_issues_no_more_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let inner = service_fn(move |_: String| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt > 0 {
                    std::future::pending::<()>().await;
                }
                Err::<(), _>(Failure::from_status(StatusCode::INTERNAL_SERVER_ERROR))
            }
        });
        let svc = RetryLayer::new(RetryPolicy::new(3)).layer(inner);

        let call = svc.oneshot("POST /login".to_string());
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(50), call).await;
        assert!(timed_out.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
