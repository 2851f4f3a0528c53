//! Fetch-state tracking around a single async operation.
//!
//! [`ApiHook`] wraps one operation and publishes a [`FetchState`] through a
//! `watch` channel so a UI layer can re-render on every transition:
//!
//! - `execute` enters loading (`loading = true`, `error = None`)
//! - success stores the result in `data` and clears `error`
//! - failure records the error message and keeps the previous `data`
//! - `loading` is `false` once the call settles, on both paths
//!
//! Overlapping `execute` calls are not ordered: whichever settles last
//! determines the final state.

use std::future::Future;
use std::marker::PhantomData;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::errors::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

/// Clears `loading` when dropped, so the flag also resets if the caller
/// abandons an in-flight `execute`.
struct SettleGuard<'a, T> {
    state: &'a watch::Sender<FetchState<T>>,
}

impl<T> Drop for SettleGuard<'_, T> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
    }
}

pub struct ApiHook<P, T, F> {
    op: F,
    state: watch::Sender<FetchState<T>>,
    _params: PhantomData<fn(P)>,
}

impl<P, T, F, Fut> ApiHook<P, T, F>
where
    T: Clone,
    F: Fn(P) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    pub fn new(op: F) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self { op, state, _params: PhantomData }
    }

    /// Create the hook and, when `immediate`, run it once with default
    /// parameters. A failure of that first run is recorded in the state only.
    pub async fn mount(op: F, immediate: bool) -> Self
    where
        P: Default,
    {
        let hook = Self::new(op);
        if immediate {
            if let Err(e) = hook.execute(P::default()).await {
                debug!(error = %e, "initial fetch failed");
            }
        }
        hook
    }

    /// Run the wrapped operation. The error is recorded and also returned.
    pub async fn execute(&self, params: P) -> Result<T, ClientError> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        let _guard = SettleGuard { state: &self.state };

        match (self.op)(params).await {
            Ok(value) => {
                self.state.send_modify(|s| {
                    s.data = Some(value.clone());
                    s.error = None;
                });
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                let message = e.message().to_string();
                self.state.send_modify(|s| s.error = Some(message));
                Err(e)
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> FetchState<T> { self.state.borrow().clone() }

    pub fn data(&self) -> Option<T> { self.state.borrow().data.clone() }

    pub fn loading(&self) -> bool { self.state.borrow().loading }

    pub fn error(&self) -> Option<String> { self.state.borrow().error.clone() }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> { self.state.subscribe() }
}
