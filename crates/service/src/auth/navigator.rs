use tracing::info;

/// Route a logged-out session is sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// Full navigation to another view, performed by the embedding UI.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator for headless use: records the navigation in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        info!(%route, "navigate");
    }
}

/// Recording navigator for tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn routes(&self) -> Vec<String> {
            self.routes.lock().unwrap_or_else(|p| p.into_inner()).clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap_or_else(|p| p.into_inner()).push(route.to_string());
        }
    }
}
