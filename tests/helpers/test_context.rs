//! Test context for unified test setup
//!
//! Wires a `ServiceFactory` against the mock backend with an in-memory
//! session store, so no test touches the real session file.

use std::sync::{Arc, Once};
use JornadaPortal::config::Settings;
use JornadaPortal::services::{MemorySessionStore, ServiceFactory, Session, SessionStore};

use super::portal_mock::{PortalMockServer, TEST_TOKEN};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Settings pointing at the mock server
pub fn create_test_settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.timeout_seconds = Some(5);
    settings.api.user_agent = "JornadaPortal-tests".to_string();
    settings
}

pub struct TestContext {
    pub mock: PortalMockServer,
    pub services: ServiceFactory,
}

impl TestContext {
    /// Context without an admin session
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemorySessionStore::new())).await
    }

    /// Context with an admin session already holding `TEST_TOKEN`
    pub async fn logged_in() -> Self {
        Self::with_store(Arc::new(MemorySessionStore::with_session(Session::new(TEST_TOKEN)))).await
    }

    pub async fn with_store(store: Arc<dyn SessionStore>) -> Self {
        init_test_logging();

        let mock = PortalMockServer::new().await;
        let settings = create_test_settings(&mock.base_url);
        let services = ServiceFactory::with_store(settings, store).expect("failed to build services");

        Self { mock, services }
    }
}
