//! Test support: logging setup and throwaway service wiring.

use std::env;
use std::path::Path;
use std::sync::{Arc, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::Settings;
use crate::domain::{SearchMode, ANONYMOUS_USER};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::RealFileSystem;

static TEST_SETUP: Once = Once::new();

/// Install a stderr tracing subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Settings pointing the snapshot store at `store_dir`, with replay delays disabled.
pub fn test_settings(store_dir: &Path) -> Settings {
    Settings {
        store_dir: store_dir.to_path_buf(),
        user_id: ANONYMOUS_USER.to_string(),
        default_snapshot: "default".to_string(),
        search_mode: SearchMode::Complete,
        step_delay_ms: 0,
    }
}

/// Container backed by the real filesystem under `store_dir`.
pub fn test_container(store_dir: &Path) -> ServiceContainer {
    ServiceContainer::with_deps(test_settings(store_dir), Arc::new(RealFileSystem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup_is_idempotent() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn test_settings_disable_replay_delay() {
        let settings = test_settings(Path::new("/tmp/store"));
        assert_eq!(settings.step_delay_ms, 0);
        assert_eq!(settings.store_dir, Path::new("/tmp/store"));
    }
}
