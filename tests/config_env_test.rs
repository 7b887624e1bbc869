//! Tests for the `BSTVIZ_*` environment layer of settings loading.
//!
//! Kept in its own test binary: the process environment is shared by every
//! test in a binary, and the file-based config tests must not see these values.

use std::env;

use tempfile::TempDir;

use bstviz::config::{local_config_path, Settings};
use bstviz::domain::SearchMode;

#[test]
fn given_bstviz_env_vars_when_load_then_they_override_local_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        local_config_path(temp.path()),
        "step_delay_ms = 25\nuser_id = \"alice\"\n",
    )
    .unwrap();
    env::set_var("BSTVIZ_STEP_DELAY_MS", "7");
    env::set_var("BSTVIZ_USER_ID", "bob");
    env::set_var("BSTVIZ_SEARCH_MODE", "bst");

    let settings = Settings::load(Some(temp.path()));

    env::remove_var("BSTVIZ_STEP_DELAY_MS");
    env::remove_var("BSTVIZ_USER_ID");
    env::remove_var("BSTVIZ_SEARCH_MODE");

    let settings = settings.unwrap();
    assert_eq!(settings.step_delay_ms, 7);
    assert_eq!(settings.user_id, "bob");
    assert_eq!(settings.search_mode, SearchMode::Bst);
}
