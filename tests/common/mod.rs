use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tempfile::TempDir;

use alpha_config::ConfigManager;
use alpha_storage_json::JsonRosterStorage;
use points_core::core::RosterManager;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Registers an isolated base directory for one test.
pub fn setup_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a roster manager backed by the supplied base directory.
pub fn open_manager(base: &PathBuf) -> RosterManager {
    let storage = JsonRosterStorage::with_retention(base.join("data"), base.join("backups"), 3)
        .expect("create json storage backend");
    RosterManager::open(Box::new(storage)).expect("open roster manager")
}

/// Creates isolated managers backed by a unique directory for each test.
#[allow(dead_code)]
pub fn setup_test_env() -> (RosterManager, ConfigManager) {
    let base = setup_base();
    let manager = open_manager(&base);
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (manager, config_manager)
}
