use std::fs;
use std::path::{Path, PathBuf};

/// Create a temporary directory with a unique name for test isolation.
pub(crate) fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "crafter_data_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Clean up a test directory.
pub(crate) fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}
