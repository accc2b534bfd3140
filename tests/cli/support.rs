use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

const ISOLATED_VARS: [&str; 4] = ["XDG_CONFIG_HOME", "XDG_DATA_HOME", "TICCA_ENV", "TICCA__DEFAULT_AGENT"];

/// Run `f` with XDG config and data homes inside `temp_dir`.
///
/// Tests touching process environment are serialized; previous values are
/// restored afterwards.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let saved: Vec<(&str, Option<OsString>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var_os(key)))
        .collect();

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("config"));
    std::env::set_var("XDG_DATA_HOME", temp_dir.path().join("data"));
    std::env::remove_var("TICCA_ENV");
    std::env::remove_var("TICCA__DEFAULT_AGENT");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in saved {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

/// Create an empty workspace directory, optionally with a `ticca.toml`.
pub fn workspace(temp_dir: &TempDir, config: Option<&str>) -> PathBuf {
    let root = temp_dir.path().join("workspace");
    fs::create_dir_all(&root).unwrap();
    if let Some(config) = config {
        fs::write(root.join("ticca.toml"), config).unwrap();
    }
    root
}

/// Write an agent profile into the isolated XDG config home.
pub fn write_profile(temp_dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let agents_dir = temp_dir.path().join("config").join("ticca").join("agents");
    fs::create_dir_all(&agents_dir).unwrap();
    let path = agents_dir.join(format!("{}.toml", name));
    fs::write(&path, body).unwrap();
    path
}
