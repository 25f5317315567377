//! Session persistence and process-scoped latches.
//!
//! The login cookie is stored as a plain file at
//! `$XDG_CONFIG_HOME/hangszer/session` (default `~/.config/hangszer/session`)
//! so a restart keeps the user logged in.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

/// Load the persisted session cookie, if any.
pub fn load_cookie() -> Option<String> {
    load_cookie_in(&config_dir())
}

/// Persist the session cookie.
pub fn store_cookie(cookie: &str) -> Result<()> {
    store_cookie_in(&config_dir(), cookie)
}

/// Remove the persisted session cookie (logout).
pub fn clear_cookie() -> Result<()> {
    clear_cookie_in(&config_dir())
}

fn load_cookie_in(dir: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(dir.join("session")).ok()?;
    let cookie = contents.trim();
    if cookie.is_empty() {
        None
    } else {
        Some(cookie.to_string())
    }
}

fn store_cookie_in(dir: &Path, cookie: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("session"), cookie)?;
    Ok(())
}

fn clear_cookie_in(dir: &Path) -> Result<()> {
    let path = dir.join("session");
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// `$XDG_CONFIG_HOME/hangszer` (default `~/.config/hangszer`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join("hangszer")
}

// ── splash latch ─────────────────────────────────────────────────

/// Whether the home splash has been shown this process.
///
/// Process-scoped: revisiting the home screen must not replay the splash,
/// but a fresh process start does.
static SPLASH_SHOWN: AtomicBool = AtomicBool::new(false);

/// Returns `true` exactly once per process.
pub fn take_splash() -> bool {
    !SPLASH_SHOWN.swap(true, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_cookie_in(dir.path()), None);

        store_cookie_in(dir.path(), "session=abc123").unwrap();
        assert_eq!(
            load_cookie_in(dir.path()),
            Some("session=abc123".to_string())
        );

        clear_cookie_in(dir.path()).unwrap();
        assert_eq!(load_cookie_in(dir.path()), None);
        // Clearing twice is fine.
        clear_cookie_in(dir.path()).unwrap();
    }

    #[test]
    fn blank_session_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        store_cookie_in(dir.path(), "  \n").unwrap();
        assert_eq!(load_cookie_in(dir.path()), None);
    }

    #[test]
    fn splash_latch_fires_once() {
        // First caller in the process wins; every later call sees false.
        if take_splash() {
            assert!(!take_splash());
        }
        assert!(!take_splash());
    }
}
