use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_haptos_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HAPTOS_CONFIG_PATH", "/tmp/haptos-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/haptos-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("haptos")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("haptos")
            .join("config.toml")
    );
}

#[test]
fn default_state_dir_follows_xdg_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state").join("haptos")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/haptos")
    );
}

#[test]
fn defaults_match_the_documented_behavior() {
    let s = Settings::default();
    assert_eq!(s.playback.progress_interval_ms, 100);
    assert_eq!(s.playback.scrub_seconds, 5);
    assert_eq!(
        s.library.extensions,
        vec!["mp3", "wav", "aac", "m4a", "ogg", "flac", "opus"]
    );
    assert!(s.library.sniff_media_type);
    assert!(s.haptics.enabled);
    assert!(s.ui.follow_playback);
    assert_eq!(s.ui.notice_ms, 2000);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_tiny_interval_and_empty_extensions() {
    let mut s = Settings::default();
    s.playback.progress_interval_ms = 1;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" ".into(), ".".into()];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
progress_interval_ms = 250
scrub_seconds = 9

[library]
extensions = ["mp3"]
sniff_media_type = false
include_hidden = false

[ui]
follow_playback = false
header_text = "hello"
notice_ms = 500

[haptics]
enabled = false

[logging]
directory = "/tmp/haptos-logs"
filter = "haptos=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HAPTOS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("HAPTOS__PLAYBACK__PROGRESS_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.progress_interval_ms, 250);
    assert_eq!(s.playback.scrub_seconds, 9);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.sniff_media_type);
    assert!(!s.library.include_hidden);
    assert!(!s.ui.follow_playback);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_ms, 500);
    assert!(!s.haptics.enabled);
    assert_eq!(
        s.log_directory(),
        Some(std::path::PathBuf::from("/tmp/haptos-logs"))
    );
    assert_eq!(s.logging.filter, "haptos=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
progress_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HAPTOS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("HAPTOS__PLAYBACK__PROGRESS_INTERVAL_MS", "50");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.progress_interval_ms, 50);
}
