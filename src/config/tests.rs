use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_lcdjuke_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LCDJUKE_CONFIG_PATH", "/tmp/lcdjuke-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lcdjuke-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lcdjuke")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("lcdjuke")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = ["mp3"]
recursive = true

[display]
width = 20
scroll_tick_ms = 150
wrap_pause_ms = 500
row2_free_wraps = 3

[input]
debounce_ms = 40
tick_ms = 2
key_hold_ms = 90

[playback]
shuffle = true
volume = 60
volume_floor = 10
volume_step = 5

[system]
music_dir = "/mnt/stick"
device = "/dev/sdb1"
halt_on_quit = true
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LCDJUKE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LCDJUKE__DISPLAY__WIDTH");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert_eq!(s.display.width, 20);
    assert_eq!(s.display.scroll_tick_ms, 150);
    assert_eq!(s.display.wrap_pause_ms, 500);
    assert_eq!(s.display.row2_free_wraps, 3);
    assert_eq!(s.input.debounce_ms, 40);
    assert_eq!(s.input.tick_ms, 2);
    assert_eq!(s.input.key_hold_ms, 90);
    assert!(s.playback.shuffle);
    assert_eq!(s.playback.volume, 60);
    assert_eq!(s.playback.volume_floor, 10);
    assert_eq!(s.playback.volume_step, 5);
    assert_eq!(s.system.music_dir, "/mnt/stick");
    assert_eq!(s.system.device, "/dev/sdb1");
    assert!(s.system.halt_on_quit);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[display]
scroll_tick_ms = 200
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LCDJUKE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LCDJUKE__DISPLAY__SCROLL_TICK_MS", "125");

    let s = Settings::load().unwrap();
    assert_eq!(s.display.scroll_tick_ms, 125);
}

#[test]
fn validate_rejects_degenerate_settings() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.display.width = 1;
    assert!(s.validate().is_err());
    s.display.width = 16;

    s.input.key_hold_ms = s.input.debounce_ms;
    assert!(s.validate().is_err());
    s.input.key_hold_ms = 120;

    s.library.extensions.clear();
    assert!(s.validate().is_err());
}
