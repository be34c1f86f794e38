// ── Window configuration ──────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\Gobang\window.json` (or the file named by
// `GOBANG_CONFIG`). Every field has a default, so a missing, partial or
// unreadable file still yields a usable configuration.
// No `unsafe`: safe Rust and serde_json only.

use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{UNBOUNDED, USE_DEFAULT};
use crate::widget::Widget;

// ── Format version ────────────────────────────────────────────────────────────

const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "GOBANG_CONFIG";

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Geometry and behaviour of the main window.
///
/// Sizes are client-area sizes. `None` positions and bounds mean "let the
/// system decide" and "no constraint" respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub version: u32,
    pub title: String,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: i32,
    pub height: i32,
    pub min_size: Option<(i32, i32)>,
    pub max_size: Option<(i32, i32)>,
    /// Highlight the intersection under the mouse.
    pub hover_tracking: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            title: "Gobang".to_owned(),
            x: None,
            y: None,
            width: 640,
            height: 640,
            min_size: Some((320, 320)),
            max_size: None,
            hover_tracking: true,
        }
    }
}

impl WindowConfig {
    /// Push this configuration into a widget that has not been set up yet.
    pub fn apply(&self, widget: &Widget) {
        widget.set_title(&self.title);
        widget.move_to(self.x.unwrap_or(USE_DEFAULT), self.y.unwrap_or(USE_DEFAULT));
        widget.resize(self.width, self.height);
        let (min_w, min_h) = self.min_size.unwrap_or((UNBOUNDED, UNBOUNDED));
        widget.set_min_bound(min_w, min_h);
        let (max_w, max_h) = self.max_size.unwrap_or((UNBOUNDED, UNBOUNDED));
        widget.set_max_bound(max_w, max_h);
    }

    /// Copy the current geometry of `widget` into this configuration.
    ///
    /// Values the widget never learned (still `USE_DEFAULT`) leave the
    /// corresponding field untouched.
    pub fn capture(&mut self, widget: &Widget) {
        let s = widget.state();
        let known = |v: i32| (v != USE_DEFAULT).then_some(v);
        if let Some(x) = known(s.x) {
            self.x = Some(x);
        }
        if let Some(y) = known(s.y) {
            self.y = Some(y);
        }
        if let (Some(w), Some(h)) = (known(s.width), known(s.height)) {
            if w > 0 && h > 0 {
                self.width = w;
                self.height = h;
            }
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the config file path: `$GOBANG_CONFIG`, else
/// `%APPDATA%\Gobang\window.json`.
///
/// Returns `None` if neither variable is set.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("Gobang");
    p.push("window.json");
    Some(p)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `config` to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, config: &WindowConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    let stored = WindowConfig {
        version: CONFIG_VERSION,
        ..config.clone()
    };
    serde_json::to_writer_pretty(file, &stored)?;
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse the config file at `path`.
///
/// A file with an unrecognised version is reported as invalid data.
pub fn load_from(path: &Path) -> Result<WindowConfig> {
    let data = fs::read(path)?;
    let config: WindowConfig = serde_json::from_slice(&data)?;
    if config.version != CONFIG_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported config version {}", config.version),
        )
        .into());
    }
    Ok(config)
}

/// Load the configuration from `path`, falling back to defaults on any error.
///
/// A missing file is normal on first start and only logged at debug level.
pub fn load_or_default(path: Option<&Path>) -> WindowConfig {
    let Some(path) = path else {
        log::debug!("no config location; using defaults");
        return WindowConfig::default();
    };
    match load_from(path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(crate::error::UiError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no config at {}; using defaults", path.display());
            WindowConfig::default()
        }
        Err(e) => {
            log::warn!("ignoring config at {}: {e}", path.display());
            WindowConfig::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NoHooks;
    use crate::platform::mock::MockPlatform;

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("window.json");
        let config = WindowConfig {
            title: "Match 3".to_owned(),
            x: Some(40),
            y: Some(-20),
            width: 700,
            height: 500,
            max_size: Some((1200, 1000)),
            hover_tracking: false,
            ..WindowConfig::default()
        };

        save_to(&path, &config).expect("save");
        let loaded = load_from(&path).expect("load");
        assert_eq!(loaded, config);
    }

    /// Files written by hand may name only the fields they care about.
    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{"version":1,"width":900}"#;
        let config: WindowConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.width, 900);
        assert_eq!(config.height, WindowConfig::default().height);
        assert_eq!(config.title, "Gobang");
        assert!(config.hover_tracking);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("window.json");
        fs::write(&path, r#"{"version":99}"#).expect("write");

        assert!(load_from(&path).is_err());
        assert_eq!(load_or_default(Some(&path)), WindowConfig::default());
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("window.json");
        fs::write(&path, b"{ not json").expect("write");

        assert!(matches!(load_from(&path), Err(crate::error::UiError::Config(_))));
        assert_eq!(load_or_default(Some(&path)), WindowConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        assert_eq!(load_or_default(Some(&path)), WindowConfig::default());
        assert_eq!(load_or_default(None), WindowConfig::default());
    }

    #[test]
    fn apply_then_capture_round_trips_geometry() {
        let (ui, _mock) = MockPlatform::ui();
        let widget = Widget::new(&ui, NoHooks);
        let config = WindowConfig {
            x: Some(10),
            y: Some(20),
            width: 300,
            height: 200,
            min_size: None,
            ..WindowConfig::default()
        };

        config.apply(&widget);
        assert_eq!(widget.title(), "Gobang");
        assert_eq!((widget.x(), widget.y()), (10, 20));
        assert_eq!((widget.width(), widget.height()), (300, 200));
        assert_eq!(widget.min_bound(), (UNBOUNDED, UNBOUNDED));

        widget.move_to(55, 66);
        widget.resize(410, 310);
        let mut captured = WindowConfig::default();
        captured.capture(&widget);
        assert_eq!((captured.x, captured.y), (Some(55), Some(66)));
        assert_eq!((captured.width, captured.height), (410, 310));
    }

    #[test]
    fn capture_keeps_fields_the_widget_never_learned() {
        let (ui, _mock) = MockPlatform::ui();
        let widget = Widget::new(&ui, NoHooks);
        let mut config = WindowConfig::default();
        config.capture(&widget);
        assert_eq!(config, WindowConfig::default());
    }
}
