// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in the widget layer return `error::Result<T>`.
// Only window creation and startup can fail; every other OS call is
// fire-and-forget and never produces a `UiError`.

use thiserror::Error;

/// Every error that the widget layer can produce.
#[derive(Debug, Error)]
pub enum UiError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// The OS refused to create a window for a widget.
    ///
    /// This is the one unrecoverable failure: a widget whose window cannot
    /// be created has nothing to fall back to. Callers propagate it to the
    /// application shell, which terminates.
    #[error("window creation failed for class `{class}` (error {code:#010x})")]
    WindowCreation {
        /// The window class the widget was registered under.
        class: String,
        /// The raw error code reported by the backend.
        code: u32,
    },

    /// A standard I/O error (config file read or write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid JSON for `WindowConfig`.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl UiError {
    /// `true` for the failure kinds that must end the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WindowCreation { .. })
    }
}

// Convert a windows-crate error (HRESULT) directly into a UiError so that
// `?` can be used on `windows::core::Result<T>` throughout the win32 backend.
#[cfg(windows)]
impl From<windows::core::Error> for UiError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UiError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
