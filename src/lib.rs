// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! A thin widget layer over native windows.
//!
//! A [`Widget`] wraps one OS window: it caches geometry, bounds and title
//! before the window exists, forwards changes once it does, and turns raw
//! window messages into calls on its [`WidgetHooks`]. The [`app`] module
//! builds a small board program on top of it.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod input;
pub mod platform;
mod title;
pub mod ui;
pub mod widget;

pub use error::{Result, UiError};
pub use hooks::{NoHooks, WidgetHooks};
pub use ui::Ui;
pub use widget::Widget;
