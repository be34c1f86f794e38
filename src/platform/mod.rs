// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the widget layer uses to talk to the OS.
// No `unsafe` lives here; all Win32 FFI is confined to the `win32`
// sub-module and never leaks outward.
//
// Every call except `register_class`, `create_window` and `run` is
// fire-and-forget: backends swallow failures (logging them at most).

use crate::error::Result;
use crate::geometry::{Color, Point, Rect};

pub mod params;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub(crate) mod mock;

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable identifier of a live OS window (the HWND value on Win32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Per-widget key passed through window creation so the dispatcher can find
/// the widget the creation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetKey(pub u64);

impl WidgetKey {
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        WidgetKey(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

/// Attributes of a registered window class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClass {
    pub name: String,
    /// Deliver double-click messages (`CS_DBLCLKS`).
    pub double_clicks: bool,
    pub background: Color,
}

impl WindowClass {
    /// The class every widget registers: double-clicks on, white
    /// background, arrow cursor.
    pub fn widget(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            double_clicks: true,
            background: Color::WHITE,
        }
    }
}

/// Frame style chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStyle {
    /// Resizable popup with caption, system menu, minimise and maximise
    /// boxes.
    TopLevel,
    /// Visible child embedded in its parent's client area.
    Child,
}

/// Everything a backend needs to create one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub class: String,
    pub title: String,
    pub style: WindowStyle,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub parent: Option<WindowId>,
    /// Handed back in the creation message.
    pub key: WidgetKey,
}

/// A `SetWindowPos` request. `None` leaves that aspect unchanged; z-order is
/// never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosChange {
    pub position: Option<Point>,
    pub size: Option<(i32, i32)>,
}

impl PosChange {
    pub fn move_to(x: i32, y: i32) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            size: None,
        }
    }

    pub fn resize(width: i32, height: i32) -> Self {
        Self {
            position: None,
            size: Some((width, height)),
        }
    }
}

/// Visibility state for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    Hide,
    Normal,
    Show,
    Minimized,
    Maximized,
}

/// Minimum and maximum tracking size of a window, frame included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackLimits {
    pub min: Point,
    pub max: Point,
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Drawing surface valid for the duration of one paint cycle.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn line(&mut self, from: Point, to: Point, color: Color);
}

// ── Backend ───────────────────────────────────────────────────────────────────

/// The OS windowing subsystem as the widget layer sees it.
///
/// Implementations must deliver `Message::Create` for a new window through
/// `dispatch::route` before `create_window` returns, the way
/// `CreateWindowExW` sends `WM_CREATE`.
pub trait Platform {
    /// Register a window class. Registering an existing name is not an
    /// error.
    fn register_class(&self, class: &WindowClass) -> Result<()>;

    fn create_window(&self, request: &CreateRequest) -> Result<WindowId>;

    fn destroy_window(&self, window: WindowId);

    fn set_window_pos(&self, window: WindowId, change: PosChange);

    fn set_title(&self, window: WindowId, title: &str);

    fn set_parent(&self, window: WindowId, parent: WindowId);

    /// Raw parent link as the OS reports it; may be the owner window.
    fn parent(&self, window: WindowId) -> Option<WindowId>;

    fn owner(&self, window: WindowId) -> Option<WindowId>;

    fn show(&self, window: WindowId, mode: ShowMode);

    /// Invalidate the whole client area.
    fn invalidate(&self, window: WindowId, erase: bool);

    fn set_focus(&self, window: WindowId);

    /// Arm one hover notification and one leave notification.
    fn track_mouse(&self, window: WindowId);

    /// Window rectangle in screen coordinates, frame included.
    fn window_rect(&self, window: WindowId) -> Rect;

    /// Client rectangle; `left`/`top` are always zero.
    fn client_rect(&self, window: WindowId) -> Rect;

    /// Run one BeginPaint/EndPaint cycle around `draw`.
    fn paint(&self, window: WindowId, draw: &mut dyn FnMut(&mut dyn Canvas));

    fn post_quit(&self, code: i32);

    /// Pump messages until quit is posted.
    fn run(&self) -> Result<()>;
}
