// ── Widget hooks ──────────────────────────────────────────────────────────────
//
// The overridable half of a widget. The dispatcher decodes messages and keeps
// the bookkeeping; everything a concrete widget does lives in an implementation
// of `WidgetHooks`. Every method defaults to doing nothing, so implementors
// override only the events they care about.

use crate::input::{MouseButton, MouseKeys, SizeKind, VirtualKey};
use crate::widget::Widget;

/// Event callbacks for one widget.
///
/// Each hook receives the widget it belongs to, so it can query geometry or
/// call mutators (`redraw`, `set_title`, …) in response.
#[allow(unused_variables)]
pub trait WidgetHooks {
    /// Window class this widget registers under. Widgets sharing hook types
    /// share a class.
    fn class_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The OS window exists and is bound to `widget`.
    fn created(&mut self, widget: &Widget) {}

    /// The window is being destroyed. Geometry is still readable.
    fn destroyed(&mut self, widget: &Widget) {}

    /// Client-area origin moved to `(x, y)`.
    fn moved(&mut self, widget: &Widget, x: i32, y: i32) {}

    /// Client area is now `width` × `height`.
    fn resized(&mut self, widget: &Widget, width: i32, height: i32, kind: SizeKind) {}

    /// Paint the client area.
    ///
    /// The default runs an empty paint cycle so the OS considers the
    /// window validated.
    fn render(&mut self, widget: &Widget) {
        widget.paint(|_| {});
    }

    /// The cursor rested over the window (needs `enable_track(true)`).
    fn mouse_hover(&mut self, widget: &Widget, x: i32, y: i32) {}

    /// The cursor left the window (needs `enable_track(true)`).
    fn mouse_leave(&mut self, widget: &Widget) {}

    fn mouse_press(&mut self, widget: &Widget, button: MouseButton, x: i32, y: i32, keys: MouseKeys) {}

    fn mouse_release(&mut self, widget: &Widget, button: MouseButton, x: i32, y: i32, keys: MouseKeys) {}

    /// Press and release landed on exactly the same pixel.
    fn clicked(&mut self, widget: &Widget, button: MouseButton, x: i32, y: i32, keys: MouseKeys) {}

    fn double_clicked(&mut self, widget: &Widget, button: MouseButton, x: i32, y: i32, keys: MouseKeys) {}

    fn mouse_move(&mut self, widget: &Widget, x: i32, y: i32, keys: MouseKeys) {}

    /// Wheel rotated by `delta` (multiples of 120 per notch) with the
    /// cursor at window-relative `(x, y)`.
    fn wheel_change(&mut self, widget: &Widget, x: i32, y: i32, delta: i32, keys: MouseKeys) {}

    fn key_down(&mut self, widget: &Widget, key: VirtualKey) {}
}

/// Hooks that ignore every event. Useful for plain container windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl WidgetHooks for NoHooks {}
