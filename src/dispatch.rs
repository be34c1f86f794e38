// ── Message dispatch ──────────────────────────────────────────────────────────
//
// One routing function for every window of every widget. Backends decode the
// raw OS message into a `Message` and call `route`; the result tells them
// whether to fall back to default processing.
//
// Window identity is an explicit map from `WindowId` to the owning widget. A
// widget enters the map when its creation message arrives (matched through
// the `WidgetKey` carried in the creation request) and leaves it when its
// window is destroyed. The map holds a strong handle, so a widget lives at
// least as long as its window.
//
// Everything here runs on the UI thread; the map is thread-local.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::geometry::{frame_overhead, Point, UNBOUNDED, USE_DEFAULT};
use crate::input::{MouseButton, MouseKeys, SizeKind, VirtualKey};
use crate::platform::{TrackLimits, WidgetKey, WindowId};
use crate::widget::Widget;

/// A decoded window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The window was just created for the widget with this key.
    Create { key: WidgetKey },
    SetFocus,
    /// Position and/or size changed. `width`/`height` include the frame.
    PositionChanged {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        moved: bool,
        sized: bool,
    },
    /// The OS asks for tracking limits; carries its defaults.
    GetMinMaxInfo(TrackLimits),
    Move { x: i32, y: i32 },
    Size { width: i32, height: i32, kind: SizeKind },
    MouseHover { x: i32, y: i32 },
    MouseLeave,
    ButtonDown { button: MouseButton, x: i32, y: i32, keys: MouseKeys },
    ButtonUp { button: MouseButton, x: i32, y: i32, keys: MouseKeys },
    DoubleClick { button: MouseButton, x: i32, y: i32, keys: MouseKeys },
    KeyDown(VirtualKey),
    MouseMove { x: i32, y: i32, keys: MouseKeys },
    /// Wheel rotation; coordinates are in screen space.
    Wheel { screen_x: i32, screen_y: i32, delta: i32, keys: MouseKeys },
    Paint,
    Close,
    Destroy,
    Other,
}

/// What the backend should do after `route` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Fully processed; return 0.
    Handled,
    /// Hand the original message to default processing.
    Default,
    /// Write these limits back into the OS query and return 0.
    TrackLimits(TrackLimits),
}

// ── Window map ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct WindowMap {
    bound: HashMap<WindowId, Widget>,
    /// Widgets whose window is being created right now.
    pending: HashMap<WidgetKey, Widget>,
}

thread_local! {
    static WINDOWS: RefCell<WindowMap> = RefCell::new(WindowMap::default());
}

/// Park `widget` until its creation message arrives.
pub(crate) fn expect_creation(widget: &Widget) {
    WINDOWS.with(|map| {
        map.borrow_mut().pending.insert(widget.key(), widget.clone());
    });
}

/// Forget a parked widget whose window was never created.
pub(crate) fn abandon_creation(key: WidgetKey) {
    WINDOWS.with(|map| {
        map.borrow_mut().pending.remove(&key);
    });
}

/// Associate `window` with `widget` and mark it live. Returns `false` if the
/// pair was already bound.
pub(crate) fn bind(window: WindowId, widget: &Widget) -> bool {
    let fresh = WINDOWS.with(|map| {
        let mut map = map.borrow_mut();
        map.pending.remove(&widget.key());
        map.bound.insert(window, widget.clone()).is_none()
    });
    let mut s = widget.state_mut();
    s.window = Some(window);
    s.live = true;
    fresh
}

fn unbind(window: WindowId) -> Option<Widget> {
    let widget = WINDOWS.with(|map| map.borrow_mut().bound.remove(&window))?;
    {
        let mut s = widget.state_mut();
        s.live = false;
        s.window = None;
        s.press = None;
        s.tracking = false;
        s.title.release();
    }
    Some(widget)
}

/// The widget bound to `window`, if any.
pub fn lookup(window: WindowId) -> Option<Widget> {
    WINDOWS.with(|map| map.borrow().bound.get(&window).cloned())
}

fn take_pending(key: WidgetKey) -> Option<Widget> {
    WINDOWS.with(|map| map.borrow_mut().pending.remove(&key))
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Route one message for `window` to its widget.
pub fn route(window: WindowId, message: Message) -> Outcome {
    if let Message::Create { key } = message {
        return on_create(window, key);
    }

    let Some(widget) = lookup(window) else {
        return Outcome::Default;
    };

    match message {
        Message::Create { .. } => Outcome::Default,

        Message::SetFocus => {
            widget.platform().set_focus(window);
            Outcome::Handled
        }

        Message::PositionChanged {
            x,
            y,
            width,
            height,
            moved,
            sized,
        } => {
            let overhead = if sized {
                let platform = widget.platform();
                Some(frame_overhead(platform.window_rect(window), platform.client_rect(window)))
            } else {
                None
            };
            let mut s = widget.state_mut();
            if let Some((ncw, nch)) = overhead {
                s.width = width - ncw;
                s.height = height - nch;
            }
            if moved {
                s.x = x;
                s.y = y;
            }
            Outcome::Default
        }

        Message::GetMinMaxInfo(mut limits) => {
            let platform = widget.platform();
            let (ncw, nch) = frame_overhead(platform.window_rect(window), platform.client_rect(window));
            let (min_w, min_h) = widget.min_bound();
            let (max_w, max_h) = widget.max_bound();
            if min_w != UNBOUNDED {
                limits.min.x = min_w + ncw;
            }
            if min_h != UNBOUNDED {
                limits.min.y = min_h + nch;
            }
            if max_w != UNBOUNDED {
                limits.max.x = max_w + ncw;
            }
            if max_h != UNBOUNDED {
                limits.max.y = max_h + nch;
            }
            Outcome::TrackLimits(limits)
        }

        Message::Move { x, y } => {
            widget.with_hooks(|h, w| h.moved(w, x, y));
            Outcome::Handled
        }

        Message::Size {
            width,
            height,
            kind,
        } => {
            widget.with_hooks(|h, w| h.resized(w, width, height, kind));
            Outcome::Handled
        }

        Message::MouseHover { x, y } => {
            widget.with_hooks(|h, w| h.mouse_hover(w, x, y));
            Outcome::Handled
        }

        Message::MouseLeave => {
            widget.with_hooks(|h, w| h.mouse_leave(w));
            let mut s = widget.state_mut();
            s.press = None;
            s.tracking = false;
            Outcome::Handled
        }

        Message::ButtonDown { button, x, y, keys } => {
            widget.with_hooks(|h, w| h.mouse_press(w, button, x, y, keys));
            widget.state_mut().press = Some(Point::new(x, y));
            Outcome::Handled
        }

        Message::ButtonUp { button, x, y, keys } => {
            widget.with_hooks(|h, w| h.mouse_release(w, button, x, y, keys));
            let pressed_at = widget.state_mut().press.take();
            if pressed_at == Some(Point::new(x, y)) {
                widget.with_hooks(|h, w| h.clicked(w, button, x, y, keys));
            }
            Outcome::Handled
        }

        Message::DoubleClick { button, x, y, keys } => {
            widget.with_hooks(|h, w| h.double_clicked(w, button, x, y, keys));
            Outcome::Handled
        }

        Message::KeyDown(key) => {
            widget.with_hooks(|h, w| h.key_down(w, key));
            Outcome::Handled
        }

        Message::MouseMove { x, y, keys } => {
            widget.with_hooks(|h, w| h.mouse_move(w, x, y, keys));
            let arm = {
                let s = widget.state();
                s.track_enabled && !s.tracking
            };
            if arm {
                widget.platform().track_mouse(window);
                widget.state_mut().tracking = true;
            }
            Outcome::Handled
        }

        Message::Wheel {
            screen_x,
            screen_y,
            delta,
            keys,
        } => {
            let origin = widget.platform().window_rect(window);
            let (x, y) = (screen_x - origin.left, screen_y - origin.top);
            widget.with_hooks(|h, w| h.wheel_change(w, x, y, delta, keys));
            Outcome::Handled
        }

        Message::Paint => {
            // A skipped render would leave the region invalid forever; let
            // default processing validate it instead.
            if widget.with_hooks(|h, w| h.render(w)) {
                Outcome::Handled
            } else {
                Outcome::Default
            }
        }

        Message::Close => {
            widget.platform().destroy_window(window);
            Outcome::Handled
        }

        Message::Destroy => {
            if !widget.with_hooks(|h, w| h.destroyed(w)) {
                // Destroyed from inside its own hook; the outer call runs it.
                widget.state_mut().destroyed_pending = true;
            }
            unbind(window);
            widget.platform().post_quit(0);
            Outcome::Handled
        }

        Message::Other => Outcome::Default,
    }
}

fn on_create(window: WindowId, key: WidgetKey) -> Outcome {
    let Some(widget) = take_pending(key) else {
        return Outcome::Default;
    };
    bind(window, &widget);

    // Top-level windows were created at width × height including the frame;
    // grow them so the client area gets the requested size.
    let platform = widget.platform();
    let (width, height) = {
        let s = widget.state();
        (s.width, s.height)
    };
    let explicit = width != USE_DEFAULT && height != USE_DEFAULT;
    if explicit && platform.parent(window).is_none() {
        let (ncw, nch) = frame_overhead(platform.window_rect(window), platform.client_rect(window));
        platform.set_window_pos(
            window,
            crate::platform::PosChange::resize(width + ncw, height + nch),
        );
    }

    widget.with_hooks(|h, w| h.created(w));
    log::debug!("@{} [{}] created.", widget.class_name(), window);
    Outcome::Handled
}

// ── Tests ─────────────────────────────────────────────────────────────────────
