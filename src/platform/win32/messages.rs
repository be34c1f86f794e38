use windows::Win32::{
    Foundation::{LPARAM, POINT, WPARAM},
    UI::WindowsAndMessaging::{
        CREATESTRUCTW, MINMAXINFO, SWP_NOMOVE, SWP_NOSIZE, WINDOWPOS, WM_CLOSE, WM_CREATE,
        WM_DESTROY, WM_GETMINMAXINFO, WM_KEYDOWN, WM_LBUTTONDBLCLK, WM_LBUTTONDOWN,
        WM_LBUTTONUP, WM_MBUTTONDBLCLK, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEMOVE,
        WM_MOUSEWHEEL, WM_MOVE, WM_PAINT, WM_RBUTTONDBLCLK, WM_RBUTTONDOWN, WM_RBUTTONUP,
        WM_SETFOCUS, WM_SIZE, WM_WINDOWPOSCHANGED,
    },
};

use crate::dispatch::Message;
use crate::geometry::Point;
use crate::input::{MouseButton, SizeKind, VirtualKey};
use crate::platform::params::{loword, lparam_point, lparam_size, mouse_keys, wheel_delta};
use crate::platform::{TrackLimits, WidgetKey};

// Posted by TrackMouseEvent; declared locally to keep the feature list short.
const WM_MOUSEHOVER: u32 = 0x02A1;
const WM_MOUSELEAVE: u32 = 0x02A3;

/// Decode one raw window message.
///
/// # Safety
/// `wparam`/`lparam` must be the parameters Windows delivered with `msg`:
/// for `WM_CREATE`, `WM_WINDOWPOSCHANGED` and `WM_GETMINMAXINFO` the LPARAM
/// is dereferenced as the structure pointer the message documents.
pub(super) unsafe fn decode(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Message {
    let (w, l) = (wparam.0, lparam.0);
    match msg {
        WM_CREATE => {
            // SAFETY: WM_CREATE's LPARAM points at the CREATESTRUCTW for this
            // window, valid for the duration of the message.
            let cs = unsafe { &*(l as *const CREATESTRUCTW) };
            Message::Create {
                key: WidgetKey(cs.lpCreateParams as usize as u64),
            }
        }

        WM_SETFOCUS => Message::SetFocus,

        WM_WINDOWPOSCHANGED => {
            // SAFETY: WM_WINDOWPOSCHANGED's LPARAM points at a WINDOWPOS owned
            // by the sender for the duration of the message.
            let pos = unsafe { &*(l as *const WINDOWPOS) };
            Message::PositionChanged {
                x: pos.x,
                y: pos.y,
                width: pos.cx,
                height: pos.cy,
                moved: (pos.flags & SWP_NOMOVE).0 == 0,
                sized: (pos.flags & SWP_NOSIZE).0 == 0,
            }
        }

        WM_GETMINMAXINFO => {
            // SAFETY: WM_GETMINMAXINFO's LPARAM points at a MINMAXINFO the
            // system pre-filled with its defaults.
            let info = unsafe { &*(l as *const MINMAXINFO) };
            Message::GetMinMaxInfo(TrackLimits {
                min: point(info.ptMinTrackSize),
                max: point(info.ptMaxTrackSize),
            })
        }

        WM_MOVE => {
            let (x, y) = lparam_point(l);
            Message::Move { x, y }
        }

        WM_SIZE => {
            let (width, height) = lparam_size(l);
            Message::Size {
                width,
                height,
                kind: SizeKind::from_raw(w),
            }
        }

        WM_MOUSEHOVER => {
            let (x, y) = lparam_point(l);
            Message::MouseHover { x, y }
        }

        WM_MOUSELEAVE => Message::MouseLeave,

        WM_LBUTTONDOWN | WM_MBUTTONDOWN | WM_RBUTTONDOWN => {
            let (x, y) = lparam_point(l);
            Message::ButtonDown {
                button: button_of(msg),
                x,
                y,
                keys: mouse_keys(w),
            }
        }

        WM_LBUTTONUP | WM_MBUTTONUP | WM_RBUTTONUP => {
            let (x, y) = lparam_point(l);
            Message::ButtonUp {
                button: button_of(msg),
                x,
                y,
                keys: mouse_keys(w),
            }
        }

        WM_LBUTTONDBLCLK | WM_MBUTTONDBLCLK | WM_RBUTTONDBLCLK => {
            let (x, y) = lparam_point(l);
            Message::DoubleClick {
                button: button_of(msg),
                x,
                y,
                keys: mouse_keys(w),
            }
        }

        WM_KEYDOWN => Message::KeyDown(VirtualKey(loword(w))),

        WM_MOUSEMOVE => {
            let (x, y) = lparam_point(l);
            Message::MouseMove {
                x,
                y,
                keys: mouse_keys(w),
            }
        }

        WM_MOUSEWHEEL => {
            let (screen_x, screen_y) = lparam_point(l);
            Message::Wheel {
                screen_x,
                screen_y,
                delta: wheel_delta(w),
                keys: mouse_keys(w),
            }
        }

        WM_PAINT => Message::Paint,
        WM_CLOSE => Message::Close,
        WM_DESTROY => Message::Destroy,
        _ => Message::Other,
    }
}

/// Write dispatcher-computed limits back into a `WM_GETMINMAXINFO` query.
///
/// # Safety
/// `lparam` must be the LPARAM of a `WM_GETMINMAXINFO` currently being
/// handled.
pub(super) unsafe fn write_track_limits(lparam: LPARAM, limits: TrackLimits) {
    // SAFETY: caller guarantees lparam is the MINMAXINFO of an in-flight
    // WM_GETMINMAXINFO; the structure is writable for the message duration.
    let info = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
    info.ptMinTrackSize = POINT {
        x: limits.min.x,
        y: limits.min.y,
    };
    info.ptMaxTrackSize = POINT {
        x: limits.max.x,
        y: limits.max.y,
    };
}

fn button_of(msg: u32) -> MouseButton {
    match msg {
        WM_MBUTTONDOWN | WM_MBUTTONUP | WM_MBUTTONDBLCLK => MouseButton::Middle,
        WM_RBUTTONDOWN | WM_RBUTTONUP | WM_RBUTTONDBLCLK => MouseButton::Right,
        _ => MouseButton::Left,
    }
}

fn point(p: POINT) -> Point {
    Point::new(p.x, p.y)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
