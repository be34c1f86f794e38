// ── Message parameter decoding ────────────────────────────────────────────────
//
// Bit-level helpers for WPARAM/LPARAM payloads. Pure integer code so the
// decoding rules are testable on any host; the Win32 backend passes
// `wparam.0` / `lparam.0` straight in.

use crate::input::MouseKeys;

/// Low 16 bits, unsigned (`LOWORD`).
#[inline]
pub fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

/// Bits 16..32, unsigned (`HIWORD`).
#[inline]
pub fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Signed x/y packed in an LPARAM (`GET_X_LPARAM` / `GET_Y_LPARAM`).
///
/// Sign-extends each half so positions left of or above the primary
/// monitor come out negative.
#[inline]
pub fn lparam_point(lparam: isize) -> (i32, i32) {
    let raw = lparam as usize;
    (loword(raw) as i16 as i32, hiword(raw) as i16 as i32)
}

/// Unsigned width/height packed in an LPARAM (size notifications).
#[inline]
pub fn lparam_size(lparam: isize) -> (i32, i32) {
    let raw = lparam as usize;
    (loword(raw) as i32, hiword(raw) as i32)
}

/// Signed wheel rotation in the high word (`GET_WHEEL_DELTA_WPARAM`).
#[inline]
pub fn wheel_delta(wparam: usize) -> i32 {
    hiword(wparam) as i16 as i32
}

/// `MK_*` key state for mouse messages.
///
/// Wheel messages keep it in the low word alongside the delta; for other
/// mouse messages the low word is the whole value.
#[inline]
pub fn mouse_keys(wparam: usize) -> MouseKeys {
    MouseKeys(loword(wparam) as u32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
