// ── Win32 backend ─────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register widget window classes against the shared window procedure.
//   • Create, move, resize, re-parent, show and destroy widget windows.
//   • Run the Win32 message loop.
//   • Decode every message and hand it to `dispatch::route`.
//   • Expose a safe error-dialog helper for use by main().
//
// Results of fire-and-forget calls are intentionally discarded.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, BOOL, COLORREF, ERROR_CLASS_ALREADY_EXISTS, HINSTANCE, HWND, LPARAM,
            LRESULT, RECT, WPARAM,
        },
        Graphics::Gdi::{BeginPaint, CreateSolidBrush, EndPaint, InvalidateRect, PAINTSTRUCT},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Input::KeyboardAndMouse::{SetFocus, TrackMouseEvent, TME_HOVER, TME_LEAVE, TRACKMOUSEEVENT},
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
                GetMessageW, GetParent, GetWindow, GetWindowRect, LoadCursorW, MessageBoxW,
                PostQuitMessage, RegisterClassExW, SetParent, SetWindowPos, SetWindowTextW,
                ShowWindow, TranslateMessage, CS_DBLCLKS, GW_OWNER, HMENU, IDC_ARROW,
                MB_ICONERROR, MB_OK, MSG, SET_WINDOW_POS_FLAGS, SHOW_WINDOW_CMD, SWP_NOMOVE,
                SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_SHOW, SW_SHOWMAXIMIZED, SW_SHOWMINIMIZED,
                SW_SHOWNORMAL, WINDOW_EX_STYLE, WNDCLASSEXW, WNDCLASS_STYLES,
                WS_CAPTION, WS_CHILD, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_POPUP, WS_SYSMENU,
                WS_THICKFRAME, WS_VISIBLE,
            },
        },
    },
};

use super::messages::{decode, write_track_limits};
use super::paint::GdiCanvas;
use crate::dispatch::{self, Outcome};
use crate::error::{Result, UiError};
use crate::geometry::Rect;
use crate::platform::{
    Canvas, CreateRequest, Platform, PosChange, ShowMode, WindowClass, WindowId, WindowStyle,
};

// ── Handle conversion ─────────────────────────────────────────────────────────

fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as isize)
}

fn rect(r: RECT) -> Rect {
    Rect::new(r.left, r.top, r.right, r.bottom)
}

/// Convert string to a null-terminated wide string for Win32 APIs.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// The native windowing subsystem of the current process.
pub struct Win32Platform {
    hinstance: HINSTANCE,
}

impl Win32Platform {
    pub fn new() -> Result<Self> {
        // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
        // always valid for the process lifetime and never fails in practice.
        let hmodule = unsafe { GetModuleHandleW(None) }?;

        // HINSTANCE and HMODULE represent the same underlying value on Windows.
        Ok(Self {
            hinstance: HINSTANCE(hmodule.0),
        })
    }
}

impl Platform for Win32Platform {
    fn register_class(&self, class: &WindowClass) -> Result<()> {
        // SAFETY: LoadCursorW with IDC_ARROW always succeeds; the arrow cursor is
        // a built-in resource guaranteed to exist on all Windows versions.
        let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }?;

        // SAFETY: CreateSolidBrush has no preconditions. The brush is owned by
        // the class for the rest of the process.
        let background = unsafe { CreateSolidBrush(COLORREF(class.background.to_colorref())) };

        let name = wide(&class.name);
        let wndclass = WNDCLASSEXW {
            // WNDCLASSEXW is ~80 bytes; the cast to u32 is always lossless.
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: if class.double_clicks {
                CS_DBLCLKS
            } else {
                WNDCLASS_STYLES(0)
            },
            lpfnWndProc: Some(wnd_proc),
            hInstance: self.hinstance,
            hCursor: cursor,
            hbrBackground: background,
            lpszClassName: PCWSTR(name.as_ptr()),
            ..Default::default()
        };

        // SAFETY: wndclass is fully initialised with valid handles; `name` is a
        // null-terminated UTF-16 string alive for the duration of the call.
        let atom = unsafe { RegisterClassExW(&wndclass) };
        if atom == 0 {
            // SAFETY: reads thread-local state set by RegisterClassExW above.
            let code = unsafe { GetLastError() };
            if code == ERROR_CLASS_ALREADY_EXISTS {
                return Ok(());
            }
            return Err(UiError::Win32 {
                function: "RegisterClassExW",
                code: code.0,
            });
        }
        Ok(())
    }

    fn create_window(&self, request: &CreateRequest) -> Result<WindowId> {
        let class = wide(&request.class);
        let title = wide(&request.title);
        let (style, parent) = match request.style {
            WindowStyle::TopLevel => (
                WS_POPUP | WS_THICKFRAME | WS_CAPTION | WS_SYSMENU | WS_MAXIMIZEBOX | WS_MINIMIZEBOX,
                HWND::default(),
            ),
            WindowStyle::Child => (
                WS_CHILD | WS_VISIBLE,
                request.parent.map(hwnd).unwrap_or_default(),
            ),
        };

        // SAFETY: the class was registered by Ui::ensure_class; class and title
        // are null-terminated and outlive the call. The creation parameter is
        // the widget key as an integer and is never dereferenced.
        let created = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class.as_ptr()),
                PCWSTR(title.as_ptr()),
                style,
                request.x,
                request.y,
                request.width,
                request.height,
                parent,
                HMENU::default(),
                self.hinstance,
                Some(request.key.0 as usize as *const c_void),
            )
        };

        created.map(window_id).map_err(|e| UiError::WindowCreation {
            class: request.class.clone(),
            code: e.code().0 as u32,
        })
    }

    fn destroy_window(&self, window: WindowId) {
        // SAFETY: DestroyWindow on a stale handle fails harmlessly.
        let _ = unsafe { DestroyWindow(hwnd(window)) };
    }

    fn set_window_pos(&self, window: WindowId, change: PosChange) {
        let mut flags: SET_WINDOW_POS_FLAGS = SWP_NOZORDER;
        let (x, y) = match change.position {
            Some(p) => (p.x, p.y),
            None => {
                flags |= SWP_NOMOVE;
                (0, 0)
            }
        };
        let (cx, cy) = match change.size {
            Some(size) => size,
            None => {
                flags |= SWP_NOSIZE;
                (0, 0)
            }
        };
        // SAFETY: window is a handle this backend created; no insert-after
        // window is used because SWP_NOZORDER is always set.
        let _ = unsafe { SetWindowPos(hwnd(window), HWND::default(), x, y, cx, cy, flags) };
    }

    fn set_title(&self, window: WindowId, title: &str) {
        let text = wide(title);
        // SAFETY: text is null-terminated and alive for the call.
        let _ = unsafe { SetWindowTextW(hwnd(window), PCWSTR(text.as_ptr())) };
    }

    fn set_parent(&self, window: WindowId, parent: WindowId) {
        // SAFETY: both handles were created by this backend.
        let _ = unsafe { SetParent(hwnd(window), hwnd(parent)) };
    }

    fn parent(&self, window: WindowId) -> Option<WindowId> {
        // SAFETY: GetParent only reads window-manager state.
        unsafe { GetParent(hwnd(window)) }
            .ok()
            .filter(|h| !h.is_invalid())
            .map(window_id)
    }

    fn owner(&self, window: WindowId) -> Option<WindowId> {
        // SAFETY: GetWindow only reads window-manager state.
        unsafe { GetWindow(hwnd(window), GW_OWNER) }
            .ok()
            .filter(|h| !h.is_invalid())
            .map(window_id)
    }

    fn show(&self, window: WindowId, mode: ShowMode) {
        let cmd: SHOW_WINDOW_CMD = match mode {
            ShowMode::Hide => SW_HIDE,
            ShowMode::Normal => SW_SHOWNORMAL,
            ShowMode::Show => SW_SHOW,
            ShowMode::Minimized => SW_SHOWMINIMIZED,
            ShowMode::Maximized => SW_SHOWMAXIMIZED,
        };
        // SAFETY: ShowWindow returns the previous visibility state; ignored.
        let _ = unsafe { ShowWindow(hwnd(window), cmd) };
    }

    fn invalidate(&self, window: WindowId, erase: bool) {
        // SAFETY: a None rect invalidates the whole client area.
        let _ = unsafe { InvalidateRect(hwnd(window), None, BOOL::from(erase)) };
    }

    fn set_focus(&self, window: WindowId) {
        // SAFETY: window belongs to the calling (UI) thread.
        let _ = unsafe { SetFocus(hwnd(window)) };
    }

    fn track_mouse(&self, window: WindowId) {
        let mut track = TRACKMOUSEEVENT {
            cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_HOVER | TME_LEAVE,
            hwndTrack: hwnd(window),
            dwHoverTime: 1,
        };
        // SAFETY: track is fully initialised and lives for the call.
        let _ = unsafe { TrackMouseEvent(&mut track) };
    }

    fn window_rect(&self, window: WindowId) -> Rect {
        let mut r = RECT::default();
        // SAFETY: &mut r is a valid RECT; on failure it stays zeroed.
        let _ = unsafe { GetWindowRect(hwnd(window), &mut r) };
        rect(r)
    }

    fn client_rect(&self, window: WindowId) -> Rect {
        let mut r = RECT::default();
        // SAFETY: &mut r is a valid RECT; on failure it stays zeroed.
        let _ = unsafe { GetClientRect(hwnd(window), &mut r) };
        rect(r)
    }

    fn paint(&self, window: WindowId, draw: &mut dyn FnMut(&mut dyn Canvas)) {
        let h = hwnd(window);
        let mut ps = PAINTSTRUCT::default();
        // SAFETY: called while handling WM_PAINT for h; every BeginPaint is
        // matched by the EndPaint below, after the canvas is gone.
        let hdc = unsafe { BeginPaint(h, &mut ps) };
        {
            let mut canvas = GdiCanvas::new(hdc);
            draw(&mut canvas);
        }
        // SAFETY: ps was filled by the BeginPaint above.
        let _ = unsafe { EndPaint(h, &ps) };
    }

    fn post_quit(&self, code: i32) {
        // SAFETY: posts WM_QUIT to this thread's queue; always safe.
        unsafe { PostQuitMessage(code) };
    }

    fn run(&self) -> Result<()> {
        let mut msg = MSG::default();

        loop {
            // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
            // messages for all windows on this thread; 0,0 filter accepts all.
            let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

            match ret.0 {
                // GetMessage returns -1 on error.
                -1 => return Err(last_error("GetMessageW")),
                // Returns 0 when WM_QUIT is retrieved; exit the loop.
                0 => break,
                _ => unsafe {
                    // SAFETY: msg was populated by a successful GetMessage call.
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                },
            }
        }

        Ok(())
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc for every widget class.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    // SAFETY: parameters come straight from Windows for this msg.
    let message = unsafe { decode(msg, wparam, lparam) };

    match dispatch::route(window_id(hwnd), message) {
        Outcome::Handled => LRESULT(0),
        // SAFETY: hwnd and message parameters are valid; Windows provided them.
        Outcome::Default => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        Outcome::TrackLimits(limits) => {
            // SAFETY: only WM_GETMINMAXINFO produces TrackLimits.
            unsafe { write_track_limits(lparam, limits) };
            LRESULT(0)
        }
    }
}

// ── Helper dialogs ────────────────────────────────────────────────────────────

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when startup returns an error.
pub fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);

    // SAFETY: msg_wide is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            w!("Gobang \u{2014} Fatal Error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `UiError`.
///
/// Call immediately after a Win32 function that signals failure; `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> UiError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    UiError::Win32 {
        function,
        code: code.0,
    }
}
