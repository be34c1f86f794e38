use windows::Win32::{
    Foundation::{COLORREF, RECT},
    Graphics::Gdi::{
        CreatePen, CreateSolidBrush, DeleteObject, FillRect, LineTo, MoveToEx, SelectObject, HDC,
        HGDIOBJ, PS_SOLID,
    },
};

use crate::geometry::{Color, Point, Rect};
use crate::platform::Canvas;

/// `Canvas` over the device context of one BeginPaint/EndPaint cycle.
pub(super) struct GdiCanvas {
    hdc: HDC,
}

impl GdiCanvas {
    /// `hdc` must come from `BeginPaint` and outlive the canvas.
    pub(super) fn new(hdc: HDC) -> Self {
        Self { hdc }
    }
}

impl Canvas for GdiCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = RECT {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        };
        // SAFETY: hdc is the paint DC for the current WM_PAINT. The brush is
        // created, used once and deleted here; it is never selected into the DC.
        unsafe {
            let brush = CreateSolidBrush(COLORREF(color.to_colorref()));
            let _ = FillRect(self.hdc, &r, brush);
            let _ = DeleteObject(HGDIOBJ(brush.0));
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        // SAFETY: hdc is the paint DC for the current WM_PAINT. The previous
        // pen is restored before our pen is deleted, so the DC never holds a
        // dangling object.
        unsafe {
            let pen = CreatePen(PS_SOLID, 1, COLORREF(color.to_colorref()));
            let previous = SelectObject(self.hdc, HGDIOBJ(pen.0));
            let _ = MoveToEx(self.hdc, from.x, from.y, None);
            let _ = LineTo(self.hdc, to.x, to.y);
            SelectObject(self.hdc, previous);
            let _ = DeleteObject(HGDIOBJ(pen.0));
        }
    }
}
