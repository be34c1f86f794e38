// ── Geometry primitives ───────────────────────────────────────────────────────
//
// Plain integer types shared by widgets, the dispatcher and the backends.
// Coordinates are device pixels, as Win32 reports them.

/// Position or size component meaning "let the platform choose".
///
/// Same bit pattern as Win32 `CW_USEDEFAULT` (`0x80000000`).
pub const USE_DEFAULT: i32 = i32::MIN;

/// Size-bound component meaning "no constraint in this dimension".
pub const UNBOUNDED: i32 = -1;

/// A point in window or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An edge-based rectangle (`right`/`bottom` exclusive), like Win32 `RECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size anchored at `(x, y)`.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// Extra width/height a window frame adds around its client area.
///
/// Window rect size minus client rect size; zero for frameless children.
pub fn frame_overhead(window: Rect, client: Rect) -> (i32, i32) {
    (
        window.width() - client.width(),
        window.height() - client.height(),
    )
}

/// An opaque 0xRRGGBB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const BLACK: Color = Color(0x00_00_00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Win32 COLORREF layout (0x00BBGGRR).
    pub const fn to_colorref(self) -> u32 {
        let r = (self.0 >> 16) & 0xFF;
        let g = (self.0 >> 8) & 0xFF;
        let b = self.0 & 0xFF;
        b << 16 | g << 8 | r
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
