// ── Input vocabulary ──────────────────────────────────────────────────────────
//
// Semantic types handed to widget hooks. No Win32 imports; the backend
// translates raw message parameters into these.

/// Which mouse button produced a press, release or double-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Key-state bits that accompany mouse messages (`MK_*` flags in WPARAM).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseKeys(pub u32);

impl MouseKeys {
    pub const LBUTTON: u32 = 0x0001;
    pub const RBUTTON: u32 = 0x0002;
    pub const SHIFT: u32 = 0x0004;
    pub const CONTROL: u32 = 0x0008;
    pub const MBUTTON: u32 = 0x0010;

    pub fn left(self) -> bool {
        self.0 & Self::LBUTTON != 0
    }

    pub fn right(self) -> bool {
        self.0 & Self::RBUTTON != 0
    }

    pub fn middle(self) -> bool {
        self.0 & Self::MBUTTON != 0
    }

    pub fn shift(self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    pub fn control(self) -> bool {
        self.0 & Self::CONTROL != 0
    }
}

/// A Win32 virtual-key code (`VK_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    pub const ESCAPE: VirtualKey = VirtualKey(0x1B);
    pub const SPACE: VirtualKey = VirtualKey(0x20);
}

/// The reason carried by a size notification (`SIZE_*` in WPARAM).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
    MaxShow,
    MaxHide,
}

impl SizeKind {
    /// Decode the WPARAM of a size notification. Unknown values read as
    /// `Restored`, which is what the platform reports for a plain resize.
    pub fn from_raw(raw: usize) -> Self {
        match raw {
            1 => Self::Minimized,
            2 => Self::Maximized,
            3 => Self::MaxShow,
            4 => Self::MaxHide,
            _ => Self::Restored,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
