// ── Title text buffer ─────────────────────────────────────────────────────────
//
// Owned storage for a widget's title. The allocation is reused while new
// titles fit in the longest length allocated so far, and replaced only when
// a longer title arrives.

#[derive(Debug, Default)]
pub(crate) struct TitleBuffer {
    text: String,
    /// Length of the longest title this allocation was sized for.
    capacity: usize,
}

impl TitleBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the stored title. Returns `true` when a new allocation was
    /// made.
    pub(crate) fn set(&mut self, title: &str) -> bool {
        if title.len() <= self.capacity {
            self.text.clear();
            self.text.push_str(title);
            false
        } else {
            self.text = String::from(title);
            self.capacity = title.len();
            true
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Tracked capacity, in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop the allocation entirely.
    pub(crate) fn release(&mut self) {
        self.text = String::new();
        self.capacity = 0;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
