// ── Board application shell ───────────────────────────────────────────────────
//
// The concrete program built on the widget layer: a resizable top-level
// `Frame` hosting one `Board` child that draws a 15 × 15 grid, highlights the
// intersection under the mouse and reports clicked intersections in the frame
// title. There are no game rules; the board only demonstrates the hooks.
//
// Everything here is single-threaded and lives on the UI thread.

use std::path::PathBuf;

use crate::config::{self, WindowConfig};
use crate::error::Result;
use crate::geometry::{Color, Point, Rect};
use crate::hooks::WidgetHooks;
use crate::input::{MouseButton, MouseKeys, SizeKind, VirtualKey};
use crate::ui::Ui;
use crate::widget::Widget;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Lines per side of the board.
pub const LINES: i32 = 15;

/// Gap between the frame's client edge and the board, in pixels.
pub const MARGIN: i32 = 8;

const BOARD_COLOR: Color = Color::rgb(0xDC, 0xB3, 0x5C);
const LINE_COLOR: Color = Color::BLACK;
const HOVER_COLOR: Color = Color::rgb(0xC0, 0x30, 0x30);

/// Where the grid sits inside a board client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    origin: Point,
    spacing: i32,
}

impl BoardLayout {
    /// Centre the largest grid that fits `width` × `height` with half a
    /// cell of padding. `None` when the area is too small to draw.
    pub fn fit(width: i32, height: i32) -> Option<Self> {
        let spacing = width.min(height) / LINES;
        if spacing < 2 {
            return None;
        }
        let span = spacing * (LINES - 1);
        Some(Self {
            origin: Point::new((width - span) / 2, (height - span) / 2),
            spacing,
        })
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Pixel position of intersection `(col, row)`.
    pub fn intersection(&self, col: i32, row: i32) -> Point {
        Point::new(
            self.origin.x + col * self.spacing,
            self.origin.y + row * self.spacing,
        )
    }

    /// Intersection nearest to `(x, y)`, if it lies on the board.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let half = self.spacing / 2;
        let col = (x - self.origin.x + half).div_euclid(self.spacing);
        let row = (y - self.origin.y + half).div_euclid(self.spacing);
        let on_board = (0..LINES).contains(&col) && (0..LINES).contains(&row);
        on_board.then_some((col, row))
    }
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// Hooks of the grid child.
pub struct Board {
    /// Frame title without the click suffix.
    base_title: String,
    hover: Option<(i32, i32)>,
}

impl Board {
    pub fn new(base_title: &str) -> Self {
        Self {
            base_title: base_title.to_owned(),
            hover: None,
        }
    }

    fn layout(widget: &Widget) -> Option<BoardLayout> {
        BoardLayout::fit(widget.width(), widget.height())
    }

    fn update_hover(&mut self, widget: &Widget, x: i32, y: i32) {
        let cell = Self::layout(widget).and_then(|l| l.cell_at(x, y));
        if cell != self.hover {
            self.hover = cell;
            widget.redraw(false);
        }
    }

    fn report(&self, widget: &Widget, title: &str) {
        if let Some(frame) = widget.parent() {
            frame.set_title(title);
        }
    }
}

impl WidgetHooks for Board {
    fn class_name(&self) -> &'static str {
        "GobangBoard"
    }

    fn render(&mut self, widget: &Widget) {
        let (width, height) = (widget.width(), widget.height());
        let layout = BoardLayout::fit(width, height);
        let hover = self.hover;
        widget.paint(|canvas| {
            canvas.fill_rect(Rect::new(0, 0, width, height), BOARD_COLOR);
            let Some(layout) = layout else { return };
            for i in 0..LINES {
                canvas.line(layout.intersection(0, i), layout.intersection(LINES - 1, i), LINE_COLOR);
                canvas.line(layout.intersection(i, 0), layout.intersection(i, LINES - 1), LINE_COLOR);
            }
            if let Some((col, row)) = hover {
                let p = layout.intersection(col, row);
                let r = (layout.spacing() / 4).max(1);
                canvas.fill_rect(Rect::new(p.x - r, p.y - r, p.x + r + 1, p.y + r + 1), HOVER_COLOR);
            }
        });
    }

    fn mouse_press(&mut self, widget: &Widget, _button: MouseButton, _x: i32, _y: i32, _keys: MouseKeys) {
        // Child windows only receive keys once they hold focus.
        widget.focus();
    }

    fn mouse_hover(&mut self, widget: &Widget, x: i32, y: i32) {
        self.update_hover(widget, x, y);
    }

    fn mouse_move(&mut self, widget: &Widget, x: i32, y: i32, _keys: MouseKeys) {
        // Between hover and leave the highlight follows the cursor.
        if self.hover.is_some() {
            self.update_hover(widget, x, y);
        }
    }

    fn mouse_leave(&mut self, widget: &Widget) {
        if self.hover.take().is_some() {
            widget.redraw(false);
        }
    }

    fn clicked(&mut self, widget: &Widget, button: MouseButton, x: i32, y: i32, _keys: MouseKeys) {
        if button != MouseButton::Left {
            return;
        }
        let Some((col, row)) = Self::layout(widget).and_then(|l| l.cell_at(x, y)) else {
            log::debug!("click at ({x}, {y}) is off the grid");
            return;
        };
        log::info!("intersection ({col}, {row}) clicked");
        self.report(widget, &format!("{} ({col}, {row})", self.base_title));
    }

    fn key_down(&mut self, widget: &Widget, key: VirtualKey) {
        if key == VirtualKey::ESCAPE {
            self.report(widget, &self.base_title);
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Hooks of the top-level window.
pub struct Frame {
    board: Widget,
    config: WindowConfig,
    config_path: Option<PathBuf>,
    last_size: SizeKind,
}

impl WidgetHooks for Frame {
    fn class_name(&self) -> &'static str {
        "GobangFrame"
    }

    fn resized(&mut self, _widget: &Widget, width: i32, height: i32, kind: SizeKind) {
        self.last_size = kind;
        if kind == SizeKind::Minimized {
            return;
        }
        self.board.move_to(MARGIN, MARGIN);
        self.board
            .resize((width - 2 * MARGIN).max(0), (height - 2 * MARGIN).max(0));
    }

    fn key_down(&mut self, widget: &Widget, key: VirtualKey) {
        if key == VirtualKey::ESCAPE {
            widget.set_title(&self.config.title);
        }
    }

    fn destroyed(&mut self, widget: &Widget) {
        // Only the restored geometry is worth keeping: a minimised window sits
        // off-screen and a maximised one fills the work area.
        if !matches!(self.last_size, SizeKind::Minimized | SizeKind::Maximized) {
            self.config.capture(widget);
        }
        let Some(path) = &self.config_path else { return };
        match config::save_to(path, &self.config) {
            Ok(()) => log::debug!("saved config to {}", path.display()),
            Err(e) => log::warn!("could not save config to {}: {e}", path.display()),
        }
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// The live widgets of a running shell.
pub struct Shell {
    pub frame: Widget,
    pub board: Widget,
}

/// Create the frame and its board according to `config`.
///
/// The frame's geometry is written back to `config_path` when it is
/// destroyed. Fails only when a window cannot be created.
pub fn build(ui: &Ui, config: WindowConfig, config_path: Option<PathBuf>) -> Result<Shell> {
    let board = Widget::with_size(
        ui,
        Board::new(&config.title),
        (config.width - 2 * MARGIN).max(0),
        (config.height - 2 * MARGIN).max(0),
    );
    board.move_to(MARGIN, MARGIN);
    board.enable_track(config.hover_tracking);

    let frame = Widget::new(
        ui,
        Frame {
            board: board.clone(),
            config: config.clone(),
            config_path,
            last_size: SizeKind::Restored,
        },
    );
    config.apply(&frame);
    frame.add_widget(&board)?;

    log::info!(
        "board ready: {}x{} client, hover tracking {}",
        frame.width(),
        frame.height(),
        if config.hover_tracking { "on" } else { "off" }
    );
    Ok(Shell { frame, board })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
