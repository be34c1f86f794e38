// ── Widget ────────────────────────────────────────────────────────────────────
//
// A `Widget` is a cheap, clonable handle to one window wrapper: cached
// geometry, size bounds, title text and the interaction flags the dispatcher
// maintains. Before `setup` every mutator only touches the cache; afterwards
// it also forwards the change to the live window.
//
// State and hooks sit in separate cells so a hook may call any mutator on its
// own widget, even ones that make the OS send a message back synchronously.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::dispatch;
use crate::error::Result;
use crate::geometry::{frame_overhead, Point, UNBOUNDED, USE_DEFAULT};
use crate::hooks::WidgetHooks;
use crate::platform::{Canvas, CreateRequest, Platform, PosChange, ShowMode, WidgetKey, WindowId, WindowStyle};
use crate::title::TitleBuffer;
use crate::ui::Ui;

#[derive(Clone)]
pub struct Widget {
    inner: Rc<WidgetInner>,
}

struct WidgetInner {
    ui: Ui,
    key: WidgetKey,
    class: &'static str,
    state: RefCell<WidgetState>,
    hooks: RefCell<Box<dyn WidgetHooks>>,
}

/// Everything the dispatcher and the mutators read or write.
pub(crate) struct WidgetState {
    pub(crate) window: Option<WindowId>,
    pub(crate) live: bool,

    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,

    pub(crate) min_width: i32,
    pub(crate) min_height: i32,
    pub(crate) max_width: i32,
    pub(crate) max_height: i32,

    pub(crate) title: TitleBuffer,

    /// Where the pending press landed; `None` when no press is pending.
    pub(crate) press: Option<Point>,
    pub(crate) track_enabled: bool,
    pub(crate) tracking: bool,

    /// Destruction arrived while the hooks were busy; `destroyed` runs once
    /// they are released.
    pub(crate) destroyed_pending: bool,
}

impl WidgetState {
    fn new() -> Self {
        Self {
            window: None,
            live: false,
            x: USE_DEFAULT,
            y: USE_DEFAULT,
            width: USE_DEFAULT,
            height: USE_DEFAULT,
            min_width: UNBOUNDED,
            min_height: UNBOUNDED,
            max_width: UNBOUNDED,
            max_height: UNBOUNDED,
            title: TitleBuffer::new(),
            press: None,
            track_enabled: false,
            tracking: false,
            destroyed_pending: false,
        }
    }

    /// The window handle, but only once setup has completed.
    fn live_window(&self) -> Option<WindowId> {
        if self.live {
            self.window
        } else {
            None
        }
    }
}

impl Widget {
    /// A widget with platform-default position and size.
    pub fn new(ui: &Ui, hooks: impl WidgetHooks + 'static) -> Self {
        let class = hooks.class_name();
        Self {
            inner: Rc::new(WidgetInner {
                ui: ui.clone(),
                key: WidgetKey::next(),
                class,
                state: RefCell::new(WidgetState::new()),
                hooks: RefCell::new(Box::new(hooks)),
            }),
        }
    }

    /// A widget whose client area starts at `width` × `height`.
    pub fn with_size(ui: &Ui, hooks: impl WidgetHooks + 'static, width: i32, height: i32) -> Self {
        let widget = Self::new(ui, hooks);
        widget.resize(width, height);
        widget
    }

    // ── Geometry & title ──────────────────────────────────────────────────────

    /// Set the client size. Position and z-order are left alone.
    pub fn resize(&self, width: i32, height: i32) {
        let window = {
            let mut s = self.state_mut();
            s.width = width;
            s.height = height;
            s.live_window()
        };
        let Some(window) = window else { return };

        // SetWindowPos sizes the whole window; add the frame so the client
        // area (and the cache, once the OS echoes the change) is width × height.
        let platform = self.platform();
        let (ncw, nch) = frame_overhead(platform.window_rect(window), platform.client_rect(window));
        platform.set_window_pos(
            window,
            PosChange::resize(width.saturating_add(ncw), height.saturating_add(nch)),
        );
    }

    /// Set the window position. Size and z-order are left alone.
    pub fn move_to(&self, x: i32, y: i32) {
        let window = {
            let mut s = self.state_mut();
            s.x = x;
            s.y = y;
            s.live_window()
        };
        if let Some(window) = window {
            self.platform().set_window_pos(window, PosChange::move_to(x, y));
        }
    }

    pub fn set_title(&self, title: &str) {
        let window = {
            let mut s = self.state_mut();
            s.title.set(title);
            s.live_window()
        };
        if let Some(window) = window {
            self.platform().set_title(window, title);
        }
    }

    /// Smallest client size the user may drag to. `UNBOUNDED` lifts the
    /// constraint for that dimension.
    pub fn set_min_bound(&self, width: i32, height: i32) {
        let mut s = self.state_mut();
        s.min_width = width;
        s.min_height = height;
    }

    /// Largest client size the user may drag to. `UNBOUNDED` lifts the
    /// constraint for that dimension.
    pub fn set_max_bound(&self, width: i32, height: i32) {
        let mut s = self.state_mut();
        s.max_width = width;
        s.max_height = height;
    }

    /// Turn hover/leave notifications on or off. Turning them off also
    /// forgets any tracking already armed.
    pub fn enable_track(&self, enabled: bool) {
        let mut s = self.state_mut();
        s.track_enabled = enabled;
        if !enabled {
            s.tracking = false;
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Create the OS window, as a child of `parent` when one is given.
    ///
    /// On a widget that is already live this only re-parents it. Fails with
    /// `UiError::WindowCreation` when the OS refuses the window; that error is
    /// fatal and callers are expected to propagate it to the shell.
    pub fn setup(&self, parent: Option<&Widget>) -> Result<()> {
        let live_window = self.state().live_window();
        if let Some(window) = live_window {
            if let Some(parent_window) = parent.and_then(Widget::window) {
                self.platform().set_parent(window, parent_window);
            }
            return Ok(());
        }

        let parent_window = match parent {
            Some(parent) => {
                if !parent.is_live() {
                    parent.setup(None)?;
                }
                parent.window()
            }
            None => None,
        };

        self.inner.ui.ensure_class(self.inner.class);

        let request = {
            let s = self.state();
            CreateRequest {
                class: self.inner.class.to_owned(),
                title: s.title.as_str().to_owned(),
                style: if parent.is_some() {
                    WindowStyle::Child
                } else {
                    WindowStyle::TopLevel
                },
                x: s.x,
                y: s.y,
                width: s.width,
                height: s.height,
                parent: parent_window,
                key: self.inner.key,
            }
        };

        dispatch::expect_creation(self);
        match self.platform().create_window(&request) {
            Ok(window) => {
                // Normally the creation message already bound us; this covers
                // backends that deliver it late.
                dispatch::bind(window, self);
                Ok(())
            }
            Err(e) => {
                dispatch::abandon_creation(self.inner.key);
                log::error!("@{} window creation failed: {e}", self.inner.class);
                Err(e)
            }
        }
    }

    /// Attach `child` inside this widget, creating this widget's own window
    /// first if needed. No check is made for a child attached twice.
    pub fn add_widget(&self, child: &Widget) -> Result<()> {
        if !self.is_live() {
            self.setup(None)?;
        }
        child.setup(Some(self))
    }

    pub fn show(&self, mode: ShowMode) {
        let window = self.state().live_window();
        if let Some(window) = window {
            self.platform().show(window, mode);
        }
    }

    /// Give this widget keyboard focus.
    pub fn focus(&self) {
        let window = self.state().live_window();
        if let Some(window) = window {
            self.platform().set_focus(window);
        }
    }

    /// Schedule a repaint of the whole client area.
    pub fn redraw(&self, erase: bool) {
        let window = self.state().live_window();
        if let Some(window) = window {
            self.platform().invalidate(window, erase);
        }
    }

    /// Run one paint cycle, drawing through `draw`. Meant for `render`.
    pub fn paint(&self, mut draw: impl FnMut(&mut dyn Canvas)) {
        let window = self.state().live_window();
        if let Some(window) = window {
            self.platform().paint(window, &mut draw);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn width(&self) -> i32 {
        or_zero(self.state().width)
    }

    pub fn height(&self) -> i32 {
        or_zero(self.state().height)
    }

    pub fn x(&self) -> i32 {
        or_zero(self.state().x)
    }

    pub fn y(&self) -> i32 {
        or_zero(self.state().y)
    }

    pub fn min_bound(&self) -> (i32, i32) {
        let s = self.state();
        (s.min_width, s.min_height)
    }

    pub fn max_bound(&self) -> (i32, i32) {
        let s = self.state();
        (s.max_width, s.max_height)
    }

    pub fn title(&self) -> String {
        self.state().title.as_str().to_owned()
    }

    pub fn is_live(&self) -> bool {
        self.state().live
    }

    pub fn is_tracking(&self) -> bool {
        self.state().tracking
    }

    pub fn window(&self) -> Option<WindowId> {
        self.state().window
    }

    pub fn class_name(&self) -> &'static str {
        self.inner.class
    }

    pub fn key(&self) -> WidgetKey {
        self.inner.key
    }

    /// The widget this one is embedded in.
    ///
    /// `None` for top-level windows, including owned popups whose OS
    /// "parent" is really their owner.
    pub fn parent(&self) -> Option<Widget> {
        let window = self.window()?;
        let platform = self.platform();
        let parent = platform.parent(window)?;
        if parent == window || platform.owner(window) == Some(parent) {
            return None;
        }
        dispatch::lookup(parent)
    }

    pub fn ptr_eq(&self, other: &Widget) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ── Dispatcher access ─────────────────────────────────────────────────────

    pub(crate) fn platform(&self) -> Rc<dyn Platform> {
        self.inner.ui.platform()
    }

    pub(crate) fn state(&self) -> Ref<'_, WidgetState> {
        self.inner.state.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, WidgetState> {
        self.inner.state.borrow_mut()
    }

    /// Run `f` against this widget's hooks. Returns `false` without calling
    /// `f` when the hooks are already running further up the stack.
    pub(crate) fn with_hooks(&self, f: impl FnOnce(&mut dyn WidgetHooks, &Widget)) -> bool {
        {
            let Ok(mut hooks) = self.inner.hooks.try_borrow_mut() else {
                log::trace!("@{} hooks re-entered; nested call skipped", self.inner.class);
                return false;
            };
            f(hooks.as_mut(), self);
        }
        self.run_deferred_destroyed();
        true
    }

    /// Fire a `destroyed` that was skipped because the window was destroyed
    /// from inside one of its own hooks.
    fn run_deferred_destroyed(&self) {
        let pending = std::mem::take(&mut self.state_mut().destroyed_pending);
        if !pending {
            return;
        }
        if let Ok(mut hooks) = self.inner.hooks.try_borrow_mut() {
            hooks.destroyed(self);
        }
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.state();
        f.debug_struct("Widget")
            .field("class", &self.inner.class)
            .field("key", &self.inner.key)
            .field("window", &s.window)
            .field("live", &s.live)
            .finish()
    }
}

fn or_zero(value: i32) -> i32 {
    if value == USE_DEFAULT {
        0
    } else {
        value
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
