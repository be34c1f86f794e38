// ── Recording backend for tests ───────────────────────────────────────────────
//
// Behaves like a synchronous windowing system: creation delivers
// `Message::Create` before returning, `set_window_pos` echoes a
// `PositionChanged` followed (on default processing) by `Move`/`Size`,
// `show` maximises and minimises, and destruction delivers
// `Message::Destroy`. Top-level
// windows carry a fixed frame so client/window rectangles differ the way they
// do on a real desktop. Every call is recorded for assertions.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::dispatch::{self, Message, Outcome};
use crate::error::{Result, UiError};
use crate::geometry::{Color, Point, Rect, USE_DEFAULT};
use crate::hooks::WidgetHooks;
use crate::input::{MouseButton, MouseKeys, SizeKind, VirtualKey};
use crate::platform::{
    Canvas, CreateRequest, Platform, PosChange, ShowMode, WindowClass, WindowId, WindowStyle,
};
use crate::ui::Ui;
use crate::widget::Widget;

/// Frame width/height the mock adds around top-level client areas.
pub(crate) const FRAME: (i32, i32) = (16, 39);

/// Size used when a request asks for the platform default.
const DEFAULT_SIZE: (i32, i32) = (800, 600);

/// Work area a maximised window fills.
pub(crate) const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

/// Where a minimised window is parked, as on Win32.
const MINIMIZED_AT: Point = Point::new(-32000, -32000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    RegisterClass(String),
    CreateWindow(CreateRequest),
    DestroyWindow(WindowId),
    SetWindowPos(WindowId, PosChange),
    SetTitle(WindowId, String),
    SetParent(WindowId, WindowId),
    Show(WindowId, ShowMode),
    Invalidate(WindowId, bool),
    SetFocus(WindowId),
    TrackMouse(WindowId),
    BeginPaint(WindowId),
    FillRect(WindowId, Rect, Color),
    Line(WindowId, Point, Point, Color),
    EndPaint(WindowId),
    PostQuit(i32),
}

struct MockWindow {
    /// Screen rectangle, frame included.
    rect: Rect,
    framed: bool,
    parent: Option<WindowId>,
    owner: Option<WindowId>,
}

#[derive(Default)]
pub(crate) struct MockPlatform {
    calls: RefCell<Vec<Call>>,
    windows: RefCell<HashMap<WindowId, MockWindow>>,
    next_id: Cell<isize>,
    focus: Cell<Option<WindowId>>,
    fail_create: Cell<bool>,
    fail_register: Cell<bool>,
}

impl MockPlatform {
    /// A fresh `Ui` over a fresh mock, plus the mock for inspection.
    pub(crate) fn ui() -> (Ui, Rc<MockPlatform>) {
        let mock = Rc::new(MockPlatform::default());
        (Ui::new(mock.clone()), mock)
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub(crate) fn fail_register(&self, fail: bool) {
        self.fail_register.set(fail);
    }

    /// Make `window` an owned popup of `owner`. Like Win32, the OS then
    /// reports the owner as the parent too.
    pub(crate) fn make_owned(&self, window: WindowId, owner: WindowId) {
        if let Some(w) = self.windows.borrow_mut().get_mut(&window) {
            w.parent = Some(owner);
            w.owner = Some(owner);
        }
    }

    /// The window holding keyboard focus, where key messages go.
    pub(crate) fn focused(&self) -> Option<WindowId> {
        self.focus.get()
    }

    /// Move `window` to `rect` and deliver what Win32 would: the position
    /// change, then (when it reaches default processing) `Move` and `Size`
    /// with client-area values.
    fn reposition(&self, window: WindowId, rect: Rect, moved: bool, sized: bool, kind: SizeKind) {
        let framed = {
            let mut windows = self.windows.borrow_mut();
            let Some(w) = windows.get_mut(&window) else { return };
            w.rect = rect;
            w.framed
        };
        let outcome = dispatch::route(
            window,
            Message::PositionChanged {
                x: rect.left,
                y: rect.top,
                width: rect.width(),
                height: rect.height(),
                moved,
                sized,
            },
        );
        if outcome != Outcome::Default {
            return;
        }

        // Client origin sits inside the left border and below the caption.
        let (fw, fh) = if framed { FRAME } else { (0, 0) };
        if moved {
            let (x, y) = (rect.left + fw / 2, rect.top + fh - fw / 2);
            dispatch::route(window, Message::Move { x, y });
        }
        if sized {
            let width = (rect.width() - fw).max(0);
            let height = (rect.height() - fh).max(0);
            dispatch::route(window, Message::Size { width, height, kind });
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Platform for MockPlatform {
    fn register_class(&self, class: &WindowClass) -> Result<()> {
        self.record(Call::RegisterClass(class.name.clone()));
        if self.fail_register.get() {
            return Err(UiError::Win32 {
                function: "RegisterClassExW",
                code: 8,
            });
        }
        Ok(())
    }

    fn create_window(&self, request: &CreateRequest) -> Result<WindowId> {
        self.record(Call::CreateWindow(request.clone()));
        if self.fail_create.get() {
            return Err(UiError::WindowCreation {
                class: request.class.clone(),
                code: 1400,
            });
        }

        let id = WindowId(0x100 + self.next_id.get() * 0x10);
        self.next_id.set(self.next_id.get() + 1);

        let pick = |v: i32, default: i32| if v == USE_DEFAULT { default } else { v };
        let rect = Rect::from_origin_size(
            pick(request.x, 0),
            pick(request.y, 0),
            pick(request.width, DEFAULT_SIZE.0),
            pick(request.height, DEFAULT_SIZE.1),
        );
        self.windows.borrow_mut().insert(
            id,
            MockWindow {
                rect,
                framed: request.style == WindowStyle::TopLevel,
                parent: request.parent,
                owner: None,
            },
        );

        dispatch::route(id, Message::Create { key: request.key });
        Ok(id)
    }

    fn destroy_window(&self, window: WindowId) {
        self.record(Call::DestroyWindow(window));
        dispatch::route(window, Message::Destroy);
        self.windows.borrow_mut().remove(&window);
        if self.focus.get() == Some(window) {
            self.focus.set(None);
        }
    }

    fn set_window_pos(&self, window: WindowId, change: PosChange) {
        self.record(Call::SetWindowPos(window, change));
        let rect = {
            let windows = self.windows.borrow();
            let Some(w) = windows.get(&window) else { return };
            let mut rect = w.rect;
            if let Some(p) = change.position {
                rect = Rect::from_origin_size(p.x, p.y, rect.width(), rect.height());
            }
            if let Some((width, height)) = change.size {
                rect = Rect::from_origin_size(rect.left, rect.top, width, height);
            }
            rect
        };
        self.reposition(
            window,
            rect,
            change.position.is_some(),
            change.size.is_some(),
            SizeKind::Restored,
        );
    }

    fn set_title(&self, window: WindowId, title: &str) {
        self.record(Call::SetTitle(window, title.to_owned()));
    }

    fn set_parent(&self, window: WindowId, parent: WindowId) {
        self.record(Call::SetParent(window, parent));
        if let Some(w) = self.windows.borrow_mut().get_mut(&window) {
            w.parent = Some(parent);
        }
    }

    fn parent(&self, window: WindowId) -> Option<WindowId> {
        self.windows.borrow().get(&window).and_then(|w| w.parent)
    }

    fn owner(&self, window: WindowId) -> Option<WindowId> {
        self.windows.borrow().get(&window).and_then(|w| w.owner)
    }

    fn show(&self, window: WindowId, mode: ShowMode) {
        self.record(Call::Show(window, mode));
        match mode {
            ShowMode::Maximized => self.reposition(window, SCREEN, true, true, SizeKind::Maximized),
            ShowMode::Minimized => {
                let parked = Rect::from_origin_size(MINIMIZED_AT.x, MINIMIZED_AT.y, 160, FRAME.1);
                self.reposition(window, parked, true, true, SizeKind::Minimized);
            }
            _ => {}
        }
    }

    fn invalidate(&self, window: WindowId, erase: bool) {
        self.record(Call::Invalidate(window, erase));
    }

    fn set_focus(&self, window: WindowId) {
        self.record(Call::SetFocus(window));
        if self.windows.borrow().contains_key(&window) {
            self.focus.set(Some(window));
        }
    }

    fn track_mouse(&self, window: WindowId) {
        self.record(Call::TrackMouse(window));
    }

    fn window_rect(&self, window: WindowId) -> Rect {
        self.windows
            .borrow()
            .get(&window)
            .map(|w| w.rect)
            .unwrap_or_default()
    }

    fn client_rect(&self, window: WindowId) -> Rect {
        self.windows
            .borrow()
            .get(&window)
            .map(|w| {
                let (fw, fh) = if w.framed { FRAME } else { (0, 0) };
                Rect::new(0, 0, w.rect.width() - fw, w.rect.height() - fh)
            })
            .unwrap_or_default()
    }

    fn paint(&self, window: WindowId, draw: &mut dyn FnMut(&mut dyn Canvas)) {
        self.record(Call::BeginPaint(window));
        let mut canvas = MockCanvas {
            window,
            calls: Vec::new(),
        };
        draw(&mut canvas);
        self.calls.borrow_mut().extend(canvas.calls);
        self.record(Call::EndPaint(window));
    }

    fn post_quit(&self, code: i32) {
        self.record(Call::PostQuit(code));
    }

    fn run(&self) -> Result<()> {
        Ok(())
    }
}

struct MockCanvas {
    window: WindowId,
    calls: Vec<Call>,
}

impl Canvas for MockCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(Call::FillRect(self.window, rect, color));
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.calls.push(Call::Line(self.window, from, to, color));
    }
}

// ── Recording hooks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Created,
    Destroyed,
    Moved(i32, i32),
    Resized(i32, i32, SizeKind),
    Render,
    Hover(i32, i32),
    Leave,
    Press(MouseButton, i32, i32),
    Release(MouseButton, i32, i32),
    Clicked(MouseButton, i32, i32),
    DoubleClicked(MouseButton, i32, i32),
    MouseMove(i32, i32),
    Wheel(i32, i32, i32),
    Key(VirtualKey),
}

/// Hooks that append every event to a shared log.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<Event>>>) {
        let recorder = Self::default();
        let log = recorder.log.clone();
        (recorder, log)
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl WidgetHooks for Recorder {
    fn created(&mut self, _widget: &Widget) {
        self.push(Event::Created);
    }

    fn destroyed(&mut self, _widget: &Widget) {
        self.push(Event::Destroyed);
    }

    fn moved(&mut self, _widget: &Widget, x: i32, y: i32) {
        self.push(Event::Moved(x, y));
    }

    fn resized(&mut self, _widget: &Widget, width: i32, height: i32, kind: SizeKind) {
        self.push(Event::Resized(width, height, kind));
    }

    fn render(&mut self, widget: &Widget) {
        self.push(Event::Render);
        widget.paint(|_| {});
    }

    fn mouse_hover(&mut self, _widget: &Widget, x: i32, y: i32) {
        self.push(Event::Hover(x, y));
    }

    fn mouse_leave(&mut self, _widget: &Widget) {
        self.push(Event::Leave);
    }

    fn mouse_press(&mut self, _widget: &Widget, button: MouseButton, x: i32, y: i32, _keys: MouseKeys) {
        self.push(Event::Press(button, x, y));
    }

    fn mouse_release(&mut self, _widget: &Widget, button: MouseButton, x: i32, y: i32, _keys: MouseKeys) {
        self.push(Event::Release(button, x, y));
    }

    fn clicked(&mut self, _widget: &Widget, button: MouseButton, x: i32, y: i32, _keys: MouseKeys) {
        self.push(Event::Clicked(button, x, y));
    }

    fn double_clicked(&mut self, _widget: &Widget, button: MouseButton, x: i32, y: i32, _keys: MouseKeys) {
        self.push(Event::DoubleClicked(button, x, y));
    }

    fn mouse_move(&mut self, _widget: &Widget, x: i32, y: i32, _keys: MouseKeys) {
        self.push(Event::MouseMove(x, y));
    }

    fn wheel_change(&mut self, _widget: &Widget, x: i32, y: i32, delta: i32, _keys: MouseKeys) {
        self.push(Event::Wheel(x, y, delta));
    }

    fn key_down(&mut self, _widget: &Widget, key: VirtualKey) {
        self.push(Event::Key(key));
    }
}
