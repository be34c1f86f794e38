// ── Toolkit context ───────────────────────────────────────────────────────────
//
// A `Ui` bundles the platform backend with the window-class registry. One is
// created at startup on the UI thread and cloned into every widget; clones
// share the same backend and registry.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::Result;
use crate::platform::{Platform, WindowClass};

#[derive(Clone)]
pub struct Ui {
    inner: Rc<UiInner>,
}

struct UiInner {
    platform: Rc<dyn Platform>,
    /// Class names already handed to the platform.
    classes: RefCell<HashSet<String>>,
}

impl Ui {
    pub fn new(platform: Rc<dyn Platform>) -> Self {
        Self {
            inner: Rc::new(UiInner {
                platform,
                classes: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// Context backed by the native Win32 windowing subsystem.
    #[cfg(windows)]
    pub fn win32() -> Result<Self> {
        let platform = crate::platform::win32::Win32Platform::new()?;
        Ok(Self::new(Rc::new(platform)))
    }

    pub fn platform(&self) -> Rc<dyn Platform> {
        Rc::clone(&self.inner.platform)
    }

    /// Register `name` with the platform unless that already happened.
    ///
    /// A failed registration is logged and forgotten; the following window
    /// creation reports the real failure.
    pub(crate) fn ensure_class(&self, name: &str) {
        if self.inner.classes.borrow().contains(name) {
            return;
        }
        match self.inner.platform.register_class(&WindowClass::widget(name)) {
            Ok(()) => {
                self.inner.classes.borrow_mut().insert(name.to_owned());
            }
            Err(e) => log::warn!("class `{name}` not registered: {e}"),
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.classes.borrow().contains(name)
    }

    /// Pump messages until a widget's destruction posts quit.
    pub fn run(&self) -> Result<()> {
        self.inner.platform.run()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::platform::mock::{Call, MockPlatform};

    #[test]
    fn class_is_registered_once() {
        let (ui, mock) = MockPlatform::ui();
        ui.ensure_class("Board");
        ui.ensure_class("Board");
        ui.ensure_class("Frame");

        let registrations: Vec<_> = mock
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::RegisterClass(_)))
            .collect();
        assert_eq!(
            registrations,
            vec![
                Call::RegisterClass("Board".to_owned()),
                Call::RegisterClass("Frame".to_owned())
            ]
        );
        assert!(ui.is_registered("Board"));
    }

    #[test]
    fn failed_registration_is_retried_next_time() {
        let (ui, mock) = MockPlatform::ui();
        mock.fail_register(true);
        ui.ensure_class("Board");
        assert!(!ui.is_registered("Board"));

        mock.fail_register(false);
        ui.ensure_class("Board");
        assert!(ui.is_registered("Board"));
    }
}
