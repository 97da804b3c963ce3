#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const OPEN_CLASS: &str = "open";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    TogglePressed,
    LinkActivated,
    /// A click landing outside both the toggle and the menu.
    OutsidePress,
    KeyPressed(String),
}

/// Mobile navigation drawer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Applies an event and reports whether the drawer should be re-rendered.
    /// Link activation always re-renders the closed state; outside presses and
    /// Escape only act on an open drawer.
    pub fn handle(&mut self, event: &NavEvent) -> bool {
        let next = match event {
            NavEvent::TogglePressed => !self.open,
            NavEvent::LinkActivated => false,
            NavEvent::OutsidePress if self.open => false,
            NavEvent::KeyPressed(key) if self.open && key == "Escape" => false,
            NavEvent::OutsidePress | NavEvent::KeyPressed(_) => return false,
        };

        if next != self.open {
            log::debug!("nav menu {}", if next { "opened" } else { "closed" });
        }
        self.open = next;
        true
    }
}
