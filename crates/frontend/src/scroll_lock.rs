use std::rc::Rc;

use dioxus::prelude::*;

/// Hides page overflow while alive and puts back whatever was there before.
pub struct ScrollLock {
    previous: Option<String>,
}

fn body_style() -> Option<web_sys::CssStyleDeclaration> {
    Some(web_sys::window()?.document()?.body()?.style())
}

impl ScrollLock {
    pub fn acquire() -> Self {
        let previous = body_style().map(|style| {
            let previous = style.get_property_value("overflow").unwrap_or_default();
            let _ = style.set_property("overflow", "hidden");
            previous
        });
        ScrollLock { previous }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let Some(style) = body_style() else {
            return;
        };
        let _ = match self.previous.as_deref() {
            Some(value) if !value.is_empty() => style.set_property("overflow", value),
            _ => style.remove_property("overflow").map(|_| ()),
        };
    }
}

/// Lock page scroll for as long as the calling component is mounted.
pub fn use_scroll_lock() {
    use_hook(|| Rc::new(ScrollLock::acquire()));
}
