use std::rc::Rc;

use dioxus::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub const MEDIUM_MIN_WIDTH: f64 = 768.0;
pub const WIDE_MIN_WIDTH: f64 = 1024.0;

/// How the branch panel is presented at the current window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    /// Bottom sheet.
    Narrow,
    /// Slide-in overlay with a backdrop.
    Medium,
    /// Docked sidebar, always visible.
    Wide,
}

impl ViewportClass {
    pub fn from_width(width: f64) -> Self {
        if width < MEDIUM_MIN_WIDTH {
            ViewportClass::Narrow
        } else if width < WIDE_MIN_WIDTH {
            ViewportClass::Medium
        } else {
            ViewportClass::Wide
        }
    }

    pub fn is_docked(self) -> bool {
        self == ViewportClass::Wide
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ViewportClass::Narrow => "viewport-narrow",
            ViewportClass::Medium => "viewport-medium",
            ViewportClass::Wide => "viewport-wide",
        }
    }
}

fn window_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

/// Window `resize` subscription, removed again on drop.
struct ResizeListener {
    callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Current [`ViewportClass`], updated as the window is resized.
pub fn use_viewport_class() -> Signal<ViewportClass> {
    let mut class = use_signal(|| {
        window_width()
            .map(ViewportClass::from_width)
            .unwrap_or(ViewportClass::Wide)
    });

    use_hook(move || {
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(width) = window_width() {
                let next = ViewportClass::from_width(width);
                if *class.peek() != next {
                    class.set(next);
                }
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }
        Rc::new(ResizeListener { callback })
    });

    class
}
