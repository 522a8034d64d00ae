use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::StreamExt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Enter and Space activate a focused `role="button"` element, like a native
/// button.
pub fn is_activation_key(key: &Key) -> bool {
    match key {
        Key::Enter => true,
        Key::Character(c) => c == " ",
        _ => false,
    }
}

/// Keyboard handler that runs `action` on Enter/Space and stops the page
/// from scrolling on Space.
pub fn on_activate(mut action: impl FnMut() + 'static) -> impl FnMut(KeyboardEvent) + 'static {
    move |evt: KeyboardEvent| {
        if is_activation_key(&evt.key()) {
            evt.prevent_default();
            action();
        }
    }
}

/// `KeyboardEvent.key` values for the Escape key. Old Edge reports "Esc".
pub fn is_escape_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Document `keydown` subscription, removed again on drop.
struct DocumentKeyListener {
    callback: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl Drop for DocumentKeyListener {
    fn drop(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(
                "keydown",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Run `on_escape` whenever Escape is pressed anywhere on the page, for as
/// long as the calling component is mounted. Focus does not matter.
pub fn use_escape_key(on_escape: impl FnMut() + 'static) {
    use_hook(move || {
        // The DOM callback runs outside the Dioxus runtime, so it only
        // forwards the key press to a task that does.
        let (tx, mut rx) = mpsc::unbounded::<()>();
        let mut on_escape = on_escape;
        spawn(async move {
            while rx.next().await.is_some() {
                on_escape();
            }
        });

        let callback = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |evt: web_sys::KeyboardEvent| {
                if is_escape_key(&evt.key()) {
                    evt.prevent_default();
                    let _ = tx.unbounded_send(());
                }
            },
        );
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document
                .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
        }
        Rc::new(DocumentKeyListener { callback })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_space_activate() {
        assert!(is_activation_key(&Key::Enter));
        assert!(is_activation_key(&Key::Character(" ".to_string())));
    }

    #[test]
    fn test_other_keys_do_not_activate() {
        assert!(!is_activation_key(&Key::Escape));
        assert!(!is_activation_key(&Key::Tab));
        assert!(!is_activation_key(&Key::Character("a".to_string())));
    }

    #[test]
    fn test_escape_key_names() {
        assert!(is_escape_key("Escape"));
        assert!(is_escape_key("Esc"));
        assert!(!is_escape_key("Enter"));
        assert!(!is_escape_key("e"));
    }
}
