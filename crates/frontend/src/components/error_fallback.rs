use dioxus::logger::tracing;
use dioxus::prelude::*;
use meem_shared::Locale;

use crate::i18n::{t, Text};

/// Shown in place of a page whose render failed. Retrying re-renders just the
/// page; the header stays put.
#[component]
pub fn PageErrorFallback(locale: Locale, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-fallback", role: "alert",
            h2 { {t(locale, Text::ErrorTitle)} }
            p { {t(locale, Text::ErrorBody)} }
            button {
                class: "retry-button",
                onclick: move |_| on_retry.call(()),
                {t(locale, Text::Retry)}
            }
        }
    }
}

fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().reload() {
        tracing::error!(?err, "reload failed");
    }
}

/// Last-resort screen for failures outside any page, offering a full reload.
#[component]
pub fn GlobalErrorFallback(locale: Locale) -> Element {
    rsx! {
        div { class: "error-fallback global", role: "alert", dir: locale.dir(),
            h1 { {t(locale, Text::ErrorTitle)} }
            p { {t(locale, Text::ErrorBody)} }
            button {
                class: "retry-button",
                onclick: move |_| reload_page(),
                {t(locale, Text::Reload)}
            }
        }
    }
}
