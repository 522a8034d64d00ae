use dioxus::prelude::*;

#[component]
pub fn LoadingIndicator(message: String) -> Element {
    rsx! {
        div { class: "loading-indicator", role: "status", "aria-live": "polite",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}

/// Inline failure notice with a retry button.
#[component]
pub fn ErrorNotice(message: String, retry_label: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-notice", role: "alert",
            p { "{message}" }
            button {
                class: "retry-button",
                onclick: move |_| on_retry.call(()),
                "{retry_label}"
            }
        }
    }
}
