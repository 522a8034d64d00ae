use dioxus::prelude::*;

use crate::i18n::{locale_from_path, t, Text};
use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let locale = locale_from_path(&segments.join("/"));

    rsx! {
        section { class: "not-found", dir: locale.dir(),
            h1 { {t(locale, Text::NotFoundTitle)} }
            p { {t(locale, Text::NotFoundBody)} }
            Link { class: "back-home", to: Route::Home { locale }, {t(locale, Text::BackHome)} }
        }
    }
}
