use dioxus::prelude::*;
use meem_shared::Locale;

use crate::i18n::{t, Text};
use crate::route_query::RouteQuery;
use crate::Route;

fn other_locale(locale: Locale) -> Locale {
    match locale {
        Locale::En => Locale::Ar,
        Locale::Ar => Locale::En,
    }
}

/// Top bar with the brand, page links and the language switch. Switching
/// language keeps the current page and its query.
#[component]
pub fn SiteHeader(locale: Locale) -> Element {
    let route = use_route::<Route>();
    let switched = route.with_locale(other_locale(locale));

    rsx! {
        header { class: "site-header",
            Link { class: "brand", to: Route::Home { locale }, {t(locale, Text::SiteTitle)} }
            nav { class: "site-nav",
                Link { to: Route::Home { locale }, {t(locale, Text::NavHome)} }
                Link {
                    to: Route::Branches { locale, query: RouteQuery::default() },
                    {t(locale, Text::NavBranches)}
                }
                Link {
                    to: Route::Offers { locale, query: RouteQuery::default() },
                    {t(locale, Text::NavOffers)}
                }
            }
            Link {
                class: "language-switch",
                to: switched,
                {t(locale, Text::SwitchLanguage)}
            }
        }
    }
}
