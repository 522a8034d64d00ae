mod a11y;
mod api;
mod catalog_state;
mod components;
mod i18n;
mod layout;
mod leaflet;
mod pages;
mod route_query;
mod scroll_lock;
mod timeout;

use dioxus::logger::tracing;
use dioxus::prelude::*;
use meem_shared::Locale;

use components::error_fallback::{GlobalErrorFallback, PageErrorFallback};
use components::site_header::SiteHeader;
use pages::branches::Branches;
use pages::home::Home;
use pages::not_found::NotFound;
use pages::offers::Offers;
use route_query::RouteQuery;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Home { locale: Locale::En })]
    #[layout(LocaleShell)]
        #[route("/:locale")]
        Home { locale: Locale },
        #[route("/:locale/branches?:..query")]
        Branches { locale: Locale, query: RouteQuery },
        #[route("/:locale/offers?:..query")]
        Offers { locale: Locale, query: RouteQuery },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    fn locale(&self) -> Locale {
        match self {
            Route::Home { locale }
            | Route::Branches { locale, .. }
            | Route::Offers { locale, .. } => *locale,
            Route::NotFound { .. } => Locale::default(),
        }
    }

    /// The same page in another language, keeping its query.
    fn with_locale(&self, locale: Locale) -> Route {
        match self {
            Route::Home { .. } | Route::NotFound { .. } => Route::Home { locale },
            Route::Branches { query, .. } => Route::Branches {
                locale,
                query: query.clone(),
            },
            Route::Offers { query, .. } => Route::Offers {
                locale,
                query: query.clone(),
            },
        }
    }
}

/// What an error boundary caught, for the log line.
fn caught_error(errors: &ErrorContext) -> String {
    errors
        .error()
        .map(|err| err.to_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Frame shared by every localized page: direction, header, the catalog and a
/// page-level error boundary.
#[component]
fn LocaleShell() -> Element {
    let route = use_route::<Route>();
    let locale = route.locale();
    catalog_state::use_catalog_provider();

    rsx! {
        document::Title { {i18n::t(locale, i18n::Text::SiteTitle)} }
        div { class: "app-shell", dir: locale.dir(), lang: locale.code(),
            SiteHeader { locale }
            main { class: "page",
                ErrorBoundary {
                    handle_error: move |errors: ErrorContext| {
                        tracing::error!(
                            page = ?route,
                            error = %caught_error(&errors),
                            "page failed to render"
                        );
                        rsx! {
                            PageErrorFallback {
                                locale,
                                on_retry: move |_: ()| errors.clear_errors(),
                            }
                        }
                    },
                    Outlet::<Route> {}
                }
            }
        }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

fn current_locale() -> Locale {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| i18n::locale_from_path(&path))
        .unwrap_or_default()
}

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        ErrorBoundary {
            handle_error: |errors: ErrorContext| {
                tracing::error!(error = %caught_error(&errors), "application failed to render");
                rsx! { GlobalErrorFallback { locale: current_locale() } }
            },
            Router::<Route> {}
        }
    }
}

fn main() {
    launch(App);
}

#[cfg(test)]
mod tests {
    use super::*;
    use meem_shared::wizard::OffersHandoff;
    use pages::offers::OffersScope;

    #[test]
    fn test_with_locale_keeps_page_and_query() {
        let route = Route::Branches {
            locale: Locale::En,
            query: RouteQuery::parse("location=kuwait&branch=kuwait-city-salmiya"),
        };
        assert_eq!(
            route.with_locale(Locale::Ar),
            Route::Branches {
                locale: Locale::Ar,
                query: RouteQuery::parse("location=kuwait&branch=kuwait-city-salmiya"),
            }
        );
    }

    #[test]
    fn test_not_found_switches_to_home() {
        let route = Route::NotFound {
            segments: vec!["nowhere".to_string()],
        };
        assert_eq!(route.locale(), Locale::En);
        assert_eq!(route.with_locale(Locale::Ar), Route::Home { locale: Locale::Ar });
    }

    #[test]
    fn test_caught_error_names_the_failure() {
        let errors = ErrorContext::new(Some(dioxus::CapturedError::from_display(
            "catalog request timed out",
        )));
        assert_eq!(caught_error(&errors), "catalog request timed out");
        assert_eq!(caught_error(&ErrorContext::new(None)), "unknown error");
    }

    #[test]
    fn test_offers_handoff_survives_the_address_bar() {
        let handoff = OffersHandoff {
            location_name: "Kuwait & Co".to_string(),
            branch_name: "الرياض + العليا".to_string(),
        };
        let route = Route::Offers {
            locale: Locale::Ar,
            query: RouteQuery::parse(&handoff.query()),
        };

        let href = route.to_string();
        assert!(href.starts_with("/ar/offers?"));
        let parsed: Route = href.parse().unwrap();
        assert_eq!(parsed, route);

        let Route::Offers { query, .. } = parsed else {
            panic!("expected the offers page, got {parsed:?}");
        };
        assert_eq!(
            OffersScope::from_query(&query.encoded()),
            OffersScope::Branch {
                location: "Kuwait & Co".to_string(),
                branch: "الرياض + العليا".to_string(),
            }
        );
    }

    #[test]
    fn test_branch_selection_link_round_trips() {
        let route = Route::Branches {
            locale: Locale::En,
            query: RouteQuery::parse("utm=spring%3Dsale&location=kuwait"),
        };
        let parsed: Route = route.to_string().parse().unwrap();
        assert_eq!(parsed, route);
    }
}
