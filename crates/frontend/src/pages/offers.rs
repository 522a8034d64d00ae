use dioxus::prelude::*;
use meem_shared::{query, Locale};

use crate::i18n::{t, Text};
use crate::route_query::RouteQuery;
use crate::Route;

/// Who the offers listing is scoped to, read from the hand-off query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffersScope {
    Branch { location: String, branch: String },
    All,
}

impl OffersScope {
    /// Both display names must be present and non-blank to scope the list.
    pub fn from_query(qs: &str) -> Self {
        let pairs = query::parse_query(qs);
        let location = query::get_param(&pairs, "location").map(str::trim);
        let branch = query::get_param(&pairs, "branch").map(str::trim);
        match (location, branch) {
            (Some(location), Some(branch)) if !location.is_empty() && !branch.is_empty() => {
                OffersScope::Branch {
                    location: location.to_string(),
                    branch: branch.to_string(),
                }
            }
            _ => OffersScope::All,
        }
    }
}

/// Landing point for the wizard hand-off. Shows which branch the offers are
/// for; the offers catalogue itself lives elsewhere.
#[component]
pub fn Offers(locale: Locale, query: RouteQuery) -> Element {
    let scope = OffersScope::from_query(&query.encoded());

    rsx! {
        section { class: "offers-page",
            h1 { {t(locale, Text::OffersTitle)} }
            match scope {
                OffersScope::Branch { location, branch } => rsx! {
                    p { class: "offers-scope",
                        {t(locale, Text::OffersForBranch)}
                        " "
                        strong { "{branch}" }
                        " · "
                        span { "{location}" }
                    }
                },
                OffersScope::All => rsx! {
                    p { class: "offers-scope", {t(locale, Text::OffersForAll)} }
                },
            }
            Link {
                class: "find-branch-link",
                to: Route::Branches { locale, query: RouteQuery::default() },
                {t(locale, Text::FindBranch)}
            }
        }
    }
}
