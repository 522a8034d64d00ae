use dioxus::prelude::*;
use meem_shared::{Branch, Locale};

use crate::i18n::{t, Text};

/// Brand-wide social accounts shown under every branch's contact details.
pub const SOCIAL_LINKS: [(&str, &str); 5] = [
    ("Instagram", "https://instagram.com/meemmarket"),
    ("X", "https://twitter.com/meemmarket"),
    ("Facebook", "https://facebook.com/meemmarket"),
    ("WhatsApp", "https://wa.me/966500000000"),
    ("TikTok", "https://tiktok.com/@meemmarket"),
];

/// `tel:` target with spaces and dashes stripped.
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

#[component]
pub fn ContactView(locale: Locale, branch: Branch) -> Element {
    rsx! {
        div { class: "contact-view",
            h3 { {t(locale, Text::ContactInfo)} }
            p { class: "contact-branch", {branch.name.get(locale)} }
            if let Some(address) = branch.address_in(locale) {
                p { class: "contact-address", "{address}" }
            }
            if let Some(phone) = &branch.phone {
                p { class: "contact-phone",
                    span { {t(locale, Text::Phone)} }
                    a { href: tel_href(phone), dir: "ltr", "{phone}" }
                }
            }
            if let Some(hours) = &branch.hours {
                p { class: "contact-hours",
                    span { {t(locale, Text::Hours)} }
                    span { dir: "ltr", {hours.display()} }
                }
            }
            h4 { {t(locale, Text::FollowUs)} }
            ul { class: "social-links",
                for (name, href) in SOCIAL_LINKS {
                    li { key: "{name}",
                        a {
                            href,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}
