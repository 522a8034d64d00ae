//! Minimal URL query-string codec.
//!
//! Values are encoded the way browsers' `encodeURIComponent` does, so a
//! location name like `Riyadh - Olaya` becomes `Riyadh%20-%20Olaya`.
//! Decoding also accepts `+` for a space, as produced by HTML forms.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Split a query string into ordered, decoded key/value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(segment), String::new()),
        })
        .collect()
}

/// Join pairs into `k=v&k2=v2` (no leading `?`).
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Join pairs escaping only `%`, `&`, `=`, `+` and `#`. Everything else,
/// Arabic included, stays literal for a later encoding pass.
pub fn encode_query_delimiters(pairs: &[(String, String)]) -> String {
    fn escape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '%' => out.push_str("%25"),
                '&' => out.push_str("%26"),
                '=' => out.push_str("%3D"),
                '+' => out.push_str("%2B"),
                '#' => out.push_str("%23"),
                _ => out.push(c),
            }
        }
        out
    }

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// First value for `key`, if any.
pub fn get_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Set or remove `key`, keeping every other pair in place. A new key is
/// appended at the end.
pub fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    match value {
        Some(v) => {
            if let Some(idx) = pairs.iter().position(|(k, _)| k == key) {
                pairs[idx].1 = v.to_string();
                let mut seen = false;
                pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            } else {
                pairs.push((key.to_string(), v.to_string()));
            }
        }
        None => pairs.retain(|(k, _)| k != key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_component_matches_uri_component() {
        assert_eq!(encode_component("Riyadh - Olaya"), "Riyadh%20-%20Olaya");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("it's (ok)"), "it's%20(ok)");
    }

    #[test]
    fn test_encode_component_arabic() {
        assert_eq!(encode_component("الكويت"), "%D8%A7%D9%84%D9%83%D9%88%D9%8A%D8%AA");
        assert_eq!(decode_component("%D8%A7%D9%84%D9%83%D9%88%D9%8A%D8%AA"), "الكويت");
    }

    #[test]
    fn test_parse_query_handles_prefix_plus_and_empty_segments() {
        let parsed = parse_query("?location=saudi-arabia&&branch=Riyadh+-+Olaya&flag");
        assert_eq!(
            parsed,
            pairs(&[
                ("location", "saudi-arabia"),
                ("branch", "Riyadh - Olaya"),
                ("flag", ""),
            ])
        );
    }

    #[test]
    fn test_parse_query_keeps_encoded_plus() {
        let parsed = parse_query("phone=%2B965");
        assert_eq!(get_param(&parsed, "phone"), Some("+965"));
    }

    #[test]
    fn test_parse_empty_query() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }

    #[test]
    fn test_set_param_replaces_in_place_and_preserves_others() {
        let mut p = pairs(&[("utm", "x"), ("location", "kuwait"), ("page", "2")]);
        set_param(&mut p, "location", Some("saudi-arabia"));
        assert_eq!(
            p,
            pairs(&[("utm", "x"), ("location", "saudi-arabia"), ("page", "2")])
        );
    }

    #[test]
    fn test_set_param_collapses_duplicates() {
        let mut p = pairs(&[("branch", "a"), ("x", "1"), ("branch", "b")]);
        set_param(&mut p, "branch", Some("c"));
        assert_eq!(p, pairs(&[("branch", "c"), ("x", "1")]));
    }

    #[test]
    fn test_set_param_none_removes_all() {
        let mut p = pairs(&[("branch", "a"), ("x", "1"), ("branch", "b")]);
        set_param(&mut p, "branch", None);
        assert_eq!(p, pairs(&[("x", "1")]));
    }

    #[test]
    fn test_encode_query_joins_pairs() {
        let p = pairs(&[("location", "Saudi Arabia"), ("branch", "Riyadh - Olaya")]);
        assert_eq!(
            encode_query(&p),
            "location=Saudi%20Arabia&branch=Riyadh%20-%20Olaya"
        );
        assert_eq!(parse_query(&encode_query(&p)), p);
    }

    #[test]
    fn test_encode_query_delimiters_leaves_text_literal() {
        let p = pairs(&[("location", "Kuwait & Co"), ("branch", "A+B = 100% #1")]);
        let encoded = encode_query_delimiters(&p);
        assert_eq!(
            encoded,
            "location=Kuwait %26 Co&branch=A%2BB %3D 100%25 %231"
        );
        assert_eq!(parse_query(&encoded), p);

        let arabic = pairs(&[("branch", "الرياض - العليا")]);
        assert_eq!(encode_query_delimiters(&arabic), "branch=الرياض - العليا");
    }
}
