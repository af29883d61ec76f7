use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue},
    HeaderMap,
};
use std::collections::HashMap;

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}

pub fn put_headers<'a, I: IntoIterator<Item = &'a (String, String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}

/// Form-encodes a single query component: unreserved characters pass through, spaces become `+`
/// and everything else is percent-encoded.
pub fn encode_query_component(component: &str) -> String {
    urlencoding::encode(component).replace("%20", "+")
}

/// Appends `path` and, when there are any, the encoded query parameters to `base_url`.
pub fn build_url<K: AsRef<str>, V: AsRef<str>>(
    base_url: &str,
    path: &str,
    query: &[(K, V)],
) -> String {
    if query.is_empty() {
        return format!("{}{}", base_url, path);
    }

    let query_string = query
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encode_query_component(k.as_ref()),
                encode_query_component(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}?{}", base_url, path, query_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_without_query() {
        let query: [(&str, &str); 0] = [];
        assert_eq!(
            build_url("http://localhost:8080", "/api/products", &query),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn build_url_keeps_query_order() {
        assert_eq!(
            build_url(
                "http://localhost:8080",
                "/api/orders",
                &[("start", "2024-01-01T09:59:00"), ("end", "2024-01-01T10:01:00")]
            ),
            "http://localhost:8080/api/orders?start=2024-01-01T09%3A59%3A00&end=2024-01-01T10%3A01%3A00"
        );
    }

    #[test]
    fn spaces_are_form_encoded() {
        assert_eq!(encode_query_component("cold brew"), "cold+brew");
        assert_eq!(encode_query_component("a+b&c"), "a%2Bb%26c");
        assert_eq!(encode_query_component("FOOD"), "FOOD");
    }

    #[test]
    fn put_headers_lowercases_names() {
        let mut map = HeaderMap::new();
        let headers = vec![(String::from("Content-Type"), String::from("application/json"))];

        put_headers(&mut map, &headers).unwrap();

        assert_eq!(map.get("content-type").unwrap(), "application/json");
    }
}
