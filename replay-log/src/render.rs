use crate::HttpMethod;

/// Renders a call as a single replayable `CURL` line.
///
/// # Arguments
/// `method` - the HTTP verb.
/// `url` - the fully-qualified URL, query string included.
/// `content_type` - the `Content-Type` header to show, if one is configured.
/// `body` - the encoded JSON body, if the call carries one.
///
/// # Returns
/// The rendered command. Identical arguments always produce identical output.
pub fn render_command(
    method: HttpMethod,
    url: &str,
    content_type: Option<&str>,
    body: Option<&str>,
) -> String {
    let mut parts = vec![format!("CURL -X{}", method), format!("'{}'", url)];

    if let Some(content_type) = content_type {
        parts.push(format!("-H 'Content-Type: {}'", content_type));
    }

    if let Some(body) = body {
        parts.push(format!("-d '{}'", body));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::render_command;
    use crate::HttpMethod;

    #[test]
    fn renders_get_without_body() {
        assert_eq!(
            render_command(
                HttpMethod::Get,
                "http://localhost:8080/api/products?category=FOOD",
                Some("application/json"),
                None
            ),
            "CURL -XGET 'http://localhost:8080/api/products?category=FOOD' -H 'Content-Type: application/json'"
        );
    }

    #[test]
    fn renders_body_after_header() {
        assert_eq!(
            render_command(
                HttpMethod::Patch,
                "http://localhost:8080/api/orders/3/status",
                Some("application/json"),
                Some(r#"{"status": "RECEIVED"}"#)
            ),
            r#"CURL -XPATCH 'http://localhost:8080/api/orders/3/status' -H 'Content-Type: application/json' -d '{"status": "RECEIVED"}'"#
        );
    }

    #[test]
    fn omits_header_when_not_configured() {
        assert_eq!(
            render_command(HttpMethod::Get, "http://h/api/orders", None, None),
            "CURL -XGET 'http://h/api/orders'"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_command(
            HttpMethod::Post,
            "http://h/api/products",
            Some("application/json"),
            Some(r#"{"name": "cold brew"}"#),
        );
        let second = render_command(
            HttpMethod::Post,
            "http://h/api/products",
            Some("application/json"),
            Some(r#"{"name": "cold brew"}"#),
        );

        assert_eq!(first, second);
    }
}
