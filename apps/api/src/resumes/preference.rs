//! The last-used template, remembered client-side in a cookie.

use axum::http::{header, HeaderMap};

use crate::templates::TemplateId;

pub const TEMPLATE_COOKIE: &str = "resumeitnow_template";

const MAX_AGE_SECS: u32 = 60 * 60 * 24 * 365;

/// Raw cookie value; callers validate it against the template set.
pub fn read_preference(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TEMPLATE_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

pub fn preference_cookie(template: TemplateId) -> String {
    format!("{TEMPLATE_COOKIE}={template}; Path=/; Max-Age={MAX_AGE_SECS}; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_from_cookie_list() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; resumeitnow_template=minimal; lang=en"),
        );
        assert_eq!(read_preference(&headers), Some("minimal".to_string()));
    }

    #[test]
    fn test_missing_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_preference(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(read_preference(&headers), None);
    }

    #[test]
    fn test_cookie_value_is_raw() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("resumeitnow_template=vaporwave"),
        );
        // Unknown identifiers are passed through; selection rejects them.
        assert_eq!(read_preference(&headers), Some("vaporwave".to_string()));
    }

    #[test]
    fn test_set_cookie_value() {
        assert_eq!(
            preference_cookie(TemplateId::Professional),
            "resumeitnow_template=professional; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }
}
