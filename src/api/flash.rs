//! One-shot user messages.
//!
//! A [`FlashMessage`] set before a redirect travels in a short-lived cookie
//! and is shown by the next list page, which also clears the cookie.

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use serde::Serialize;

/// Cookie carrying a flash message across a redirect.
pub const FLASH_COOKIE: &str = "todo_flash";

/// Seconds a flash cookie survives if the redirect is never followed.
const FLASH_MAX_AGE_SECONDS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A user-visible feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub severity: Severity,
    pub text: String,
}

impl FlashMessage {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    /// `Set-Cookie` value that carries this message to the next request.
    #[must_use]
    pub fn to_set_cookie(&self) -> String {
        let value = format!("{}:{}", self.severity.prefix(), self.text);
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(FLASH_MAX_AGE_SECONDS))
            .build()
            .encoded()
            .to_string()
    }

    /// Reads a flash message from a `Cookie` request header value.
    ///
    /// Unknown severities and malformed cookies are ignored.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        Cookie::split_parse_encoded(header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == FLASH_COOKIE)
            .and_then(|cookie| Self::decode(cookie.value()))
    }

    fn decode(value: &str) -> Option<Self> {
        let (prefix, text) = value.split_once(':')?;
        let severity = match prefix {
            "info" => Severity::Info,
            "error" => Severity::Error,
            _ => return None,
        };
        Some(Self {
            severity,
            text: text.to_string(),
        })
    }
}

/// `true` if a `Cookie` request header carries a flash cookie, readable or not.
#[must_use]
pub fn has_flash_cookie(header: &str) -> bool {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .any(|cookie| cookie.name() == FLASH_COOKIE)
}

/// `Set-Cookie` value that deletes the flash cookie.
#[must_use]
pub fn clear_flash_cookie() -> String {
    let mut cookie = Cookie::build((FLASH_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request_header_from(set_cookie: &str) -> String {
        // A browser sends back only the name=value pair.
        set_cookie
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    #[rstest]
    #[case(FlashMessage::info("TODO ID: 3 has been finished."))]
    #[case(FlashMessage::error("[E002] The TODO is already finished. TODO ID = 3"))]
    #[case(FlashMessage::info("semi;colons, commas = and spaces"))]
    fn survives_a_cookie_trip(#[case] message: FlashMessage) {
        let header = request_header_from(&message.to_set_cookie());

        assert_eq!(FlashMessage::from_cookie_header(&header), Some(message));
    }

    #[rstest]
    fn set_cookie_has_safe_attributes() {
        let set_cookie = FlashMessage::info("hello").to_set_cookie();

        assert!(set_cookie.starts_with("todo_flash="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=60"));
    }

    #[rstest]
    fn other_cookies_are_ignored() {
        let header = format!(
            "session=abc; {}; theme=dark",
            request_header_from(&FlashMessage::info("kept").to_set_cookie())
        );

        assert_eq!(
            FlashMessage::from_cookie_header(&header),
            Some(FlashMessage::info("kept"))
        );
    }

    #[rstest]
    #[case("")]
    #[case("session=abc")]
    #[case("todo_flash=warning:unknown")]
    #[case("todo_flash=no-separator")]
    fn absent_or_malformed_yields_none(#[case] header: &str) {
        assert_eq!(FlashMessage::from_cookie_header(header), None);
    }

    #[rstest]
    #[case("todo_flash=warning:unknown", true)]
    #[case("session=abc; todo_flash=no-separator", true)]
    #[case("todo_flash=info:hello", true)]
    #[case("session=abc", false)]
    #[case("", false)]
    fn flash_cookie_presence_ignores_content(#[case] header: &str, #[case] expected: bool) {
        assert_eq!(has_flash_cookie(header), expected);
    }

    #[rstest]
    fn clearing_cookie_expires_it() {
        let set_cookie = clear_flash_cookie();

        assert!(set_cookie.starts_with("todo_flash="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
