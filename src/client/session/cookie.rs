//! Cookie formatting and the [`CookieStore`] seam.
//!
//! The browser exposes cookies as a single `document.cookie` string; writing that property
//! with a `Set-Cookie` style string stores or expires one cookie. The helpers here build and
//! parse those strings so the same logic backs both the browser store and [`MemoryCookies`].

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use chrono::{DateTime, Duration, Utc};
use url::form_urlencoded;

use crate::client::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CookieOptions {
    pub expires: Option<Duration>,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            expires: Some(Duration::days(1)),
            path: "/".to_string(),
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Storage for named cookies
pub trait CookieStore {
    fn get(&self, name: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), ClientError>;
    fn remove(&self, name: &str, path: &str) -> Result<(), ClientError>;
}

impl<T: CookieStore + ?Sized> CookieStore for Box<T> {
    fn get(&self, name: &str) -> Result<Option<String>, ClientError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), ClientError> {
        (**self).set(name, value, options)
    }

    fn remove(&self, name: &str, path: &str) -> Result<(), ClientError> {
        (**self).remove(name, path)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for Rc<T> {
    fn get(&self, name: &str) -> Result<Option<String>, ClientError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), ClientError> {
        (**self).set(name, value, options)
    }

    fn remove(&self, name: &str, path: &str) -> Result<(), ClientError> {
        (**self).remove(name, path)
    }
}

/// Percent-encodes like `encodeURIComponent`; spaces become `%20`, never `+`
fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Percent-decodes like `decodeURIComponent`; a literal `+` is kept
fn decode(value: &str) -> String {
    form_urlencoded::parse(format!("v={}", value.replace('+', "%2B")).as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

/// RFC 1123 date as produced by `Date.prototype.toUTCString`
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Builds the string assigned to `document.cookie` to store a cookie
pub fn format_set_cookie(
    name: &str,
    value: &str,
    options: &CookieOptions,
    now: DateTime<Utc>,
) -> String {
    let mut cookie = format!("{}={}", encode(name), encode(value));

    if let Some(expires) = options.expires {
        cookie.push_str(&format!("; expires={}", format_expiry(now + expires)));
    }

    cookie.push_str(&format!("; path={}", options.path));

    if options.secure {
        cookie.push_str("; secure");
    }

    cookie.push_str(&format!("; SameSite={}", options.same_site.as_str()));

    cookie
}

/// Builds the string assigned to `document.cookie` to expire a cookie
pub fn format_delete_cookie(name: &str, path: &str) -> String {
    format!(
        "{}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path={}",
        encode(name),
        path
    )
}

/// Finds a cookie value in a `document.cookie` style `name=value; name2=value2` string
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", encode(name));

    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(decode)
}

/// Cookies held in memory, used off the browser and in tests
///
/// Assignments are parsed with the same format the browser receives, so an `expires` date in
/// the past deletes the cookie.
#[derive(Default)]
pub struct MemoryCookies {
    jar: RefCell<HashMap<String, String>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a `document.cookie` assignment
    pub fn assign(&self, cookie: &str, now: DateTime<Utc>) -> Result<(), ClientError> {
        let mut attributes = cookie.split(';').map(str::trim);
        let pair = attributes.next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| ClientError::Storage(format!("Malformed cookie: {}", cookie)))?;

        let expired = attributes
            .filter_map(|attr| attr.strip_prefix("expires="))
            .filter_map(|date| DateTime::parse_from_rfc2822(&date.replace("GMT", "+0000")).ok())
            .any(|expires| expires.with_timezone(&Utc) <= now);

        let mut jar = self.jar.borrow_mut();
        if expired {
            jar.remove(name);
        } else {
            jar.insert(name.to_string(), value.to_string());
        }

        Ok(())
    }

    /// The jar rendered the way `document.cookie` reads
    pub fn header(&self) -> String {
        let jar = self.jar.borrow();
        let mut pairs: Vec<String> = jar.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        pairs.sort();
        pairs.join("; ")
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Result<Option<String>, ClientError> {
        Ok(find_cookie(&self.header(), name))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), ClientError> {
        let now = Utc::now();
        self.assign(&format_set_cookie(name, value, options, now), now)
    }

    fn remove(&self, name: &str, path: &str) -> Result<(), ClientError> {
        self.assign(&format_delete_cookie(name, path), Utc::now())
    }
}

/// Cookies of the current document
#[cfg(feature = "web")]
pub struct BrowserCookies;

#[cfg(feature = "web")]
impl BrowserCookies {
    fn document() -> Result<web_sys::HtmlDocument, ClientError> {
        use wasm_bindgen::JsCast;

        web_sys::window()
            .and_then(|window| window.document())
            .ok_or(ClientError::Unavailable("document"))?
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| ClientError::Unavailable("HtmlDocument"))
    }

    fn write(cookie: &str) -> Result<(), ClientError> {
        Self::document()?
            .set_cookie(cookie)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }
}

#[cfg(feature = "web")]
impl CookieStore for BrowserCookies {
    fn get(&self, name: &str) -> Result<Option<String>, ClientError> {
        let cookies = Self::document()?
            .cookie()
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?;

        Ok(find_cookie(&cookies, name))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), ClientError> {
        Self::write(&format_set_cookie(name, value, options, Utc::now()))
    }

    fn remove(&self, name: &str, path: &str) -> Result<(), ClientError> {
        Self::write(&format_delete_cookie(name, path))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    mod format_set_cookie {
        use super::*;

        #[test]
        fn includes_expiry_path_and_same_site() {
            let options = CookieOptions::default();
            let cookie = format_set_cookie("access_token", "abc.def", &options, now());

            assert_eq!(
                cookie,
                "access_token=abc.def; expires=Tue, 16 Jan 2024 10:00:00 GMT; path=/; SameSite=Lax"
            );
        }

        #[test]
        fn secure_flag_and_session_cookie() {
            let options = CookieOptions {
                expires: None,
                secure: true,
                same_site: SameSite::Strict,
                ..Default::default()
            };

            assert_eq!(
                format_set_cookie("a", "b", &options, now()),
                "a=b; path=/; secure; SameSite=Strict"
            );
        }
    }

    mod find_cookie {
        use super::*;

        #[test]
        fn finds_value_among_others() {
            let cookies = "theme=dark; access_token=abc; refresh_token=xyz";

            assert_eq!(find_cookie(cookies, "access_token"), Some("abc".to_string()));
            assert_eq!(find_cookie(cookies, "refresh_token"), Some("xyz".to_string()));
        }

        #[test]
        fn does_not_match_name_suffix() {
            assert_eq!(find_cookie("old_access_token=abc", "access_token"), None);
        }

        #[test]
        fn decodes_encoded_values() {
            let options = CookieOptions::default();
            let cookie = format_set_cookie("note", "a b;c", &options, now());
            let pair = cookie.split(';').next().unwrap();

            assert!(pair.starts_with("note=a%20b"));
            assert_eq!(find_cookie(pair, "note"), Some("a b;c".to_string()));
        }

        #[test]
        fn keeps_literal_plus_in_foreign_values() {
            assert_eq!(
                find_cookie("refresh_token=abc+def/ghi==", "refresh_token"),
                Some("abc+def/ghi==".to_string())
            );
        }

        #[test]
        fn encoded_plus_round_trips() {
            let options = CookieOptions::default();
            let cookie = format_set_cookie("refresh_token", "a+b c", &options, now());
            let pair = cookie.split(';').next().unwrap();

            assert_eq!(find_cookie(pair, "refresh_token"), Some("a+b c".to_string()));
        }
    }

    mod memory_cookies {
        use super::*;

        #[test]
        fn set_then_remove() {
            let cookies = MemoryCookies::new();

            cookies.set("access_token", "abc", &CookieOptions::default()).unwrap();
            assert_eq!(cookies.get("access_token").unwrap(), Some("abc".to_string()));

            cookies.remove("access_token", "/").unwrap();
            assert_eq!(cookies.get("access_token").unwrap(), None);
        }

        #[test]
        fn past_expiry_deletes() {
            let cookies = MemoryCookies::new();
            cookies.assign("a=1; path=/", now()).unwrap();

            cookies
                .assign("a=2; expires=Mon, 15 Jan 2024 09:00:00 GMT; path=/", now())
                .unwrap();

            assert_eq!(cookies.header(), "");
        }
    }
}
