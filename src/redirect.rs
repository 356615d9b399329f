use axum::{
    http::{header, HeaderMap},
    response::Redirect,
};

/// Where toggles land when there is no usable Referer
pub const FALLBACK: &str = "/";

/// Redirect back to the referring page.
///
/// With `same_origin` set, only relative paths and absolute URLs naming the
/// request's own Host are followed; anything else falls back to `/`.
/// Without it the Referer is used verbatim.
pub fn back(headers: &HeaderMap, same_origin: bool) -> Redirect {
    Redirect::to(&referrer_target(headers, same_origin))
}

pub fn referrer_target(headers: &HeaderMap, same_origin: bool) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return FALLBACK.to_string();
    };

    if !same_origin {
        return referer.to_string();
    }

    if is_local_path(referer) {
        return referer.to_string();
    }

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    match (url::Url::parse(referer), host) {
        (Ok(url), Some(host)) if matches!(url.scheme(), "http" | "https") && authority(&url) == host => {
            let mut target = url.path().to_string();
            if let Some(query) = url.query() {
                target.push('?');
                target.push_str(query);
            }
            target
        }
        _ => {
            tracing::warn!("Ignoring cross-origin referer {}", referer);
            FALLBACK.to_string()
        }
    }
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

fn authority(url: &url::Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(referer: Option<&str>, host: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(r) = referer {
            map.insert(header::REFERER, HeaderValue::from_str(r).unwrap());
        }
        if let Some(h) = host {
            map.insert(header::HOST, HeaderValue::from_str(h).unwrap());
        }
        map
    }

    #[test]
    fn missing_referer_goes_home() {
        assert_eq!(referrer_target(&headers(None, Some("lists.test")), true), "/");
        assert_eq!(referrer_target(&headers(None, None), false), "/");
    }

    #[test]
    fn same_host_referer_is_followed() {
        let h = headers(Some("http://lists.test:8080/4/?page=2"), Some("lists.test:8080"));
        assert_eq!(referrer_target(&h, true), "/4/?page=2");
    }

    #[test]
    fn relative_referer_is_followed() {
        assert_eq!(referrer_target(&headers(Some("/4/"), None), true), "/4/");
    }

    #[test]
    fn foreign_referer_is_refused_when_restricted() {
        let h = headers(Some("https://evil.example/phish"), Some("lists.test"));
        assert_eq!(referrer_target(&h, true), "/");
        assert_eq!(referrer_target(&headers(Some("//evil.example/x"), None), true), "/");
    }

    #[test]
    fn unrestricted_mode_uses_referer_verbatim() {
        let h = headers(Some("https://evil.example/phish"), Some("lists.test"));
        assert_eq!(referrer_target(&h, false), "https://evil.example/phish");
    }
}
