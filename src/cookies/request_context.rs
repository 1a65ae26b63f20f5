//! The request a cookie is being set from or retrieved for.

use url::Url;

/// SameSite relationship between the request and the top-level site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSiteContext {
    /// Same-site request.
    Strict,
    /// Cross-site top-level navigation.
    Lax,
    /// Cross-site subresource request.
    None,
}

impl SameSiteContext {
    pub fn level(self) -> u8 {
        match self {
            SameSiteContext::Strict => 3,
            SameSiteContext::Lax => 2,
            SameSiteContext::None => 1,
        }
    }
}

/// Host, path and scheme of a request, plus how it was issued.
///
/// Built per call by the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Lower-cased request host. IPv6 literals keep their brackets.
    pub host: String,
    pub path: String,
    pub scheme: String,
    /// The request comes from a script API (`document.cookie` and the like)
    /// rather than from an HTTP exchange.
    pub from_script: bool,
    /// `None` disables SameSite filtering.
    pub same_site: Option<SameSiteContext>,
}

impl RequestContext {
    pub fn new(host: impl Into<String>, path: impl Into<String>, scheme: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            host: host.into().to_ascii_lowercase(),
            path: if path.is_empty() { "/".to_string() } else { path },
            scheme: scheme.into().to_ascii_lowercase(),
            from_script: false,
            same_site: None,
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::new(url.host_str().unwrap_or(""), url.path(), url.scheme())
    }

    /// Parse `url` and build a context from it.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Url::parse(url).map(|u| Self::from_url(&u))
    }

    /// Mark the request as coming from a script API.
    pub fn from_script(mut self, from_script: bool) -> Self {
        self.from_script = from_script;
        self
    }

    /// Set the SameSite context.
    pub fn same_site(mut self, context: SameSiteContext) -> Self {
        self.same_site = Some(context);
        self
    }

    /// Whether `Secure` cookies may be sent to or set from this request.
    pub fn is_secure(&self) -> bool {
        matches!(self.scheme.as_str(), "https" | "wss")
    }

    /// Whether the request is an HTTP exchange (as opposed to script).
    pub fn is_http(&self) -> bool {
        !self.from_script
    }
}
