//! Cookie persistence - save and load cookie jars to/from disk.
//!
//! A [`SerializedJar`] is the versioned interchange format produced by
//! [`CookieJar::serialize`](crate::cookies::jar::CookieJar::serialize):
//!
//! ```json
//! {
//!   "version": 1,
//!   "storeType": "memory",
//!   "config": { "reject_public_suffixes": true, ... },
//!   "cookies": [
//!     {
//!       "key": "session", "value": "abc123",
//!       "domain": "example.com", "path": "/",
//!       "expires": "Infinity",
//!       "secure": true, "httpOnly": true, "hostOnly": false,
//!       "sameSite": "lax", "priority": "medium",
//!       "creation": "2024-01-01T00:00:00Z",
//!       "lastAccessed": "2024-01-01T00:00:00Z",
//!       "creationIndex": 7
//!     }
//!   ]
//! }
//! ```
//!
//! `expires` is either an RFC 3339 timestamp or `"Infinity"` for session
//! cookies. `creationIndex` is restored verbatim, never renumbered.

use crate::base::context::{IoResultExt, JsonResultExt};
use crate::base::error::CookieError;
use crate::cookies::canonical_cookie::{CanonicalCookie, CookiePriority, SameSite};
use crate::cookies::config::CookieJarConfig;
use crate::cookies::jar::CookieJar;
use crate::cookies::matching::canonical_domain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

/// Current snapshot format version.
pub const SERIALIZATION_VERSION: u32 = 1;

/// Sentinel stored in `expires` for session cookies.
pub const SESSION_EXPIRY: &str = "Infinity";

mod rfc3339 {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(t: &OffsetDateTime, s: S) -> Result<S::Ok, S::Error> {
        let text = t
            .format(&Rfc3339)
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<OffsetDateTime, D::Error> {
        let text = String::deserialize(d)?;
        OffsetDateTime::parse(&text, &Rfc3339).map_err(de::Error::custom)
    }
}

mod session_or_rfc3339 {
    use super::SESSION_EXPIRY;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(t: &Option<OffsetDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => super::rfc3339::serialize(t, s),
            None => s.serialize_str(SESSION_EXPIRY),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let text = String::deserialize(d)?;
        if text == SESSION_EXPIRY {
            return Ok(None);
        }
        OffsetDateTime::parse(&text, &Rfc3339)
            .map(Some)
            .map_err(de::Error::custom)
    }
}

/// Serializable representation of a stored cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CookieSnapshot {
    pub key: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(with = "session_or_rfc3339")]
    pub expires: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub host_only: bool,
    #[serde(default)]
    pub same_site: SameSite,
    #[serde(default)]
    pub priority: CookiePriority,
    #[serde(with = "rfc3339")]
    pub creation: OffsetDateTime,
    #[serde(with = "rfc3339")]
    pub last_accessed: OffsetDateTime,
    pub creation_index: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

impl From<&CanonicalCookie> for CookieSnapshot {
    fn from(cookie: &CanonicalCookie) -> Self {
        Self {
            key: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: cookie.domain.clone(),
            path: cookie.path.clone(),
            expires: cookie.expiration_time,
            max_age: cookie.max_age,
            secure: cookie.secure,
            http_only: cookie.http_only,
            host_only: cookie.host_only,
            same_site: cookie.same_site,
            priority: cookie.priority,
            creation: cookie.creation_time,
            last_accessed: cookie.last_access_time,
            creation_index: cookie.creation_index,
            extensions: cookie.extensions.clone(),
        }
    }
}

impl CookieSnapshot {
    /// Rebuild the stored cookie, keeping its creation index.
    pub fn into_cookie(self) -> Result<CanonicalCookie, CookieError> {
        if !self.path.starts_with('/') {
            return Err(CookieError::invalid_serialized_jar(format!(
                "cookie '{}' has invalid path '{}'",
                self.key, self.path
            )));
        }
        let domain = canonical_domain(&self.domain);
        if domain.is_empty() {
            return Err(CookieError::invalid_serialized_jar(format!(
                "cookie '{}' has no domain",
                self.key
            )));
        }

        Ok(CanonicalCookie {
            name: self.key,
            value: self.value,
            domain,
            path: self.path,
            creation_time: self.creation,
            expiration_time: self.expires,
            max_age: self.max_age,
            last_access_time: self.last_accessed,
            secure: self.secure,
            http_only: self.http_only,
            host_only: self.host_only,
            same_site: self.same_site,
            priority: self.priority,
            creation_index: self.creation_index,
            extensions: self.extensions,
        })
    }
}

/// Versioned snapshot of a whole jar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedJar {
    pub version: u32,
    #[serde(default)]
    pub store_type: Option<String>,
    #[serde(default)]
    pub config: CookieJarConfig,
    pub cookies: Vec<CookieSnapshot>,
}

impl SerializedJar {
    pub fn new(store_type: &str, config: CookieJarConfig, cookies: &[CanonicalCookie]) -> Self {
        Self {
            version: SERIALIZATION_VERSION,
            store_type: Some(store_type.to_string()),
            config,
            cookies: cookies.iter().map(CookieSnapshot::from).collect(),
        }
    }

    /// Fail on versions this build does not understand.
    pub fn check_version(&self) -> Result<(), CookieError> {
        check_version(self.version)
    }

    /// Decode a snapshot, checking the version before the layout so that a
    /// future format is reported as such rather than as garbage.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        let raw: serde_json::Value = serde_json::from_str(json).snapshot_context()?;
        let version = raw
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| CookieError::invalid_serialized_jar("missing version"))?;
        check_version(u32::try_from(version).unwrap_or(u32::MAX))?;

        serde_json::from_value(raw).snapshot_context()
    }

    pub fn to_json(&self) -> Result<String, CookieError> {
        serde_json::to_string(self).snapshot_context()
    }

    pub fn to_json_pretty(&self) -> Result<String, CookieError> {
        serde_json::to_string_pretty(self).snapshot_context()
    }

    /// Save the snapshot to a file.
    ///
    /// # Example
    /// ```ignore
    /// jar.serialize().await?.save(Path::new("/path/to/cookies.json"))?;
    /// ```
    pub fn save(&self, path: &Path) -> Result<(), CookieError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).store_context("file")
    }

    /// Load a snapshot from a file.
    ///
    /// # Example
    /// ```ignore
    /// let jar = CookieJar::deserialize(SerializedJar::load(path)?).await?;
    /// ```
    pub fn load(path: &Path) -> Result<Self, CookieError> {
        let json = fs::read_to_string(path).store_context("file")?;
        Self::from_json(&json)
    }
}

/// Serialize `jar` and write it to `path`.
pub async fn save_jar(jar: &CookieJar, path: &Path) -> Result<(), CookieError> {
    let snapshot = jar.serialize().await?;
    snapshot.save(path)?;
    tracing::debug!(path = %path.display(), count = snapshot.cookies.len(), "saved cookie jar");
    Ok(())
}

/// Read a jar written by [`save_jar`] into a fresh in-memory jar.
pub async fn load_jar(path: &Path) -> Result<CookieJar, CookieError> {
    CookieJar::deserialize(SerializedJar::load(path)?).await
}

fn check_version(version: u32) -> Result<(), CookieError> {
    if version == 0 || version > SERIALIZATION_VERSION {
        return Err(CookieError::UnsupportedSerializationVersion(version));
    }
    Ok(())
}
