//! Shared key generation for portfolio images.
//!
//! Key format: `portfolio/{original|styled}/{category}/{file_id}.jpg`.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use uuid::Uuid;

const PREFIX: &str = "portfolio";

/// Characters escaped inside a URL path segment. Non-ASCII is always escaped.
const URL_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Key as it appears in a public URL: each segment percent-encoded, `/` kept.
pub fn encode_key_for_url(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, URL_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Object keys of one uploaded photo. Both variants share the category and file id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoKeys {
    pub original: String,
    pub styled: String,
}

impl PhotoKeys {
    pub fn new(category: &str, file_id: Uuid) -> Self {
        PhotoKeys {
            original: format!("{}/original/{}/{}.jpg", PREFIX, category, file_id),
            styled: format!("{}/styled/{}/{}.jpg", PREFIX, category, file_id),
        }
    }

    /// Keys for a freshly generated file id
    pub fn generate(category: &str) -> Self {
        Self::new(category, Uuid::new_v4())
    }
}
