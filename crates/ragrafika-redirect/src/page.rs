//! Target URL construction and the redirect page itself.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Query keys and values: everything except unreserved characters is escaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path: keep `/` and existing escapes, escape what could break out of HTML or a JS string.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'^')
    .add(b'|')
    .add(b'#')
    .add(b'?');

fn encode_query_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// `https://{host}{path}{?query}`. Parameters are emitted sorted by key; an empty
/// path becomes `/`.
pub fn build_target_url(host: &str, path: &str, query: &BTreeMap<String, String>) -> String {
    let path = if path.is_empty() { "/" } else { path };
    let mut url = format!("https://{}", host);

    if !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(&utf8_percent_encode(path, PATH).to_string());

    if !query.is_empty() {
        let encoded: Vec<String> = query
            .iter()
            .map(|(k, v)| {
                format!("{}={}", encode_query_component(k), encode_query_component(v))
            })
            .collect();
        url.push('?');
        url.push_str(&encoded.join("&"));
    }

    url
}

/// Redirect page for `target`. `host` is the link text shown to users without scripts.
pub fn render_html(target: &str, host: &str) -> String {
    let href = target.replace('&', "&amp;");
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Перенаправление...</title>
    <link rel="canonical" href="{href}"/>
    <script>window.location.replace("{target}");</script>
    <noscript>
        <meta http-equiv="refresh" content="0;url={href}">
    </noscript>
</head>
<body>
    <p>Перенаправление на <a href="{href}">{host}</a>...</p>
</body>
</html>"#
    )
}
