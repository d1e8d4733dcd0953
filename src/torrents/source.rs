//! Torrent source validation and overlay URLs

/// Overlay page that resolves a torrent source into a playable stream
pub const OVERLAY_PAGE: &str = "webtor-overlay.html";

/// Loose check for a magnet link or torrent URL
///
/// Any http(s) URL passes, not only ones ending in `.torrent`: the overlay
/// sniffs the content itself.
pub fn is_probably_torrent_source(s: &str) -> bool {
    let v = s.trim();
    v.starts_with("magnet:?")
        || v.ends_with(".torrent")
        || v.starts_with("http://")
        || v.starts_with("https://")
}

/// Percent-encode like JavaScript's `encodeURIComponent`
///
/// `urlencoding` escapes everything but `A-Z a-z 0-9 - _ . ~`; the
/// component encoder also leaves `! ' ( ) *` alone.
pub fn encode_uri_component(s: &str) -> String {
    urlencoding::encode(s)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Overlay target for a torrent source: `<page>?src=<encoded source>`
pub fn overlay_url(page: &str, src: &str) -> String {
    format!("{}?src={}", page, encode_uri_component(src.trim()))
}
