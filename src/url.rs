//! Canonical `vless://` connection URL construction.

use uuid::Uuid;

use crate::conf::{ClientRecord, FLOW_VISION};

const PORT: u16 = 443;
const FINGERPRINT: &str = "chrome";
const SNI: &str = "google.com";

/// Pure composition of the shareable URL. Field order and encoding are
/// load-bearing: client apps import this string byte-for-byte.
pub fn compose(client: &ClientRecord, ip: &str, public_key: &str, short_id: &str) -> String {
    format!(
        "vless://{}@{}:{}?type=tcp&security=reality&pbk={}&fp={}&sni={}&sid={}&spx=%2F&flow={}#{}",
        client.id, ip, PORT, public_key, FINGERPRINT, SNI, short_id, FLOW_VISION, client.email
    )
}

/// A fresh short-id: the leading group of a UUIDv4, eight lowercase hex
/// characters. Not wired into any mutating command; operators paste it into
/// the document by hand when rotating.
pub fn generate_short_id() -> String {
    let sid = Uuid::new_v4().to_string();
    match sid.find('-') {
        Some(pos) => sid[..pos].to_string(),
        None => sid,
    }
}
