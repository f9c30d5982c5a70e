//! Shareable-link encoding.
//!
//! A persona travels as `base64(percent-encode(JSON(persona without id)))`
//! in the `sharedPersona` query parameter of the app URL.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use url::Url;

use studio_core::error::{Result, StudioError};
use studio_core::persona::PersonaConfig;

pub const SHARED_PERSONA_PARAM: &str = "sharedPersona";

/// Encodes a persona into the link payload. The id is never included.
pub fn encode_persona(persona: &PersonaConfig) -> Result<String> {
    let json = serde_json::to_string(&persona.without_id())?;
    let uri_encoded = urlencoding::encode(&json);
    Ok(BASE64_STANDARD.encode(uri_encoded.as_bytes()))
}

/// Decodes a link payload back into persona JSON text.
///
/// Accepts the payload as it appears in a copied URL too: a
/// percent-encoded value is unescaped first, and spaces left by form
/// decoding are read back as `+`.
pub fn decode_payload(encoded: &str) -> Result<String> {
    let mut payload = encoded.trim().to_string();
    if payload.contains('%') {
        payload = urlencoding::decode(&payload)
            .map_err(|e| StudioError::serialization("URI", e.to_string()))?
            .into_owned();
    }
    let payload = payload.replace(' ', "+");

    let bytes = BASE64_STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| StudioError::serialization("base64", e.to_string()))?;
    let uri_encoded =
        String::from_utf8(bytes).map_err(|e| StudioError::serialization("UTF-8", e.to_string()))?;
    let json = urlencoding::decode(&uri_encoded)
        .map_err(|e| StudioError::serialization("URI", e.to_string()))?;
    Ok(json.into_owned())
}

/// Appends the payload to `base_url` as the `sharedPersona` parameter,
/// replacing any existing one.
pub fn build_share_url(base_url: &str, encoded: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| StudioError::config(format!("Invalid share base URL '{base_url}': {e}")))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARED_PERSONA_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(SHARED_PERSONA_PARAM, encoded);
    }
    Ok(url.to_string())
}

/// Returns the `sharedPersona` payload carried by `url`, if any.
pub fn extract_shared_persona(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == SHARED_PERSONA_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Removes the `sharedPersona` parameter, keeping everything else.
pub fn strip_shared_persona(url: &str) -> Result<String> {
    let mut parsed =
        Url::parse(url).map_err(|e| StudioError::validation(format!("Invalid URL '{url}': {e}")))?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != SHARED_PERSONA_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept.iter());
    }
    Ok(parsed.to_string())
}
