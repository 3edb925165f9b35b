// Session strings are URL-safe base64 of grammers' serialized session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use grammers_session::Session;

use crate::TelegramError;

pub fn encode(session: &Session) -> String {
    URL_SAFE_NO_PAD.encode(session.save())
}

pub fn decode(session: &str) -> Result<Session, TelegramError> {
    let bytes = decode_bytes(session)?;
    Session::load(&bytes).map_err(|e| TelegramError::InvalidSession(e.to_string()))
}

fn decode_bytes(session: &str) -> Result<Vec<u8>, TelegramError> {
    let session = session.trim().trim_end_matches('=');
    if session.is_empty() {
        return Err(TelegramError::InvalidSession("empty session string".to_string()));
    }

    URL_SAFE_NO_PAD
        .decode(session)
        .map_err(|e| TelegramError::InvalidSession(e.to_string()))
}
