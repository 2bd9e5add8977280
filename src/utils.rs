use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::{config::Config, error::AuthError};

pub const CODE_VERIFIER_LENGTH: usize = 64;

pub const PKCE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws `length` bytes from the OS CSPRNG and maps each one onto the
/// alphanumeric alphabet (byte modulo 62).
pub fn generate_code_verifier(length: usize) -> Result<String, AuthError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::Rng(e.to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| PKCE_ALPHABET[*b as usize % PKCE_ALPHABET.len()] as char)
        .collect())
}

/// S256 challenge: base64url(sha256(verifier)) without padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn authorization_url(config: &Config, code_challenge: &str) -> Result<Url, AuthError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .map_err(|e| AuthError::InvalidUrl(e.to_string()))
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn authorization_code(url: &Url) -> Option<String> {
    query_param(url, "code")
}

pub fn authorization_error(url: &Url) -> Option<String> {
    query_param(url, "error")
}

/// Zero-based track positions picked on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackIndices(pub Vec<usize>);

/// Parses a comma separated list of zero-based track positions, e.g. `0,2,5`.
pub fn parse_track_indices(raw: &str) -> Result<TrackIndices, String> {
    let indices = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| format!("'{}' is not a track number", s))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if indices.is_empty() {
        return Err("no track numbers given".to_string());
    }
    Ok(TrackIndices(indices))
}
