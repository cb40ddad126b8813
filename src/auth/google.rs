//! Google sign-in (OAuth 2.0 authorization-code flow).
//!
//! The `state` parameter is `nonce.issued_at.signature`, an HMAC-SHA256 over
//! `nonce.issued_at` keyed with the JWT secret, so the callback can check it
//! without server-side session storage.

use anyhow::Context;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::Deserialize;
use sha2::Sha256;

use crate::config::GoogleConfig;

type HmacSha256 = Hmac<Sha256>;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// How long a user has to finish the consent screen.
const STATE_TTL_SECS: i64 = 600;
/// Tolerated clock skew for states issued "in the future".
const STATE_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub name: Option<String>,
}

impl GoogleProfile {
    /// Profile name, falling back to the local part of the email.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Google User".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn signature(secret: &str, payload: &str) -> anyhow::Result<HmacSha256> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).context("Invalid HMAC key for OAuth state")?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

pub fn sign_state(secret: &str, issued_at: i64) -> anyhow::Result<String> {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);
    let payload = format!("{}.{}", hex::encode(nonce), issued_at);
    let sig = signature(secret, &payload)?.finalize().into_bytes();
    Ok(format!("{}.{}", payload, hex::encode(sig)))
}

/// True when `state` was signed with `secret` and issued within the TTL.
pub fn verify_state(secret: &str, state: &str, now: i64) -> bool {
    let Some((payload, sig_hex)) = state.rsplit_once('.') else {
        return false;
    };
    let Some(issued_at) = payload
        .split_once('.')
        .and_then(|(_, ts)| ts.parse::<i64>().ok())
    else {
        return false;
    };
    if issued_at > now + STATE_SKEW_SECS || now - issued_at > STATE_TTL_SECS {
        return false;
    }
    let Ok(sig) = hex::decode(sig_hex) else {
        return false;
    };
    match signature(secret, payload) {
        Ok(mac) => mac.verify_slice(&sig).is_ok(),
        Err(_) => false,
    }
}

pub fn authorize_url(google: &GoogleConfig, state: &str) -> anyhow::Result<reqwest::Url> {
    reqwest::Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", google.client_id.as_str()),
            ("redirect_uri", google.callback_url.as_str()),
            ("response_type", "code"),
            ("scope", "openid email profile"),
            ("state", state),
        ],
    )
    .context("Failed to build Google authorize URL")
}

/// Trade the authorization code for an access token, then read the profile.
pub async fn fetch_profile(
    http: &reqwest::Client,
    google: &GoogleConfig,
    code: &str,
) -> anyhow::Result<GoogleProfile> {
    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", google.client_id.as_str()),
            ("client_secret", google.client_secret.as_str()),
            ("redirect_uri", google.callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Google token exchange failed {}: {}", status, body);
    }
    let token: TokenResponse = response.json().await?;

    let response = http
        .get(USERINFO_URL)
        .bearer_auth(&token.access_token)
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("Google userinfo request failed {}", response.status());
    }
    Ok(response.json().await?)
}
