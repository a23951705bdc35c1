use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header, jwk::JwkSet};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

const JWKS_TTL: Duration = Duration::from_secs(60 * 60);

/// Identity confirmed by an external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
}

/// Checks an identity token issued by an external provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity>;
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

/// Verifies Google ID tokens against Google's published signing keys.
#[derive(Clone)]
pub struct GoogleIdTokenVerifier {
    client: reqwest::Client,
    jwks_url: String,
    audience: String,
    issuers: Vec<String>,
    keys: Cache<String, Arc<JwkSet>>,
}

impl GoogleIdTokenVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            jwks_url: config.google_jwks_url.clone(),
            audience: config.google_audience.clone(),
            issuers: config.google_issuers.clone(),
            keys: Cache::builder().max_capacity(1).time_to_live(JWKS_TTL).build(),
        }
    }

    async fn fetch_keys(&self) -> Result<Arc<JwkSet>> {
        let client = self.client.clone();
        let url = self.jwks_url.clone();

        self.keys
            .try_get_with(self.jwks_url.clone(), async move {
                log::debug!("Fetching signing keys from {}", url);
                let keys = client
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<JwkSet>()
                    .await?;
                Ok::<_, reqwest::Error>(Arc::new(keys))
            })
            .await
            .map_err(|err| anyhow!("failed to fetch signing keys: {}", err))
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity> {
        if self.audience.is_empty() {
            bail!("google audience is not configured");
        }

        let header = decode_header(id_token).context("malformed identity token")?;
        let kid = header.kid.context("identity token has no key id")?;

        let keys = self.fetch_keys().await?;
        let jwk = match keys.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => {
                // Keys rotate; refetch once before giving up
                self.keys.invalidate(&self.jwks_url).await;
                let refreshed = self.fetch_keys().await?;
                refreshed
                    .find(&kid)
                    .cloned()
                    .with_context(|| format!("unknown signing key {}", kid))?
            }
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&self.issuers);

        let key = DecodingKey::from_jwk(&jwk)?;
        let claims = decode::<GoogleClaims>(id_token, &key, &validation)?.claims;

        match claims.email {
            Some(email) if claims.email_verified => Ok(VerifiedIdentity { email }),
            Some(_) => bail!("identity token e-mail is not verified"),
            None => bail!("identity token carries no e-mail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_tokens_when_audience_is_unset() {
        let mut config = Config::test_config();
        config.google_audience = String::new();
        let verifier = GoogleIdTokenVerifier::new(&config);

        assert!(verifier.verify("anything").await.is_err());
    }

    #[tokio::test]
    async fn rejects_malformed_tokens_before_fetching_keys() {
        let mut config = Config::test_config();
        config.google_jwks_url = "http://127.0.0.1:9/unreachable".to_string();
        let verifier = GoogleIdTokenVerifier::new(&config);

        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
