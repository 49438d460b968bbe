//! RS256 implementation of the [`TokenCodec`] port.
//!
//! Only RS256 is accepted on verification. Expiry is checked against the
//! caller-supplied instant rather than the system clock so verification stays
//! a pure function of token, time and key.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ports::{TOKEN_LIFETIME_SECS, TokenCodec, TokenCodecError};
use crate::domain::{User, UserId};

const ALGORITHM: Algorithm = Algorithm::RS256;

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenClaims {
    /// User id as a decimal string.
    sub: String,
    /// Display name at issuance.
    name: String,
    iat: i64,
    exp: i64,
}

/// Key material problems detected while building a [`JwtTokenCodec`].
#[derive(Debug, Error)]
pub enum JwtKeyError {
    /// Private key PEM could not be parsed as an RSA key.
    #[error("invalid RSA private key: {0}")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),
    /// Public key PEM could not be parsed as an RSA key.
    #[error("invalid RSA public key: {0}")]
    InvalidPublicKey(#[source] jsonwebtoken::errors::Error),
    /// The keys parsed but do not form a usable signing pair.
    #[error("RSA key pair failed a sign-and-verify check: {0}")]
    KeyMismatch(String),
}

/// Bearer token codec backed by an RSA key pair.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Build a codec from PEM-encoded keys.
    ///
    /// A throwaway token is signed and verified before returning, so an unusable
    /// or mismatched pair is reported here rather than on the first login.
    ///
    /// # Errors
    /// Returns [`JwtKeyError`] when either key fails to parse or the pair does
    /// not verify its own signature.
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, JwtKeyError> {
        let encoding =
            EncodingKey::from_rsa_pem(private_pem).map_err(JwtKeyError::InvalidPrivateKey)?;
        let decoding =
            DecodingKey::from_rsa_pem(public_pem).map_err(JwtKeyError::InvalidPublicKey)?;

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let codec = Self {
            encoding,
            decoding,
            validation,
        };
        codec.check_pair()?;
        Ok(codec)
    }

    fn check_pair(&self) -> Result<(), JwtKeyError> {
        let claims = TokenClaims {
            sub: "0".to_owned(),
            name: "key-check".to_owned(),
            iat: 0,
            exp: TOKEN_LIFETIME_SECS,
        };
        let token = self
            .sign(&claims)
            .map_err(|err| JwtKeyError::KeyMismatch(err.to_string()))?;
        decode::<TokenClaims>(&token, &self.decoding, &self.validation)
            .map(|_| ())
            .map_err(|err| JwtKeyError::KeyMismatch(err.to_string()))
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenCodecError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding)
            .map_err(|err| TokenCodecError::signing(err.to_string()))
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenCodecError> {
        let iat = now.timestamp();
        self.sign(&TokenClaims {
            sub: user.id.to_string(),
            name: user.fullname.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        })
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenCodecError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenCodecError::rejected(format!("{:?}", err.kind())))?;
        if data.claims.exp <= now.timestamp() {
            return Err(TokenCodecError::rejected("expired"));
        }
        data.claims
            .sub
            .parse()
            .map_err(|_| TokenCodecError::rejected("subject is not a numeric id"))
    }
}
