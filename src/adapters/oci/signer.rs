use std::fs;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use super::config_file::OciProfile;
use crate::ports::AuthError;

/// Signs requests with the OCI HTTP Signature scheme (rsa-sha256)
pub struct RequestSigner {
    key_id: String,
    signing_key: SigningKey<Sha256>,
}

impl RequestSigner {
    pub fn from_profile(profile: &OciProfile) -> Result<Self, AuthError> {
        let pem = fs::read_to_string(&profile.key_file).map_err(|source| AuthError::KeyFile {
            path: profile.key_file.clone(),
            source,
        })?;

        Self::from_pem(profile.key_id(), &pem)
    }

    pub fn from_pem(key_id: String, pem: &str) -> Result<Self, AuthError> {
        if pem.contains("ENCRYPTED") {
            return Err(AuthError::EncryptedKey);
        }

        // `oci setup config` writes PKCS#8; older keys are PKCS#1
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        Ok(Self {
            key_id,
            signing_key: SigningKey::<Sha256>::new(key),
        })
    }

    /// Build the Authorization header value for the given (name, value) headers, in order
    pub fn authorization(&self, headers: &[(&str, String)]) -> String {
        let signing_string = headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        let names = headers.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(" ");

        format!(
            "Signature version=\"1\",headers=\"{names}\",keyId=\"{}\",algorithm=\"rsa-sha256\",signature=\"{}\"",
            self.key_id,
            self.sign(&signing_string)
        )
    }

    fn sign(&self, signing_string: &str) -> String {
        let signature = self.signing_key.sign(signing_string.as_bytes());
        STANDARD.encode(signature.to_bytes())
    }
}
