use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::TransportError;

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Checks that an inbound interaction was signed by Discord.
///
/// The signed message is the timestamp header followed by the raw body.
/// See: <https://discord.com/developers/docs/interactions/overview#setting-up-an-endpoint-validating-security-request-headers>
#[derive(Debug, Clone)]
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// Build from the application's hex-encoded public key.
    pub fn from_hex(public_key: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| anyhow::anyhow!("Discord public key is not valid hex: {e}"))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Discord public key must be 32 bytes"))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("Discord public key is not a valid Ed25519 key: {e}"))?;
        Ok(Self { key })
    }

    pub fn from_key(key: VerifyingKey) -> Self {
        Self { key }
    }

    pub fn verify(
        &self,
        signature_hex: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<(), TransportError> {
        let Ok(raw) = hex::decode(signature_hex.trim()) else {
            return Err(TransportError::BadSignature);
        };
        let Ok(signature) = Signature::from_slice(&raw) else {
            return Err(TransportError::BadSignature);
        };

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| TransportError::BadSignature)
    }
}
