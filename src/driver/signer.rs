use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use super::dto::{PostDataRequestInput, SignedDataRequest};
use crate::error::{RankError, Result};

/// Signing identity derived from the configured mnemonic.
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self> {
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        if words.is_empty() {
            return Err(RankError::Signing("mnemonic is empty".to_string()));
        }
        let seed: [u8; 32] = Sha256::digest(words.join(" ").as_bytes()).into();
        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key().to_bytes())
    }

    pub fn sign(&self, request: PostDataRequestInput) -> Result<SignedDataRequest> {
        let digest = request_digest(&request)?;
        let signature = self.key.sign(&digest);
        Ok(SignedDataRequest {
            request,
            public_key: self.public_key_hex(),
            signature: hex::encode(signature.to_bytes()),
        })
    }
}

/// SHA-256 over the request's JSON encoding.
pub fn request_digest(request: &PostDataRequestInput) -> Result<[u8; 32]> {
    let canonical = serde_json::to_vec(request)?;
    Ok(Sha256::digest(&canonical).into())
}

pub fn verify(signed: &SignedDataRequest) -> Result<()> {
    let public_key: [u8; 32] = hex::decode(&signed.public_key)
        .map_err(|e| RankError::Signing(e.to_string()))?
        .try_into()
        .map_err(|_| RankError::Signing("public key must be 32 bytes".to_string()))?;
    let key =
        VerifyingKey::from_bytes(&public_key).map_err(|e| RankError::Signing(e.to_string()))?;
    let signature = hex::decode(&signed.signature).map_err(|e| RankError::Signing(e.to_string()))?;
    let signature = ed25519_dalek::Signature::from_slice(&signature)
        .map_err(|e| RankError::Signing(e.to_string()))?;
    let digest = request_digest(&signed.request)?;
    key.verify_strict(&digest, &signature)
        .map_err(|_| RankError::Signing("signature verification failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankConfig;

    fn request(input: &str) -> PostDataRequestInput {
        PostDataRequestInput::new("prog", input, "memo", &RankConfig::default().driver.gas)
    }

    #[test]
    fn same_mnemonic_same_key() {
        let a = Signer::from_mnemonic("pistol  aunt rural").unwrap();
        let b = Signer::from_mnemonic("pistol aunt rural\n").unwrap();
        assert_eq!(a.public_key_hex(), b.public_key_hex());
    }

    #[test]
    fn empty_mnemonic_is_rejected() {
        assert!(Signer::from_mnemonic("  ").is_err());
    }

    #[test]
    fn signature_verifies_and_detects_tampering() {
        let signer = Signer::from_mnemonic("pistol aunt rural").unwrap();
        let mut signed = signer.sign(request("1")).unwrap();
        assert!(verify(&signed).is_ok());

        signed.request.exec_inputs = b"2".to_vec();
        assert!(verify(&signed).is_err());
    }
}
