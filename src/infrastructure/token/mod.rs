//! Invitation token signing

pub mod hmac_signer;

pub use hmac_signer::HmacInviteSigner;
