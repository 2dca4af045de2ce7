//! Public extension contracts for attaching freshly minted bearer tokens to outbound requests.

pub mod request_signer;

pub use request_signer::*;
