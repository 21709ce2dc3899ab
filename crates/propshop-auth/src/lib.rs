//! # propshop-auth
//!
//! Verification of the HS256 access tokens issued by the account service.
//!
//! ## Modules
//!
//! - `jwt`: claims, token decoding and (for tooling and tests) token
//!   encoding with the shared secret

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
