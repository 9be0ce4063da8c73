//! Bearer-credential verification
//!
//! Credentials are issued by the identity service; the marketplace services
//! only verify them and read the `sub`/`role` claims.

mod extract;
mod jwt;

pub use extract::bearer_claims;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
