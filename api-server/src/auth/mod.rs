//! Authentication and authorization
//!
//! JWT token service, role model, argon2 password hashing, the
//! `require_auth` middleware and the `CurrentUser` extractor.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod role;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use password::{hash_password, verify_password};
pub use role::Role;
