//! Authentication and authorization
//!
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - router-level authentication middleware
//! - [`require_manager`] - manager gate for privileged route groups
//! - [`password`] - Argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use extractor::MaybeUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, ROLE_MANAGER, ROLE_STAFF};
pub use middleware::{require_auth, require_manager};
pub use password::{hash_password, verify_password};
