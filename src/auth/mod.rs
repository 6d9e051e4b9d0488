pub mod extractors;
pub mod password;
pub mod token;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};
