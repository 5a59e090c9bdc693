// Authentication: JWT issuing/verification, argon2 password hashing, and
// the bearer-token extractor used by protected handlers.

pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;
