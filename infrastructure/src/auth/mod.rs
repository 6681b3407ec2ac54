//! Credential adapters: salted HMAC-SHA256 password digests and an
//! in-process session table.

mod password;
mod session;

pub use password::HmacCredentialHasher;
pub use session::InMemorySessionStore;
