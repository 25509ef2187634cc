pub mod blacklist;
pub mod claims;
pub mod errors;
pub mod service;

pub use blacklist::RevocationList;
pub use claims::Claims;
pub use errors::TokenError;
pub use service::TokenService;
