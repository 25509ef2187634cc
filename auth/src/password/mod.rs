pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::Algorithm;
pub use hasher::PasswordHashResult;
pub use hasher::PasswordHasher;
