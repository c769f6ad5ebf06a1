pub mod claims;
pub mod errors;
pub mod service;

pub use claims::TokenPair;
pub use claims::TokenPayload;
pub use errors::TokenError;
pub use service::TokenService;
