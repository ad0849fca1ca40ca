pub mod access_jwt;
pub mod factory;
pub mod gate;

pub use access_jwt::IdentityClaim;
pub use factory::build_auth_gate;
pub use gate::{AuthGate, AuthRejection};
