pub mod principal;
pub mod session;

pub use principal::ProviderPrincipal;
pub use session::Session;
