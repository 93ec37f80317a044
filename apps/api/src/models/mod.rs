pub mod profile;
pub mod request;

pub use profile::Profile;
pub use request::{DocumentKind, GenerationRequest, Language};
