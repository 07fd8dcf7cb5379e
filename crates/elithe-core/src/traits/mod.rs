//! Ports implemented by the infrastructure layer

mod credentials;
mod repositories;

pub use credentials::{
    CredentialIssuer, Identity, IdentityVerifier, IssuedCredential, VerificationError,
};
pub use repositories::{
    ConfirmationRepository, EventRepository, HealthCheck, MemberRepository, RepoResult,
};
