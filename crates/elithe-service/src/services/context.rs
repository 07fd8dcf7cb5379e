//! Service context - dependency container for services
//!
//! Holds the repositories, the identity verifier, the credential issuer and
//! the id generator needed by services.

use std::sync::Arc;

use elithe_core::traits::{
    ConfirmationRepository, CredentialIssuer, EventRepository, HealthCheck, IdentityVerifier,
    MemberRepository,
};
use elithe_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - Profile, event and confirmation stores
/// - The identity verifier used to authenticate requests
/// - The credential issuer that renders QR codes
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    event_repo: Arc<dyn EventRepository>,
    confirmation_repo: Arc<dyn ConfirmationRepository>,
    health_check: Arc<dyn HealthCheck>,

    // Services
    identity_verifier: Arc<dyn IdentityVerifier>,
    credential_issuer: Arc<dyn CredentialIssuer>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        event_repo: Arc<dyn EventRepository>,
        confirmation_repo: Arc<dyn ConfirmationRepository>,
        health_check: Arc<dyn HealthCheck>,
        identity_verifier: Arc<dyn IdentityVerifier>,
        credential_issuer: Arc<dyn CredentialIssuer>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            member_repo,
            event_repo,
            confirmation_repo,
            health_check,
            identity_verifier,
            credential_issuer,
            snowflake_generator,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the member profile repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the confirmation repository
    pub fn confirmation_repo(&self) -> &dyn ConfirmationRepository {
        self.confirmation_repo.as_ref()
    }

    /// Get the store health probe
    pub fn health_check(&self) -> &dyn HealthCheck {
        self.health_check.as_ref()
    }

    // === Services ===

    /// Get the identity verifier
    pub fn identity_verifier(&self) -> &dyn IdentityVerifier {
        self.identity_verifier.as_ref()
    }

    /// Get the credential issuer
    pub fn credential_issuer(&self) -> &dyn CredentialIssuer {
        self.credential_issuer.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity_verifier", &"IdentityVerifier")
            .field("credential_issuer", &"CredentialIssuer")
            .field("snowflake_generator", &self.snowflake_generator)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    confirmation_repo: Option<Arc<dyn ConfirmationRepository>>,
    health_check: Option<Arc<dyn HealthCheck>>,
    identity_verifier: Option<Arc<dyn IdentityVerifier>>,
    credential_issuer: Option<Arc<dyn CredentialIssuer>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn confirmation_repo(mut self, repo: Arc<dyn ConfirmationRepository>) -> Self {
        self.confirmation_repo = Some(repo);
        self
    }

    pub fn health_check(mut self, probe: Arc<dyn HealthCheck>) -> Self {
        self.health_check = Some(probe);
        self
    }

    pub fn identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity_verifier = Some(verifier);
        self
    }

    pub fn credential_issuer(mut self, issuer: Arc<dyn CredentialIssuer>) -> Self {
        self.credential_issuer = Some(issuer);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.member_repo.ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.event_repo.ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.confirmation_repo
                .ok_or_else(|| ServiceError::validation("confirmation_repo is required"))?,
            self.health_check.ok_or_else(|| ServiceError::validation("health_check is required"))?,
            self.identity_verifier
                .ok_or_else(|| ServiceError::validation("identity_verifier is required"))?,
            self.credential_issuer
                .ok_or_else(|| ServiceError::validation("credential_issuer is required"))?,
            self.snowflake_generator.unwrap_or_default(),
        ))
    }
}
