//! Remote identity service client and the idempotent importer.
//!
//! The [`client::IdentityServiceClient`] trait is the seam the rest of
//! the engine depends on; [`client::HttpIdentityClient`] is the
//! reqwest-backed implementation. The [`importer::Importer`] layers the
//! create-or-update conflict resolution on top of the trait.

pub mod client;
pub mod error;
pub mod importer;
pub mod models;

pub use client::{HttpIdentityClient, IdentityServiceClient};
pub use error::{IdentityClientError, IdentityClientResult};
pub use importer::{ImportFailure, ImportFailureKind, ImportOutcome, Importer};
pub use models::{IdentityAddress, IdentityProfile, NewIdentity, PayloadDefaults, RemoteIdentity};
