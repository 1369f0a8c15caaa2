//! Domain value types for the passage migration engine.
//!
//! Every type here wraps raw staged input behind a normalising
//! constructor that never fails: construction trims, case-folds, and
//! strips noise, while validity remains a separately queryable property
//! (`is_empty` / `is_format_valid` / `is_valid`). Invalid states are
//! representable on purpose — the validation pipeline decides what to do
//! with them.

pub mod address;
pub mod credential;
pub mod email;
pub mod name;
pub mod national_id;
pub mod phone;
pub mod profile;
pub mod record;
pub mod username;

pub use address::{AddressOptions, PostalAddress};
pub use credential::{Credential, CredentialAlgorithm, CredentialOptions};
pub use email::{Email, EmailOptions};
pub use name::{NameOptions, PersonName};
pub use national_id::NationalId;
pub use phone::{Phone, PhoneOptions};
pub use profile::{ProfileFragment, ProfilePhone, RawProfile};
pub use record::{CandidateRecord, RawCandidate};
pub use username::{Username, UsernameOptions};
