//! Candidate record: one staged user awaiting validation and import.

use crate::credential::Credential;
use crate::email::Email;
use crate::name::PersonName;
use crate::national_id::NationalId;
use crate::phone::Phone;
use crate::profile::{ProfileFragment, RawProfile};
use crate::username::Username;

/// Raw staged input for one candidate, as delivered by an upstream
/// mapper. Every field is optional; normalisation happens in
/// [`CandidateRecord::new`].
#[derive(Debug, Clone, Default)]
pub struct RawCandidate {
    pub username: Option<String>,
    pub primary_email: Option<String>,
    pub primary_phone: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub password_digest: Option<String>,
    pub password_algorithm: Option<String>,
    pub national_id: Option<String>,
    pub profile: Option<RawProfile>,
}

/// A normalised candidate record. Immutable after construction —
/// validators and the importer only read it; validity is queried
/// through the value types, never thrown.
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    id: i64,
    username: Username,
    primary_email: Email,
    primary_phone: Phone,
    name: PersonName,
    credential: Credential,
    national_id: NationalId,
    profile: Option<ProfileFragment>,
}

impl CandidateRecord {
    #[must_use]
    pub fn new(id: i64, raw: RawCandidate) -> Self {
        Self {
            id,
            username: Username::new(raw.username.as_deref().unwrap_or_default()),
            primary_email: Email::new(raw.primary_email.as_deref().unwrap_or_default()),
            primary_phone: Phone::new(raw.primary_phone.as_deref().unwrap_or_default()),
            name: PersonName::new(raw.name.as_deref().unwrap_or_default()),
            credential: Credential::new(
                raw.password.as_deref(),
                raw.password_digest.as_deref(),
                raw.password_algorithm.as_deref(),
            ),
            national_id: NationalId::new(raw.national_id.as_deref().unwrap_or_default()),
            profile: raw.profile.map(ProfileFragment::new),
        }
    }

    /// Staging id, ascending and unique within the staging store.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn primary_email(&self) -> &Email {
        &self.primary_email
    }

    #[must_use]
    pub fn primary_phone(&self) -> &Phone {
        &self.primary_phone
    }

    #[must_use]
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    #[must_use]
    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    #[must_use]
    pub fn profile(&self) -> Option<&ProfileFragment> {
        self.profile.as_ref()
    }

    /// Best human-readable handle for log lines: email, then username,
    /// then the staging id.
    #[must_use]
    pub fn display_handle(&self) -> String {
        if !self.primary_email.is_empty() {
            return self.primary_email.as_str().to_string();
        }
        if !self.username.is_empty() {
            return self.username.as_str().to_string();
        }
        format!("record#{}", self.id)
    }
}
