//! Wire payload models for the remote identity service.
//!
//! Payloads are camelCase JSON; only populated fields serialize, and
//! the nested profile object is dropped entirely when it carries
//! nothing beyond the configured defaults.

use passage_domain::CandidateRecord;
use serde::{Deserialize, Serialize};

/// Defaults merged into every outgoing profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadDefaults {
    pub zoneinfo: String,
    pub locale: String,
}

impl Default for PayloadDefaults {
    fn default() -> Self {
        Self {
            zoneinfo: "America/Sao_Paulo".to_string(),
            locale: "pt-BR".to_string(),
        }
    }
}

/// Postal address as the identity service expects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Nested profile object on the identity payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub zoneinfo: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<IdentityAddress>,
}

impl IdentityProfile {
    /// Whether anything beyond the default zoneinfo/locale is present.
    #[must_use]
    pub fn is_material(&self) -> bool {
        self.given_name.is_some()
            || self.family_name.is_some()
            || self.middle_name.is_some()
            || self.nickname.is_some()
            || self.preferred_username.is_some()
            || self.website.is_some()
            || self.gender.is_some()
            || self.birthdate.is_some()
            || self.address.is_some()
    }
}

/// Create/update payload for one identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<IdentityProfile>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl NewIdentity {
    /// Build the outgoing payload from a candidate record. Empty fields
    /// are omitted; the profile object is attached only when material.
    #[must_use]
    pub fn from_candidate(record: &CandidateRecord, defaults: &PayloadDefaults) -> Self {
        let mut payload = Self {
            primary_email: non_empty(record.primary_email().as_str()),
            primary_phone: non_empty(record.primary_phone().as_str()),
            username: non_empty(record.username().as_str()),
            name: non_empty(record.name().as_str()),
            ..Default::default()
        };

        if let Some(raw) = record.credential().raw() {
            payload.password = Some(raw.to_string());
        } else if let Some(digest) = record.credential().digest() {
            payload.password_digest = Some(digest.to_string());
            payload.password_algorithm = record.credential().algorithm().map(str::to_string);
        }

        if let Some(fragment) = record.profile() {
            let address = fragment.primary_address().map(|a| IdentityAddress {
                formatted: a.formatted.clone(),
                street_address: a.street_address.clone(),
                locality: a.locality.clone(),
                region: a.region.clone(),
                postal_code: a.postal_code.clone(),
                country: a.country.clone(),
            });

            let profile = IdentityProfile {
                given_name: non_empty(&fragment.given_name),
                family_name: non_empty(&fragment.family_name),
                middle_name: non_empty(&fragment.middle_name),
                nickname: non_empty(&fragment.nickname),
                preferred_username: non_empty(&fragment.preferred_username)
                    .or_else(|| non_empty(record.username().as_str())),
                website: non_empty(&fragment.website),
                gender: non_empty(&fragment.gender),
                birthdate: non_empty(&fragment.birthdate),
                zoneinfo: non_empty(&fragment.zoneinfo).unwrap_or_else(|| defaults.zoneinfo.clone()),
                locale: non_empty(&fragment.locale).unwrap_or_else(|| defaults.locale.clone()),
                address,
            };

            let full_name = fragment.full_name();
            if !full_name.is_empty() {
                payload.name = Some(full_name);
            }

            if profile.is_material() {
                payload.profile = Some(profile);
            }
        }

        payload
    }

    /// The same payload with the immutable fields stripped, for
    /// updating an identity that already exists remotely.
    #[must_use]
    pub fn update_payload(&self) -> Self {
        let mut stripped = self.clone();
        stripped.primary_email = None;
        stripped.password_digest = None;
        stripped.password_algorithm = None;
        stripped
    }
}

/// An identity as the remote service reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIdentity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
}
