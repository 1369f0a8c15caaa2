//! Profile fragment attached to a candidate record.

use crate::address::PostalAddress;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// IANA zone names are `Area/Location` paths; `UTC` stands alone.
static ZONEINFO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(UTC|[A-Za-z]+(/[A-Za-z0-9_+\-]+)+)$").expect("valid zone regex"));

const KNOWN_GENDERS: &[&str] = &["male", "female", "other"];
const STANDARD_LOCALES: &[&str] = &["pt-BR", "en-US", "es-ES"];

/// A phone entry staged alongside the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePhone {
    pub number: Option<String>,
    pub country_code: Option<String>,
    pub prefix: Option<String>,
}

impl ProfilePhone {
    #[must_use]
    pub fn new(number: Option<&str>, country_code: Option<&str>, prefix: Option<&str>) -> Self {
        fn clean(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }
        Self {
            number: clean(number),
            country_code: clean(country_code),
            prefix: clean(prefix),
        }
    }
}

/// Raw staged profile input, before normalisation.
#[derive(Debug, Clone, Default)]
pub struct RawProfile {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub middle_name: Option<String>,
    pub nickname: Option<String>,
    pub preferred_username: Option<String>,
    pub profile_url: Option<String>,
    pub website: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub zoneinfo: Option<String>,
    pub locale: Option<String>,
    pub addresses: Vec<PostalAddress>,
    pub phones: Vec<ProfilePhone>,
}

/// Normalised profile fragment. String fields are trimmed; absence is
/// the empty string, mirroring how the staging sources deliver them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFragment {
    pub given_name: String,
    pub family_name: String,
    pub middle_name: String,
    pub nickname: String,
    pub preferred_username: String,
    pub profile_url: String,
    pub website: String,
    pub gender: String,
    pub birthdate: String,
    pub zoneinfo: String,
    pub locale: String,
    pub addresses: Vec<PostalAddress>,
    pub phones: Vec<ProfilePhone>,
}

impl ProfileFragment {
    #[must_use]
    pub fn new(raw: RawProfile) -> Self {
        fn clean(value: Option<String>) -> String {
            value.map(|v| v.trim().to_string()).unwrap_or_default()
        }
        Self {
            given_name: clean(raw.given_name),
            family_name: clean(raw.family_name),
            middle_name: clean(raw.middle_name),
            nickname: clean(raw.nickname),
            preferred_username: clean(raw.preferred_username),
            profile_url: clean(raw.profile_url),
            website: clean(raw.website),
            gender: clean(raw.gender),
            birthdate: clean(raw.birthdate),
            zoneinfo: clean(raw.zoneinfo),
            locale: clean(raw.locale),
            addresses: raw.addresses,
            phones: raw.phones,
        }
    }

    /// At least one naming field is enough to consider the fragment
    /// worth sending downstream.
    #[must_use]
    pub fn has_minimum(&self) -> bool {
        !self.given_name.is_empty() || !self.family_name.is_empty() || !self.nickname.is_empty()
    }

    #[must_use]
    pub fn is_valid_gender(&self) -> bool {
        self.gender.is_empty() || KNOWN_GENDERS.contains(&self.gender.to_lowercase().as_str())
    }

    /// Parseable as a date (plain or RFC 3339) and not in the future.
    #[must_use]
    pub fn is_valid_birthdate(&self) -> bool {
        if self.birthdate.is_empty() {
            return true;
        }
        let parsed = NaiveDate::parse_from_str(&self.birthdate, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(&self.birthdate)
                .ok()
                .map(|dt| dt.date_naive())
        });
        match parsed {
            Some(date) => date <= Utc::now().date_naive(),
            None => false,
        }
    }

    #[must_use]
    pub fn is_valid_zoneinfo(&self) -> bool {
        self.zoneinfo.is_empty() || ZONEINFO_REGEX.is_match(&self.zoneinfo)
    }

    #[must_use]
    pub fn is_valid_locale(&self) -> bool {
        self.locale.is_empty() || STANDARD_LOCALES.contains(&self.locale.as_str())
    }

    #[must_use]
    pub fn is_valid_website(&self) -> bool {
        self.website.is_empty() || Url::parse(&self.website).is_ok()
    }

    #[must_use]
    pub fn has_invalid_fields(&self) -> bool {
        !self.is_valid_gender()
            || !self.is_valid_birthdate()
            || !self.is_valid_zoneinfo()
            || !self.is_valid_locale()
            || !self.is_valid_website()
    }

    /// Full name composed from given and family name.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.given_name.as_str(), self.family_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn primary_address(&self) -> Option<&PostalAddress> {
        self.addresses.iter().find(|a| !a.is_empty())
    }
}
