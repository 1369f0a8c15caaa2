//! Postal address value type.

use regex::Regex;
use std::sync::LazyLock;

static LOCALITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s\-'.,]{2,100}$").expect("valid locality regex"));

static COUNTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-ZÀ-ÿ\s\-'.,]{2,100}|[A-Z]{2,3})$").expect("valid country regex")
});

static GENERIC_POSTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9\-]{3,10}$").expect("valid postal regex"));

static BR_POSTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("valid postal regex"));

static US_POSTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid postal regex"));

static CA_POSTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d[A-Z]\s?\d[A-Z]\d$").expect("valid postal regex"));

static GB_POSTAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,2}\d[A-Z\d]?\s?\d[A-Z]{2}$").expect("valid postal regex")
});

static FIVE_DIGIT_POSTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid postal regex"));

/// Options for [`PostalAddress::is_valid`].
#[derive(Debug, Clone, Default)]
pub struct AddressOptions {
    pub require_street_address: bool,
    pub require_locality: bool,
    pub require_region: bool,
    pub require_postal_code: bool,
    pub require_country: bool,
    /// Skip postal-code format checks when false.
    pub validate_postal_code_format: bool,
    /// ISO country code selecting a country-specific postal format.
    pub country_code: Option<String>,
}

impl AddressOptions {
    /// The default used by the profile validator: nothing required,
    /// formats checked when present.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            validate_postal_code_format: true,
            ..Default::default()
        }
    }
}

/// A postal address with whitespace collapsed per field and the postal
/// code reduced to uppercase alphanumerics and hyphens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub formatted: Option<String>,
    pub street_address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

fn sanitize(value: Option<&str>) -> Option<String> {
    let collapsed = value?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn sanitize_postal_code(value: Option<&str>) -> Option<String> {
    let cleaned: String = value?
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_uppercase();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

impl PostalAddress {
    #[must_use]
    pub fn new(
        formatted: Option<&str>,
        street_address: Option<&str>,
        locality: Option<&str>,
        region: Option<&str>,
        postal_code: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        Self {
            formatted: sanitize(formatted),
            street_address: sanitize(street_address),
            locality: sanitize(locality),
            region: sanitize(region),
            postal_code: sanitize_postal_code(postal_code),
            country: sanitize(country),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatted.is_none()
            && self.street_address.is_none()
            && self.locality.is_none()
            && self.region.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }

    #[must_use]
    pub fn has_minimum_fields(&self) -> bool {
        self.street_address.is_some() && self.locality.is_some()
    }

    #[must_use]
    pub fn is_valid_street_address(&self) -> bool {
        self.street_address
            .as_deref()
            .is_some_and(|s| (5..=200).contains(&s.chars().count()))
    }

    #[must_use]
    pub fn is_valid_locality(&self) -> bool {
        self.locality
            .as_deref()
            .is_some_and(|l| LOCALITY_REGEX.is_match(l))
    }

    #[must_use]
    pub fn is_valid_region(&self) -> bool {
        self.region
            .as_deref()
            .is_some_and(|r| LOCALITY_REGEX.is_match(r))
    }

    #[must_use]
    pub fn is_valid_country(&self) -> bool {
        self.country
            .as_deref()
            .is_some_and(|c| COUNTRY_REGEX.is_match(c))
    }

    /// Postal-code format per country, with a generic alphanumeric
    /// fallback when no country is given.
    #[must_use]
    pub fn is_valid_postal_code(&self, country_code: Option<&str>) -> bool {
        let Some(code) = self.postal_code.as_deref() else {
            return false;
        };
        match country_code.map(str::to_uppercase).as_deref() {
            Some("BR") => BR_POSTAL_REGEX.is_match(code),
            Some("US") => US_POSTAL_REGEX.is_match(code),
            Some("CA") => CA_POSTAL_REGEX.is_match(code),
            Some("GB") => GB_POSTAL_REGEX.is_match(code),
            Some("DE") | Some("FR") => FIVE_DIGIT_POSTAL_REGEX.is_match(code),
            _ => GENERIC_POSTAL_REGEX.is_match(code),
        }
    }

    /// All populated text fields within 2..=200 characters.
    #[must_use]
    pub fn has_valid_length(&self) -> bool {
        [
            &self.street_address,
            &self.locality,
            &self.region,
            &self.country,
            &self.formatted,
        ]
        .into_iter()
        .all(|field| {
            field
                .as_deref()
                .is_none_or(|f| (2..=200).contains(&f.chars().count()))
        })
    }

    #[must_use]
    pub fn is_valid(&self, options: &AddressOptions) -> bool {
        let nothing_required = !options.require_street_address
            && !options.require_locality
            && !options.require_region
            && !options.require_postal_code
            && !options.require_country;
        if self.is_empty() && nothing_required {
            return true;
        }

        if options.require_street_address && self.street_address.is_none() {
            return false;
        }
        if options.require_locality && self.locality.is_none() {
            return false;
        }
        if options.require_region && self.region.is_none() {
            return false;
        }
        if options.require_postal_code && self.postal_code.is_none() {
            return false;
        }
        if options.require_country && self.country.is_none() {
            return false;
        }

        if self.street_address.is_some() && !self.is_valid_street_address() {
            return false;
        }
        if self.locality.is_some() && !self.is_valid_locality() {
            return false;
        }
        if self.region.is_some() && !self.is_valid_region() {
            return false;
        }
        if self.country.is_some() && !self.is_valid_country() {
            return false;
        }
        if self.postal_code.is_some()
            && options.validate_postal_code_format
            && !self.is_valid_postal_code(options.country_code.as_deref())
        {
            return false;
        }

        self.has_valid_length()
    }

    /// Joins the populated fields into a display string.
    #[must_use]
    pub fn to_formatted(&self) -> String {
        [
            &self.street_address,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
    }
}
