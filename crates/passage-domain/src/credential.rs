//! Credential value type.
//!
//! A staged credential carries either a raw plaintext secret or a
//! pre-computed digest plus the algorithm that produced it. Both empty
//! is a representable state (the password validator decides whether
//! that blocks anything); both present prefers the raw secret, matching
//! how the staging sources behave.

/// Hashing algorithms the remote identity service accepts for
/// pre-hashed credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialAlgorithm {
    Argon2i,
    Argon2id,
    Argon2d,
    Sha1,
    Sha256,
    Md5,
    Bcrypt,
    Legacy,
}

impl CredentialAlgorithm {
    /// Parse the staged algorithm name. Matching is exact; unknown names
    /// are simply unsupported rather than an error.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Argon2i" => Some(Self::Argon2i),
            "Argon2id" => Some(Self::Argon2id),
            "Argon2d" => Some(Self::Argon2d),
            "SHA1" => Some(Self::Sha1),
            "SHA256" => Some(Self::Sha256),
            "MD5" => Some(Self::Md5),
            "Bcrypt" => Some(Self::Bcrypt),
            "Legacy" => Some(Self::Legacy),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Argon2i => "Argon2i",
            Self::Argon2id => "Argon2id",
            Self::Argon2d => "Argon2d",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Md5 => "MD5",
            Self::Bcrypt => "Bcrypt",
            Self::Legacy => "Legacy",
        }
    }
}

impl std::fmt::Display for CredentialAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`Credential::is_valid`].
#[derive(Debug, Clone)]
pub struct CredentialOptions {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for CredentialOptions {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 256,
        }
    }
}

const MAX_DIGEST_LENGTH: usize = 256;

/// A staged credential in raw or pre-hashed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    raw: Option<String>,
    digest: Option<String>,
    algorithm: Option<String>,
}

impl Credential {
    pub fn new(
        raw: Option<&str>,
        digest: Option<&str>,
        algorithm: Option<&str>,
    ) -> Self {
        fn non_empty(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }
        Self {
            raw: non_empty(raw),
            digest: non_empty(digest),
            algorithm: non_empty(algorithm),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: None,
            digest: None,
            algorithm: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && self.digest.is_none()
    }

    #[must_use]
    pub fn is_raw_valid(&self, min_length: usize, max_length: usize) -> bool {
        self.raw
            .as_deref()
            .is_some_and(|raw| (min_length..=max_length).contains(&raw.chars().count()))
    }

    #[must_use]
    pub fn is_digest_valid(&self) -> bool {
        self.digest
            .as_deref()
            .is_some_and(|d| d.len() <= MAX_DIGEST_LENGTH)
    }

    #[must_use]
    pub fn has_supported_algorithm(&self) -> bool {
        self.algorithm
            .as_deref()
            .is_some_and(|a| CredentialAlgorithm::parse(a).is_some())
    }

    /// A present credential is valid when its active form checks out:
    /// raw secrets by length bounds, digests by length plus a supported
    /// algorithm. An empty credential is not valid — callers that allow
    /// absence check [`Credential::is_empty`] first.
    #[must_use]
    pub fn is_valid(&self, options: &CredentialOptions) -> bool {
        if self.raw.is_some() {
            return self.is_raw_valid(options.min_length, options.max_length);
        }
        if self.digest.is_some() {
            return self.is_digest_valid() && self.has_supported_algorithm();
        }
        false
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }
}
