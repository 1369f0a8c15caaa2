//! National identity number (CPF) value type.
//!
//! Eleven digits with two weighted check digits. Construction keeps only
//! the digits, so `529.982.247-25` and `52998224725` are the same id.

/// A national identity number reduced to its digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalId {
    value: String,
}

impl NationalId {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        Self {
            value: raw.as_ref().chars().filter(char::is_ascii_digit).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Exactly 11 digits, not all identical, and both check digits
    /// consistent.
    #[must_use]
    pub fn is_format_valid(&self) -> bool {
        if self.value.len() != 11 {
            return false;
        }

        let first = self.value.as_bytes()[0];
        if self.value.bytes().all(|b| b == first) {
            return false;
        }

        let digits: Vec<u32> = self
            .value
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        Self::check_digit(&digits, 10) && Self::check_digit(&digits, 11)
    }

    /// Weighted-sum check: the digit at `factor - 1` must equal
    /// `(sum * 10) % 11` (mod 10), where the sum weights each earlier
    /// digit by its distance from `factor`.
    fn check_digit(digits: &[u32], factor: usize) -> bool {
        let sum: u32 = digits[..factor - 1]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (factor - i) as u32)
            .sum();
        let check = (sum * 10) % 11;
        check == digits[factor - 1] % 10
    }

    #[must_use]
    pub fn is_valid(&self, required: bool) -> bool {
        if required && self.is_empty() {
            return false;
        }
        if !self.is_empty() && !self.is_format_valid() {
            return false;
        }
        true
    }

    /// `000.000.000-00` presentation, or the raw digits when the value
    /// is not 11 digits long.
    #[must_use]
    pub fn format(&self) -> String {
        if self.value.len() != 11 {
            return self.value.clone();
        }
        format!(
            "{}.{}.{}-{}",
            &self.value[..3],
            &self.value[3..6],
            &self.value[6..9],
            &self.value[9..]
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
