use std::fmt;
use std::str::FromStr;

use phonenumber::{Mode, PhoneNumber, country};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// URN scheme for phone numbers.
pub const TEL_SCHEME: &str = "tel";

const MIN_PHONE_DIGITS: usize = 5;
const MAX_PHONE_DIGITS: usize = 15;

/// A contact address in `scheme:path` form, e.g. `tel:+252634101111`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Urn {
    scheme: String,
    path: String,
}

impl Urn {
    /// Build a `tel:` URN from a raw phone number.
    ///
    /// Spaces, dashes, dots and parentheses are stripped. What remains must be
    /// an optional leading `+` followed by 5 to 15 digits. The resulting path
    /// always carries the leading `+`.
    pub fn tel(raw: &str) -> Result<Self, CoreError> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidPhone(raw.to_owned()));
        }
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
            return Err(CoreError::InvalidPhone(raw.to_owned()));
        }

        Ok(Self {
            scheme: TEL_SCHEME.to_owned(),
            path: format!("+{digits}"),
        })
    }

    /// Build a strictly validated `tel:` URN, reading national-format numbers
    /// as belonging to `country` (ISO 3166-1 alpha-2).
    ///
    /// A number without `+` that is not valid for `country` is retried as an
    /// international number. The path is the E.164 form.
    pub fn tel_for_country(raw: &str, country: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidPhone(raw.to_owned());
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid());
        }

        let region = country.trim().to_ascii_uppercase().parse::<country::Id>().ok();
        let national = parse_valid(region, raw);
        let number = match national {
            Some(number) => number,
            None if !raw.starts_with('+') => {
                parse_valid(None, &format!("+{raw}")).ok_or_else(invalid)?
            }
            None => return Err(invalid()),
        };

        Ok(Self {
            scheme: TEL_SCHEME.to_owned(),
            path: number.format().mode(Mode::E164).to_string(),
        })
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The scheme specific part (for `tel:` URNs, the phone number).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn parse_valid(region: Option<country::Id>, raw: &str) -> Option<PhoneNumber> {
    phonenumber::parse(region, raw)
        .ok()
        .filter(phonenumber::is_valid)
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}

impl FromStr for Urn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, path) = s
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidUrn(s.to_owned()))?;
        if scheme.is_empty() || path.is_empty() {
            return Err(CoreError::InvalidUrn(s.to_owned()));
        }
        if scheme == TEL_SCHEME {
            return Self::tel(path).map_err(|_| CoreError::InvalidUrn(s.to_owned()));
        }
        Ok(Self {
            scheme: scheme.to_owned(),
            path: path.to_owned(),
        })
    }
}

impl Serialize for Urn {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Urn {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
