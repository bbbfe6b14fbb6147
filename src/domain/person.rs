//! Shared personal data: full names and validated birth years.

use std::fmt;

/// Earliest birth year the registry accepts.
pub const EARLIEST_BIRTH_YEAR: i32 = 1901;

/// Latest birth year the registry accepts.
pub const LATEST_BIRTH_YEAR: i32 = 2025;

/// A full Eastern-European style name: surname, given name, patronymic.
///
/// The registry performs no validation on name fields beyond what the type
/// system provides; empty strings are accepted, as in the original intake
/// forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    /// Family name.
    pub surname: String,
    /// Given name.
    pub given_name: String,
    /// Patronymic, may be empty.
    pub patronymic: String,
}

impl PersonName {
    /// Creates a name from its three components.
    #[must_use]
    pub const fn new(surname: String, given_name: String, patronymic: String) -> Self {
        Self {
            surname,
            given_name,
            patronymic,
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.surname, self.given_name)?;
        if !self.patronymic.is_empty() {
            write!(f, " {}", self.patronymic)?;
        }
        Ok(())
    }
}

/// A birth year within the plausible range accepted by the registry.
///
/// The accepted range is [`EARLIEST_BIRTH_YEAR`]..=[`LATEST_BIRTH_YEAR`].
/// Construction is the only validation point; once built, the value is known
/// to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BirthYear(i32);

impl BirthYear {
    /// Validates a raw year.
    ///
    /// # Errors
    ///
    /// Returns [`BirthYearError`] if the year falls outside the accepted
    /// range.
    pub const fn new(year: i32) -> Result<Self, BirthYearError> {
        if year >= EARLIEST_BIRTH_YEAR && year <= LATEST_BIRTH_YEAR {
            Ok(Self(year))
        } else {
            Err(BirthYearError(year))
        }
    }

    /// Returns the year as a plain integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for BirthYear {
    type Error = BirthYearError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl fmt::Display for BirthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a birth year falls outside the accepted range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "birth year {0} is outside the accepted range \
     {EARLIEST_BIRTH_YEAR}..={LATEST_BIRTH_YEAR}"
)]
pub struct BirthYearError(i32);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1901; "earliest accepted")]
    #[test_case(1975; "mid range")]
    #[test_case(2025; "latest accepted")]
    fn accepts_years_in_range(year: i32) {
        assert_eq!(BirthYear::new(year).unwrap().get(), year);
    }

    #[test_case(1900; "just before range")]
    #[test_case(2026; "just after range")]
    #[test_case(1850; "far past")]
    #[test_case(-5; "negative")]
    fn rejects_years_out_of_range(year: i32) {
        assert_eq!(BirthYear::new(year), Err(BirthYearError(year)));
    }

    #[test]
    fn name_display_skips_empty_patronymic() {
        let full = PersonName::new(
            "Ivanov".to_string(),
            "Ivan".to_string(),
            "Petrovych".to_string(),
        );
        assert_eq!(full.to_string(), "Ivanov Ivan Petrovych");

        let short = PersonName::new("Ivanov".to_string(), "Ivan".to_string(), String::new());
        assert_eq!(short.to_string(), "Ivanov Ivan");
    }
}
