use std::fmt;

use crate::error::ValidationError;

/// The country a property is situated in, with its currency metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    name: &'static str,
    currency_symbol: char,
    currency_acronym: &'static str,
}

impl Country {
    pub const UK: &'static str = "United Kingdom";
    pub const ROI: &'static str = "Republic of Ireland";

    const SUPPORTED: [Country; 2] = [
        Country {
            name: Self::UK,
            currency_symbol: '£',
            currency_acronym: "GBP",
        },
        Country {
            name: Self::ROI,
            currency_symbol: '€',
            currency_acronym: "EUR",
        },
    ];

    /// Resolves a country name to a supported [`Country`].
    ///
    /// Names are matched exactly; anything outside the supported set is
    /// rejected with [`ValidationError::InvalidCountry`].
    pub fn resolve(name: &str) -> Result<Self, ValidationError> {
        Self::SUPPORTED
            .iter()
            .find(|country| country.name == name)
            .copied()
            .ok_or_else(|| ValidationError::InvalidCountry(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn currency_symbol(&self) -> char {
        self.currency_symbol
    }

    pub fn currency_acronym(&self) -> &'static str {
        self.currency_acronym
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
