/// Errors that can occur when creating validated keyword types.
#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
    /// The input text was empty or contained only whitespace
    #[error("Keyword cannot be empty")]
    Empty,
}

/// A catalogue keyword guaranteed to be non-empty and lower-case.
///
/// Rule catalogue data (expected treatments, medication term lists, vague
/// diagnosis terms) is matched case-insensitively by substring search. This
/// type wraps a `String` and ensures the stored form is already trimmed and
/// lower-cased, so checkers can compare it against lower-cased record text
/// without normalising on every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Creates a new `Keyword` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace and converted
    /// to lower case. If the trimmed result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(Keyword)` if the trimmed input is non-empty,
    /// or `Err(KeywordError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, KeywordError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(KeywordError::Empty);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this keyword is a short abbreviation (three
    /// characters or fewer, e.g. `fc`, `ta`).
    ///
    /// Short abbreviations must be matched exactly rather than by substring
    /// search: `ta` would otherwise match inside `temperatura`.
    pub fn is_abbreviation(&self) -> bool {
        self.0.chars().count() <= 3
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Keyword {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Keyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Keyword::new(&s).map_err(serde::de::Error::custom)
    }
}
