//! The closed set of study languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A language the vocabulary can be studied in.
///
/// The set is closed: every stored vocabulary always carries exactly these
/// languages, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English.
    English,
    /// French.
    French,
    /// German.
    German,
}

impl Language {
    /// All supported languages in canonical order.
    pub const ALL: [Self; 3] = [Self::English, Self::French, Self::German];

    /// The canonical display name, also used as the persisted key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "French",
            Self::German => "German",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::unknown_language(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_name() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string(), lang.name());
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("french".parse::<Language>().unwrap(), Language::French);
        assert_eq!("GERMAN".parse::<Language>().unwrap(), Language::German);
        assert_eq!(" English ".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Spanish".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("Spanish"));
    }

    #[test]
    fn test_canonical_order() {
        let mut langs = vec![Language::German, Language::English, Language::French];
        langs.sort();
        assert_eq!(langs, Language::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Language::French).unwrap();
        assert_eq!(json, "\"French\"");
        let parsed: Language = serde_json::from_str("\"German\"").unwrap();
        assert_eq!(parsed, Language::German);
    }
}
