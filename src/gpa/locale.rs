use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::err::GpaError;

/// Display language of the platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Arabic when `text` contains any Arabic-script character
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_arabic) {
            Locale::Ar
        } else {
            Locale::En
        }
    }

    pub fn pick<'a>(self, en: &'a str, ar: &'a str) -> &'a str {
        match self {
            Locale::En => en,
            Locale::Ar => ar,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Locale::Ar
    }
}

fn is_arabic(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pick("en", "ar"))
    }
}

impl FromStr for Locale {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            other => Err(GpaError::ConfigError(format!("unsupported language: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_locale() {
        assert_eq!(Locale::detect("When is the deadline?"), Locale::En);
        assert_eq!(Locale::detect("متى آخر موعد للتقديم؟"), Locale::Ar);
        assert_eq!(Locale::detect("DAAD منحة"), Locale::Ar);
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert!("fr".parse::<Locale>().is_err());
        assert!(Locale::Ar.is_rtl());
    }
}
