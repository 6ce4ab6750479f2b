//! Reglas atómicas de validación de un campo.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::FieldValue;

// scheme://host[:port][/path][?query][#frag]
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://[^\s/?#:]+(:\d+)?([/?#]\S*)?$").expect("valid url pattern")
});

static DIGITS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid digits pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Texto no vacío tras trim, lista no vacía, flag activado o adjunto
    /// presente.
    Required,
    /// Máximo de caracteres (no bytes). Error duro, nunca trunca.
    MaxLength(usize),
    /// Mínimo de caracteres cuando hay contenido.
    MinLength(usize),
    /// URL permisiva; vacío no es error.
    Url,
    /// Sólo dígitos cuando hay contenido.
    Digits,
    /// El campo debe contener un adjunto ya sondeado.
    RequiredAttachment,
    /// Máximo de elementos en una lista.
    MaxItems(usize),
    /// Valor dentro de una lista cerrada cuando hay contenido.
    OneOf(Vec<String>),
}

impl Rule {
    /// Evalúa la regla; `None` si pasa, `Some(mensaje)` si falla.
    pub fn check(&self, label: &str, value: &FieldValue) -> Option<String> {
        match self {
            Rule::Required => value.is_blank().then(|| format!("{label} is required")),
            Rule::RequiredAttachment => {
                value.as_attachment().is_none().then(|| format!("{label} is required"))
            }
            Rule::MaxLength(max) => {
                let text = value.as_text()?;
                (text.chars().count() > *max).then(|| format!("{label} must be {max} characters or less"))
            }
            Rule::MinLength(min) => {
                let text = value.as_text()?.trim();
                (!text.is_empty() && text.chars().count() < *min)
                    .then(|| format!("{label} must be at least {min} characters"))
            }
            Rule::Url => {
                let text = value.as_text()?.trim();
                (!text.is_empty() && !URL_PATTERN.is_match(text)).then(|| format!("{label} must be a valid URL"))
            }
            Rule::Digits => {
                let text = value.as_text()?.trim();
                (!text.is_empty() && !DIGITS_PATTERN.is_match(text))
                    .then(|| format!("{label} must contain only digits"))
            }
            Rule::MaxItems(max) => {
                let items = value.as_list()?;
                (items.len() > *max).then(|| format!("{label} allows at most {max} items"))
            }
            Rule::OneOf(options) => {
                let text = value.as_text()?.trim();
                (!text.is_empty() && !options.iter().any(|o| o == text))
                    .then(|| format!("{label} must be one of: {}", options.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_rule_is_permissive_and_skips_empty() {
        let rule = Rule::Url;
        assert!(rule.check("Website", &"".into()).is_none());
        assert!(rule.check("Website", &"https://example.com".into()).is_none());
        assert!(rule.check("Website", &"http://localhost:8080/feed.xml?x=1".into()).is_none());
        assert!(rule.check("Website", &"example.com".into()).is_some());
        assert!(rule.check("Website", &"https://exa mple.com".into()).is_some());
    }

    #[test]
    fn max_length_counts_chars() {
        let rule = Rule::MaxLength(3);
        assert!(rule.check("Title", &"ñññ".into()).is_none());
        assert_eq!(rule.check("Title", &"abcd".into()).as_deref(), Some("Title must be 3 characters or less"));
    }

    #[test]
    fn digits_only_when_present() {
        assert!(Rule::Digits.check("Episode number", &"".into()).is_none());
        assert!(Rule::Digits.check("Episode number", &"12".into()).is_none());
        assert!(Rule::Digits.check("Episode number", &"12a".into()).is_some());
    }

    #[test]
    fn required_trims_whitespace() {
        assert!(Rule::Required.check("Title", &"  ".into()).is_some());
        assert!(Rule::Required.check("Title", &FieldValue::Empty).is_some());
    }
}
