// src/common/validation.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

// ---
// Normalização: todo texto de entrada chega "aparado".
// ---

pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_owned())
}

/// Texto opcional: "   " vira None.
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty()))
}

// ---
// Validações customizadas
// ---

pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !valid {
        let mut err = ValidationError::new("code_format");
        err.message = Some(
            "Le code doit contenir uniquement des lettres majuscules et des chiffres.".into(),
        );
        return Err(err);
    }
    Ok(())
}

pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0);
        err.add_param("max".into(), &100);
        err.message = Some("La valeur doit être comprise entre 0 et 100.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "trimmed_opt")]
        email: Option<String>,
    }

    #[test]
    fn trims_required_and_optional_strings() {
        let s: Sample =
            serde_json::from_str(r#"{"name": "  Café du Port ", "email": "   "}"#).unwrap();
        assert_eq!(s.name, "Café du Port");
        assert_eq!(s.email, None);

        let missing: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.name, "");
        assert_eq!(missing.email, None);
    }

    #[test]
    fn code_must_be_uppercase_alphanumeric() {
        assert!(validate_code("TVA20").is_ok());
        assert!(validate_code("V01").is_ok());
        assert!(validate_code("tva20").is_err());
        assert!(validate_code("TVA-20").is_err());
        assert!(validate_code("TVA 20").is_err());
        assert!(validate_code("").is_err());
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(validate_percentage(&dec("0")).is_ok());
        assert!(validate_percentage(&dec("5.5")).is_ok());
        assert!(validate_percentage(&dec("100")).is_ok());
        assert!(validate_percentage(&dec("100.01")).is_err());
        assert!(validate_percentage(&dec("-1")).is_err());
    }
}
