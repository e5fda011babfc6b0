// src/middleware/i18n.rs

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::Lang;

// Nosso extrator de idioma (Accept-Language). Sem cabeçalho ou idioma
// não suportado: francês.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Locale(pub Lang);

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                // parse já devolve as tags ordenadas pelo "q"
                accept_language::parse(header_str)
                    .iter()
                    .find_map(|tag| Lang::from_tag(tag))
            })
            .unwrap_or_default();

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn defaults_to_french() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()), Locale(Lang::Fr));
        assert_eq!(Locale::from_headers(&headers("de-DE")), Locale(Lang::Fr));
    }

    #[test]
    fn picks_first_supported_language_by_quality() {
        assert_eq!(Locale::from_headers(&headers("en-GB,en;q=0.9")), Locale(Lang::En));
        assert_eq!(Locale::from_headers(&headers("de;q=1.0, en;q=0.5, fr;q=0.8")), Locale(Lang::Fr));
    }
}
