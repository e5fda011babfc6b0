// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::ValidationError;

use crate::common::i18n::{Lang, Resource};
use crate::middleware::i18n::Locale;

// Erros de domínio. O texto do `#[error]` é para os logs; a mensagem
// que o cliente recebe sai de `to_api_error`, já traduzida.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Sessão sem tenant")]
    MissingTenant,

    #[error("Permissão insuficiente")]
    Forbidden,

    #[error("{0:?} não encontrado")]
    NotFound(Resource),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Código de taxa já existe: {0}")]
    TaxCodeAlreadyExists(String),

    #[error("Código de vendedor já existe: {0}")]
    SellerCodeAlreadyExists(String),

    #[error("Dia já fechado para o caixa")]
    DayAlreadyClosed,

    #[error("Caixa desativado")]
    RegisterInactive,

    #[error("Taxa arquivada não pode ser padrão")]
    ArchivedTaxRateCannotBeDefault,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro "de fronteira": status + mensagem pronta para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidBody(_)
            | AppError::RegisterInactive
            | AppError::ArchivedTaxRateCannotBeDefault => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::MissingTenant => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                StatusCode::NOT_FOUND
            }
            // Violação de constraint continua sendo 500, só a mensagem é específica.
            AppError::EmailAlreadyExists
            | AppError::TaxCodeAlreadyExists(_)
            | AppError::SellerCodeAlreadyExists(_)
            | AppError::DayAlreadyClosed
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let lang = locale.0;
        let status = self.status();

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors.iter().map(|e| field_message(e, lang)).collect();
                    details.insert(field.to_string(), messages);
                }
                (
                    lang.pick(
                        "Un ou plusieurs champs sont invalides.",
                        "One or more fields are invalid.",
                    )
                    .to_string(),
                    Some(json!(details)),
                )
            }
            AppError::InvalidBody(reason) => (
                lang.pick("Le corps de la requête est invalide.", "The request body is invalid.")
                    .to_string(),
                Some(json!({ "body": [reason] })),
            ),
            AppError::InvalidCredentials => (
                lang.pick("E-mail ou mot de passe invalide.", "Invalid e-mail or password.")
                    .to_string(),
                None,
            ),
            AppError::InvalidToken => (
                lang.pick(
                    "Jeton d'authentification invalide ou absent.",
                    "Missing or invalid authentication token.",
                )
                .to_string(),
                None,
            ),
            AppError::MissingTenant => (
                lang.pick(
                    "Aucune organisation n'est associée à cette session.",
                    "No organization is associated with this session.",
                )
                .to_string(),
                None,
            ),
            AppError::Forbidden => (
                lang.pick(
                    "Vous n'avez pas les droits nécessaires pour cette action.",
                    "You do not have permission to perform this action.",
                )
                .to_string(),
                None,
            ),
            AppError::NotFound(resource) => (not_found_message(resource, lang), None),
            AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                (not_found_message(Resource::Route, lang), None)
            }
            AppError::EmailAlreadyExists => (
                lang.pick("Cet e-mail est déjà utilisé.", "This e-mail is already in use.")
                    .to_string(),
                None,
            ),
            AppError::TaxCodeAlreadyExists(code) => (
                match lang {
                    Lang::Fr => format!("Le code de TVA « {code} » est déjà utilisé."),
                    Lang::En => format!("Tax code '{code}' is already in use."),
                },
                None,
            ),
            AppError::SellerCodeAlreadyExists(code) => (
                match lang {
                    Lang::Fr => format!("Le code vendeur « {code} » est déjà utilisé."),
                    Lang::En => format!("Seller code '{code}' is already in use."),
                },
                None,
            ),
            AppError::DayAlreadyClosed => (
                lang.pick(
                    "Cette journée est déjà clôturée pour cette caisse.",
                    "This day is already closed for this register.",
                )
                .to_string(),
                None,
            ),
            AppError::RegisterInactive => (
                lang.pick("Cette caisse est désactivée.", "This register is deactivated.")
                    .to_string(),
                None,
            ),
            AppError::ArchivedTaxRateCannotBeDefault => (
                lang.pick(
                    "Un taux archivé ne peut pas être le taux par défaut.",
                    "An archived tax rate cannot be the default.",
                )
                .to_string(),
                None,
            ),
            // Todo o resto vira 500. O detalhe fica só no log.
            ref e => {
                tracing::error!("🔥 Erro Interno do Servidor: {}", e);
                (
                    lang.pick(
                        "Une erreur inattendue est survenue.",
                        "An unexpected error occurred.",
                    )
                    .to_string(),
                    None,
                )
            }
        };

        ApiError { status, error, details }
    }
}

// As mensagens dos payloads são escritas em francês; em inglês a
// mensagem é montada a partir do código e dos parâmetros do validator.
fn field_message(err: &ValidationError, lang: Lang) -> String {
    if lang == Lang::Fr {
        return err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());
    }

    let param = |name: &str| err.params.get(name).map(|v| v.to_string());
    match (err.code.as_ref(), param("min"), param("max")) {
        ("length", Some(min), Some(max)) => format!("Must be between {min} and {max} characters."),
        ("length", Some(min), None) => format!("Must be at least {min} characters."),
        ("length", None, Some(max)) => format!("Must be at most {max} characters."),
        ("range", Some(min), Some(max)) => format!("Must be between {min} and {max}."),
        ("email", ..) => "Invalid e-mail address.".to_string(),
        ("required", ..) => "This field is required.".to_string(),
        ("code_format", ..) => "Only uppercase letters and digits are allowed.".to_string(),
        _ => "Invalid value.".to_string(),
    }
}

fn not_found_message(resource: Resource, lang: Lang) -> String {
    match lang {
        Lang::Fr => format!("{} introuvable.", resource.label(lang)),
        Lang::En => format!("{} not found.", resource.label(lang)),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert("error".into(), Value::String(self.error));
        if let Some(details) = self.details {
            body.insert("details".into(), details);
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}

// Sem Locale disponível, responde no idioma padrão.
impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error(&Locale::default())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Açúcar para `.map_err(|e| e.to_api_error(&locale))` nos handlers.
pub trait Localized<T> {
    fn localized(self, locale: &Locale) -> Result<T, ApiError>;
}

impl<T, E> Localized<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn localized(self, locale: &Locale) -> Result<T, ApiError> {
        self.map_err(|e| e.into().to_api_error(locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationErrors;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::InvalidBody("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingTenant.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound(Resource::Brand).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::TaxCodeAlreadyExists("TVA20".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::DayAlreadyClosed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_errors_carry_field_messages() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("Le nom est obligatoire.".into());
        errors.add("name", err);

        let response = AppError::ValidationError(errors)
            .to_api_error(&Locale::default())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Un ou plusieurs champs sont invalides."));
        assert_eq!(body["details"]["name"][0], json!("Le nom est obligatoire."));
    }

    #[test]
    fn field_details_follow_the_language() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.add_param("min".into(), &1);
        err.add_param("max".into(), &100);
        err.message = Some("Le nom est obligatoire (100 caractères maximum).".into());
        errors.add("name", err);
        let mut err = ValidationError::new("email");
        err.message = Some("L'adresse e-mail est invalide.".into());
        errors.add("email", err);

        let en = AppError::ValidationError(errors.clone()).to_api_error(&Locale(Lang::En));
        let details = en.details.unwrap();
        assert_eq!(details["name"][0], json!("Must be between 1 and 100 characters."));
        assert_eq!(details["email"][0], json!("Invalid e-mail address."));

        let fr = AppError::ValidationError(errors).to_api_error(&Locale(Lang::Fr));
        assert_eq!(fr.details.unwrap()["email"][0], json!("L'adresse e-mail est invalide."));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let response = AppError::InternalServerError(anyhow::anyhow!("senha=segredo"))
            .to_api_error(&Locale(Lang::En))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], json!("An unexpected error occurred."));
        assert!(body.get("details").is_none());
        assert!(!body.to_string().contains("segredo"));
    }

    #[test]
    fn not_found_is_localized() {
        let fr = AppError::NotFound(Resource::Register).to_api_error(&Locale(Lang::Fr));
        let en = AppError::NotFound(Resource::Register).to_api_error(&Locale(Lang::En));
        assert_eq!(fr.error, "Caisse introuvable.");
        assert_eq!(en.error, "Register not found.");
    }
}
