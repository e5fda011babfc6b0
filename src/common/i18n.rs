// src/common/i18n.rs

// Idiomas suportados pelas mensagens da API. O francês é o padrão do produto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    /// "fr-FR" -> Fr, "en" -> En, qualquer outro -> None
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split('-').next()?.trim().to_ascii_lowercase();
        match primary.as_str() {
            "fr" => Some(Lang::Fr),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn pick(self, fr: &'static str, en: &'static str) -> &'static str {
        match self {
            Lang::Fr => fr,
            Lang::En => en,
        }
    }
}

// Recursos expostos pela API (usados nas mensagens de "não encontrado")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Client,
    Establishment,
    Register,
    Seller,
    Supplier,
    Brand,
    TaxRate,
    VariationGroup,
    Variation,
    Movement,
    Route,
}

impl Resource {
    pub fn label(self, lang: Lang) -> &'static str {
        match self {
            Resource::Client => lang.pick("Client", "Client"),
            Resource::Establishment => lang.pick("Établissement", "Establishment"),
            Resource::Register => lang.pick("Caisse", "Register"),
            Resource::Seller => lang.pick("Vendeur", "Seller"),
            Resource::Supplier => lang.pick("Fournisseur", "Supplier"),
            Resource::Brand => lang.pick("Marque", "Brand"),
            Resource::TaxRate => lang.pick("Taux de TVA", "Tax rate"),
            Resource::VariationGroup => lang.pick("Groupe de déclinaisons", "Variation group"),
            Resource::Variation => lang.pick("Déclinaison", "Variation"),
            Resource::Movement => lang.pick("Mouvement", "Movement"),
            Resource::Route => lang.pick("Ressource", "Resource"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primary_subtag() {
        assert_eq!(Lang::from_tag("fr-FR"), Some(Lang::Fr));
        assert_eq!(Lang::from_tag("EN-us"), Some(Lang::En));
        assert_eq!(Lang::from_tag("pt-BR"), None);
    }

    #[test]
    fn labels_follow_language() {
        assert_eq!(Resource::TaxRate.label(Lang::Fr), "Taux de TVA");
        assert_eq!(Resource::TaxRate.label(Lang::En), "Tax rate");
    }
}
