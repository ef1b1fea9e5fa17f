//! Erreurs de conversion des données d'entrée et de configuration.

/// Erreur de lecture des données d'un bien ou de configuration des règles fiscales.
///
/// Les calculs eux-mêmes ne renvoient jamais d'erreur : l'absence de montant
/// à amortir est un résultat normal (`None`).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LmnpError {
    /// Date au format inattendu.
    #[error("Invalid date '{value}'")]
    Date {
        /// Valeur d'origine.
        value: String,
    },
    /// Code inconnu pour une énumération (type de travaux, état du bien, stratégie…).
    #[error("Unknown {kind} code '{value}'")]
    UnknownCode {
        /// Nature du code attendu.
        kind: &'static str,
        /// Valeur d'origine.
        value: String,
    },
    /// La liste de composants d'une reprise détaillée est invalide.
    #[error("Invalid components: {}", errors.join("; "))]
    InvalidComponents {
        /// Messages de validation, dans l'ordre des composants.
        errors: Vec<String>,
    },
    /// Paramètre de règles fiscales incohérent.
    #[error("Invalid fiscal rule '{rule}': {reason}")]
    InvalidRule {
        /// Nom du paramètre.
        rule: &'static str,
        /// Motif du rejet.
        reason: &'static str,
    },
}
