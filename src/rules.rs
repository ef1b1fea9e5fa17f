//! Paramètres numériques du régime LMNP.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LmnpError;
use crate::types::Money;

/// Seuils et durées appliqués par le moteur.
///
/// `FiscalRules::LMNP` reprend les valeurs du régime ; les autres jeux de règles
/// servent surtout aux simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalRules {
    /// Montant minimal de travaux immobilisables.
    pub works_capitalisation_threshold: Money,
    /// Durée d'amortissement des frais de notaire immobilisés.
    pub notary_fee_years: u32,
    /// Durée par défaut du mobilier.
    pub furniture_years: u32,
    /// Durée restante retenue pour une reprise globale sans dotation connue.
    pub takeover_default_years: u32,
    /// Plafond de la durée restante d'une reprise globale.
    pub takeover_max_years: u32,
    /// Durée de report des déficits ordinaires.
    pub deficit_carry_years: i32,
}

impl FiscalRules {
    /// Règles du régime LMNP.
    pub const LMNP: Self = Self {
        works_capitalisation_threshold: Decimal::from_parts(600, 0, 0, false, 0),
        notary_fee_years: 20,
        furniture_years: 7,
        takeover_default_years: 25,
        takeover_max_years: 80,
        deficit_carry_years: 10,
    };

    /// Modifie le seuil d'immobilisation des travaux.
    #[must_use]
    pub const fn works_capitalisation_threshold(mut self, amount: Money) -> Self {
        self.works_capitalisation_threshold = amount;
        self
    }

    /// Modifie la durée d'amortissement des frais de notaire.
    #[must_use]
    pub const fn notary_fee_years(mut self, years: u32) -> Self {
        self.notary_fee_years = years;
        self
    }

    /// Modifie la durée par défaut du mobilier.
    #[must_use]
    pub const fn furniture_years(mut self, years: u32) -> Self {
        self.furniture_years = years;
        self
    }

    /// Modifie la durée de report des déficits.
    #[must_use]
    pub const fn deficit_carry_years(mut self, years: i32) -> Self {
        self.deficit_carry_years = years;
        self
    }

    /// Vérifie la cohérence des paramètres.
    pub fn validate(&self) -> Result<(), LmnpError> {
        if self.works_capitalisation_threshold.is_sign_negative() {
            return Err(LmnpError::InvalidRule {
                rule: "works_capitalisation_threshold",
                reason: "must not be negative",
            });
        }
        let durations = [
            ("notary_fee_years", self.notary_fee_years),
            ("furniture_years", self.furniture_years),
            ("takeover_default_years", self.takeover_default_years),
            ("takeover_max_years", self.takeover_max_years),
        ];
        if let Some(&(rule, _)) = durations.iter().find(|(_, years)| *years == 0) {
            return Err(LmnpError::InvalidRule {
                rule,
                reason: "must be at least one year",
            });
        }
        if self.deficit_carry_years < 1 {
            return Err(LmnpError::InvalidRule {
                rule: "deficit_carry_years",
                reason: "must be at least one year",
            });
        }
        Ok(())
    }
}

impl Default for FiscalRules {
    fn default() -> Self {
        Self::LMNP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lmnp_rules_are_valid() {
        assert!(FiscalRules::default().validate().is_ok());
        assert_eq!(
            FiscalRules::LMNP.works_capitalisation_threshold,
            Decimal::from(600)
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = FiscalRules::LMNP.furniture_years(0).validate().unwrap_err();
        assert_eq!(
            err,
            LmnpError::InvalidRule {
                rule: "furniture_years",
                reason: "must be at least one year",
            }
        );
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let rules = FiscalRules::LMNP.works_capitalisation_threshold(Decimal::NEGATIVE_ONE);
        assert!(rules.validate().is_err());
    }
}
