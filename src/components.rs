//! Constitution des composants d'un bien selon sa stratégie d'amortissement.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::LmnpError;
use crate::rules::FiscalRules;
use crate::types::{
    Component, DepreciationStrategy, Money, Property, STANDARD_COMPONENTS, TakeoverData,
};
use crate::utils::{component_id, round_cents};

/// Libellé du composant terrain.
pub const LAND: &str = "Terrain";
/// Libellé du bâti synthétisé lors d'une reprise globale.
pub const TAKEOVER_BUILDING: &str = "Immeuble (reprise)";
/// Libellé du mobilier synthétisé lors d'une reprise globale.
pub const TAKEOVER_FURNITURE: &str = "Mobilier (reprise)";

/// Stratégie `NOUVEAU` : terrain non amortissable puis ventilation standard du bâti.
///
/// Le bâti est le prix diminué du terrain et de la valeur du mobilier inclus dans le prix.
pub fn generate_new_components(property: &Property, furniture_value: Money) -> Vec<Component> {
    let land_share = property.land_share_percent / Decimal::ONE_HUNDRED;
    let land_value = property.acquisition_price * land_share;
    let built_value = property.acquisition_price - land_value - furniture_value;

    let mut components = Vec::with_capacity(STANDARD_COMPONENTS.len() + 1);
    components.push(Component {
        id: component_id(&property.id, LAND),
        name: LAND.to_string(),
        initial_value: round_cents(land_value),
        duration_years: 0,
        start_date: property.acquisition_date,
        prior_depreciation: Decimal::ZERO,
        depreciable: false,
        share_percent: Some(property.land_share_percent),
    });

    for standard in &STANDARD_COMPONENTS {
        components.push(Component {
            id: component_id(&property.id, standard.name),
            name: standard.name.to_string(),
            initial_value: round_cents(built_value * standard.share()),
            duration_years: standard.years_for(property.condition),
            start_date: property.acquisition_date,
            prior_depreciation: Decimal::ZERO,
            depreciable: true,
            share_percent: Some(
                Decimal::from(standard.share_percent) * (Decimal::ONE - land_share),
            ),
        });
    }

    components
}

/// Stratégie `REPRISE_GLOBALE` : reconstitue un bâti unique à partir des totaux repris.
///
/// La durée totale est déduite de la dotation de l'exercice précédent ; l'amortissement
/// démarre au 1er janvier de l'année précédant la reprise.
pub fn generate_takeover_components(property: &Property, takeover: &TakeoverData) -> Vec<Component> {
    generate_takeover_components_with(property, takeover, &FiscalRules::LMNP)
}

pub(crate) fn generate_takeover_components_with(
    property: &Property,
    takeover: &TakeoverData,
    rules: &FiscalRules,
) -> Vec<Component> {
    let mut components = Vec::with_capacity(3);
    let start_date = chrono::NaiveDate::from_ymd_opt(takeover.takeover_year - 1, 1, 1)
        .unwrap_or(property.acquisition_date);

    if takeover.land_gross > Decimal::ZERO {
        components.push(Component {
            id: component_id(&property.id, LAND),
            name: LAND.to_string(),
            initial_value: takeover.land_gross,
            duration_years: 0,
            start_date: property.acquisition_date,
            prior_depreciation: Decimal::ZERO,
            depreciable: false,
            share_percent: None,
        });
    }

    if takeover.construction_gross > Decimal::ZERO {
        components.push(Component {
            id: component_id(&property.id, TAKEOVER_BUILDING),
            name: TAKEOVER_BUILDING.to_string(),
            initial_value: takeover.construction_gross,
            duration_years: takeover_total_years(takeover, rules),
            start_date,
            prior_depreciation: takeover.cumulative_depreciation,
            depreciable: true,
            share_percent: None,
        });
    }

    if let Some(furniture_gross) = takeover.furniture_gross.filter(|v| *v > Decimal::ZERO) {
        components.push(Component {
            id: component_id(&property.id, TAKEOVER_FURNITURE),
            name: TAKEOVER_FURNITURE.to_string(),
            initial_value: furniture_gross,
            duration_years: rules.furniture_years,
            start_date,
            prior_depreciation: takeover.furniture_cumulative.unwrap_or_default(),
            depreciable: true,
            share_percent: None,
        });
    }

    components
}

/// Durée totale du bâti repris : durée restante plus années déjà amorties.
fn takeover_total_years(takeover: &TakeoverData, rules: &FiscalRules) -> u32 {
    let allowance = takeover.last_year_allowance;
    if allowance <= Decimal::ZERO {
        return rules.takeover_default_years;
    }

    let net_book_value = takeover.construction_gross - takeover.cumulative_depreciation;
    let remaining = ceil_years(net_book_value / allowance)
        .clamp(1, u64::from(rules.takeover_max_years));
    let elapsed = ceil_years(takeover.cumulative_depreciation / allowance);

    u32::try_from(remaining + elapsed).unwrap_or(u32::MAX)
}

/// Arrondi à l'année supérieure, borné à zéro.
fn ceil_years(ratio: Decimal) -> u64 {
    ratio.ceil().max(Decimal::ZERO).to_u64().unwrap_or(u64::MAX)
}

/// Composants à amortir pour un bien.
///
/// Une liste explicite prime toujours. Pour une reprise détaillée sans liste,
/// le résultat est vide : les composants doivent venir de l'appelant.
pub fn components_for(property: &Property, furniture_value: Money) -> Vec<Component> {
    components_for_with(property, furniture_value, &FiscalRules::LMNP)
}

pub(crate) fn components_for_with(
    property: &Property,
    furniture_value: Money,
    rules: &FiscalRules,
) -> Vec<Component> {
    if property.has_explicit_components() {
        return property.components.clone();
    }

    match &property.strategy {
        DepreciationStrategy::New => generate_new_components(property, furniture_value),
        DepreciationStrategy::AggregatedTakeover(takeover) => {
            generate_takeover_components_with(property, takeover, rules)
        }
        DepreciationStrategy::DetailedTakeover => Vec::new(),
    }
}

/// Rapport de validation d'une liste de composants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentValidation {
    /// Vrai si aucune anomalie n'a été relevée.
    pub is_valid: bool,
    /// Anomalies, numérotées à partir de 1 par composant.
    pub errors: Vec<String>,
}

impl ComponentValidation {
    /// Convertit le rapport en `Result`.
    pub fn into_result(self) -> Result<(), LmnpError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(LmnpError::InvalidComponents {
                errors: self.errors,
            })
        }
    }
}

/// Valide les composants fournis pour une reprise détaillée, en relevant toutes les anomalies.
pub fn validate_detailed_components(components: &[Component]) -> ComponentValidation {
    if components.is_empty() {
        return ComponentValidation {
            is_valid: false,
            errors: vec!["Au moins un composant est requis".to_string()],
        };
    }

    let mut errors = Vec::new();
    for (index, component) in components.iter().enumerate() {
        let position = index + 1;
        if component.name.trim().is_empty() {
            errors.push(format!("Composant {position}: Nom requis"));
        }
        if component.initial_value < Decimal::ZERO {
            errors.push(format!("Composant {position}: Valeur initiale invalide"));
        }
        if component.depreciable && component.duration_years == 0 {
            errors.push(format!(
                "Composant {position}: Duree invalide pour un composant amortissable"
            ));
        }
        if component.prior_depreciation < Decimal::ZERO {
            errors.push(format!("Composant {position}: Amortissement anterieur invalide"));
        }
        if component.prior_depreciation > component.initial_value {
            errors.push(format!(
                "Composant {position}: Amortissement anterieur superieur a la valeur initiale"
            ));
        }
    }

    ComponentValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyCondition;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn takeover() -> TakeoverData {
        TakeoverData {
            takeover_year: 2024,
            land_gross: dec!(30000),
            construction_gross: dec!(150000),
            cumulative_depreciation: dec!(30000),
            last_year_allowance: dec!(6000),
            furniture_gross: Some(dec!(7000)),
            furniture_cumulative: Some(dec!(3000)),
        }
    }

    #[test]
    fn new_strategy_splits_price() {
        let property = Property::new("b1", date(2020, 1, 1), dec!(200000)).with_land_share(dec!(10));
        let components = generate_new_components(&property, Decimal::ZERO);

        assert_eq!(components.len(), 6);
        assert_eq!(components[0].name, LAND);
        assert_eq!(components[0].initial_value, dec!(20000));
        assert!(!components[0].depreciable);
        assert_eq!(components[1].initial_value, dec!(90000));
        assert_eq!(components[1].duration_years, 50);
        assert_eq!(components[1].share_percent, Some(dec!(45)));

        let total: Money = components.iter().map(|c| c.initial_value).sum();
        assert_eq!(total, dec!(200000));
    }

    #[test]
    fn new_strategy_deducts_furniture() {
        let property = Property::new("b1", date(2020, 1, 1), dec!(100000))
            .with_land_share(dec!(15))
            .with_condition(PropertyCondition::New);
        let components = generate_new_components(&property, dec!(5000));

        let built: Money = components[1..].iter().map(|c| c.initial_value).sum();
        assert_eq!(built, dec!(80000));
        assert_eq!(components[1].duration_years, 80);
    }

    #[test]
    fn takeover_reverse_engineers_duration() {
        let property = Property::new("b2", date(2015, 6, 1), dec!(180000));
        let components = generate_takeover_components(&property, &takeover());

        assert_eq!(components.len(), 3);
        let building = &components[1];
        assert_eq!(building.name, TAKEOVER_BUILDING);
        // 120 000 / 6 000 = 20 restantes, 30 000 / 6 000 = 5 écoulées.
        assert_eq!(building.duration_years, 25);
        assert_eq!(building.start_date, date(2023, 1, 1));
        assert_eq!(building.prior_depreciation, dec!(30000));

        let land = &components[0];
        assert_eq!(land.start_date, date(2015, 6, 1));

        let furniture = &components[2];
        assert_eq!(furniture.duration_years, 7);
        assert_eq!(furniture.prior_depreciation, dec!(3000));
    }

    #[test]
    fn takeover_without_allowance_uses_default_duration() {
        let property = Property::new("b2", date(2015, 6, 1), dec!(180000));
        let data = TakeoverData {
            last_year_allowance: Decimal::ZERO,
            furniture_gross: None,
            land_gross: Decimal::ZERO,
            ..takeover()
        };
        let components = generate_takeover_components(&property, &data);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].duration_years, 25);
    }

    #[test]
    fn takeover_remaining_duration_is_clamped() {
        let property = Property::new("b2", date(2015, 6, 1), dec!(180000));
        let data = TakeoverData {
            cumulative_depreciation: dec!(100),
            last_year_allowance: dec!(100),
            ..takeover()
        };
        let components = generate_takeover_components(&property, &data);
        // 149 900 / 100 plafonné à 80, plus 1 année écoulée.
        assert_eq!(components[1].duration_years, 81);
    }

    #[test]
    fn explicit_components_win() {
        let explicit = vec![Component {
            id: "c1".to_string(),
            name: "Structure".to_string(),
            initial_value: dec!(1000),
            duration_years: 10,
            start_date: date(2020, 1, 1),
            prior_depreciation: Decimal::ZERO,
            depreciable: true,
            share_percent: None,
        }];
        let property = Property::new("b3", date(2020, 1, 1), dec!(200000))
            .with_strategy(DepreciationStrategy::AggregatedTakeover(takeover()))
            .with_components(explicit.clone());
        assert_eq!(components_for(&property, Decimal::ZERO), explicit);
    }

    #[test]
    fn detailed_takeover_without_components_is_empty() {
        let property = Property::new("b3", date(2020, 1, 1), dec!(200000))
            .with_strategy(DepreciationStrategy::DetailedTakeover);
        assert!(components_for(&property, Decimal::ZERO).is_empty());
    }

    #[test]
    fn empty_list_is_rejected() {
        let report = validate_detailed_components(&[]);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Au moins un composant est requis"]);
    }

    #[test]
    fn validation_collects_every_violation() {
        let broken = Component {
            id: "x".to_string(),
            name: "  ".to_string(),
            initial_value: dec!(-5),
            duration_years: 0,
            start_date: date(2020, 1, 1),
            prior_depreciation: dec!(-10),
            depreciable: true,
            share_percent: None,
        };
        let too_depreciated = Component {
            name: "Toiture".to_string(),
            initial_value: dec!(100),
            duration_years: 25,
            prior_depreciation: dec!(150),
            ..broken.clone()
        };
        let report = validate_detailed_components(&[broken, too_depreciated]);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Composant 1: Nom requis",
                "Composant 1: Valeur initiale invalide",
                "Composant 1: Duree invalide pour un composant amortissable",
                "Composant 1: Amortissement anterieur invalide",
                "Composant 2: Amortissement anterieur superieur a la valeur initiale",
            ]
        );
        assert!(report.into_result().is_err());
    }
}
