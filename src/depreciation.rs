//! Dotations linéaires annuelles et tableau d'amortissement consolidé d'un bien.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::components_for_with;
use crate::error::LmnpError;
use crate::rules::FiscalRules;
use crate::types::{
    Component, DepreciationLine, DepreciationTable, Furniture, LineKey, Money, NotaryFeeTreatment,
    Property, STANDARD_COMPONENTS, Works, WorksKind,
};
use crate::utils::{is_furniture_name, prorata_temporis, round_cents};

/// Libellé de la ligne mobilier hors composants.
pub const FURNITURE: &str = "Mobilier";
/// Libellé de la ligne des frais de notaire immobilisés.
pub const NOTARY_FEES: &str = "Frais de notaire";

/// Cumuls d'amortissements à la clôture de l'exercice précédent.
///
/// L'état est conservé par l'appelant d'un exercice à l'autre ; `advance` le met
/// à jour à partir du tableau de l'exercice calculé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorCumulatives {
    /// Composants du barème standard, par libellé.
    #[serde(default)]
    pub standard_components: BTreeMap<String, Money>,
    /// Composants, par identifiant.
    #[serde(default)]
    pub components: BTreeMap<String, Money>,
    /// Mobilier hors composants.
    #[serde(default)]
    pub furniture: Money,
    /// Travaux, par identifiant.
    #[serde(default)]
    pub works: BTreeMap<String, Money>,
    /// Frais de notaire immobilisés.
    #[serde(default)]
    pub notary_fees: Money,
}

impl PriorCumulatives {
    /// Cumuls à reporter après l'exercice décrit par `table`.
    pub fn from_table(table: &DepreciationTable) -> Self {
        Self::default().advance(table)
    }

    /// Cumuls de l'exercice suivant : ceux de `table`, les autres inchangés.
    #[must_use]
    pub fn advance(&self, table: &DepreciationTable) -> Self {
        let mut next = self.clone();
        for line in table.lines() {
            let cumulative = line.cumulative;
            match &line.key {
                LineKey::StandardComponent(name) => {
                    next.standard_components.insert(name.clone(), cumulative);
                }
                LineKey::Component(id) => {
                    next.components.insert(id.clone(), cumulative);
                }
                LineKey::Furniture => next.furniture = cumulative,
                LineKey::Works(id) => {
                    next.works.insert(id.clone(), cumulative);
                }
                LineKey::NotaryFees => next.notary_fees = cumulative,
            }
        }
        next
    }
}

/// Actif amortissable réduit à ce qu'exige le calcul d'une dotation.
struct Asset {
    key: LineKey,
    label: String,
    gross: Money,
    years: u32,
    start: NaiveDate,
}

/// Dotation linéaire de l'exercice, plafonnée à la valeur nette comptable.
///
/// Renvoie `None` pour une durée nulle ; une fois l'actif totalement amorti,
/// la ligne reste présente avec une dotation nulle.
fn depreciate(asset: Asset, prior: Money, year: i32) -> Option<DepreciationLine> {
    if asset.years == 0 {
        return None;
    }

    let net_before = asset.gross - prior;
    if net_before <= Decimal::ZERO {
        if net_before < Decimal::ZERO {
            tracing::warn!(
                component = %asset.label,
                gross = %asset.gross,
                prior = %prior,
                "prior cumulative exceeds gross value"
            );
        }
        return Some(DepreciationLine {
            key: asset.key,
            component: asset.label,
            gross_value: round_cents(asset.gross),
            duration_years: asset.years,
            start_date: asset.start,
            annual_allowance: Decimal::ZERO,
            cumulative: round_cents(asset.gross),
            net_book_value: Decimal::ZERO,
        });
    }

    let theoretical = asset.gross / Decimal::from(asset.years);
    let allowance =
        round_cents((theoretical * prorata_temporis(asset.start, year)).min(net_before));
    let cumulative = round_cents(prior + allowance);

    Some(DepreciationLine {
        key: asset.key,
        component: asset.label,
        gross_value: round_cents(asset.gross),
        duration_years: asset.years,
        start_date: asset.start,
        annual_allowance: allowance,
        cumulative,
        net_book_value: round_cents(asset.gross - cumulative),
    })
}

/// Cumul antérieur d'un composant : valeur suivie par l'appelant, sinon reprise du composant.
fn component_prior(component: &Component, prior_by_id: &BTreeMap<String, Money>) -> Money {
    prior_by_id
        .get(&component.id)
        .copied()
        .filter(|v| !v.is_zero())
        .unwrap_or(component.prior_depreciation)
}

/// Lignes de l'exercice pour une liste de composants ; le terrain est ignoré.
pub fn depreciate_components(
    components: &[Component],
    year: i32,
    prior_by_id: &BTreeMap<String, Money>,
) -> Vec<DepreciationLine> {
    components
        .iter()
        .filter(|c| c.depreciable && c.duration_years > 0)
        .filter_map(|c| {
            depreciate(
                Asset {
                    key: LineKey::Component(c.id.clone()),
                    label: c.name.clone(),
                    gross: c.initial_value,
                    years: c.duration_years,
                    start: c.start_date,
                },
                component_prior(c, prior_by_id),
                year,
            )
        })
        .collect()
}

/// Lignes du barème standard calculées directement depuis le bien.
///
/// Les cumuls antérieurs sont indexés par libellé de composant.
pub fn depreciate_property(
    property: &Property,
    year: i32,
    prior_by_name: &BTreeMap<String, Money>,
) -> Vec<DepreciationLine> {
    let base = property.acquisition_price
        * (Decimal::ONE - property.land_share_percent / Decimal::ONE_HUNDRED);

    STANDARD_COMPONENTS
        .iter()
        .filter_map(|standard| {
            let prior = prior_by_name
                .get(standard.name)
                .copied()
                .unwrap_or_default();
            depreciate(
                Asset {
                    key: LineKey::StandardComponent(standard.name.to_string()),
                    label: standard.name.to_string(),
                    gross: round_cents(base * standard.share()),
                    years: standard.years_for(property.condition),
                    start: property.acquisition_date,
                },
                prior,
                year,
            )
        })
        .collect()
}

/// Ligne du mobilier ; `None` si sa valeur est nulle.
pub fn depreciate_furniture(furniture: &Furniture, year: i32, prior: Money) -> Option<DepreciationLine> {
    depreciate_furniture_with(furniture, year, prior, &FiscalRules::LMNP)
}

fn depreciate_furniture_with(
    furniture: &Furniture,
    year: i32,
    prior: Money,
    rules: &FiscalRules,
) -> Option<DepreciationLine> {
    if furniture.total_value <= Decimal::ZERO {
        return None;
    }

    let years = furniture
        .depreciation_years
        .filter(|years| *years > 0)
        .unwrap_or(rules.furniture_years);
    depreciate(
        Asset {
            key: LineKey::Furniture,
            label: FURNITURE.to_string(),
            gross: furniture.total_value,
            years,
            start: furniture.purchase_date,
        },
        prior,
        year,
    )
}

/// Ligne d'un composant mobilier repris ; `None` s'il est déjà totalement amorti.
fn depreciate_furniture_component(
    component: &Component,
    year: i32,
    prior_by_id: &BTreeMap<String, Money>,
) -> Option<DepreciationLine> {
    let prior = component_prior(component, prior_by_id);
    if component.initial_value - prior <= Decimal::ZERO {
        return None;
    }

    depreciate(
        Asset {
            key: LineKey::Component(component.id.clone()),
            label: component.name.clone(),
            gross: component.initial_value,
            years: component.duration_years,
            start: component.start_date,
        },
        prior,
        year,
    )
}

/// Ligne de travaux immobilisés.
///
/// Les petits travaux et les montants sous le seuil d'immobilisation ne donnent
/// pas de ligne : ils relèvent des charges de l'exercice.
pub fn depreciate_works(works: &Works, year: i32, prior: Money) -> Option<DepreciationLine> {
    depreciate_works_with(works, year, prior, &FiscalRules::LMNP)
}

fn depreciate_works_with(
    works: &Works,
    year: i32,
    prior: Money,
    rules: &FiscalRules,
) -> Option<DepreciationLine> {
    if works.kind == WorksKind::SmallWorks || works.amount < rules.works_capitalisation_threshold {
        tracing::debug!(works = %works.id, amount = %works.amount, "works expensed, not capitalised");
        return None;
    }

    depreciate(
        Asset {
            key: LineKey::Works(works.id.clone()),
            label: format!("Travaux: {}", works.description),
            gross: works.amount,
            years: works.kind.depreciation_years(),
            start: works.date,
        },
        prior,
        year,
    )
}

/// Ligne des frais de notaire, seulement s'ils sont immobilisés.
pub fn depreciate_notary_fees(property: &Property, year: i32, prior: Money) -> Option<DepreciationLine> {
    depreciate_notary_fees_with(property, year, prior, &FiscalRules::LMNP)
}

fn depreciate_notary_fees_with(
    property: &Property,
    year: i32,
    prior: Money,
    rules: &FiscalRules,
) -> Option<DepreciationLine> {
    if property.notary_fee_treatment != Some(NotaryFeeTreatment::Capitalization)
        || property.notary_fees <= Decimal::ZERO
    {
        return None;
    }

    depreciate(
        Asset {
            key: LineKey::NotaryFees,
            label: NOTARY_FEES.to_string(),
            gross: property.notary_fees,
            years: rules.notary_fee_years,
            start: property.acquisition_date,
        },
        prior,
        year,
    )
}

/// Tableau d'amortissement d'un bien pour l'exercice `year`, règles LMNP.
pub fn generate_table(
    property: &Property,
    furniture: Option<&Furniture>,
    works: &[Works],
    year: i32,
    prior: &PriorCumulatives,
) -> DepreciationTable {
    build_table(property, furniture, works, year, prior, &FiscalRules::LMNP)
}

fn build_table(
    property: &Property,
    furniture: Option<&Furniture>,
    works: &[Works],
    year: i32,
    prior: &PriorCumulatives,
    rules: &FiscalRules,
) -> DepreciationTable {
    let uses_components = property.strategy.is_takeover() || property.has_explicit_components();

    let (building_lines, furniture_line) = if uses_components {
        let furniture_value = furniture.map_or(Decimal::ZERO, |f| f.total_value);
        let (furniture_components, building_components): (Vec<_>, Vec<_>) =
            components_for_with(property, furniture_value, rules)
                .into_iter()
                .partition(|c| is_furniture_name(&c.name));

        let lines = depreciate_components(&building_components, year, &prior.components);
        let furniture_line = furniture_components
            .first()
            .and_then(|c| depreciate_furniture_component(c, year, &prior.components))
            .or_else(|| {
                furniture.and_then(|f| depreciate_furniture_with(f, year, prior.furniture, rules))
            });
        (lines, furniture_line)
    } else {
        let mut lines = depreciate_property(property, year, &prior.standard_components);
        lines.extend(depreciate_notary_fees_with(
            property,
            year,
            prior.notary_fees,
            rules,
        ));
        let furniture_line =
            furniture.and_then(|f| depreciate_furniture_with(f, year, prior.furniture, rules));
        (lines, furniture_line)
    };

    let works_lines: Vec<DepreciationLine> = works
        .iter()
        .filter_map(|w| {
            let prior = prior.works.get(&w.id).copied().unwrap_or_default();
            depreciate_works_with(w, year, prior, rules)
        })
        .collect();

    let mut table = DepreciationTable {
        property_id: property.id.clone(),
        year,
        building_lines,
        furniture_line,
        works_lines,
        total_annual_allowance: Decimal::ZERO,
        total_cumulative: Decimal::ZERO,
    };
    table.total_annual_allowance = round_cents(table.lines().map(|l| l.annual_allowance).sum());
    table.total_cumulative = round_cents(table.lines().map(|l| l.cumulative).sum());

    tracing::debug!(
        property = %property.id,
        year,
        strategy = property.strategy.code(),
        lines = table.lines().count(),
        allowance = %table.total_annual_allowance,
        "depreciation table generated"
    );
    table
}

/// Builder du tableau d'amortissement, avec mobilier, travaux, cumuls et règles optionnels.
pub struct DepreciationTableBuilder<'a> {
    property: &'a Property,
    furniture: Option<&'a Furniture>,
    works: &'a [Works],
    prior: Option<&'a PriorCumulatives>,
    rules: FiscalRules,
}

impl<'a> DepreciationTableBuilder<'a> {
    /// Crée un builder pour le bien, sans mobilier, travaux ni cumuls antérieurs.
    ///
    /// # Exemple
    ///
    /// ```
    /// # use lmnp_amortissements::{DepreciationTableBuilder, Property};
    /// # use chrono::NaiveDate;
    /// # use rust_decimal::Decimal;
    /// let acquired = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let property = Property::new("bien-1", acquired, Decimal::from(200_000));
    /// let table = DepreciationTableBuilder::new(&property).generate(2020).unwrap();
    /// assert_eq!(table.building_lines.len(), 5);
    /// ```
    #[inline]
    pub const fn new(property: &'a Property) -> Self {
        Self {
            property,
            furniture: None,
            works: &[],
            prior: None,
            rules: FiscalRules::LMNP,
        }
    }

    /// Ajoute le mobilier du bien.
    #[inline]
    pub const fn furniture(mut self, furniture: &'a Furniture) -> Self {
        self.furniture = Some(furniture);
        self
    }

    /// Ajoute les travaux du bien.
    #[inline]
    pub const fn works(mut self, works: &'a [Works]) -> Self {
        self.works = works;
        self
    }

    /// Fournit les cumuls de l'exercice précédent.
    #[inline]
    pub const fn prior(mut self, prior: &'a PriorCumulatives) -> Self {
        self.prior = Some(prior);
        self
    }

    /// Remplace les règles LMNP.
    #[inline]
    pub const fn rules(mut self, rules: FiscalRules) -> Self {
        self.rules = rules;
        self
    }

    /// Calcule le tableau de l'exercice `year`.
    pub fn generate(self, year: i32) -> Result<DepreciationTable, LmnpError> {
        self.rules.validate()?;
        let empty = PriorCumulatives::default();
        let prior = self.prior.unwrap_or(&empty);
        Ok(build_table(
            self.property,
            self.furniture,
            self.works,
            year,
            prior,
            &self.rules,
        ))
    }
}
