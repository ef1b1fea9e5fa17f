//! Consolidation multi-biens, imputation des reports et suivi des déficits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::FiscalRules;
use crate::types::{ConsolidatedResult, Money, PriorDeficit, TaxResult};
use crate::utils::{format_euros, round_cents};

/// Consolide les résultats des biens d'un exercice.
///
/// Le résultat courant absorbe d'abord les déficits ordinaires non expirés, du plus
/// ancien au plus récent, puis le stock d'amortissements différés antérieurs.
/// Les amortissements différés de l'exercice s'ajoutent au stock reporté.
pub fn consolidate(
    results: &[TaxResult],
    prior_deficits: &[PriorDeficit],
    prior_deferred: Money,
    year: i32,
) -> ConsolidatedResult {
    let receipts: Money = results.iter().map(|r| r.total_receipts).sum();
    let charges: Money = results.iter().map(|r| r.deductible_charges).sum();
    let used: Money = results.iter().map(|r| r.depreciation_used).sum();
    let deferred_this_year: Money = results.iter().map(|r| r.depreciation_deferred).sum();

    let mut running = receipts - charges - used;

    let mut deficits_absorbed = Decimal::ZERO;
    if running > Decimal::ZERO {
        let mut available: Vec<&PriorDeficit> = prior_deficits
            .iter()
            .filter(|d| d.is_available(year))
            .collect();
        available.sort_by_key(|d| d.origin_year);

        for deficit in available {
            if running <= Decimal::ZERO {
                break;
            }
            let absorbed = deficit.amount.min(running);
            deficits_absorbed += absorbed;
            running -= absorbed;
        }
    }

    let mut deferred_absorbed = Decimal::ZERO;
    if running > Decimal::ZERO && prior_deferred > Decimal::ZERO {
        deferred_absorbed = prior_deferred.min(running);
        running -= deferred_absorbed;
    }

    let deferred_remaining = prior_deferred - deferred_absorbed + deferred_this_year;

    tracing::debug!(
        year,
        properties = results.len(),
        deficits_absorbed = %deficits_absorbed,
        deferred_absorbed = %deferred_absorbed,
        deferred_remaining = %deferred_remaining,
        "results consolidated"
    );

    ConsolidatedResult {
        year,
        total_receipts: round_cents(receipts),
        deductible_charges: round_cents(charges),
        depreciation_used: round_cents(used),
        depreciation_deferred: round_cents(deferred_this_year),
        prior_deficits_absorbed: round_cents(deficits_absorbed),
        prior_deferred_absorbed: round_cents(deferred_absorbed),
        deferred_remaining: round_cents(deferred_remaining),
        taxable_result: round_cents(running.max(Decimal::ZERO)),
        is_deficit: running < Decimal::ZERO,
    }
}

/// Déficit de l'exercice : recettes moins charges et amortissements déduits.
///
/// Un résultat consolidé déficitaire n'a imputé aucun report, ce montant est donc
/// aussi le résultat courant avant plancher.
fn current_year_shortfall(consolidated: &ConsolidatedResult) -> Money {
    (consolidated.total_receipts - consolidated.deductible_charges - consolidated.depreciation_used)
        .abs()
}

/// Déficits reportables après l'exercice `year`, durée de report LMNP.
pub fn roll_forward_deficits(
    prior_deficits: &[PriorDeficit],
    consolidated: &ConsolidatedResult,
    year: i32,
) -> Vec<PriorDeficit> {
    roll_forward_deficits_with_rules(prior_deficits, consolidated, year, &FiscalRules::LMNP)
}

/// Déficits reportables après l'exercice `year`.
///
/// Les déficits expirés disparaissent, les imputations de l'exercice sont
/// retranchées des plus anciens, et un déficit de l'exercice est ajouté.
pub fn roll_forward_deficits_with_rules(
    prior_deficits: &[PriorDeficit],
    consolidated: &ConsolidatedResult,
    year: i32,
    rules: &FiscalRules,
) -> Vec<PriorDeficit> {
    let mut deficits: Vec<PriorDeficit> = prior_deficits
        .iter()
        .filter(|d| d.expiration_year >= year)
        .cloned()
        .collect();
    deficits.sort_by_key(|d| d.origin_year);

    let mut to_charge = consolidated.prior_deficits_absorbed;
    for deficit in &mut deficits {
        if to_charge <= Decimal::ZERO {
            break;
        }
        let charged = deficit.amount.min(to_charge);
        deficit.amount -= charged;
        to_charge -= charged;
    }
    deficits.retain(|d| d.amount > Decimal::ZERO);

    if consolidated.is_deficit {
        let shortfall = current_year_shortfall(consolidated);
        if shortfall > Decimal::ZERO {
            deficits.push(PriorDeficit::with_carry_years(
                year,
                round_cents(shortfall),
                rules.deficit_carry_years,
            ));
        }
    }

    deficits
}

/// Libellé du résultat consolidé.
pub fn format_result(consolidated: &ConsolidatedResult) -> String {
    if consolidated.is_deficit {
        format!("Deficit : {} EUR", format_euros(current_year_shortfall(consolidated)))
    } else if consolidated.taxable_result.is_zero() {
        "Resultat nul (pas d'impot LMNP)".to_string()
    } else {
        format!(
            "Benefice imposable : {} EUR",
            format_euros(consolidated.taxable_result)
        )
    }
}

/// Reports détenus par le contribuable d'un exercice à l'autre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryForward {
    /// Déficits ordinaires reportables.
    #[serde(default)]
    pub deficits: Vec<PriorDeficit>,
    /// Stock d'amortissements différés, sans limite de durée.
    #[serde(default)]
    pub deferred_pool: Money,
}

impl CarryForward {
    /// Consolide l'exercice et renvoie les reports de l'exercice suivant.
    pub fn advance(&self, results: &[TaxResult], year: i32) -> (ConsolidatedResult, Self) {
        self.advance_with_rules(results, year, &FiscalRules::LMNP)
    }

    /// Variante de `advance` avec des règles personnalisées.
    pub fn advance_with_rules(
        &self,
        results: &[TaxResult],
        year: i32,
        rules: &FiscalRules,
    ) -> (ConsolidatedResult, Self) {
        let consolidated = consolidate(results, &self.deficits, self.deferred_pool, year);
        let next = Self {
            deficits: roll_forward_deficits_with_rules(&self.deficits, &consolidated, year, rules),
            deferred_pool: consolidated.deferred_remaining,
        };
        (consolidated, next)
    }

    /// Total des déficits encore imputables sur l'exercice `year`.
    pub fn available_deficits(&self, year: i32) -> Money {
        self.deficits
            .iter()
            .filter(|d| d.is_available(year))
            .map(|d| d.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn result(receipts: Money, charges: Money, used: Money, deferred: Money) -> TaxResult {
        TaxResult {
            year: 2024,
            property_id: "bien".to_string(),
            total_receipts: receipts,
            deductible_charges: charges,
            gross_result: receipts - charges,
            depreciation_computed: used + deferred,
            depreciation_used: used,
            depreciation_deferred: deferred,
            taxable_result: receipts - charges - used,
            is_deficit: receipts < charges,
            reportable_deficit: (charges - receipts).max(Decimal::ZERO),
        }
    }

    fn deficit(origin_year: i32, amount: Money) -> PriorDeficit {
        PriorDeficit::new(origin_year, amount)
    }

    #[test]
    fn deficits_absorbed_oldest_first_then_deferred_pool() {
        let results = [result(dec!(20000), dec!(8000), dec!(4000), Decimal::ZERO)];
        let deficits = [deficit(2020, dec!(3000)), deficit(2018, dec!(2000))];

        let consolidated = consolidate(&results, &deficits, dec!(5000), 2024);
        // 8 000 courant : 2 000 (2018) + 3 000 (2020), puis 3 000 d'ARD.
        assert_eq!(consolidated.prior_deficits_absorbed, dec!(5000));
        assert_eq!(consolidated.prior_deferred_absorbed, dec!(3000));
        assert_eq!(consolidated.deferred_remaining, dec!(2000));
        assert_eq!(consolidated.taxable_result, Decimal::ZERO);
        assert!(!consolidated.is_deficit);
    }

    #[test]
    fn expired_deficits_are_ignored() {
        let results = [result(dec!(10000), dec!(4000), Decimal::ZERO, Decimal::ZERO)];
        let deficits = [deficit(2012, dec!(5000)), deficit(2014, dec!(1000))];

        let consolidated = consolidate(&results, &deficits, Decimal::ZERO, 2024);
        assert_eq!(consolidated.prior_deficits_absorbed, dec!(1000));
        assert_eq!(consolidated.taxable_result, dec!(5000));
    }

    #[test]
    fn negative_result_absorbs_nothing() {
        let results = [
            result(dec!(3000), dec!(5000), Decimal::ZERO, dec!(1000)),
            result(dec!(6000), dec!(5500), dec!(500), dec!(700)),
        ];
        let consolidated = consolidate(&results, &[deficit(2022, dec!(900))], dec!(400), 2024);

        assert!(consolidated.is_deficit);
        assert_eq!(consolidated.taxable_result, Decimal::ZERO);
        assert_eq!(consolidated.prior_deficits_absorbed, Decimal::ZERO);
        assert_eq!(consolidated.prior_deferred_absorbed, Decimal::ZERO);
        assert_eq!(consolidated.deferred_remaining, dec!(2100));
    }

    #[test]
    fn roll_forward_charges_and_appends() {
        let prior = [
            deficit(2013, dec!(800)),
            deficit(2019, dec!(1500)),
            deficit(2021, dec!(1000)),
        ];
        let consolidated = consolidate(
            &[result(dec!(12000), dec!(10000), Decimal::ZERO, Decimal::ZERO)],
            &prior,
            Decimal::ZERO,
            2024,
        );
        assert_eq!(consolidated.prior_deficits_absorbed, dec!(2000));

        let next = roll_forward_deficits(&prior, &consolidated, 2024);
        assert_eq!(next, vec![deficit(2021, dec!(500))]);
    }

    #[test]
    fn roll_forward_records_new_deficit() {
        let consolidated = consolidate(
            &[result(dec!(3000), dec!(5000), Decimal::ZERO, dec!(1000))],
            &[],
            Decimal::ZERO,
            2024,
        );
        let next = roll_forward_deficits(&[], &consolidated, 2024);
        assert_eq!(next, vec![PriorDeficit::new(2024, dec!(2000))]);
        assert_eq!(next[0].expiration_year, 2034);

        let rules = FiscalRules::LMNP.deficit_carry_years(6);
        let next = roll_forward_deficits_with_rules(&[], &consolidated, 2024, &rules);
        assert_eq!(next[0].expiration_year, 2030);
    }

    #[test]
    fn formats_each_outcome() {
        let deficit_year = consolidate(
            &[result(dec!(3000), dec!(5250.5), Decimal::ZERO, Decimal::ZERO)],
            &[],
            Decimal::ZERO,
            2024,
        );
        assert_eq!(format_result(&deficit_year), "Deficit : 2\u{202f}250,5 EUR");

        let nil = consolidate(
            &[result(dec!(3000), dec!(3000), Decimal::ZERO, Decimal::ZERO)],
            &[],
            Decimal::ZERO,
            2024,
        );
        assert_eq!(format_result(&nil), "Resultat nul (pas d'impot LMNP)");

        let profit = consolidate(
            &[result(dec!(15000), dec!(3000), dec!(1500), Decimal::ZERO)],
            &[],
            Decimal::ZERO,
            2024,
        );
        assert_eq!(format_result(&profit), "Benefice imposable : 10\u{202f}500 EUR");
    }

    #[test]
    fn carry_forward_chains_years() {
        let state = CarryForward::default();
        let (first, state) =
            state.advance(&[result(dec!(3000), dec!(5000), Decimal::ZERO, dec!(1000))], 2024);
        assert!(first.is_deficit);
        assert_eq!(state.deferred_pool, dec!(1000));
        assert_eq!(state.available_deficits(2025), dec!(2000));

        let (second, state) =
            state.advance(&[result(dec!(9000), dec!(4000), dec!(1000), Decimal::ZERO)], 2025);
        // 4 000 courant : 2 000 de déficit puis 1 000 d'ARD.
        assert_eq!(second.prior_deficits_absorbed, dec!(2000));
        assert_eq!(second.prior_deferred_absorbed, dec!(1000));
        assert_eq!(second.taxable_result, dec!(1000));
        assert!(state.deficits.is_empty());
        assert_eq!(state.deferred_pool, Decimal::ZERO);
    }
}
