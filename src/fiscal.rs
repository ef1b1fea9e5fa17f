//! Résultat fiscal d'un bien : recettes, charges et règle de non-création de déficit.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::types::{
    AnnualCharges, AnnualRevenue, DepreciationTable, Money, NotaryFeeTreatment, Property,
    TaxResult,
};
use crate::utils::round_cents;

/// Recettes de l'exercice : loyers, indemnités d'assurance et autres revenus.
///
/// Les charges refacturées au locataire n'en font pas partie.
pub fn total_receipts(revenue: &AnnualRevenue) -> Money {
    round_cents(revenue.gross_rents + revenue.insurance_indemnities + revenue.other_income)
}

/// Somme des quatorze postes de charges déductibles.
pub fn deductible_charges(charges: &AnnualCharges) -> Money {
    round_cents(charges.amounts().iter().sum())
}

/// Frais de notaire déductibles sur l'exercice : uniquement en traitement « charge »
/// et l'année de l'acquisition.
pub fn notary_fees_as_expense(property: &Property, year: i32) -> Money {
    if property.notary_fee_treatment != Some(NotaryFeeTreatment::Expense)
        || property.acquisition_date.year() != year
    {
        return Decimal::ZERO;
    }
    property.notary_fees
}

/// Résultat fiscal d'un bien pour l'exercice des recettes.
///
/// Les amortissements ne peuvent pas créer de déficit : ils sont limités au
/// résultat avant amortissements, l'excédent est différé sans limite de durée.
/// Un résultat avant amortissements négatif constitue un déficit ordinaire.
pub fn compute_tax_result(
    revenue: &AnnualRevenue,
    charges: &AnnualCharges,
    table: &DepreciationTable,
    property: Option<&Property>,
) -> TaxResult {
    let receipts = total_receipts(revenue);
    let notary_fees = property.map_or(Decimal::ZERO, |p| notary_fees_as_expense(p, revenue.year));
    let charges_total = round_cents(deductible_charges(charges) + notary_fees);
    let computed = table.total_annual_allowance;
    let gross_result = receipts - charges_total;

    let (used, deferred, taxable, reportable_deficit) = if gross_result <= Decimal::ZERO {
        (Decimal::ZERO, computed, gross_result, gross_result.abs())
    } else if gross_result < computed {
        (gross_result, computed - gross_result, Decimal::ZERO, Decimal::ZERO)
    } else {
        (computed, Decimal::ZERO, gross_result - computed, Decimal::ZERO)
    };

    tracing::debug!(
        property = %revenue.property_id,
        year = revenue.year,
        gross = %gross_result,
        used = %used,
        deferred = %deferred,
        "tax result computed"
    );

    TaxResult {
        year: revenue.year,
        property_id: revenue.property_id.clone(),
        total_receipts: receipts,
        deductible_charges: charges_total,
        gross_result: round_cents(gross_result),
        depreciation_computed: round_cents(computed),
        depreciation_used: round_cents(used),
        depreciation_deferred: round_cents(deferred),
        taxable_result: round_cents(taxable),
        is_deficit: taxable < Decimal::ZERO,
        reportable_deficit: round_cents(reportable_deficit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn table(allowance: Money) -> DepreciationTable {
        DepreciationTable {
            property_id: "bien-1".to_string(),
            year: 2023,
            building_lines: Vec::new(),
            furniture_line: None,
            works_lines: Vec::new(),
            total_annual_allowance: allowance,
            total_cumulative: allowance,
        }
    }

    fn charges(total: Money) -> AnnualCharges {
        AnnualCharges::new(2023, "bien-1", total, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }

    #[test]
    fn receipts_ignore_tenant_charges() {
        let revenue = AnnualRevenue {
            tenant_charges: dec!(1200),
            insurance_indemnities: dec!(300.5),
            other_income: dec!(49.5),
            ..AnnualRevenue::rents(2023, "bien-1", dec!(9000))
        };
        assert_eq!(total_receipts(&revenue), dec!(9350));
    }

    #[test]
    fn every_charge_category_counts() {
        let mut all = AnnualCharges::new(2023, "bien-1", dec!(1), dec!(1), dec!(1), dec!(1));
        all.bank_fees = dec!(1);
        all.business_property_tax = dec!(1);
        all.rent_guarantee_insurance = dec!(1);
        all.non_recoverable_condo_fees = dec!(1);
        all.management_fees = dec!(1);
        all.accounting_fees = dec!(1);
        all.small_works = dec!(1);
        all.travel_expenses = dec!(1);
        all.supplies = dec!(1);
        all.other_charges = dec!(1);
        assert_eq!(deductible_charges(&all), dec!(14));
    }

    #[test]
    fn depreciation_partially_used() {
        let result = compute_tax_result(
            &AnnualRevenue::rents(2023, "bien-1", dec!(10000)),
            &charges(dec!(4000)),
            &table(dec!(8000)),
            None,
        );
        assert_eq!(result.gross_result, dec!(6000));
        assert_eq!(result.depreciation_used, dec!(6000));
        assert_eq!(result.depreciation_deferred, dec!(2000));
        assert_eq!(result.taxable_result, Decimal::ZERO);
        assert!(!result.is_deficit);
        assert_eq!(result.reportable_deficit, Decimal::ZERO);
    }

    #[test]
    fn negative_gross_result_defers_everything() {
        let result = compute_tax_result(
            &AnnualRevenue::rents(2023, "bien-1", dec!(3000)),
            &charges(dec!(5000)),
            &table(dec!(1000)),
            None,
        );
        assert_eq!(result.depreciation_used, Decimal::ZERO);
        assert_eq!(result.depreciation_deferred, dec!(1000));
        assert_eq!(result.taxable_result, dec!(-2000));
        assert!(result.is_deficit);
        assert_eq!(result.reportable_deficit, dec!(2000));
    }

    #[test]
    fn zero_gross_result_is_not_a_deficit() {
        let result = compute_tax_result(
            &AnnualRevenue::rents(2023, "bien-1", dec!(5000)),
            &charges(dec!(5000)),
            &table(dec!(1000)),
            None,
        );
        assert_eq!(result.depreciation_deferred, dec!(1000));
        assert_eq!(result.taxable_result, Decimal::ZERO);
        assert!(!result.is_deficit);
    }

    #[test]
    fn full_depreciation_when_result_covers_it() {
        let result = compute_tax_result(
            &AnnualRevenue::rents(2023, "bien-1", dec!(20000)),
            &charges(dec!(4000)),
            &table(dec!(8000)),
            None,
        );
        assert_eq!(result.depreciation_used, dec!(8000));
        assert_eq!(result.depreciation_deferred, Decimal::ZERO);
        assert_eq!(result.taxable_result, dec!(8000));
    }

    #[test]
    fn notary_fees_expensed_only_in_acquisition_year() {
        let acquired = NaiveDate::from_ymd_opt(2023, 4, 12).unwrap();
        let property = Property::new("bien-1", acquired, dec!(150000))
            .with_notary_fees(dec!(11000), NotaryFeeTreatment::Expense);
        assert_eq!(notary_fees_as_expense(&property, 2023), dec!(11000));
        assert_eq!(notary_fees_as_expense(&property, 2024), Decimal::ZERO);

        let capitalised = property
            .clone()
            .with_notary_fees(dec!(11000), NotaryFeeTreatment::Capitalization);
        assert_eq!(notary_fees_as_expense(&capitalised, 2023), Decimal::ZERO);

        let result = compute_tax_result(
            &AnnualRevenue::rents(2023, "bien-1", dec!(12000)),
            &charges(dec!(2000)),
            &table(dec!(3000)),
            Some(&property),
        );
        assert_eq!(result.deductible_charges, dec!(13000));
        assert_eq!(result.reportable_deficit, dec!(1000));
    }
}
