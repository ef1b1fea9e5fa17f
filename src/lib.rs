#![warn(missing_docs)]
//! Calcul des amortissements LMNP par composants et du résultat fiscal annuel.
//!
//! Le flux habituel pour un exercice : `generate_table` pour chaque bien,
//! `compute_tax_result` avec les recettes et charges, puis `consolidate`
//! (ou `CarryForward::advance`) sur l'ensemble des biens. Les reports
//! (cumuls, déficits, amortissements différés) restent à la charge de l'appelant.

mod components;
mod consolidation;
mod depreciation;
mod error;
mod fiscal;
mod rules;
mod types;
mod utils;

pub use crate::components::{
    ComponentValidation, LAND, TAKEOVER_BUILDING, TAKEOVER_FURNITURE, components_for,
    generate_new_components, generate_takeover_components, validate_detailed_components,
};
pub use crate::consolidation::{
    CarryForward, consolidate, format_result, roll_forward_deficits,
    roll_forward_deficits_with_rules,
};
pub use crate::depreciation::{
    DepreciationTableBuilder, FURNITURE, NOTARY_FEES, PriorCumulatives, depreciate_components,
    depreciate_furniture, depreciate_notary_fees, depreciate_property, depreciate_works,
    generate_table,
};
pub use crate::error::LmnpError;
pub use crate::fiscal::{
    compute_tax_result, deductible_charges, notary_fees_as_expense, total_receipts,
};
pub use crate::rules::FiscalRules;
pub use crate::types::*;
pub use crate::utils::{format_euros, parse_date, prorata_temporis, round_cents};
