//! Arrondis, prorata temporis, identifiants et formatage des montants.

use crate::error::LmnpError;
use crate::types::Money;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Arrondit au centime, demi-centime vers le haut (y compris pour les montants négatifs).
pub fn round_cents(value: Money) -> Money {
    let hundred = Decimal::ONE_HUNDRED;
    ((value * hundred) + Decimal::new(5, 1)).floor() / hundred
}

/// Nombre de jours de l'exercice fiscal.
///
/// Règle simplifiée : toute année divisible par 4 est bissextile (2100 compris).
const fn days_in_fiscal_year(year: i32) -> u32 {
    if year % 4 == 0 { 366 } else { 365 }
}

/// Coefficient de prorata temporis d'un actif pour l'exercice `year`.
///
/// 0 si l'amortissement commence après l'exercice, 1 s'il a commencé avant,
/// sinon jours restants (date de début incluse) rapportés à la durée de l'exercice.
pub fn prorata_temporis(start: NaiveDate, year: i32) -> Decimal {
    match start.year().cmp(&year) {
        std::cmp::Ordering::Greater => Decimal::ZERO,
        std::cmp::Ordering::Less => Decimal::ONE,
        std::cmp::Ordering::Equal => {
            let calendar_days = if start.leap_year() { 366 } else { 365 };
            let remaining = calendar_days - start.ordinal() + 1;
            Decimal::from(remaining) / Decimal::from(days_in_fiscal_year(year))
        }
    }
}

/// Identifiant stable d'un composant généré pour un bien.
pub fn component_id(property_id: &str, name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(property_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(name.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("comp-{}", &digest[..16])
}

/// Vrai si le libellé désigne du mobilier.
pub fn is_furniture_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("mobilier") || lower.contains("furniture")
}

/// Parse une date au format `yyyy-mm-dd`.
pub fn parse_date(value: &str) -> Result<NaiveDate, LmnpError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| LmnpError::Date {
        value: value.trim().to_string(),
    })
}

/// Formate un montant à la française : espaces fines insécables entre milliers,
/// virgule décimale, sans zéros superflus.
pub fn format_euros(value: Money) -> String {
    let rounded = round_cents(value).normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}
