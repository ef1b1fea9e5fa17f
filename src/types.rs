//! Modèle de données : biens, mobilier, travaux, composants et résultats.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LmnpError;
use crate::rules::FiscalRules;

/// Montant en euros, `Decimal` pour des calculs au centime exacts.
pub type Money = Decimal;

/// Nature du bien loué.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Appartement.
    #[serde(rename = "appartement")]
    Apartment,
    /// Maison.
    #[serde(rename = "maison")]
    House,
    /// Studio.
    #[serde(rename = "studio")]
    Studio,
    /// Autre type de bien.
    #[default]
    #[serde(rename = "autre")]
    Other,
}

impl PropertyKind {
    /// Code du type de bien.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "appartement",
            Self::House => "maison",
            Self::Studio => "studio",
            Self::Other => "autre",
        }
    }
}

impl FromStr for PropertyKind {
    type Err = LmnpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "appartement" => Ok(Self::Apartment),
            "maison" => Ok(Self::House),
            "studio" => Ok(Self::Studio),
            "autre" => Ok(Self::Other),
            other => Err(LmnpError::UnknownCode {
                kind: "property kind",
                value: other.to_string(),
            }),
        }
    }
}

/// État du bâti, qui détermine les durées des composants standard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCondition {
    /// Construction neuve.
    #[serde(rename = "neuf")]
    New,
    /// Bâti ancien.
    #[default]
    #[serde(rename = "ancien")]
    Used,
    /// Ancien rénové : moyenne arrondie des deux durées.
    #[serde(rename = "renove")]
    Renovated,
}

impl PropertyCondition {
    /// Code de l'état du bien.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "neuf",
            Self::Used => "ancien",
            Self::Renovated => "renove",
        }
    }
}

impl FromStr for PropertyCondition {
    type Err = LmnpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "neuf" => Ok(Self::New),
            "ancien" => Ok(Self::Used),
            "renove" => Ok(Self::Renovated),
            other => Err(LmnpError::UnknownCode {
                kind: "property condition",
                value: other.to_string(),
            }),
        }
    }
}

/// Traitement fiscal des frais de notaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotaryFeeTreatment {
    /// Déduits en charge l'année d'acquisition.
    #[serde(rename = "charge")]
    Expense,
    /// Immobilisés et amortis sur 20 ans.
    #[serde(rename = "immobilisation")]
    Capitalization,
}

impl FromStr for NotaryFeeTreatment {
    type Err = LmnpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "charge" => Ok(Self::Expense),
            "immobilisation" => Ok(Self::Capitalization),
            other => Err(LmnpError::UnknownCode {
                kind: "notary fee treatment",
                value: other.to_string(),
            }),
        }
    }
}

/// Catégorie de travaux, chacune avec sa durée d'amortissement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorksKind {
    /// Toiture.
    #[serde(rename = "toiture")]
    Roof,
    /// Façade.
    #[serde(rename = "facade")]
    Facade,
    /// Plomberie.
    #[serde(rename = "plomberie")]
    Plumbing,
    /// Électricité.
    #[serde(rename = "electricite")]
    Electrical,
    /// Cuisine.
    #[serde(rename = "cuisine")]
    Kitchen,
    /// Salle de bain.
    #[serde(rename = "salle_de_bain")]
    Bathroom,
    /// Peinture.
    #[serde(rename = "peinture")]
    Painting,
    /// Sols.
    #[serde(rename = "sols")]
    Flooring,
    /// Chauffage.
    #[serde(rename = "chauffage")]
    Heating,
    /// Climatisation.
    #[serde(rename = "climatisation")]
    AirConditioning,
    /// Menuiseries.
    #[serde(rename = "menuiseries")]
    Joinery,
    /// Isolation.
    #[serde(rename = "isolation")]
    Insulation,
    /// Aménagements extérieurs.
    #[serde(rename = "amenagements_exterieurs")]
    Exterior,
    /// Petits travaux, toujours passés en charge.
    #[serde(rename = "petits_travaux")]
    SmallWorks,
}

impl WorksKind {
    /// Toutes les catégories, dans l'ordre du barème.
    pub const ALL: [Self; 14] = [
        Self::Roof,
        Self::Facade,
        Self::Plumbing,
        Self::Electrical,
        Self::Kitchen,
        Self::Bathroom,
        Self::Painting,
        Self::Flooring,
        Self::Heating,
        Self::AirConditioning,
        Self::Joinery,
        Self::Insulation,
        Self::Exterior,
        Self::SmallWorks,
    ];

    /// Durée d'amortissement en années ; 0 pour les petits travaux.
    pub const fn depreciation_years(self) -> u32 {
        match self {
            Self::Roof => 25,
            Self::Facade | Self::Electrical | Self::Joinery | Self::Insulation => 20,
            Self::Plumbing | Self::Heating | Self::AirConditioning | Self::Exterior => 15,
            Self::Kitchen | Self::Bathroom | Self::Painting | Self::Flooring => 10,
            Self::SmallWorks => 0,
        }
    }

    /// Code de la catégorie.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roof => "toiture",
            Self::Facade => "facade",
            Self::Plumbing => "plomberie",
            Self::Electrical => "electricite",
            Self::Kitchen => "cuisine",
            Self::Bathroom => "salle_de_bain",
            Self::Painting => "peinture",
            Self::Flooring => "sols",
            Self::Heating => "chauffage",
            Self::AirConditioning => "climatisation",
            Self::Joinery => "menuiseries",
            Self::Insulation => "isolation",
            Self::Exterior => "amenagements_exterieurs",
            Self::SmallWorks => "petits_travaux",
        }
    }
}

impl FromStr for WorksKind {
    type Err = LmnpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == code)
            .ok_or_else(|| LmnpError::UnknownCode {
                kind: "works",
                value: code.to_string(),
            })
    }
}

/// Ligne du barème de ventilation standard du bâti.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardComponent {
    /// Libellé du composant.
    pub name: &'static str,
    /// Quote-part du bâti, en pourcentage.
    pub share_percent: u32,
    /// Durée pour un bâti ancien.
    pub used_years: u32,
    /// Durée pour une construction neuve.
    pub new_years: u32,
}

impl StandardComponent {
    /// Quote-part du bâti sous forme de fraction.
    pub fn share(&self) -> Decimal {
        Decimal::from(self.share_percent) / Decimal::ONE_HUNDRED
    }

    /// Durée d'amortissement selon l'état du bien.
    pub const fn years_for(&self, condition: PropertyCondition) -> u32 {
        match condition {
            PropertyCondition::New => self.new_years,
            PropertyCondition::Used => self.used_years,
            // Moyenne arrondie au demi supérieur.
            PropertyCondition::Renovated => (self.used_years + self.new_years + 1) / 2,
        }
    }
}

/// Ventilation standard du bâti en cinq composants.
pub const STANDARD_COMPONENTS: [StandardComponent; 5] = [
    StandardComponent {
        name: "Structure / Gros oeuvre",
        share_percent: 50,
        used_years: 50,
        new_years: 80,
    },
    StandardComponent {
        name: "Toiture",
        share_percent: 10,
        used_years: 25,
        new_years: 30,
    },
    StandardComponent {
        name: "Electricite / Plomberie",
        share_percent: 15,
        used_years: 20,
        new_years: 25,
    },
    StandardComponent {
        name: "Amenagements interieurs",
        share_percent: 15,
        used_years: 15,
        new_years: 20,
    },
    StandardComponent {
        name: "Facades / Etancheite",
        share_percent: 10,
        used_years: 20,
        new_years: 30,
    },
];

/// Données agrégées reprises d'un ancien comptable ou de la liasse fiscale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeoverData {
    /// Premier exercice calculé par ce moteur.
    pub takeover_year: i32,
    /// Valeur brute des terrains.
    pub land_gross: Money,
    /// Valeur brute des constructions.
    pub construction_gross: Money,
    /// Amortissements cumulés des constructions.
    pub cumulative_depreciation: Money,
    /// Dotation de l'exercice précédent.
    pub last_year_allowance: Money,
    /// Valeur brute du mobilier.
    #[serde(default)]
    pub furniture_gross: Option<Money>,
    /// Amortissements cumulés du mobilier.
    #[serde(default)]
    pub furniture_cumulative: Option<Money>,
}

/// Stratégie de constitution des composants d'un bien.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepreciationStrategy {
    /// Nouvel achat : terrain + ventilation standard.
    #[default]
    #[serde(rename = "NOUVEAU")]
    New,
    /// Reprise à partir de totaux agrégés.
    #[serde(rename = "REPRISE_GLOBALE")]
    AggregatedTakeover(TakeoverData),
    /// Reprise composant par composant, fournis par l'appelant.
    #[serde(rename = "REPRISE_DETAILLEE")]
    DetailedTakeover,
}

impl DepreciationStrategy {
    /// Construit la stratégie à partir de son code et des éventuelles données de reprise.
    ///
    /// Sans code, la stratégie est `NOUVEAU`. Une reprise globale sans données
    /// retombe sur `NOUVEAU`.
    pub fn resolve(code: Option<&str>, takeover: Option<TakeoverData>) -> Result<Self, LmnpError> {
        match code.map(str::trim) {
            None | Some("NOUVEAU") => Ok(Self::New),
            Some("REPRISE_DETAILLEE") => Ok(Self::DetailedTakeover),
            Some("REPRISE_GLOBALE") => Ok(takeover.map_or_else(
                || {
                    tracing::warn!("REPRISE_GLOBALE declared without takeover data, using NOUVEAU");
                    Self::New
                },
                Self::AggregatedTakeover,
            )),
            Some(other) => Err(LmnpError::UnknownCode {
                kind: "strategy",
                value: other.to_string(),
            }),
        }
    }

    /// Code de la stratégie.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::New => "NOUVEAU",
            Self::AggregatedTakeover(_) => "REPRISE_GLOBALE",
            Self::DetailedTakeover => "REPRISE_DETAILLEE",
        }
    }

    /// Vrai pour les deux stratégies de reprise.
    pub const fn is_takeover(&self) -> bool {
        !matches!(self, Self::New)
    }
}

/// Tranche de la valeur d'un bien avec son propre plan d'amortissement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Identifiant stable, clé des cumuls antérieurs.
    pub id: String,
    /// Libellé.
    pub name: String,
    /// Valeur brute.
    pub initial_value: Money,
    /// Durée en années ; 0 pour un composant non amortissable.
    pub duration_years: u32,
    /// Date de début d'amortissement.
    pub start_date: NaiveDate,
    /// Amortissements déjà pratiqués avant la reprise.
    #[serde(default)]
    pub prior_depreciation: Money,
    /// Le terrain ne s'amortit pas.
    pub depreciable: bool,
    /// Quote-part du prix, en pourcentage.
    #[serde(default)]
    pub share_percent: Option<Decimal>,
}

/// Bien immobilier loué en meublé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Identifiant du bien.
    pub id: String,
    /// Adresse.
    #[serde(default)]
    pub address: String,
    /// Code postal.
    #[serde(default)]
    pub postal_code: String,
    /// Ville.
    #[serde(default)]
    pub city: String,
    /// Nature du bien.
    #[serde(default)]
    pub kind: PropertyKind,
    /// Date d'acquisition, début d'amortissement.
    pub acquisition_date: NaiveDate,
    /// Prix d'acquisition, terrain et mobilier compris.
    pub acquisition_price: Money,
    /// Frais de notaire.
    #[serde(default)]
    pub notary_fees: Money,
    /// Traitement des frais ; sans traitement déclaré, les frais sont ignorés.
    #[serde(default)]
    pub notary_fee_treatment: Option<NotaryFeeTreatment>,
    /// Quote-part du terrain, de 0 à 100.
    pub land_share_percent: Decimal,
    /// Année de construction.
    #[serde(default)]
    pub construction_year: Option<i32>,
    /// État du bâti.
    #[serde(default)]
    pub condition: PropertyCondition,
    /// Stratégie d'amortissement.
    #[serde(default)]
    pub strategy: DepreciationStrategy,
    /// Composants explicites ; prioritaires sur la stratégie quand non vides.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Property {
    /// Crée un bien ancien, stratégie `NOUVEAU`, sans terrain ni frais.
    pub fn new(id: impl Into<String>, acquisition_date: NaiveDate, acquisition_price: Money) -> Self {
        Self {
            id: id.into(),
            address: String::new(),
            postal_code: String::new(),
            city: String::new(),
            kind: PropertyKind::default(),
            acquisition_date,
            acquisition_price,
            notary_fees: Decimal::ZERO,
            notary_fee_treatment: None,
            land_share_percent: Decimal::ZERO,
            construction_year: None,
            condition: PropertyCondition::default(),
            strategy: DepreciationStrategy::default(),
            components: Vec::new(),
        }
    }

    /// Fixe la quote-part du terrain.
    #[must_use]
    pub fn with_land_share(mut self, percent: Decimal) -> Self {
        self.land_share_percent = percent;
        self
    }

    /// Fixe l'état du bâti.
    #[must_use]
    pub fn with_condition(mut self, condition: PropertyCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Fixe les frais de notaire et leur traitement.
    #[must_use]
    pub fn with_notary_fees(mut self, amount: Money, treatment: NotaryFeeTreatment) -> Self {
        self.notary_fees = amount;
        self.notary_fee_treatment = Some(treatment);
        self
    }

    /// Fixe la stratégie d'amortissement.
    #[must_use]
    pub fn with_strategy(mut self, strategy: DepreciationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fournit une liste explicite de composants.
    #[must_use]
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    /// Vrai si la liste explicite de composants doit primer.
    pub fn has_explicit_components(&self) -> bool {
        !self.components.is_empty()
    }
}

/// Mobilier d'un bien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furniture {
    /// Identifiant.
    pub id: String,
    /// Bien auquel le mobilier est rattaché.
    pub property_id: String,
    /// Valeur totale.
    pub total_value: Money,
    /// Date d'achat.
    pub purchase_date: NaiveDate,
    /// Durée spécifique ; 7 ans par défaut.
    #[serde(default)]
    pub depreciation_years: Option<u32>,
}

/// Travaux réalisés sur un bien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Works {
    /// Identifiant, clé des cumuls antérieurs.
    pub id: String,
    /// Bien concerné.
    pub property_id: String,
    /// Catégorie.
    pub kind: WorksKind,
    /// Description libre.
    #[serde(default)]
    pub description: String,
    /// Montant.
    pub amount: Money,
    /// Date de réalisation.
    pub date: NaiveDate,
}

/// Origine d'une ligne d'amortissement, clé des cumuls de l'exercice suivant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineKey {
    /// Composant du barème standard, repéré par son libellé.
    StandardComponent(String),
    /// Composant repéré par son identifiant.
    Component(String),
    /// Mobilier hors composants.
    Furniture,
    /// Travaux repérés par leur identifiant.
    Works(String),
    /// Frais de notaire immobilisés.
    NotaryFees,
}

/// Ligne annuelle d'un tableau d'amortissement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationLine {
    /// Origine de la ligne.
    pub key: LineKey,
    /// Libellé du composant.
    pub component: String,
    /// Valeur brute.
    pub gross_value: Money,
    /// Durée en années.
    pub duration_years: u32,
    /// Date de début d'amortissement.
    pub start_date: NaiveDate,
    /// Dotation de l'exercice.
    pub annual_allowance: Money,
    /// Amortissements cumulés en fin d'exercice.
    pub cumulative: Money,
    /// Valeur nette comptable en fin d'exercice.
    pub net_book_value: Money,
}

/// Tableau d'amortissement d'un bien pour un exercice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationTable {
    /// Bien concerné.
    pub property_id: String,
    /// Exercice.
    pub year: i32,
    /// Lignes du bâti (et frais de notaire immobilisés).
    pub building_lines: Vec<DepreciationLine>,
    /// Ligne du mobilier.
    pub furniture_line: Option<DepreciationLine>,
    /// Lignes des travaux.
    pub works_lines: Vec<DepreciationLine>,
    /// Somme des dotations.
    pub total_annual_allowance: Money,
    /// Somme des cumuls.
    pub total_cumulative: Money,
}

impl DepreciationTable {
    /// Itère sur toutes les lignes du tableau.
    pub fn lines(&self) -> impl Iterator<Item = &DepreciationLine> {
        self.building_lines
            .iter()
            .chain(self.furniture_line.iter())
            .chain(self.works_lines.iter())
    }
}

/// Recettes annuelles d'un bien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualRevenue {
    /// Exercice.
    pub year: i32,
    /// Bien concerné.
    pub property_id: String,
    /// Loyers bruts.
    pub gross_rents: Money,
    /// Charges récupérées sur le locataire, hors recettes.
    #[serde(default)]
    pub tenant_charges: Money,
    /// Indemnités d'assurance.
    #[serde(default)]
    pub insurance_indemnities: Money,
    /// Autres revenus.
    #[serde(default)]
    pub other_income: Money,
}

impl AnnualRevenue {
    /// Recettes limitées aux loyers bruts.
    pub fn rents(year: i32, property_id: impl Into<String>, gross_rents: Money) -> Self {
        Self {
            year,
            property_id: property_id.into(),
            gross_rents,
            tenant_charges: Decimal::ZERO,
            insurance_indemnities: Decimal::ZERO,
            other_income: Decimal::ZERO,
        }
    }
}

/// Charges annuelles d'un bien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCharges {
    /// Exercice.
    pub year: i32,
    /// Bien concerné.
    pub property_id: String,
    /// Intérêts d'emprunt.
    pub loan_interest: Money,
    /// Assurance emprunteur.
    pub borrower_insurance: Money,
    /// Frais bancaires.
    #[serde(default)]
    pub bank_fees: Money,
    /// Taxe foncière.
    pub property_tax: Money,
    /// Cotisation foncière des entreprises.
    #[serde(default)]
    pub business_property_tax: Money,
    /// Assurance propriétaire non occupant.
    pub landlord_insurance: Money,
    /// Garantie loyers impayés.
    #[serde(default)]
    pub rent_guarantee_insurance: Money,
    /// Charges de copropriété non récupérables.
    #[serde(default)]
    pub non_recoverable_condo_fees: Money,
    /// Frais de gestion.
    #[serde(default)]
    pub management_fees: Money,
    /// Frais de comptabilité.
    #[serde(default)]
    pub accounting_fees: Money,
    /// Petits travaux passés en charge.
    #[serde(default)]
    pub small_works: Money,
    /// Frais de déplacement.
    #[serde(default)]
    pub travel_expenses: Money,
    /// Fournitures.
    #[serde(default)]
    pub supplies: Money,
    /// Autres charges.
    #[serde(default)]
    pub other_charges: Money,
}

impl AnnualCharges {
    /// Charges réduites aux postes obligatoires.
    pub fn new(
        year: i32,
        property_id: impl Into<String>,
        loan_interest: Money,
        borrower_insurance: Money,
        property_tax: Money,
        landlord_insurance: Money,
    ) -> Self {
        Self {
            year,
            property_id: property_id.into(),
            loan_interest,
            borrower_insurance,
            bank_fees: Decimal::ZERO,
            property_tax,
            business_property_tax: Decimal::ZERO,
            landlord_insurance,
            rent_guarantee_insurance: Decimal::ZERO,
            non_recoverable_condo_fees: Decimal::ZERO,
            management_fees: Decimal::ZERO,
            accounting_fees: Decimal::ZERO,
            small_works: Decimal::ZERO,
            travel_expenses: Decimal::ZERO,
            supplies: Decimal::ZERO,
            other_charges: Decimal::ZERO,
        }
    }

    /// Montants des quatorze postes, dans l'ordre de la déclaration.
    pub const fn amounts(&self) -> [Money; 14] {
        [
            self.loan_interest,
            self.borrower_insurance,
            self.bank_fees,
            self.property_tax,
            self.business_property_tax,
            self.landlord_insurance,
            self.rent_guarantee_insurance,
            self.non_recoverable_condo_fees,
            self.management_fees,
            self.accounting_fees,
            self.small_works,
            self.travel_expenses,
            self.supplies,
            self.other_charges,
        ]
    }
}

/// Résultat fiscal d'un bien pour un exercice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Exercice.
    pub year: i32,
    /// Bien concerné.
    pub property_id: String,
    /// Recettes totales.
    pub total_receipts: Money,
    /// Charges déductibles.
    pub deductible_charges: Money,
    /// Recettes moins charges.
    pub gross_result: Money,
    /// Dotations calculées.
    pub depreciation_computed: Money,
    /// Dotations déduites.
    pub depreciation_used: Money,
    /// Dotations différées (ARD).
    pub depreciation_deferred: Money,
    /// Résultat imposable.
    pub taxable_result: Money,
    /// Vrai si le résultat est négatif.
    pub is_deficit: bool,
    /// Déficit ordinaire reportable.
    pub reportable_deficit: Money,
}

/// Déficit ordinaire reportable sur les exercices suivants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorDeficit {
    /// Exercice d'origine.
    pub origin_year: i32,
    /// Montant restant à imputer.
    pub amount: Money,
    /// Dernier exercice d'imputation possible.
    pub expiration_year: i32,
}

impl PriorDeficit {
    /// Déficit reportable pendant la durée légale de dix ans.
    pub const fn new(origin_year: i32, amount: Money) -> Self {
        Self::with_carry_years(origin_year, amount, FiscalRules::LMNP.deficit_carry_years)
    }

    /// Déficit reportable pendant `carry_years` exercices.
    pub const fn with_carry_years(origin_year: i32, amount: Money, carry_years: i32) -> Self {
        Self {
            origin_year,
            amount,
            expiration_year: origin_year + carry_years,
        }
    }

    /// Vrai si le déficit peut encore s'imputer sur l'exercice `year`.
    pub fn is_available(&self, year: i32) -> bool {
        self.expiration_year >= year && self.amount > Decimal::ZERO
    }
}

/// Résultat consolidé de tous les biens pour un exercice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedResult {
    /// Exercice.
    pub year: i32,
    /// Recettes totales.
    pub total_receipts: Money,
    /// Charges déductibles.
    pub deductible_charges: Money,
    /// Dotations déduites.
    pub depreciation_used: Money,
    /// Dotations différées de l'exercice.
    pub depreciation_deferred: Money,
    /// Déficits antérieurs imputés.
    pub prior_deficits_absorbed: Money,
    /// ARD antérieurs imputés.
    pub prior_deferred_absorbed: Money,
    /// Stock d'ARD à reporter.
    pub deferred_remaining: Money,
    /// Résultat imposable, jamais négatif.
    pub taxable_result: Money,
    /// Vrai si le résultat avant plancher était négatif.
    pub is_deficit: bool,
}
