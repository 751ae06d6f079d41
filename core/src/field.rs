//! The catalogue of generated series.
//!
//! Column names are part of the export format and must stay stable.
//! Slots seed the per-field RNG streams.
//! NEVER reorder or remove entries; only append.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u64)]
pub enum Field {
    // Demographic
    AllocataireCount = 0,
    BenefitsPaid = 1,
    // Revenue
    TotalRevenue = 2,
    SocialContributions = 3,
    StateContributions = 4,
    OtherRevenue = 5,
    // Expense
    TotalExpenses = 6,
    FamilyBenefits = 7,
    HousingBenefits = 8,
    SolidarityBenefits = 9,
    ManagementCost = 10,
    // Indicator
    CoverageRate = 11,
    ManagementRatio = 12,
    AccountBalance = 13,
    // Specific-benefit breakdown
    FamilyAllowance = 14,
    BackToSchoolGrant = 15,
    HousingAid = 16,
    SolidarityIncome = 17,
    BirthGrant = 18,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Demographic,
    Revenue,
    Expense,
    Indicator,
    BenefitBreakdown,
}

impl Field {
    pub const COUNT: usize = 19;

    /// Every field in column order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::AllocataireCount,
        Field::BenefitsPaid,
        Field::TotalRevenue,
        Field::SocialContributions,
        Field::StateContributions,
        Field::OtherRevenue,
        Field::TotalExpenses,
        Field::FamilyBenefits,
        Field::HousingBenefits,
        Field::SolidarityBenefits,
        Field::ManagementCost,
        Field::CoverageRate,
        Field::ManagementRatio,
        Field::AccountBalance,
        Field::FamilyAllowance,
        Field::BackToSchoolGrant,
        Field::HousingAid,
        Field::SolidarityIncome,
        Field::BirthGrant,
    ];

    pub fn slot(&self) -> u64 {
        *self as u64
    }

    /// Position of this field inside a year record.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stable column name used in exports.
    pub fn column(&self) -> &'static str {
        match self {
            Self::AllocataireCount    => "allocataire_count",
            Self::BenefitsPaid        => "benefits_paid",
            Self::TotalRevenue        => "total_revenue",
            Self::SocialContributions => "social_contributions",
            Self::StateContributions  => "state_contributions",
            Self::OtherRevenue        => "other_revenue",
            Self::TotalExpenses       => "total_expenses",
            Self::FamilyBenefits      => "family_benefits",
            Self::HousingBenefits     => "housing_benefits",
            Self::SolidarityBenefits  => "solidarity_benefits",
            Self::ManagementCost      => "management_cost",
            Self::CoverageRate        => "coverage_rate",
            Self::ManagementRatio     => "management_ratio",
            Self::AccountBalance      => "account_balance",
            Self::FamilyAllowance     => "family_allowance",
            Self::BackToSchoolGrant   => "back_to_school_grant",
            Self::HousingAid          => "housing_aid",
            Self::SolidarityIncome    => "solidarity_income",
            Self::BirthGrant          => "birth_grant",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }

    pub fn group(&self) -> FieldGroup {
        match self {
            Self::AllocataireCount | Self::BenefitsPaid => FieldGroup::Demographic,
            Self::TotalRevenue
            | Self::SocialContributions
            | Self::StateContributions
            | Self::OtherRevenue => FieldGroup::Revenue,
            Self::TotalExpenses
            | Self::FamilyBenefits
            | Self::HousingBenefits
            | Self::SolidarityBenefits
            | Self::ManagementCost => FieldGroup::Expense,
            Self::CoverageRate | Self::ManagementRatio | Self::AccountBalance => {
                FieldGroup::Indicator
            }
            Self::FamilyAllowance
            | Self::BackToSchoolGrant
            | Self::HousingAid
            | Self::SolidarityIncome
            | Self::BirthGrant => FieldGroup::BenefitBreakdown,
        }
    }
}
