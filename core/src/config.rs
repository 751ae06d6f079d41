//! Built-in configuration: the territory preset table and run settings.
//!
//! RULE: The preset table is the only source of per-territory
//! parameters. There is no file or environment configuration;
//! a run is fully described by its RunConfig.

use crate::{
    error::{SeriesError, SeriesResult},
    rng::RngBank,
    types::{Year, DEFAULT_END_YEAR, DEFAULT_START_YEAR},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

// ── Territories ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Territory {
    Guadeloupe,
    Martinique,
    Guyane,
    Reunion,
    Mayotte,
    SaintMartin,
    SaintBarthelemy,
    SaintPierreEtMiquelon,
    WallisEtFutuna,
    FrenchPolynesia,
    NewCaledonia,
}

impl Territory {
    /// Menu order of the selection front end.
    pub const ALL: [Territory; 11] = [
        Territory::Guadeloupe,
        Territory::Martinique,
        Territory::Guyane,
        Territory::Reunion,
        Territory::Mayotte,
        Territory::SaintMartin,
        Territory::SaintBarthelemy,
        Territory::SaintPierreEtMiquelon,
        Territory::WallisEtFutuna,
        Territory::FrenchPolynesia,
        Territory::NewCaledonia,
    ];

    /// Selection used when the menu input is unusable.
    pub const FALLBACK_SELECTION: Territory = Territory::Reunion;

    pub fn name(&self) -> &'static str {
        match self {
            Self::Guadeloupe            => "Guadeloupe",
            Self::Martinique            => "Martinique",
            Self::Guyane                => "Guyane",
            Self::Reunion               => "La Réunion",
            Self::Mayotte               => "Mayotte",
            Self::SaintMartin           => "Saint-Martin",
            Self::SaintBarthelemy       => "Saint-Barthélemy",
            Self::SaintPierreEtMiquelon => "Saint-Pierre-et-Miquelon",
            Self::WallisEtFutuna        => "Wallis-et-Futuna",
            Self::FrenchPolynesia       => "Polynésie française",
            Self::NewCaledonia          => "Nouvelle-Calédonie",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// (baseline population, baseline budget, tags)
    fn preset(&self) -> (f64, f64, [Tag; 3]) {
        use Tag::*;
        match self {
            Self::Guadeloupe            => (120_000.0, 450.0, [LargeFamilies, Precarity, Elderly]),
            Self::Martinique            => (110_000.0, 420.0, [Elderly, Dependency, Disability]),
            Self::Guyane                => (85_000.0, 380.0, [Youth, LargeFamilies, Precarity]),
            Self::Reunion               => (220_000.0, 680.0, [Precarity, Employment, SingleParentFamilies]),
            Self::Mayotte               => (65_000.0, 280.0, [Youth, LargeFamilies, SeverePrecarity]),
            Self::SaintMartin           => (18_000.0, 85.0, [Tourism, EarlyChildhood, Precarity]),
            Self::SaintBarthelemy       => (5_000.0, 45.0, [Elderly, Tourism, HighIncome]),
            Self::SaintPierreEtMiquelon => (3_500.0, 35.0, [Isolation, Elderly, EarlyChildhood]),
            Self::WallisEtFutuna        => (8_000.0, 55.0, [Traditions, Youth, Isolation]),
            Self::FrenchPolynesia       => (95_000.0, 320.0, [Isolation, Tourism, Youth]),
            Self::NewCaledonia          => (105_000.0, 380.0, [Nickel, Elderly, Precarity]),
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tags ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    LargeFamilies,
    Precarity,
    SeverePrecarity,
    Elderly,
    Dependency,
    Disability,
    Youth,
    Employment,
    SingleParentFamilies,
    Tourism,
    EarlyChildhood,
    HighIncome,
    Isolation,
    Traditions,
    Nickel,
    FamilyBenefits,
    Housing,
    Solidarity,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LargeFamilies        => "large_families",
            Self::Precarity            => "precarity",
            Self::SeverePrecarity      => "severe_precarity",
            Self::Elderly              => "elderly",
            Self::Dependency           => "dependency",
            Self::Disability           => "disability",
            Self::Youth                => "youth",
            Self::Employment           => "employment",
            Self::SingleParentFamilies => "single_parent_families",
            Self::Tourism              => "tourism",
            Self::EarlyChildhood       => "early_childhood",
            Self::HighIncome           => "high_income",
            Self::Isolation            => "isolation",
            Self::Traditions           => "traditions",
            Self::Nickel               => "nickel",
            Self::FamilyBenefits       => "family_benefits",
            Self::Housing              => "housing",
            Self::Solidarity           => "solidarity",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Profiles ───────────────────────────────────────────────────────

pub const DEFAULT_POPULATION: f64 = 50_000.0;
pub const DEFAULT_BUDGET: f64 = 200.0;
pub const DEFAULT_TAGS: [Tag; 3] = [Tag::FamilyBenefits, Tag::Housing, Tag::Solidarity];

/// The parameter bundle driving one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryProfile {
    /// None when the default bundle was used.
    pub territory:           Option<Territory>,
    pub baseline_population: f64,
    /// Currency units (millions) per year.
    pub baseline_budget:     f64,
    pub tags:                BTreeSet<Tag>,
}

impl TerritoryProfile {
    pub fn for_territory(territory: Territory) -> Self {
        let (population, budget, tags) = territory.preset();
        Self {
            territory:           Some(territory),
            baseline_population: population,
            baseline_budget:     budget,
            tags:                tags.into_iter().collect(),
        }
    }

    pub fn default_bundle() -> Self {
        Self {
            territory:           None,
            baseline_population: DEFAULT_POPULATION,
            baseline_budget:     DEFAULT_BUDGET,
            tags:                DEFAULT_TAGS.into_iter().collect(),
        }
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn display_name(&self) -> &'static str {
        self.territory.map_or("default", |t| t.name())
    }

    /// Baselines must be finite and strictly positive.
    pub fn validate(&self) -> SeriesResult<()> {
        let checks = [
            ("baseline_population", self.baseline_population),
            ("baseline_budget", self.baseline_budget),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(SeriesError::InvalidProfile {
                    reason: format!("{name} must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Map a territory name to its preset, falling back to the default
/// bundle for anything unknown. Never fails.
pub fn resolve(name: &str) -> TerritoryProfile {
    match Territory::from_name(name) {
        Some(territory) => TerritoryProfile::for_territory(territory),
        None => {
            log::debug!("unknown territory {name:?}: using default bundle");
            TerritoryProfile::default_bundle()
        }
    }
}

/// Interpret a 1-based menu choice over `Territory::ALL`.
/// Unparsable or out-of-range input selects `FALLBACK_SELECTION`.
pub fn select_by_choice(input: &str) -> Territory {
    let picked = input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| Territory::ALL.get(i).copied());

    picked.unwrap_or_else(|| {
        log::warn!(
            "invalid territory choice {input:?}; selecting {}",
            Territory::FALLBACK_SELECTION
        );
        Territory::FALLBACK_SELECTION
    })
}

// ── Run settings ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub territory:  String,
    pub start_year: Year,
    pub end_year:   Year,
    pub seed:       u64,
    /// When false every noise factor is exactly 1.0.
    pub noise:      bool,
    /// Export path; derived from territory and years when unset.
    pub output:     Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            territory:  Territory::FALLBACK_SELECTION.name().to_string(),
            start_year: DEFAULT_START_YEAR,
            end_year:   DEFAULT_END_YEAR,
            seed:       42,
            noise:      true,
            output:     None,
        }
    }
}

impl RunConfig {
    pub fn rng_bank(&self) -> RngBank {
        if self.noise {
            RngBank::new(self.seed)
        } else {
            RngBank::noiseless()
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "benefits_{}_{}_{}.csv",
                slug(&self.territory),
                self.start_year,
                self.end_year
            ))
        })
    }
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
