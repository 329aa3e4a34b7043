//! Core domain types for the hair routine system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Hair characteristics (curvature, oiliness, porosity) and intake answers
//! - Catalog profiles with their treatment cycle and product slots
//! - Weekly calendars and the day routines inside them

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Implements `FromStr` and `Display` using the same kebab-case names serde uses.
macro_rules! kebab_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants, in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The kebab-case name used in catalog files and intake answers
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('_', "-").as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(Error::Parse(format!(
                        "unknown {} '{}'",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

// ============================================================================
// Hair Characteristics
// ============================================================================

/// Curl pattern of the hair strand
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Curvature {
    Straight,
    Wavy,
    Curly,
    Coily,
}

kebab_names!(Curvature {
    Straight => "straight",
    Wavy => "wavy",
    Curly => "curly",
    Coily => "coily",
});

/// Scalp oiliness
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Oiliness {
    Oily,
    Normal,
    Dry,
    Mixed,
}

kebab_names!(Oiliness {
    Oily => "oily",
    Normal => "normal",
    Dry => "dry",
    Mixed => "mixed",
});

/// How readily the hair fiber absorbs and loses water
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Porosity {
    Low,
    Medium,
    High,
}

kebab_names!(Porosity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Chemical treatment history reported at intake
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ChemicalTreatment {
    None,
    Coloring,
    Bleaching,
    StraighteningRelaxing,
    MultipleTreatments,
}

kebab_names!(ChemicalTreatment {
    None => "none",
    Coloring => "coloring",
    Bleaching => "bleaching",
    StraighteningRelaxing => "straightening-relaxing",
    MultipleTreatments => "multiple-treatments",
});

/// How often flat irons, curling irons or hot blow-drying are used
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HeatToolUsage {
    Never,
    Occasionally,
    Frequent,
}

kebab_names!(HeatToolUsage {
    Never => "never",
    Occasionally => "occasionally",
    Frequent => "frequent",
});

/// Thickness of an individual strand
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HairTexture {
    Fine,
    Medium,
    Thick,
}

kebab_names!(HairTexture {
    Fine => "fine",
    Medium => "medium",
    Thick => "thick",
});

/// Fully specified intake answers used to match a profile.
///
/// `porosity` is optional because most people don't know theirs; when it is
/// missing it is derived from the chemical, heat and texture answers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HairCharacteristics {
    pub curvature: Curvature,
    pub oiliness: Oiliness,
    #[serde(default)]
    pub porosity: Option<Porosity>,
    pub chemical_treatments: ChemicalTreatment,
    pub heat_tool_usage: HeatToolUsage,
    pub hair_texture: HairTexture,
}

impl HairCharacteristics {
    /// Whether any chemical treatment is present
    pub fn has_chemistry(&self) -> bool {
        self.chemical_treatments != ChemicalTreatment::None
    }

    /// The stated porosity, or the classified one when unknown
    pub fn resolved_porosity(&self) -> Porosity {
        self.porosity.unwrap_or_else(|| {
            crate::porosity::classify_porosity(
                self.chemical_treatments,
                self.heat_tool_usage,
                self.hair_texture,
            )
        })
    }
}

// ============================================================================
// Treatments and Activities
// ============================================================================

/// Treatment applied on a wash day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Treatment {
    Hydration,
    Nutrition,
    Reconstruction,
}

kebab_names!(Treatment {
    Hydration => "hydration",
    Nutrition => "nutrition",
    Reconstruction => "reconstruction",
});

impl Treatment {
    /// Single-letter code used in compact schedules (H/N/R)
    pub fn letter(&self) -> char {
        match self {
            Treatment::Hydration => 'H',
            Treatment::Nutrition => 'N',
            Treatment::Reconstruction => 'R',
        }
    }
}

/// What happens to the hair on a given day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Wash,
    Cowash,
    Refresh,
    Rest,
}

kebab_names!(Activity {
    Wash => "wash",
    Cowash => "cowash",
    Refresh => "refresh",
    Rest => "rest",
});

/// Position inside the rotating three-week treatment cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum CycleWeek {
    #[default]
    One,
    Two,
    Three,
}

impl CycleWeek {
    pub const ALL: [CycleWeek; 3] = [CycleWeek::One, CycleWeek::Two, CycleWeek::Three];

    /// The following week, wrapping 3 back to 1
    pub fn next(self) -> Self {
        match self {
            CycleWeek::One => CycleWeek::Two,
            CycleWeek::Two => CycleWeek::Three,
            CycleWeek::Three => CycleWeek::One,
        }
    }

    pub fn number(self) -> u8 {
        u8::from(self)
    }
}

impl From<CycleWeek> for u8 {
    fn from(week: CycleWeek) -> u8 {
        match week {
            CycleWeek::One => 1,
            CycleWeek::Two => 2,
            CycleWeek::Three => 3,
        }
    }
}

impl TryFrom<u8> for CycleWeek {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(CycleWeek::One),
            2 => Ok(CycleWeek::Two),
            3 => Ok(CycleWeek::Three),
            other => Err(Error::Parse(format!(
                "cycle week must be 1, 2 or 3 (got {})",
                other
            ))),
        }
    }
}

impl FromStr for CycleWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("invalid cycle week '{}'", s)))?;
        CycleWeek::try_from(n)
    }
}

impl fmt::Display for CycleWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ============================================================================
// Catalog Profile Types
// ============================================================================

/// Treatments for each wash day of the three cycle weeks
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreatmentCycle {
    pub week1: Vec<Treatment>,
    pub week2: Vec<Treatment>,
    pub week3: Vec<Treatment>,
}

impl TreatmentCycle {
    /// Treatments scheduled for a cycle week, in wash-day order
    pub fn week(&self, week: CycleWeek) -> &[Treatment] {
        match week {
            CycleWeek::One => &self.week1,
            CycleWeek::Two => &self.week2,
            CycleWeek::Three => &self.week3,
        }
    }
}

/// Product categories recommended for a profile (never brands)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSlots {
    pub shampoo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditioner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cowash: Option<String>,
    pub hydration_mask: String,
    pub nutrition_mask: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconstruction_mask: Option<String>,
    pub leave_in: String,
    pub finisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

/// An archetypal hair profile from the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HairProfile {
    pub id: String,
    pub curvature: Curvature,
    pub oiliness: Oiliness,
    pub porosity: Porosity,
    pub has_chemistry: bool,
    pub wash_days_per_week: i32,
    pub needs_refresh: bool,
    pub cycle: TreatmentCycle,
    pub products: ProductSlots,
}

impl HairProfile {
    /// Whether this profile is keyed by the given characteristic tuple
    pub fn matches(
        &self,
        curvature: Curvature,
        oiliness: Oiliness,
        porosity: Porosity,
        has_chemistry: bool,
    ) -> bool {
        self.curvature == curvature
            && self.oiliness == oiliness
            && self.porosity == porosity
            && self.has_chemistry == has_chemistry
    }
}

// ============================================================================
// Calendar Types
// ============================================================================

/// Presentation details for one day, produced by the detail builder
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineDetails {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub duration_label: String,
    pub products: Vec<String>,
    pub steps: Vec<String>,
}

/// One day of a weekly calendar
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRoutine {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub activity: Activity,
    /// Only set on wash days; a wash day without one had no cycle entry left
    pub treatment: Option<Treatment>,
    pub title: String,
    pub description: String,
    pub duration_label: String,
    pub icon: String,
    pub products: Vec<String>,
    pub steps: Vec<String>,
}

/// Soft-fail diagnostics attached to a generated calendar
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarWarning {
    /// A wash day fell past the end of the cycle week's treatment list
    MissingTreatment { weekday: Weekday },
}

/// Seven day routines for one cycle week, Monday first
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyCalendar {
    pub profile_id: String,
    pub cycle_week: CycleWeek,
    pub start_date: NaiveDate,
    pub days: [DayRoutine; 7],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CalendarWarning>,
}
