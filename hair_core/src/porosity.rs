//! Porosity classification from intake answers.
//!
//! Porosity is rarely known by the user, so it is inferred from chemical
//! history, heat tool usage and strand texture. Rules are checked in order
//! and the first match wins:
//!
//! 1. **High**: bleaching, straightening/relaxing or multiple treatments,
//!    or coloring combined with frequent heat
//! 2. **Low**: untreated, never heated and fine
//! 3. **Medium**: everything else

use crate::{ChemicalTreatment, HairTexture, HeatToolUsage, Porosity};

/// Classify porosity. Total and deterministic; never fails.
pub fn classify_porosity(
    chemical_treatments: ChemicalTreatment,
    heat_tool_usage: HeatToolUsage,
    hair_texture: HairTexture,
) -> Porosity {
    let porosity = if is_high_damage(chemical_treatments, heat_tool_usage) {
        Porosity::High
    } else if chemical_treatments == ChemicalTreatment::None
        && heat_tool_usage == HeatToolUsage::Never
        && hair_texture == HairTexture::Fine
    {
        Porosity::Low
    } else {
        Porosity::Medium
    };

    tracing::debug!(
        "Classified porosity {} from ({}, {}, {})",
        porosity,
        chemical_treatments,
        heat_tool_usage,
        hair_texture
    );

    porosity
}

fn is_high_damage(chemical_treatments: ChemicalTreatment, heat_tool_usage: HeatToolUsage) -> bool {
    match chemical_treatments {
        ChemicalTreatment::MultipleTreatments
        | ChemicalTreatment::Bleaching
        | ChemicalTreatment::StraighteningRelaxing => true,
        ChemicalTreatment::Coloring => heat_tool_usage == HeatToolUsage::Frequent,
        ChemicalTreatment::None => false,
    }
}
