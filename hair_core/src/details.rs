//! Routine detail builder.
//!
//! Renders the title, description, steps and product list for a day from a
//! fixed template per (activity, treatment). Step sentences are filled in with
//! the product categories of the matched profile.
//!
//! Rules the templates enforce:
//! - Reconstruction is always followed by a hydration-mask seal, so protein
//!   is never the last mask on the hair.
//! - Steps that only exist for an optional product (conditioner, refresh)
//!   are dropped when the profile has none. Sentences that need the product
//!   anyway use a generic noun ("a reconstruction mask").
//! - Each product appears once in the product list even when several steps
//!   use it.

use crate::{Activity, HairProfile, Porosity, ProductSlots, RoutineDetails, Treatment};

const FALLBACK_CONDITIONER: &str = "a conditioner";
const FALLBACK_RECONSTRUCTION_MASK: &str = "a reconstruction mask";
const FALLBACK_REFRESH: &str = "a refresh spray";

/// Accumulates steps and the products they use
#[derive(Default)]
struct Routine {
    steps: Vec<String>,
    products: Vec<String>,
}

impl Routine {
    fn step(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(text.into());
        self
    }

    /// Add a step that uses a product from the profile
    fn step_with(&mut self, product: &str, text: String) -> &mut Self {
        self.use_product(product);
        self.step(text)
    }

    fn use_product(&mut self, product: &str) {
        if !self.products.iter().any(|p| p == product) {
            self.products.push(product.to_string());
        }
    }

    fn finish(
        self,
        title: &str,
        description: impl Into<String>,
        icon: &str,
        duration_label: &str,
    ) -> RoutineDetails {
        RoutineDetails {
            title: title.to_string(),
            description: description.into(),
            icon: icon.to_string(),
            duration_label: duration_label.to_string(),
            products: self.products,
            steps: self.steps,
        }
    }
}

/// Build the details for one day
///
/// `treatment` is only read for wash days. A wash day without a treatment
/// still renders as a wash (plain cleanse) so it never looks like a rest day.
pub fn build_details(
    activity: Activity,
    treatment: Option<Treatment>,
    profile: &HairProfile,
) -> RoutineDetails {
    let products = &profile.products;

    match (activity, treatment) {
        (Activity::Wash, Some(Treatment::Hydration)) => hydration_wash(products),
        (Activity::Wash, Some(Treatment::Nutrition)) => nutrition_wash(products, profile.porosity),
        (Activity::Wash, Some(Treatment::Reconstruction)) => reconstruction_wash(products),
        (Activity::Wash, None) => plain_wash(products),
        (Activity::Cowash, _) => cowash(products),
        (Activity::Refresh, _) => refresh(products),
        (Activity::Rest, _) => rest(products),
    }
}

fn cleanse(routine: &mut Routine, products: &ProductSlots) {
    routine
        .step("Wet your hair thoroughly with warm water.")
        .step_with(
            &products.shampoo,
            format!(
                "Wash the scalp with {}, massaging with your fingertips, then rinse.",
                products.shampoo
            ),
        );
}

fn condition(routine: &mut Routine, products: &ProductSlots) {
    if let Some(conditioner) = &products.conditioner {
        routine.step_with(
            conditioner,
            format!(
                "Apply {} to the lengths to close the cuticle, then rinse with cool water.",
                conditioner
            ),
        );
    }
}

fn style(routine: &mut Routine, products: &ProductSlots) {
    routine
        .step_with(
            &products.leave_in,
            format!("Apply {} to damp lengths.", products.leave_in),
        )
        .step_with(
            &products.finisher,
            format!(
                "Finish with {} and let it air-dry or diffuse on low heat.",
                products.finisher
            ),
        );
}

fn hydration_wash(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    cleanse(&mut routine, products);
    routine
        .step_with(
            &products.hydration_mask,
            format!(
                "Apply {} from mid-lengths to ends and leave it on for 15-20 minutes.",
                products.hydration_mask
            ),
        )
        .step("Rinse thoroughly with lukewarm water.");
    condition(&mut routine, products);
    style(&mut routine, products);

    routine.finish(
        "Wash + Hydration",
        "Full wash followed by a deep-hydration mask to restore water to the fiber.",
        "💧",
        "45 min",
    )
}

fn nutrition_wash(products: &ProductSlots, porosity: Porosity) -> RoutineDetails {
    let mut routine = Routine::default();
    if porosity == Porosity::High {
        routine.step_with(
            &products.nutrition_mask,
            format!(
                "Before washing, coat dry lengths with a thin layer of {} as a pre-wash treatment.",
                products.nutrition_mask
            ),
        );
    }
    cleanse(&mut routine, products);
    routine
        .step_with(
            &products.nutrition_mask,
            format!(
                "Apply {} to the lengths, cover with a cap and leave it on for 20-30 minutes.",
                products.nutrition_mask
            ),
        )
        .step("Rinse well so no oily residue is left at the roots.");
    condition(&mut routine, products);
    style(&mut routine, products);

    routine.finish(
        "Wash + Nutrition",
        "Full wash with an oil and butter mask to replenish lipids and fight frizz.",
        "🌿",
        "50 min",
    )
}

fn reconstruction_wash(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    cleanse(&mut routine, products);

    let mask = products.reconstruction_mask.as_deref();
    let mask_text = format!(
        "Apply {} strand by strand and leave it on for 10-15 minutes.",
        mask.unwrap_or(FALLBACK_RECONSTRUCTION_MASK)
    );
    match mask {
        Some(mask) => routine.step_with(mask, mask_text),
        None => routine.step(mask_text),
    };

    // Protein must never be the last mask on the hair
    routine
        .step("Rinse thoroughly.")
        .step_with(
            &products.hydration_mask,
            format!(
                "Seal with {} for 10 minutes to bring back softness.",
                products.hydration_mask
            ),
        )
        .step("Rinse with cool water.");
    condition(&mut routine, products);
    style(&mut routine, products);

    routine.finish(
        "Wash + Reconstruction",
        "Full wash with a protein mask to rebuild the fiber, sealed with hydration.",
        "🔧",
        "60 min",
    )
}

fn plain_wash(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    cleanse(&mut routine, products);
    condition(&mut routine, products);
    style(&mut routine, products);

    routine.finish(
        "Wash day",
        "Regular wash with no mask scheduled this time.",
        "🚿",
        "30 min",
    )
}

fn cowash(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    routine.step("Wet your hair thoroughly with warm water.");

    let cleanser = products
        .cowash
        .as_deref()
        .or(products.conditioner.as_deref());
    let text = format!(
        "Cleanse with {}, massaging the scalp for 2-3 minutes, then rinse well.",
        cleanser.unwrap_or(FALLBACK_CONDITIONER)
    );
    match cleanser {
        Some(cleanser) => routine.step_with(cleanser, text),
        None => routine.step(text),
    };
    style(&mut routine, products);

    routine.finish(
        "Co-wash",
        "Gentle conditioner-only cleanse that keeps natural oils in place.",
        "🫧",
        "25 min",
    )
}

fn refresh(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    routine.step("Mist the lengths with water until damp, keeping the scalp dry.");

    let text = |name: &str| {
        format!(
            "Apply {} and scrunch or smooth it through with your hands.",
            name
        )
    };
    match &products.refresh {
        Some(spray) => routine.step_with(spray, text(spray.as_str())),
        None => routine.step(text(FALLBACK_REFRESH)),
    };
    routine.step_with(
        &products.finisher,
        format!(
            "Touch up with a small amount of {} where needed.",
            products.finisher
        ),
    );

    routine.finish(
        "Refresh",
        "Quick revival between washes without shampoo.",
        "✨",
        "10 min",
    )
}

fn rest(products: &ProductSlots) -> RoutineDetails {
    let mut routine = Routine::default();
    routine
        .step("No products today: let the scalp balance itself.")
        .step("Avoid heat tools and tight hairstyles.");
    for note in &products.other {
        routine.step(format!("Tip: {}.", note));
    }

    routine.finish(
        "Rest",
        "Rest day. Your hair benefits from a break between care sessions.",
        "😴",
        "No time needed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curvature, Oiliness, TreatmentCycle};

    fn test_profile() -> HairProfile {
        HairProfile {
            id: "test".into(),
            curvature: Curvature::Curly,
            oiliness: Oiliness::Dry,
            porosity: Porosity::Medium,
            has_chemistry: false,
            wash_days_per_week: 2,
            needs_refresh: true,
            cycle: TreatmentCycle {
                week1: vec![Treatment::Hydration, Treatment::Nutrition],
                week2: vec![Treatment::Nutrition, Treatment::Reconstruction],
                week3: vec![Treatment::Hydration, Treatment::Hydration],
            },
            products: ProductSlots {
                shampoo: "Low-poo".into(),
                conditioner: Some("Rich conditioner".into()),
                cowash: Some("Co-wash cream".into()),
                hydration_mask: "Hydration mask".into(),
                nutrition_mask: "Butter mask".into(),
                reconstruction_mask: Some("Keratin mask".into()),
                leave_in: "Curl cream".into(),
                finisher: "Gel".into(),
                refresh: Some("Curl refresher".into()),
                other: vec!["Satin bonnet".into()],
            },
        }
    }

    fn bare_profile() -> HairProfile {
        let mut profile = test_profile();
        profile.products.conditioner = None;
        profile.products.cowash = None;
        profile.products.reconstruction_mask = None;
        profile.products.refresh = None;
        profile.products.other.clear();
        profile
    }

    #[test]
    fn test_hydration_wash_uses_profile_products() {
        let details = build_details(Activity::Wash, Some(Treatment::Hydration), &test_profile());
        assert_eq!(details.title, "Wash + Hydration");
        assert_eq!(
            details.products,
            vec![
                "Low-poo",
                "Hydration mask",
                "Rich conditioner",
                "Curl cream",
                "Gel"
            ]
        );
        assert!(details.steps.iter().any(|s| s.contains("Hydration mask")));
    }

    #[test]
    fn test_missing_conditioner_drops_its_step() {
        let details = build_details(Activity::Wash, Some(Treatment::Hydration), &bare_profile());
        assert!(!details.steps.iter().any(|s| s.contains("conditioner")));
        assert_eq!(details.products.len(), 4);
    }

    #[test]
    fn test_reconstruction_is_sealed_with_hydration() {
        let details = build_details(
            Activity::Wash,
            Some(Treatment::Reconstruction),
            &test_profile(),
        );
        let protein = details
            .steps
            .iter()
            .position(|s| s.contains("Keratin mask"))
            .unwrap();
        let seal = details
            .steps
            .iter()
            .position(|s| s.contains("Hydration mask"))
            .unwrap();
        assert!(seal > protein);
        assert!(details.steps[seal].starts_with("Seal"));

        let last_mask = details
            .products
            .iter()
            .rposition(|p| p == "Keratin mask" || p == "Hydration mask")
            .unwrap();
        assert_eq!(details.products[last_mask], "Hydration mask");
    }

    #[test]
    fn test_reconstruction_fallback_noun() {
        let details = build_details(
            Activity::Wash,
            Some(Treatment::Reconstruction),
            &bare_profile(),
        );
        assert!(details
            .steps
            .iter()
            .any(|s| s.contains("a reconstruction mask")));
        assert!(details.steps.iter().all(|s| !s.contains("{}")));
        assert!(details.steps.iter().any(|s| s.starts_with("Seal")));
    }

    #[test]
    fn test_nutrition_adds_pre_wash_for_high_porosity() {
        let mut profile = test_profile();
        let medium = build_details(Activity::Wash, Some(Treatment::Nutrition), &profile);
        profile.porosity = Porosity::High;
        let high = build_details(Activity::Wash, Some(Treatment::Nutrition), &profile);

        assert_eq!(high.steps.len(), medium.steps.len() + 1);
        assert!(high.steps[0].starts_with("Before washing"));
        // Mask used twice, listed once
        assert_eq!(
            high.products.iter().filter(|p| *p == "Butter mask").count(),
            1
        );
    }

    #[test]
    fn test_wash_without_treatment_is_still_a_wash() {
        let details = build_details(Activity::Wash, None, &test_profile());
        assert_eq!(details.title, "Wash day");
        assert!(details.products.contains(&"Low-poo".to_string()));
    }

    #[test]
    fn test_cowash_falls_back_to_conditioner() {
        let mut profile = test_profile();
        profile.products.cowash = None;
        let details = build_details(Activity::Cowash, None, &profile);
        assert!(details.steps[1].contains("Rich conditioner"));
        assert!(details.steps.len() < 6);

        let details = build_details(Activity::Cowash, None, &bare_profile());
        assert!(details.steps[1].contains("a conditioner"));
        assert!(!details.products.contains(&"Low-poo".to_string()));
    }

    #[test]
    fn test_refresh_is_shortest() {
        let profile = test_profile();
        let refresh = build_details(Activity::Refresh, None, &profile);
        assert_eq!(refresh.duration_label, "10 min");
        assert_eq!(refresh.products, vec!["Curl refresher", "Gel"]);

        let bare = build_details(Activity::Refresh, None, &bare_profile());
        assert!(bare.steps[1].contains("a refresh spray"));
        assert_eq!(bare.products, vec!["Gel"]);
    }

    #[test]
    fn test_rest_has_no_products() {
        let details = build_details(Activity::Rest, None, &test_profile());
        assert!(details.products.is_empty());
        assert!(details.steps.iter().any(|s| s.contains("Satin bonnet")));
    }

    #[test]
    fn test_treatment_ignored_off_wash_days() {
        let profile = test_profile();
        assert_eq!(
            build_details(Activity::Rest, Some(Treatment::Nutrition), &profile),
            build_details(Activity::Rest, None, &profile)
        );
    }
}
