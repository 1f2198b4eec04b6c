//! # Chance Calculator
//!
//! ```text
//! stab   = (stability(a) + stability(b)) / 2
//! comp   = mean compatibility over class_set(a) x class_set(b)
//! decay  = (decay[depth(a)] + decay[depth(b)]) / 2
//! chance = clamp(stab - decay - (100 - comp), 0, 100)
//! ```
//!
//! Stable ingredients raise the chance, cross-class fusion lowers it, and
//! deep fusion products decay towards a guaranteed failure.

use crate::catalog::{ItemCatalog, ItemId};
use crate::evaluator::{class_set_of, depth_of, stability_of};
use crate::tables::{decay_for_depth, set_compatibility};

/// Every factor that went into a success chance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChanceBreakdown {
    /// Stability of the first ingredient.
    pub stability_a: f32,
    /// Stability of the second ingredient.
    pub stability_b: f32,
    /// Mean class compatibility percent.
    pub compatibility: f32,
    /// Mean depth decay percent.
    pub decay: f32,
    /// Unclamped result.
    pub raw: f32,
    /// Final success chance in `[0, 100]`.
    pub chance: f32,
}

/// Compatibility percent between two items (symmetric).
#[must_use]
pub fn compatibility_percent(catalog: &ItemCatalog, a: ItemId, b: ItemId) -> f32 {
    set_compatibility(class_set_of(catalog, a), class_set_of(catalog, b))
}

/// Computes the full breakdown for a candidate pair.
#[must_use]
pub fn chance_breakdown(catalog: &ItemCatalog, a: ItemId, b: ItemId) -> ChanceBreakdown {
    let stability_a = stability_of(catalog, a);
    let stability_b = stability_of(catalog, b);
    let compatibility = compatibility_percent(catalog, a, b);
    let decay = 0.5 * (decay_for_depth(depth_of(catalog, a)) + decay_for_depth(depth_of(catalog, b)));

    let raw = (stability_a + stability_b) * 0.5 - decay - (100.0 - compatibility);
    let chance = clamp_percent(raw);

    tracing::debug!(
        "Chance calc: stabA={}, stabB={}, comp={}, decay={} => {}%",
        stability_a,
        stability_b,
        compatibility,
        decay,
        chance
    );

    ChanceBreakdown {
        stability_a,
        stability_b,
        compatibility,
        decay,
        raw,
        chance,
    }
}

/// Success chance for a candidate pair, in `[0, 100]`.
#[must_use]
pub fn success_chance(catalog: &ItemCatalog, a: ItemId, b: ItemId) -> f32 {
    chance_breakdown(catalog, a, b).chance
}

/// Clamps a percentage into `[0, 100]`. NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_percent(value: f32) -> f32 {
    // `<=` also folds -0.0 into 0.0.
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    value.min(100.0)
}

/// Formats a percentage with at most one decimal: `45`, `72.5`.
#[must_use]
pub fn format_percent(value: f32) -> String {
    let rounded = format!("{value:.1}");
    match rounded.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => rounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassTag, SourceStack};

    #[test]
    fn test_same_class_perfect_pair_is_certain() {
        let mut catalog = ItemCatalog::new();
        let a = catalog.add_base("Queen Jelly", ClassTag::Swarm, 100.0).unwrap();
        let b = catalog.add_base("Royal Wax", ClassTag::Swarm, 100.0).unwrap();
        assert!((success_chance(&catalog, a, b) - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_winged_predator_scenario() {
        let mut catalog = ItemCatalog::new();
        let a = catalog.add_base("Honey Wing", ClassTag::Winged, 60.0).unwrap();
        let b = catalog.add_base("Mantis Fang", ClassTag::Predator, 60.0).unwrap();

        let breakdown = chance_breakdown(&catalog, a, b);
        assert!((breakdown.compatibility - 85.0).abs() < f32::EPSILON);
        assert!(breakdown.decay.abs() < f32::EPSILON);
        assert!((breakdown.chance - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_pair_clamps_to_zero() {
        let mut catalog = ItemCatalog::new();
        let a = catalog.add_base("Dust", ClassTag::Winged, 0.0).unwrap();
        let b = catalog.add_base("Ash", ClassTag::Swarm, 0.0).unwrap();

        let breakdown = chance_breakdown(&catalog, a, b);
        assert!(breakdown.raw < 0.0);
        assert!(breakdown.chance.abs() < f32::EPSILON);
    }

    #[test]
    fn test_deep_fusion_decays() {
        let mut catalog = ItemCatalog::new();
        let a = catalog.add_base("Queen Jelly", ClassTag::Swarm, 100.0).unwrap();
        let b = catalog.add_base("Royal Wax", ClassTag::Swarm, 100.0).unwrap();

        let mut current = catalog
            .add_composite(vec![SourceStack::new(a, 1), SourceStack::new(b, 1)])
            .unwrap();
        // depth 1 vs depth 0: decay (10 + 0) / 2
        assert!((success_chance(&catalog, current, a) - 95.0).abs() < 1e-4);

        for _ in 0..12 {
            current = catalog
                .add_composite(vec![SourceStack::new(current, 1), SourceStack::new(a, 1)])
                .unwrap();
        }
        // Both sides past the end of the decay table.
        assert!(success_chance(&catalog, current, current).abs() < f32::EPSILON);
    }

    #[test]
    fn test_chance_is_symmetric_and_bounded() {
        let mut catalog = ItemCatalog::new();
        let mut ids = Vec::new();
        for (i, class) in ClassTag::ALL.into_iter().enumerate() {
            let stability = (i as f32) * 25.0;
            ids.push(catalog.add_base(format!("Item {i}"), class, stability).unwrap());
        }
        let fused = catalog
            .add_composite(vec![SourceStack::new(ids[0], 2), SourceStack::new(ids[3], 1)])
            .unwrap();
        ids.push(fused);

        for &a in &ids {
            for &b in &ids {
                let ab = success_chance(&catalog, a, b);
                let ba = success_chance(&catalog, b, a);
                assert!((0.0..=100.0).contains(&ab));
                assert!((ab - ba).abs() < 1e-4);
                assert!(
                    (compatibility_percent(&catalog, a, b) - compatibility_percent(&catalog, b, a))
                        .abs()
                        < 1e-4
                );
            }
        }
    }

    #[test]
    fn test_clamp_percent() {
        assert!(clamp_percent(-5.0).abs() < f32::EPSILON);
        assert!((clamp_percent(150.0) - 100.0).abs() < f32::EPSILON);
        assert!(clamp_percent(f32::NAN).abs() < f32::EPSILON);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(45.0), "45");
        assert_eq!(format_percent(72.5), "72.5");
        assert_eq!(format_percent(33.333), "33.3");
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(100.0), "100");
    }
}
