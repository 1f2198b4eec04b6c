//! # Compatibility and Decay Tables
//!
//! Fixed balance tables, compiled in as constants.
//!
//! - **Compatibility**: symmetric 5x5 lookup between class tags, 100 on the
//!   diagonal. Neighbouring classes on the ring
//!   `Winged - Predator - Metamorph - Swarm - Dancer - Winged` score 85,
//!   the rest 70.
//! - **Decay**: penalty by merge depth, non-decreasing, clamped past the end.

use crate::catalog::{ClassSet, ClassTag};

/// Compatibility percent between two class tags, indexed by [`ClassTag::index`].
pub const COMPATIBILITY: [[f32; 5]; 5] = [
    // Winged Predator Metamorph Swarm  Dancer
    [100.0, 85.0, 70.0, 70.0, 85.0],  // Winged
    [85.0, 100.0, 85.0, 70.0, 70.0],  // Predator
    [70.0, 85.0, 100.0, 85.0, 70.0],  // Metamorph
    [70.0, 70.0, 85.0, 100.0, 85.0],  // Swarm
    [85.0, 70.0, 70.0, 85.0, 100.0],  // Dancer
];

/// Decay penalty (percent) by merge depth. Depth 0 is a base item.
pub const DECAY_BY_DEPTH: [f32; 10] = [0.0, 10.0, 20.0, 35.0, 50.0, 75.0, 90.0, 95.0, 99.0, 100.0];

/// Looks up the compatibility of two class tags.
#[inline]
#[must_use]
pub const fn compatibility(a: ClassTag, b: ClassTag) -> f32 {
    COMPATIBILITY[a.index()][b.index()]
}

/// Mean compatibility over the cross product of two class sets.
///
/// Returns 100 (no penalty) when either set is empty.
#[must_use]
pub fn set_compatibility(a: ClassSet, b: ClassSet) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 100.0;
    }

    let mut sum = 0.0;
    let mut pairs = 0u32;
    for ca in a.iter() {
        for cb in b.iter() {
            sum += compatibility(ca, cb);
            pairs += 1;
        }
    }
    sum / pairs as f32
}

/// Decay penalty for a merge depth, clamped to the last table entry.
#[inline]
#[must_use]
pub fn decay_for_depth(depth: u32) -> f32 {
    let idx = (depth as usize).min(DECAY_BY_DEPTH.len() - 1);
    DECAY_BY_DEPTH[idx]
}
