//! Corridor layout to net:gross efficiency.

use super::types::{Corridor, Efficiency};

/// Base efficiency assumed when a project does not state one.
pub const BASE_EFFICIENCY: f64 = 0.78;

/// Efficiency lost to a double-loaded central corridor.
const CENTRAL_CORRIDOR_PENALTY: f64 = 0.04;

/// Efficiency gained by an external gallery.
const EXTERNAL_CORRIDOR_BONUS: f64 = 0.02;

/// Derives the net:gross efficiency for a corridor layout.
///
/// # Examples
///
/// ```
/// use kost_sim::finance::efficiency::derive_efficiency;
/// use kost_sim::finance::types::Corridor;
///
/// let e = derive_efficiency(Corridor::Central, 0.78);
/// assert!((e.value() - 0.74).abs() < 1e-12);
/// ```
pub fn derive_efficiency(corridor: Corridor, base: f64) -> Efficiency {
    let raw = match corridor {
        Corridor::Central => base - CENTRAL_CORRIDOR_PENALTY,
        Corridor::External => base + EXTERNAL_CORRIDOR_BONUS,
    };
    Efficiency::new(raw)
}
