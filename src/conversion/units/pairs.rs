use std::collections::HashMap;

use super::registry::UnitId;

/// The default conversion counterpart for a unit.
///
/// `converted_first` fixes the rendering order for two-way pairs: converting
/// from either side of a pair always renders the same two quantities in the
/// same order, with the declared pair orientation deciding which comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counterpart {
    pub unit: UnitId,
    pub converted_first: bool,
}

/// Symmetric unit-pair lookup backed by two plain one-directional maps.
///
/// The forward map holds every declared pair (two-way and one-way); the
/// inverse map holds only the reversed two-way pairs. Querying either side
/// of a two-way pair returns the other side.
pub struct UnitPairMap {
    forward: HashMap<UnitId, UnitId>,
    inverse: HashMap<UnitId, UnitId>,
}

impl UnitPairMap {
    pub fn new(two_way: &[(UnitId, UnitId)], one_way: &[(UnitId, UnitId)]) -> Self {
        let mut forward = HashMap::new();
        let mut inverse = HashMap::new();
        for &(a, b) in two_way {
            forward.insert(a, b);
            inverse.insert(b, a);
        }
        for &(a, b) in one_way {
            forward.insert(a, b);
        }
        Self { forward, inverse }
    }

    /// Looks up the default conversion target for `unit`.
    pub fn counterpart(&self, unit: UnitId) -> Option<Counterpart> {
        if let Some(&target) = self.forward.get(&unit) {
            // Two-way key side renders converted-first; one-way renders the
            // original first.
            let two_way = self.inverse.get(&target) == Some(&unit);
            return Some(Counterpart {
                unit: target,
                converted_first: two_way,
            });
        }
        self.inverse.get(&unit).map(|&target| Counterpart {
            unit: target,
            converted_first: false,
        })
    }
}
