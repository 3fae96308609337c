use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Surface classification of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Land,
    Water,
}

impl Surface {
    /// Land if `value` strictly exceeds `threshold`.
    pub fn classify(value: f32, threshold: f32) -> Self {
        if value > threshold {
            Self::Land
        } else {
            Self::Water
        }
    }

    pub fn is_land(self) -> bool {
        self == Self::Land
    }
}

/// One cube of the globe's shell. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    /// Lattice coordinate the voxel was generated from.
    pub cell: IVec3,
    /// Position relative to the globe, before its rotation is applied.
    pub position: Vec3,
    /// Edge length.
    pub size: f32,
    pub surface: Surface,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_strict() {
        assert_eq!(Surface::classify(0.6, 0.5), Surface::Land);
        assert_eq!(Surface::classify(0.5, 0.5), Surface::Water);
        assert_eq!(Surface::classify(0.4, 0.5), Surface::Water);
    }

    #[test]
    fn threshold_out_of_range_is_valid() {
        assert_eq!(Surface::classify(0.99, 1.1), Surface::Water);
        assert_eq!(Surface::classify(0.0, -0.1), Surface::Land);
    }
}
