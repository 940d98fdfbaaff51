//! Fixed mesh index table
//!
//! The numeric indices are a contract with the face-mesh model version.
//! A model upgrade that renumbers the mesh only requires updating this
//! table, not the geometry code.

/// Left eye outer corner
pub const LEFT_EYE_OUTER: usize = 159;
/// Right eye outer corner
pub const RIGHT_EYE_OUTER: usize = 386;
/// Upper lip midpoint
pub const UPPER_LIP: usize = 13;
/// Lower lip midpoint
pub const LOWER_LIP: usize = 14;
/// Nose bridge (between the eyes)
pub const NOSE_BRIDGE: usize = 168;
/// Nose tip
pub const NOSE_TIP: usize = 4;
/// Chin bottom
pub const CHIN: usize = 152;

/// All indices the signal derivation reads
pub const REQUIRED_INDICES: [usize; 7] = [
    LEFT_EYE_OUTER,
    RIGHT_EYE_OUTER,
    UPPER_LIP,
    LOWER_LIP,
    NOSE_BRIDGE,
    NOSE_TIP,
    CHIN,
];

/// Keypoint count of the refined face mesh
pub const MESH_SIZE: usize = 478;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_indices_fit_in_mesh() {
        assert!(REQUIRED_INDICES.iter().all(|&i| i < MESH_SIZE));
    }
}
