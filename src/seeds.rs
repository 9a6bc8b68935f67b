//! Seed management for city generation
//!
//! Every generation phase draws from its own random stream, derived from a master seed, so
//! changing how much randomness one phase consumes never shifts the output of another.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for all city generation phases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CitySeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Street network walk (bloom, stop and turn decisions)
    pub streets: u64,
    /// Building placement on the remaining empty cells
    pub density: u64,
    /// Per-building height jitter
    pub heights: u64,
    /// Roof ridge rise
    pub roofs: u64,
}

impl CitySeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            streets: derive_seed(master, "streets"),
            density: derive_seed(master, "density"),
            heights: derive_seed(master, "heights"),
            roofs: derive_seed(master, "roofs"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> CitySeedsBuilder {
        CitySeedsBuilder {
            seeds: Self::from_master(master),
        }
    }

    pub fn streets_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.streets)
    }

    pub fn density_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.density)
    }

    pub fn heights_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.heights)
    }

    pub fn roofs_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.roofs)
    }
}

/// Builder for overriding individual seeds while deriving the rest from the master
pub struct CitySeedsBuilder {
    seeds: CitySeeds,
}

impl CitySeedsBuilder {
    pub fn streets(mut self, seed: u64) -> Self {
        self.seeds.streets = seed;
        self
    }

    pub fn density(mut self, seed: u64) -> Self {
        self.seeds.density = seed;
        self
    }

    pub fn heights(mut self, seed: u64) -> Self {
        self.seeds.heights = seed;
        self
    }

    pub fn roofs(mut self, seed: u64) -> Self {
        self.seeds.roofs = seed;
        self
    }

    pub fn build(self) -> CitySeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a phase name.
///
/// Uses fixed mixing functions so a master seed produces the same city on every toolchain.
fn derive_seed(master: u64, phase: &str) -> u64 {
    splitmix64(master ^ fnv1a(phase.as_bytes()))
}

/// 64-bit FNV-1a hash of a phase name.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// One SplitMix64 step.
fn splitmix64(state: u64) -> u64 {
    let mut x = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

impl std::fmt::Display for CitySeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CitySeeds {{ master: {}, streets: {}, density: {}, heights: {}, roofs: {} }}",
            self.master, self.streets, self.density, self.heights, self.roofs,
        )
    }
}
