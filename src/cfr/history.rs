use std::hash::Hash;
use std::hash::Hasher;

/// A digest of the public action path, chance markers included.
///
/// Histories are folded forward one edge at a time with FNV-1a, which is
/// stable across processes and platforms, unlike the std hasher seeds.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct History(u64);

impl History {
    const CHANCE: u64 = 0x00C4_A2CE;

    pub fn push<E: Hash>(&self, edge: &E) -> Self {
        let ref mut hasher = FnvHasher(self.0);
        edge.hash(hasher);
        Self(hasher.finish())
    }
    pub fn reveal(&self) -> Self {
        self.push(&Self::CHANCE)
    }
}

impl Default for History {
    fn default() -> Self {
        Self(FnvHasher::OFFSET_BASIS)
    }
}

impl From<History> for u64 {
    fn from(h: History) -> Self {
        h.0
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

struct FnvHasher(u64);

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }
}
