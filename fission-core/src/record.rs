//! ## fission-core::record
//! **Frozen per-generation neutron counts**
//!
//! A [`GenerationRecord`] is only grown by the branching loop in this crate.
//! Once handed out it is read-only, so renderers and reporters can borrow it
//! freely.

use std::ops::Deref;

use blake3::Hasher;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The population reached zero.
    #[default]
    Extinct,
    /// The caller's generation cap was hit with neutrons still pending.
    Capped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRecord {
    counts: Vec<u64>,
    outcome: Outcome,
}

impl GenerationRecord {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: Vec::with_capacity(capacity),
            outcome: Outcome::Extinct,
        }
    }

    pub(crate) fn push(&mut self, population: u64) {
        debug_assert!(population > 0, "zero population is never recorded");
        self.counts.push(population);
    }

    pub(crate) fn finish(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Largest generation, or 0 for an empty record.
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Generation index holding [`peak`](Self::peak).
    pub fn peak_generation(&self) -> Option<usize> {
        self.counts
            .iter()
            .enumerate()
            .max_by_key(|&(i, &count)| (count, std::cmp::Reverse(i)))
            .map(|(i, _)| i)
    }

    /// Every neutron that ever entered a generation.
    pub fn total_neutrons(&self) -> u128 {
        self.counts.iter().map(|&c| u128::from(c)).sum()
    }

    /// BLAKE3 digest over the counts and outcome, hex encoded.
    ///
    /// Two runs with the same seed and parameters produce the same digest.
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        hasher.update(&(self.counts.len() as u64).to_le_bytes());
        for count in &self.counts {
            hasher.update(&count.to_le_bytes());
        }
        hasher.update(match self.outcome {
            Outcome::Extinct => b"EXTINCT",
            Outcome::Capped => b"CAPPED!",
        });
        hex::encode(hasher.finalize().as_bytes())
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.counts
    }
}

impl Deref for GenerationRecord {
    type Target = [u64];

    fn deref(&self) -> &Self::Target {
        &self.counts
    }
}

impl AsRef<[u64]> for GenerationRecord {
    fn as_ref(&self) -> &[u64] {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(counts: &[u64], outcome: Outcome) -> GenerationRecord {
        let mut record = GenerationRecord::with_capacity(counts.len());
        for &c in counts {
            record.push(c);
        }
        record.finish(outcome)
    }

    #[test]
    fn test_summary_accessors() {
        let r = record(&[10, 14, 14, 3], Outcome::Extinct);
        assert_eq!(r.len(), 4);
        assert_eq!(r.peak(), 14);
        assert_eq!(r.peak_generation(), Some(1));
        assert_eq!(r.total_neutrons(), 41);
        assert_eq!(r.last(), Some(&3));
    }

    #[test]
    fn test_empty_record() {
        let r = GenerationRecord::default();
        assert!(r.is_empty());
        assert_eq!(r.peak(), 0);
        assert_eq!(r.peak_generation(), None);
        assert_eq!(r.outcome(), Outcome::Extinct);
    }

    #[test]
    fn test_digest_depends_on_counts_and_outcome() {
        let a = record(&[5, 3], Outcome::Extinct);
        let b = record(&[5, 3], Outcome::Extinct);
        let c = record(&[5, 4], Outcome::Extinct);
        let d = record(&[5, 3], Outcome::Capped);
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
        assert_ne!(a.digest(), d.digest());
        assert_eq!(a.digest().len(), 64);
    }
}
