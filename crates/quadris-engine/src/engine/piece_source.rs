use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supply of piece kinds for an [`Engine`](super::Engine).
///
/// The engine asks for one kind every time it needs a new piece. Implement this
/// trait to script piece sequences in tests or replays.
pub trait PieceSource {
    /// Returns the kind of the next piece to spawn.
    fn next_kind(&mut self) -> PieceKind;
}

impl<S> PieceSource for &mut S
where
    S: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator of a [`RandomPieceSource`]. The same seed produces the same
/// sequence of pieces, which makes games reproducible for debugging and testing.
///
/// Seeds are written as 32 hexadecimal digits, both by [`fmt::Display`] and by
/// serde:
///
/// ```
/// use quadris_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

/// Error returned when parsing a [`PieceSeed`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {input}")]
    InvalidDigit { input: String },
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength { len: s.len() });
        }
        // `from_str_radix` accepts a leading `+`, which is not a hex digit.
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::InvalidDigit {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Draws each piece kind independently and uniformly at random.
///
/// # Example
///
/// ```
/// use quadris_engine::{PieceSeed, PieceSource as _, RandomPieceSource};
///
/// let seed = PieceSeed::from_bytes([7; 16]);
/// let mut a = RandomPieceSource::with_seed(seed);
/// let mut b = RandomPieceSource::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: Pcg32,
    seed: PieceSeed,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
        }
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieceSource {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed list of piece kinds, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct SequencePieceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceSource {
    /// Creates a source that yields `kinds` in order, forever.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequencePieceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: bytes appear in order as hex pairs
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = PieceSeed::from_bytes([0; 16]);
            assert_eq!(seed.to_string(), "00000000000000000000000000000000");
            let parsed: PieceSeed = "00000000000000000000000000000000".parse().unwrap();
            assert_eq!(parsed.to_bytes(), [0; 16]);
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: PieceSeed = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized.to_bytes()[..4], [0x01, 0x23, 0x45, 0x67]);
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\"";
            let err = serde_json::from_str::<PieceSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_wrong_length() {
            assert_eq!(
                "0123".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength { len: 4 })
            );
            assert_eq!(
                "".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength { len: 0 })
            );
        }

        #[test]
        fn test_error_leading_plus_sign() {
            let input = "+123456789abcdef0123456789abcdef";
            assert!(matches!(
                input.parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit { .. })
            ));
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        let mut source1 = RandomPieceSource::with_seed(seed);
        let mut source2 = RandomPieceSource::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(source1.next_kind(), source2.next_kind());
        }
        assert_eq!(source1.seed(), seed);
    }

    #[test]
    fn test_random_source_yields_every_kind() {
        let mut source = RandomPieceSource::with_seed(PieceSeed::from_bytes([42; 16]));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[source.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_sequence_source_cycles() {
        let mut source = SequencePieceSource::new(vec![PieceKind::I, PieceKind::O]);
        let kinds: Vec<_> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            kinds,
            [
                PieceKind::I,
                PieceKind::O,
                PieceKind::I,
                PieceKind::O,
                PieceKind::I
            ]
        );
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_sequence_source_rejects_empty() {
        let _ = SequencePieceSource::new(vec![]);
    }
}
