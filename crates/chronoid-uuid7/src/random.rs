use rand::rngs::OsRng;
use rand::RngCore;

/// The minimum random number generator interface a [`Uuid7Generator`] needs.
///
/// Implementations must be cryptographically strong: `rand_b` is the only
/// thing keeping a successor identifier from being guessed.
///
/// [`Uuid7Generator`]: crate::Uuid7Generator
pub trait RandomSource: Send {
    /// Returns 64 unbiased random bits.
    fn next_u64(&mut self) -> u64;
}

/// An adapter that implements [`RandomSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore + Send> RandomSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

/// The default source, backed by the operating system.
pub type OsRandom = Adapter<OsRng>;
