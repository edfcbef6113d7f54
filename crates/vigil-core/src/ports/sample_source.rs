//! Measurement source port.

use crate::domain::Measurement;

/// Port supplying one measurement per sampling cycle.
///
/// The core makes no assumption about cycle rate, but timestamps must be
/// non-decreasing and monotonic.
pub trait SampleSource {
    /// Returns an iterator over measurements in cycle order.
    ///
    /// An `Err` item indicates the source failed mid-stream; iteration
    /// order is the cycle order.
    fn samples(&mut self) -> Box<dyn Iterator<Item = anyhow::Result<Measurement>> + '_>;

    /// Number of measurements, if known in advance.
    fn count_hint(&self) -> Option<usize> {
        None
    }
}
