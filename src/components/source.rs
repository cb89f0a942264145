/// A point where a time-varying field excitation is injected.
///
/// All fields are passed to the solver as they are. Times are measured in
/// multiples of the experiment's `tau`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Source {
    pub x: f64,
    pub y: f64,
    /// When the excitation starts.
    pub t_start: f64,
    /// When the excitation is cut off.
    pub t_cutoff: f64,
    /// Frequency of the source wave, in Hz.
    pub frequency: f64,
    pub phase: f64,
}

impl Source {
    /// Creates a source at `(x, y)` with the default timing and wave parameters.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            t_start: 0.0,
            t_cutoff: 7.0,
            frequency: 120e12,
            phase: 3.0,
        }
    }
}

/// The ordered sources of an experiment.
pub type SourceList = Vec<Source>;
