use foundation::time::Time;

/// Deterministic frame metadata.
///
/// This is the primary timebase for the globe runtime. Hosts drive it from
/// whatever refresh callback they have; the frame itself is pure data so a
/// session can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time of this frame (seconds).
    pub dt_s: f64,
    /// Runtime time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    /// A fixed-step frame: `time = index * dt_s`.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// The following frame after a (possibly variable) step of `dt_s` seconds.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = dt_s.max(0.0);
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.after(dt_s),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}
