/// Time primitives
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    /// The instant `secs` seconds after `self`.
    pub fn after(self, secs: f64) -> Self {
        Time(self.0 + secs)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn after_offsets_forward() {
        let t = Time(1.5).after(0.7);
        assert!((t.0 - 2.2).abs() < 1e-12);
        assert!(t > Time(1.5));
    }
}
