/// A progress fraction, 0 ..= 1.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, derive_more::Into)]
pub struct UnitInterval(f64);

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Clamps silently, progress computed from a running clock is expected to overshoot. NaN
    /// becomes zero.
    pub fn saturating(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        Self(v.clamp(0.0, 1.0))
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(UnitInterval::saturating(1.5).get(), 1.0);
        assert_eq!(UnitInterval::saturating(-0.5).get(), 0.0);
        assert_eq!(UnitInterval::saturating(f64::NAN).get(), 0.0);
    }

    #[test]
    fn converts_into_f64() {
        let v: f64 = UnitInterval::saturating(0.25).into();
        assert_eq!(v, 0.25);
    }
}
