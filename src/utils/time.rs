use std::time::Duration;

/// A measurement of a monotonically nondecreasing clock, in microseconds.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    #[inline]
    pub fn from_micros(micros: u64) -> Timestamp {
        Timestamp(micros)
    }

    #[inline]
    pub fn now() -> Timestamp {
        crate::sys::timestamp()
    }

    #[inline]
    pub fn elapsed(self) -> Duration {
        crate::sys::timestamp() - self
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sub() {
        let a = Timestamp::from_micros(1_500_000);
        let b = Timestamp::from_micros(250_000);
        assert_eq!(a - b, Duration::from_micros(1_250_000));
        assert_eq!(b - a, Duration::from_micros(0));
    }
}
