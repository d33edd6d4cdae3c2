/// Monotonic "data changed" signal. Each bump asks for one roster
/// re-fetch; the value itself carries no other meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshCounter {
    value: u64,
}

impl RefreshCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn bump(&mut self) -> u64 {
        self.value += 1;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_only_increases() {
        let mut counter = RefreshCounter::new();
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.bump(), 1);
        assert_eq!(counter.bump(), 2);
        assert_eq!(counter.value(), 2);
    }
}
