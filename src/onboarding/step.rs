//! Onboarding steps — five sequential pages, navigated with saturation.

/// One of the five onboarding pages. Always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(5);

    /// Build a step, returning `None` outside `1..=5`.
    pub fn new(n: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0).contains(&n).then_some(Self(n))
    }

    /// Build a step, clamping `n` into `1..=5`.
    pub fn clamped(n: u8) -> Self {
        Self(n.clamp(Self::FIRST.0, Self::LAST.0))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// The following step; stays put on the last one.
    pub fn next(&self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    /// The preceding step; stays put on the first one.
    pub fn prev(&self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn title(&self) -> &'static str {
        match self.0 {
            1 => "Owner Details",
            2 => "Business Details",
            3 => "Business Identity",
            4 => "Bank Details",
            _ => "Partnership",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.0 {
            1 => "Enter your personal information",
            2 => "Tell us about your business",
            3 => "Verify your business identity",
            4 => "Setup your bank account",
            _ => "Review and accept terms",
        }
    }

    /// Every step, first to last.
    pub fn all() -> impl Iterator<Item = Step> {
        (Self::FIRST.0..=Self::LAST.0).map(Step)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        let mut current = Step::FIRST;
        for expected in 2..=5 {
            current = current.next();
            assert_eq!(current.get(), expected);
        }
        assert!(current.is_last());
    }

    #[test]
    fn boundaries_are_idempotent() {
        assert_eq!(Step::FIRST.prev(), Step::FIRST);
        assert_eq!(Step::LAST.next(), Step::LAST);
        assert_eq!(Step::LAST.next().next(), Step::LAST);
    }

    #[test]
    fn never_leaves_range() {
        let mut step = Step::FIRST;
        // Arbitrary walk, heavier on forward moves
        for i in 0..50u32 {
            step = if i % 3 == 0 { step.prev() } else { step.next() };
            assert!((1..=5).contains(&step.get()));
        }
    }

    #[test]
    fn construction() {
        assert!(Step::new(0).is_none());
        assert!(Step::new(6).is_none());
        assert_eq!(Step::new(3).unwrap().get(), 3);
        assert_eq!(Step::clamped(0), Step::FIRST);
        assert_eq!(Step::clamped(200), Step::LAST);
    }

    #[test]
    fn stored_text_is_plain_decimal() {
        let step = Step::new(4).unwrap();
        assert_eq!(step.to_string(), "4");
        let parsed = step.to_string().parse::<u8>().ok().and_then(Step::new);
        assert_eq!(parsed, Some(step));
    }

    #[test]
    fn titles() {
        let titles: Vec<&str> = Step::all().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            [
                "Owner Details",
                "Business Details",
                "Business Identity",
                "Bank Details",
                "Partnership"
            ]
        );
    }
}
