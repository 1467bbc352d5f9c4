//! Retrying a sweep at wider lanes when the score saturates.

use crate::scores::SubstitutionMatrix;

/// Integer width of the score lanes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
        }
    }

    pub fn next(self) -> Option<Width> {
        match self {
            Width::W8 => Some(Width::W16),
            Width::W16 => Some(Width::W32),
            Width::W32 => None,
        }
    }

    /// Largest value a lane can hold.
    pub fn lane_max(self) -> u64 {
        match self {
            Width::W8 => u8::MAX as u64,
            Width::W16 => i16::MAX as u64,
            Width::W32 => i32::MAX as u64,
        }
    }
}

/// How the first width of an alignment is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthPolicy {
    /// Always start at this width and escalate on overflow.
    Fixed(Width),
    /// Start at the narrowest width that can hold `query_len * largest_score`
    /// (an upper bound on any local score) plus the bias.
    Estimate,
}

impl Default for WidthPolicy {
    fn default() -> Self {
        WidthPolicy::Fixed(Width::W8)
    }
}

impl WidthPolicy {
    pub fn start_width(self, query_len: usize, matrix: &SubstitutionMatrix) -> Width {
        match self {
            WidthPolicy::Fixed(width) => width,
            WidthPolicy::Estimate => {
                let bound = (query_len as u64) * (matrix.largest().max(0) as u64) + matrix.bias() as u64;
                [Width::W8, Width::W16]
                    .into_iter()
                    .find(|w| bound < w.lane_max())
                    .unwrap_or(Width::W32)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscalationState {
    Running(Width),
    /// The widest lanes overflowed too.
    Overflowed,
}

/// Width8 -> Width16 -> Width32 -> Overflowed, one step per overflow.
#[derive(Clone, Debug)]
pub struct WidthEscalation {
    state: EscalationState,
    overflows: u32,
}

impl WidthEscalation {
    pub fn new(start: Width) -> Self {
        Self { state: EscalationState::Running(start), overflows: 0 }
    }

    pub fn from_policy(policy: WidthPolicy, query_len: usize, matrix: &SubstitutionMatrix) -> Self {
        Self::new(policy.start_width(query_len, matrix))
    }

    pub fn state(&self) -> EscalationState {
        self.state
    }

    /// Width to run next, `None` once overflowed.
    pub fn width(&self) -> Option<Width> {
        match self.state {
            EscalationState::Running(width) => Some(width),
            EscalationState::Overflowed => None,
        }
    }

    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    pub fn on_overflow(&mut self) -> EscalationState {
        if let EscalationState::Running(width) = self.state {
            self.overflows += 1;
            self.state = match width.next() {
                Some(next) => {
                    log::debug!("Score overflowed {}-bit lanes, retrying with {}-bit lanes", width.bits(), next.bits());
                    EscalationState::Running(next)
                }
                None => {
                    log::debug!("Score overflowed {}-bit lanes, no wider lanes left", width.bits());
                    EscalationState::Overflowed
                }
            };
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_steps() {
        let mut esc = WidthEscalation::new(Width::W8);
        assert_eq!(esc.width(), Some(Width::W8));
        assert_eq!(esc.on_overflow(), EscalationState::Running(Width::W16));
        assert_eq!(esc.on_overflow(), EscalationState::Running(Width::W32));
        assert_eq!(esc.on_overflow(), EscalationState::Overflowed);
        assert_eq!(esc.width(), None);
        // terminal
        assert_eq!(esc.on_overflow(), EscalationState::Overflowed);
        assert_eq!(esc.overflows(), 3);
    }

    #[test]
    fn test_estimate_policy() {
        let matrix = SubstitutionMatrix::dna(2, -1);
        // 100 * 2 + 1 fits in u8
        assert_eq!(WidthPolicy::Estimate.start_width(100, &matrix), Width::W8);
        // 127 * 2 + 1 = 255 does not
        assert_eq!(WidthPolicy::Estimate.start_width(127, &matrix), Width::W16);
        assert_eq!(WidthPolicy::Estimate.start_width(20_000, &matrix), Width::W32);
        assert_eq!(WidthPolicy::Fixed(Width::W16).start_width(1, &matrix), Width::W16);
        assert_eq!(WidthPolicy::default(), WidthPolicy::Fixed(Width::W8));
    }
}
