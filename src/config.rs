use crate::error::AlignError;
use crate::escalate::{Width, WidthPolicy};
use crate::scores::GapPenalties;
use crate::simd::Engine;

/// Settings for a [`LocalAligner`](crate::align::LocalAligner).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlignerConfig {
    pub gaps: GapPenalties,
    pub width_policy: WidthPolicy,
    /// `None` detects the engine at construction time.
    pub engine: Option<Engine>,
    /// Skip the reverse sweep; starts are reported equal to ends.
    pub compute_only_end: bool,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            gaps: GapPenalties::default(),
            width_policy: WidthPolicy::default(),
            engine: None,
            compute_only_end: false,
        }
    }
}

impl AlignerConfig {
    pub fn with_gaps(mut self, open: u8, extend: u8) -> Self {
        self.gaps = GapPenalties { open, extend };
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width_policy = WidthPolicy::Fixed(width);
        self
    }

    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_compute_only_end(mut self, only_end: bool) -> Self {
        self.compute_only_end = only_end;
        self
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        self.gaps.validate()?;
        match self.engine {
            Some(engine) if !engine.is_available() => Err(AlignError::EngineUnavailable(engine)),
            _ => Ok(()),
        }
    }

    /// The configured engine, or the detected one.
    pub fn resolve_engine(&self) -> Engine {
        self.engine.unwrap_or_else(Engine::detect)
    }
}
