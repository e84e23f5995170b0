use derive_more::{Display, Into};

/// RPE above this value counts as a high-effort entry for recovery
/// assessment. Shared by the context model and the workout planner, which
/// must agree on the classification.
pub const HIGH_RPE_THRESHOLD: f32 = 8.5;

/// Rate of Perceived Exertion, a self-reported 1-10 intensity score.
#[derive(Debug, Display, Clone, Copy, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rpe(u8);

impl Rpe {
    pub const ONE: Rpe = Rpe(1);
    pub const FIVE: Rpe = Rpe(5);
    pub const SEVEN: Rpe = Rpe(7);
    pub const EIGHT: Rpe = Rpe(8);
    pub const NINE: Rpe = Rpe(9);
    pub const TEN: Rpe = Rpe(10);

    pub fn new(value: u8) -> Result<Self, RpeError> {
        if !(1..=10).contains(&value) {
            return Err(RpeError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_high_effort(self) -> bool {
        f32::from(self.0) > HIGH_RPE_THRESHOLD
    }

    #[must_use]
    pub fn avg(values: &[Rpe]) -> Option<f32> {
        if values.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(values.iter().map(|rpe| u32::from(rpe.0)).sum::<u32>() as f32 / values.len() as f32)
        }
    }
}

impl From<Rpe> for f32 {
    fn from(value: Rpe) -> Self {
        f32::from(value.0)
    }
}

impl TryFrom<&str> for Rpe {
    type Error = RpeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u8>() {
            Ok(parsed_value) => Rpe::new(parsed_value),
            Err(_) => Err(RpeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RpeError {
    #[error("RPE must be in the range 1 to 10 ({0} is not)")]
    OutOfRange(u8),
    #[error("RPE must be an integer")]
    ParseError,
}
