//! Transition duration between two light states.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long the bridge should take to fade into a new state, in milliseconds.
///
/// The bridge counts transitions in steps of 100ms; the value is rounded to
/// the nearest step when a command is built.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTime {
    pub(crate) millis: u32,
}

impl TransitionTime {
    const STEP_MS: u32 = 100;

    pub fn from_millis(millis: u32) -> Self {
        TransitionTime { millis }
    }

    pub fn millis(&self) -> u32 {
        self.millis
    }

    /// The `transitiontime` value sent to the bridge, in 100ms steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::TransitionTime;
    ///
    /// assert_eq!(TransitionTime::from_millis(0).steps(), 0);
    /// assert_eq!(TransitionTime::from_millis(449).steps(), 4);
    /// assert_eq!(TransitionTime::from_millis(450).steps(), 5);
    /// ```
    pub fn steps(&self) -> u16 {
        let steps = self.millis.saturating_add(Self::STEP_MS / 2) / Self::STEP_MS;
        u16::try_from(steps).unwrap_or(u16::MAX)
    }
}

impl From<Duration> for TransitionTime {
    fn from(duration: Duration) -> Self {
        TransitionTime {
            millis: u32::try_from(duration.as_millis()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_duration() {
        let t = TransitionTime::from(Duration::from_secs(2));
        assert_eq!(t.millis(), 2000);
        assert_eq!(t.steps(), 20);
    }

    #[test]
    fn test_steps_saturate() {
        assert_eq!(TransitionTime::from_millis(u32::MAX).steps(), u16::MAX);
    }
}
