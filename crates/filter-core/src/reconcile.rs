//! Duration reconciliation between the base and overlay clips.
//!
//! The two inputs rarely have equal length. The shorter side is either
//! frozen on its last frame (overlay shorter) or the base is looped
//! (overlay longer); the final render is always hard-trimmed to the
//! longer duration, so over-production by the loop is harmless.

/// How the duration mismatch is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStrategy {
    /// Base is longer: hold the overlay's (and mask's) last frame and
    /// silence-pad the overlay audio until the base ends.
    FreezeOverlay,

    /// Overlay is at least as long: repeat the base video/audio until the
    /// output trim cuts it.
    LoopBase,
}

/// Result of reconciling the two input durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciliationOutcome {
    pub strategy: DurationStrategy,

    /// Seconds of last-frame hold / silence padding. Zero under
    /// `LoopBase`.
    pub pad_secs: f64,

    /// Hard output trim: the longer of the two inputs.
    pub output_duration_secs: f64,
}

/// Decide the strategy for a base/overlay duration pair.
///
/// Equal durations take the `LoopBase` branch: the loop is a no-op at
/// that length, but the choice decides which audio track drives looping
/// downstream and must stay stable.
pub fn reconcile(base_secs: f64, overlay_secs: f64) -> ReconciliationOutcome {
    if base_secs > overlay_secs {
        ReconciliationOutcome {
            strategy: DurationStrategy::FreezeOverlay,
            pad_secs: base_secs - overlay_secs,
            output_duration_secs: base_secs,
        }
    } else {
        ReconciliationOutcome {
            strategy: DurationStrategy::LoopBase,
            pad_secs: 0.0,
            output_duration_secs: overlay_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_base_freezes_overlay() {
        let outcome = reconcile(12.0, 8.0);
        assert_eq!(outcome.strategy, DurationStrategy::FreezeOverlay);
        assert!((outcome.pad_secs - 4.0).abs() < 1e-9);
        assert!((outcome.output_duration_secs - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_longer_overlay_loops_base() {
        let outcome = reconcile(5.0, 20.0);
        assert_eq!(outcome.strategy, DurationStrategy::LoopBase);
        assert_eq!(outcome.pad_secs, 0.0);
        assert!((outcome.output_duration_secs - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_durations_take_loop_branch() {
        let outcome = reconcile(10.0, 10.0);
        assert_eq!(outcome.strategy, DurationStrategy::LoopBase);
        assert_eq!(outcome.pad_secs, 0.0);
        assert!((outcome.output_duration_secs - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_output_duration_is_always_the_max() {
        for (base, overlay) in [(1.0, 2.0), (2.0, 1.0), (7.5, 7.5), (0.04, 3600.0)] {
            let outcome = reconcile(base, overlay);
            assert_eq!(outcome.output_duration_secs, base.max(overlay));
        }
    }
}
