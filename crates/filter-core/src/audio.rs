//! Audio mix stages: volume, pad-or-loop, mix.
//!
//! Track chains follow the duration strategy: under `FreezeOverlay` the
//! overlay audio is silence-padded to the base's length; under `LoopBase`
//! the base audio is looped (the output trim cuts the excess). A muted
//! track is not rendered at all; with both tracks muted the base is kept
//! at zero gain so the container still carries an audio stream.

use inlay_job_model::CompositionConfig;

use crate::graph::{FilterGraph, StreamRef};
use crate::reconcile::{DurationStrategy, ReconciliationOutcome};
use crate::{BASE_INPUT, OVERLAY_INPUT};

/// Build the audio stage sequence and return the output pad.
pub fn plan_audio(
    config: &CompositionConfig,
    outcome: &ReconciliationOutcome,
    graph: &mut FilterGraph,
) -> StreamRef {
    let base_on = config.base_volume > 0.0;
    let overlay_on = config.overlay_volume > 0.0;

    match (base_on, overlay_on) {
        (true, true) => {
            let base = base_chain(config.base_volume, outcome, graph, "base_audio");
            let overlay = overlay_chain(config.overlay_volume, outcome, graph, "overlay_audio");
            graph.stage(&[&base, &overlay], "amix=inputs=2:duration=longest", "aout")
        }
        (true, false) => base_chain(config.base_volume, outcome, graph, "aout"),
        (false, true) => overlay_chain(config.overlay_volume, outcome, graph, "aout"),
        // Deliberately the base track, not the overlay: deterministic
        // silent-but-present stream regardless of strategy.
        (false, false) => base_chain(0.0, outcome, graph, "aout"),
    }
}

fn base_chain(
    volume: f64,
    outcome: &ReconciliationOutcome,
    graph: &mut FilterGraph,
    out_label: &str,
) -> StreamRef {
    let src = StreamRef::audio_input(BASE_INPUT);
    match outcome.strategy {
        DurationStrategy::LoopBase => {
            let looped = graph.stage(&[&src], "aloop=loop=-1:size=2147483647", "base_audio_loop");
            graph.stage(&[&looped], format!("volume={volume}"), out_label)
        }
        DurationStrategy::FreezeOverlay => {
            graph.stage(&[&src], format!("volume={volume}"), out_label)
        }
    }
}

fn overlay_chain(
    volume: f64,
    outcome: &ReconciliationOutcome,
    graph: &mut FilterGraph,
    out_label: &str,
) -> StreamRef {
    let src = StreamRef::audio_input(OVERLAY_INPUT);
    match outcome.strategy {
        DurationStrategy::FreezeOverlay => {
            let scaled = graph.stage(&[&src], format!("volume={volume}"), "overlay_audio_gain");
            graph.stage(
                &[&scaled],
                format!("apad=pad_dur={}", outcome.pad_secs),
                out_label,
            )
        }
        DurationStrategy::LoopBase => {
            graph.stage(&[&src], format!("volume={volume}"), out_label)
        }
    }
}
