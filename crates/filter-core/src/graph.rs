//! Filter-graph assembly.
//!
//! A [`FilterGraph`] is an ordered list of named stages. Each stage names
//! its input pads by [`StreamRef`] value and yields a freshly labeled
//! output pad, so planners compose without any hidden "current stream"
//! cursor. The graph is a build-time artifact only: it is rendered once
//! into the engine's `filter_complex` text and discarded after handoff.

use std::fmt;

/// Opaque handle to one stream pad: either a raw input pad (`0:v`) or a
/// labeled stage output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamRef(String);

impl StreamRef {
    /// Video pad of the n-th input file.
    pub fn video_input(index: usize) -> Self {
        Self(format!("{index}:v"))
    }

    /// Audio pad of the n-th input file.
    pub fn audio_input(index: usize) -> Self {
        Self(format!("{index}:a"))
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// One named processing step in the graph.
#[derive(Debug, Clone)]
struct Stage {
    inputs: Vec<StreamRef>,
    filter: String,
    output: String,
}

/// Ordered, acyclic stage list for one render invocation.
///
/// Stage output labels must be unique within a graph; planners pick
/// semantic names (`mask_gray`, `vout`, `sub0`, ..).
#[derive(Debug, Clone, Default)]
pub struct FilterGraph {
    stages: Vec<Stage>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage consuming `inputs` and return a handle to its
    /// output pad.
    pub fn stage(
        &mut self,
        inputs: &[&StreamRef],
        filter: impl Into<String>,
        output: &str,
    ) -> StreamRef {
        self.stages.push(Stage {
            inputs: inputs.iter().map(|r| (*r).clone()).collect(),
            filter: filter.into(),
            output: output.to_string(),
        });
        StreamRef(output.to_string())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Render the graph as `filter_complex` text:
    /// `[in..]filter[out];[in..]filter[out];..`
    pub fn filter_complex(&self) -> String {
        self.stages
            .iter()
            .map(|stage| {
                let inputs: String = stage.inputs.iter().map(StreamRef::to_string).collect();
                format!("{}{}[{}]", inputs, stage.filter, stage.output)
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// The assembled graph plus the pads the executor must map into the
/// output file.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub graph: FilterGraph,
    pub video_out: StreamRef,
    pub audio_out: StreamRef,
}
