use std::time::Duration;

use tracing::{debug, info};

use crate::config::{Settings, Speed};
use crate::editor::{parse_weight, ClickOutcome, Editor, Mode, Selection};
use crate::errors::{GeometryError, RunError};
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};
use crate::graph_algos::{DijkstraRun, RunPhase, RunState, StepOutcome};
use crate::scene::Scene;


/// Identifies one run, handed to the driver that advances it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

impl RunToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}


/// Labels and button states for the controls around the canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub start_label: String,
    pub end_label: String,
    pub can_run: bool,
    pub can_reset: bool,
    pub running: bool,
    pub adding_edge: bool,
}


/// Owns the graph, editor, selection, settings and the current run
/// A driver advances the run with `tick`, waiting `step_delay` between calls
#[derive(Debug)]
pub struct App {
    graph: Graph,
    editor: Editor,
    selection: Selection,
    settings: Settings,
    weight_input: String,
    run: Option<DijkstraRun>,
    generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {

    pub fn new(settings: Settings) -> Self {
        Self {
            graph: Graph::new(),
            editor: Editor::new(),
            selection: Selection::default(),
            weight_input: settings.default_weight.to_string(),
            settings,
            run: None,
            generation: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.editor.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.editor.set_mode(mode);
    }

    pub fn pending_edge(&self) -> Option<NodeId> {
        self.editor.pending_edge()
    }

    pub fn cancel_edge(&mut self) {
        self.editor.cancel_edge();
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.settings.speed = speed;
    }

    /// How long the driver should wait between two ticks
    pub fn step_delay(&self) -> Duration {
        self.settings.speed.step_delay()
    }

    pub fn set_show_weights(&mut self, show: bool) {
        self.settings.show_weights = show;
    }

    /// Raw text of the edge weight input, parsed when an edge is committed
    pub fn set_weight_input(&mut self, text: impl Into<String>) {
        self.weight_input = text.into();
    }

    pub fn click(&mut self, point: Point) -> Result<ClickOutcome, GeometryError> {
        let weight = parse_weight(&self.weight_input);
        self.editor.click(
            &mut self.graph,
            &mut self.selection,
            point,
            weight,
            self.settings.hit_radius,
        )
    }

    pub fn press(&mut self, point: Point) -> Result<Option<NodeId>, GeometryError> {
        self.editor.press(&self.graph, point, self.settings.hit_radius)
    }

    pub fn drag_to(&mut self, point: Point) -> bool {
        self.editor.drag_to(&mut self.graph, point)
    }

    pub fn release(&mut self) {
        self.editor.release();
    }

    /// Replace the graph with the six node example, start 1 and end 6
    pub fn load_sample(&mut self) {
        self.load_graph(Graph::sample());
        self.selection = Selection {
            start: Some(NodeId(1)),
            end: Some(NodeId(6)),
        };
    }

    /// Replace the whole graph, same as clearing first
    pub fn load_graph(&mut self, graph: Graph) {
        self.clear_graph();
        self.graph = graph;
    }

    /// Set both endpoints directly
    pub fn select(&mut self, start: NodeId, end: NodeId) -> Result<(), RunError> {
        for id in [start, end] {
            if !self.graph.contains(id) {
                return Err(RunError::UnknownNode(id));
            }
        }
        self.selection = Selection {
            start: Some(start),
            end: Some(end),
        };
        Ok(())
    }

    /// Drop every node and edge, the run and the selection
    pub fn clear_graph(&mut self) {
        self.graph.clear();
        self.editor.reset();
        self.reset();
        self.selection.clear();
    }

    /// Begin a run between the selected nodes
    pub fn start_run(&mut self) -> Result<RunToken, RunError> {
        if self.is_running() {
            return Err(RunError::AlreadyRunning);
        }
        let (start, end) = self.selection.endpoints().ok_or(RunError::MissingEndpoint)?;

        let run = DijkstraRun::new(&self.graph, start, end)?;
        self.generation += 1;
        self.run = Some(run);

        info!(%start, %end, generation = self.generation, "run started");
        Ok(RunToken(self.generation))
    }

    /// Advance the run owned by `token` by one settled node
    pub fn tick(&mut self, token: RunToken) -> Result<StepOutcome, RunError> {
        if token.0 != self.generation {
            debug!(stale = token.0, current = self.generation, "tick from an obsolete run");
            return Err(RunError::StaleRun(token.0));
        }
        let run = self.run.as_mut().ok_or(RunError::NotRunning)?;
        Ok(run.step())
    }

    /// Run the current run to completion without pauses
    pub fn finish_run(&mut self, token: RunToken) -> Result<RunPhase, RunError> {
        loop {
            if let StepOutcome::Finished(phase) = self.tick(token)? {
                return Ok(phase);
            }
        }
    }

    /// Back to idle, invalidates any outstanding token
    pub fn reset(&mut self) {
        self.run = None;
        self.generation += 1;
    }

    pub fn phase(&self) -> RunPhase {
        self.run.as_ref().map_or(RunPhase::Idle, DijkstraRun::phase)
    }

    pub fn is_running(&self) -> bool {
        self.phase() == RunPhase::Running
    }

    pub fn run(&self) -> Option<&DijkstraRun> {
        self.run.as_ref()
    }

    /// Copy of the observable run state, empty when idle
    pub fn run_state(&self) -> RunState {
        self.run.as_ref().map(|r| r.state().clone()).unwrap_or_default()
    }

    pub fn scene(&self) -> Scene {
        let show = self.settings.show_weights;
        match &self.run {
            Some(run) => Scene::build(&self.graph, &self.selection, run.state(), show),
            None => Scene::build(&self.graph, &self.selection, &RunState::default(), show),
        }
    }

    pub fn status(&self) -> Status {
        let running = self.is_running();
        Status {
            start_label: self.endpoint_label("Start", self.selection.start),
            end_label: self.endpoint_label("End", self.selection.end),
            can_run: self.selection.endpoints().is_some() && !running,
            can_reset: !running,
            running,
            adding_edge: self.editor.pending_edge().is_some(),
        }
    }

    fn endpoint_label(&self, name: &str, id: Option<NodeId>) -> String {
        match id {
            Some(id) => {
                let label = self.graph.node(id).map(|n| n.label.as_str()).unwrap_or_default();
                format!("{name}: {label}")
            }
            None => format!("{name}: Not selected"),
        }
    }
}
