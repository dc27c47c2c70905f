//! Terminal driver: animates a Dijkstra run over the sample or a random graph

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pathviz::graph::{random_graph, RandomGraph};
use pathviz::scene::{self, Scene, Surface};
use pathviz::{App, NodeId, RunPhase, Settings, Speed, StepOutcome};


#[derive(Debug, Parser)]
#[command(name = "pathviz", about = "Watch Dijkstra's algorithm settle a graph node by node")]
struct Args {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Animation speed 0..=100, overrides the settings file
    #[arg(short, long)]
    speed: Option<u32>,

    /// Use a random graph with this many nodes instead of the sample
    #[arg(long, value_name = "NODES")]
    random: Option<u32>,

    /// Seed for --random
    #[arg(long)]
    seed: Option<u64>,

    /// Start node id
    #[arg(long)]
    start: Option<u32>,

    /// End node id
    #[arg(long)]
    end: Option<u32>,

    /// Hide edge weights in the frame dump
    #[arg(long)]
    hide_weights: bool,

    /// Don't pause between steps
    #[arg(long)]
    no_delay: bool,
}


fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(speed) = args.speed {
        settings.speed = Speed::new(speed);
    }
    if args.hide_weights {
        settings.show_weights = false;
    }

    let mut app = App::new(settings);
    let default_end = match args.random {
        Some(nodes) => {
            app.load_graph(random_graph(&RandomGraph {
                nodes,
                seed: args.seed,
                ..RandomGraph::default()
            }));
            nodes
        }
        None => {
            app.load_sample();
            6
        }
    };

    let start = NodeId(args.start.unwrap_or(1));
    let end = NodeId(args.end.unwrap_or(default_end));
    app.select(start, end).context("invalid start or end node")?;

    let mut surface = TextSurface::new(io::stdout());
    surface.draw(&app.scene());

    let token = app.start_run()?;
    loop {
        match app.tick(token)? {
            StepOutcome::Settled(step) => {
                println!("settled {} at distance {}", step.node, step.distance);
                for (node, distance) in &step.relaxed {
                    println!("  {node} -> {distance}");
                }
                surface.draw(&app.scene());
                if !args.no_delay {
                    thread::sleep(app.step_delay());
                }
            }
            StepOutcome::Finished(phase) => {
                surface.draw(&app.scene());
                report(&app, phase);
                break;
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn report(app: &App, phase: RunPhase) {
    let state = app.run_state();
    let path: Vec<String> = state.path.iter().map(NodeId::to_string).collect();

    match phase {
        RunPhase::Completed => {
            let cost = app
                .run()
                .and_then(|run| run.distance(run.end()))
                .map(|d| d.to_string())
                .unwrap_or_default();
            println!("shortest path: {} (cost {cost})", path.join(" -> "));
        }
        _ => println!("no path to node {}", path.join("")),
    }
}


/// Plain text frame dump of a scene
struct TextSurface<W: Write> {
    out: W,
    frame: usize,
}

impl<W: Write> TextSurface<W> {
    fn new(out: W) -> Self {
        Self { out, frame: 0 }
    }

    fn write_scene(&mut self, scene: &Scene) -> io::Result<()> {
        writeln!(self.out, "-- frame {} --", self.frame)?;
        for node in &scene.nodes {
            let badge = node.distance_badge.as_deref().unwrap_or("-");
            writeln!(
                self.out,
                "  node {:>3} ({:>6.1}, {:>6.1}) {:<8} d={badge}",
                node.label,
                node.center.x,
                node.center.y,
                role(node.fill),
            )?;
        }
        for edge in &scene.edges {
            if let Some((_, weight)) = &edge.weight_label {
                let marker = if edge.color == scene::COLOR_PATH { "*" } else { " " };
                writeln!(
                    self.out,
                    " {marker}edge ({:.0},{:.0})-({:.0},{:.0}) w={weight}",
                    edge.from.x, edge.from.y, edge.to.x, edge.to.y,
                )?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn draw(&mut self, scene: &Scene) {
        self.frame += 1;
        if let Err(error) = self.write_scene(scene) {
            warn!(%error, frame = self.frame, "failed to write frame");
        }
    }
}

fn role(fill: &str) -> &'static str {
    match fill {
        scene::COLOR_START => "start",
        scene::COLOR_END => "end",
        scene::COLOR_VISITED => "visited",
        scene::COLOR_PATH => "path",
        _ => "",
    }
}
