//! Path anomaly demo.
//!
//! Trains a toy sequence memory on a circular trajectory, then scores a set
//! of perturbed trajectories against it. The backend here is a
//! nearest-neighbour transition table: it remembers which pattern followed
//! which and predicts the successor of the closest remembered pattern.
//!
//! Run with: cargo run --example path_anomaly

use gridsdr::config::{AnomalyConfig, SequenceMemoryConfig};
use gridsdr::{
    AnomalyDetector, Encoder, GridCellPopulationEncoder, Layer, Position, Sdr, SequenceBackend,
    SequenceMemory,
};

const TRAIN_STEPS: usize = 4000;
const TEST_STEPS: usize = 1000;
const DT: f64 = 0.016;

struct TransitionTable {
    width: usize,
    min_overlap: f64,
    transitions: Vec<(Sdr, Sdr)>,
    previous: Option<Sdr>,
}

impl TransitionTable {
    fn recall(&self, input: &Sdr) -> gridsdr::Result<Sdr> {
        let needed = (input.num_set() as f64 * self.min_overlap).ceil() as usize;
        let mut best: Option<(usize, &Sdr)> = None;
        for (pattern, successor) in &self.transitions {
            let overlap = pattern.num_similar(input)?;
            if overlap >= needed && best.map_or(true, |(o, _)| overlap > o) {
                best = Some((overlap, successor));
            }
        }
        Ok(best.map_or_else(|| Sdr::new(self.width), |(_, s)| s.clone()))
    }
}

impl Layer for TransitionTable {
    fn compute(&mut self, input: &Sdr, learn: bool) -> gridsdr::Result<Sdr> {
        if learn {
            if let Some(prev) = self.previous.take() {
                self.transitions.push((prev, input.clone()));
            }
        }
        let prediction = self.recall(input)?;
        self.previous = Some(input.clone());
        Ok(prediction)
    }

    fn reset(&mut self) {
        self.previous = None;
    }

    fn input_size(&self) -> usize {
        self.width
    }

    fn output_size(&self) -> usize {
        self.width
    }
}

impl SequenceBackend for TransitionTable {
    fn from_config(input_size: usize, config: &SequenceMemoryConfig) -> gridsdr::Result<Self> {
        Ok(Self {
            width: input_size,
            min_overlap: config.connected_permanence,
            transitions: Vec::new(),
            previous: None,
        })
    }
}

fn circle(t: f64, radius: f64) -> Position {
    let a = t * std::f64::consts::PI;
    Position::new(a.cos() * radius + 100.0, a.sin() * radius + 100.0)
}

type Detector = AnomalyDetector<Position, GridCellPopulationEncoder, SequenceMemory<TransitionTable>>;

fn mean_anomaly(detector: &mut Detector, path: impl Fn(f64) -> Position) -> anyhow::Result<f64> {
    detector.reset();
    let mut t = 0.0;
    for _ in 0..TEST_STEPS {
        t += DT;
        detector.step(path(t), false)?;
    }
    Ok(detector.mean_score())
}

fn main() -> anyhow::Result<()> {
    let encoder = GridCellPopulationEncoder::new(32, 0)?;
    let sample = encoder.encode(Position::new(30.0, -1.0))?;
    let memory = SequenceMemory::<TransitionTable>::for_sample(&sample, SequenceMemoryConfig::default())?;

    let config = AnomalyConfig {
        history_len: TEST_STEPS,
        ..Default::default()
    };
    let mut detector = AnomalyDetector::new(encoder, memory, config)?;

    println!("Training on a circular path ({} steps)...", TRAIN_STEPS);
    let mut t = 0.0;
    for _ in 0..TRAIN_STEPS {
        t += DT;
        detector.step(circle(t, 100.0), true)?;
    }
    println!(
        "  {} transitions stored\n",
        detector.layer().backend().transitions.len()
    );

    let scenarios: Vec<(&str, Box<dyn Fn(f64) -> Position>)> = vec![
        ("Normal", Box::new(|t| circle(t, 100.0))),
        ("Shift 5 px", Box::new(|t| {
            let p = circle(t, 100.0);
            Position::new(p.x, p.y + 5.0)
        })),
        ("Shift 50 px", Box::new(|t| {
            let p = circle(t, 100.0);
            Position::new(p.x, p.y + 50.0)
        })),
        ("Revolve at (200, 200)", Box::new(|t| {
            let p = circle(t, 100.0);
            Position::new(p.x + 200.0, p.y + 200.0)
        })),
        ("Radius at 105", Box::new(|t| circle(t, 105.0))),
        ("Reverse rotation direction", Box::new(|t| circle(-t, 105.0))),
        ("Fixed at (50, 50)", Box::new(|_| Position::new(50.0, 50.0))),
    ];

    println!("Mean anomaly score per trajectory:");
    for (name, path) in &scenarios {
        let score = mean_anomaly(&mut detector, path)?;
        let flag = if detector.is_anomalous(score) { "  <- anomalous" } else { "" };
        println!("  {:<28} {:.3}{}", name, score, flag);
    }

    Ok(())
}
