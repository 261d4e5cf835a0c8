//! Fluent builder for constructing a [`Sim`].

use pf_agent::{ArrivalProcess, PassengerGenerator, PassengerStore, arrival};
use pf_core::{FlowConfig, PfResult};
use pf_mobility::{MovementEngine, MovementModel};
use pf_zone::ZoneGraph;

use crate::{MetricsAggregator, Sim, SimResult};

/// Produces a fresh arrival process for a run.  Called on build and again
/// on every [`Sim::reset`] so each run starts from the same schedule.
pub type ArrivalFactory = Box<dyn Fn(&FlowConfig) -> PfResult<Box<dyn ArrivalProcess>> + Send>;

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.zone_graph(g)`    | `ZoneGraph::from_config(&config)`         |
/// | `.arrivals(f)`      | `pf_agent::arrival::from_config`          |
/// | `.movement(m)`      | `MovementModel::from_config(&config)`     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(FlowConfig::default()).build()?;
/// sim.run_ticks(240, &mut NoopObserver);
/// println!("{}", sim.snapshot().total_processed);
/// ```
pub struct SimBuilder {
    config:   FlowConfig,
    graph:    Option<ZoneGraph>,
    arrivals: Option<ArrivalFactory>,
    movement: Option<MovementModel>,
}

impl SimBuilder {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            graph:    None,
            arrivals: None,
            movement: None,
        }
    }

    /// Walk a custom zone sequence instead of the four reference zones.
    pub fn zone_graph(mut self, graph: ZoneGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Replace the arrival process chosen by `config.arrival`.
    pub fn arrivals<F>(mut self, factory: F) -> Self
    where
        F: Fn(&FlowConfig) -> PfResult<Box<dyn ArrivalProcess>> + Send + 'static,
    {
        self.arrivals = Some(Box::new(factory));
        self
    }

    /// Override speed and arrival threshold from the config.
    pub fn movement(mut self, model: MovementModel) -> Self {
        self.movement = Some(model);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let graph = match self.graph {
            Some(g) => g,
            None    => ZoneGraph::from_config(&self.config)?,
        };
        let arrivals: ArrivalFactory = match self.arrivals {
            Some(f) => f,
            None    => Box::new(arrival::from_config),
        };
        let model = self
            .movement
            .unwrap_or_else(|| MovementModel::from_config(&self.config));

        let generator = PassengerGenerator::new(self.config.entrance, graph.first(), arrivals(&self.config)?);

        Ok(Sim {
            clock:           self.config.make_clock(),
            metrics:         MetricsAggregator::new(&self.config),
            passengers:      PassengerStore::new(),
            generator,
            engine:          MovementEngine::new(model, graph),
            total_created:   0,
            total_processed: 0,
            faults:          0,
            arrivals,
            config:          self.config,
        })
    }
}
