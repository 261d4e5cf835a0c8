//! Zone graph representation and builder.

use pf_core::{FlowConfig, Point, Zone};

use crate::{ZoneError, ZoneResult};

/// Static configuration of one processing zone.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSpec {
    pub zone:        Zone,
    /// Ticks a passenger must spend at the anchor before moving on.
    pub dwell_ticks: u32,
    /// Where passengers walk to.  Rendering-only meaning beyond the arrival test.
    pub anchor:      Point,
    /// Index of this zone in the graph's sequence.
    pub ordinal:     usize,
}

// ── ZoneGraph ─────────────────────────────────────────────────────────────────

/// Strictly ordered sequence of processing zones.
///
/// Loaded once at simulation start and never mutated.  Do not construct
/// directly; use [`ZoneGraphBuilder`] or [`ZoneGraph::from_config`].
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneGraph {
    specs: Vec<ZoneSpec>,
}

impl ZoneGraph {
    /// The four reference zones with dwell and anchors taken from `config`.
    pub fn from_config(config: &FlowConfig) -> ZoneResult<Self> {
        let mut b = ZoneGraphBuilder::new();
        for (i, &zone) in Zone::PROCESSING.iter().enumerate() {
            b.add_zone(zone, config.dwell.get(zone), config.anchors[i]);
        }
        b.build()
    }

    /// First zone in the sequence, where new passengers are sent.
    #[inline]
    pub fn first(&self) -> Zone {
        self.specs[0].zone
    }

    /// Spec for `zone`, or `None` for `Complete` / zones not in the graph.
    pub fn spec(&self, zone: Zone) -> Option<&ZoneSpec> {
        self.specs.iter().find(|s| s.zone == zone)
    }

    /// Zone after `zone`; `Complete` after the last zone.
    ///
    /// Zones missing from the graph (and `Complete` itself) map to the first
    /// graph zone that follows them in `Zone` order, so progress is always
    /// forward.
    pub fn next(&self, zone: Zone) -> Zone {
        self.specs
            .iter()
            .map(|s| s.zone)
            .find(|&z| z > zone)
            .unwrap_or(Zone::Complete)
    }

    /// All zones in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneSpec> + '_ {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

// ── ZoneGraphBuilder ──────────────────────────────────────────────────────────

/// Incremental builder for [`ZoneGraph`].
///
/// Validation happens in [`build`](Self::build) so callers can chain
/// `add_zone` without handling errors at every step.
#[derive(Default)]
pub struct ZoneGraphBuilder {
    specs: Vec<ZoneSpec>,
}

impl ZoneGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a zone.  Ordinals are assigned in insertion order.
    pub fn add_zone(&mut self, zone: Zone, dwell_ticks: u32, anchor: Point) -> &mut Self {
        let ordinal = self.specs.len();
        self.specs.push(ZoneSpec { zone, dwell_ticks, anchor, ordinal });
        self
    }

    /// Validate ordering and anchors and produce the immutable graph.
    pub fn build(&mut self) -> ZoneResult<ZoneGraph> {
        let specs = std::mem::take(&mut self.specs);
        if specs.is_empty() {
            return Err(ZoneError::Empty);
        }
        for spec in &specs {
            if spec.zone.is_complete() {
                return Err(ZoneError::TerminalZone(spec.zone));
            }
            if !spec.anchor.is_finite() {
                return Err(ZoneError::BadAnchor(spec.zone));
            }
        }
        for pair in specs.windows(2) {
            if pair[1].zone <= pair[0].zone {
                return Err(ZoneError::OutOfOrder { previous: pair[0].zone, zone: pair[1].zone });
            }
        }
        Ok(ZoneGraph { specs })
    }
}
