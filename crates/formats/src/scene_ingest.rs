use scene::World;
use scene::geometry::{Ring, build_outline, build_pick_surface, is_usable_ring};
use scene::registry::{CountryRegistry, match_country};
use scene::world::NewCountry;
use tracing::debug;

use crate::topology::{CountryFeature, Topology, TopologyError};

/// Sphere radii for country geometry; slightly above the ocean sphere (radius 1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IngestOptions {
    pub outline_radius: f64,
    pub pick_radius: f64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            outline_radius: 1.001,
            pick_radius: 1.001,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IngestSummary {
    pub countries: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Adds one scene country per feature with at least one usable ring.
pub fn ingest_features(
    world: &mut World,
    features: &[CountryFeature],
    registry: &CountryRegistry,
    opts: IngestOptions,
) -> IngestSummary {
    let mut summary = IngestSummary::default();

    for feature in features {
        let rings: Vec<Ring> = feature
            .rings
            .iter()
            .filter(|r| is_usable_ring(r))
            .cloned()
            .collect();
        if rings.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let matched = match_country(registry, feature.numeric_code, feature.name.as_deref());
        let record = matched.record.cloned();
        let display_name = record
            .as_ref()
            .map(|r| r.name.clone())
            .or_else(|| feature.name.clone())
            .or_else(|| matched.iso3.clone())
            .unwrap_or_else(|| "?".to_string());

        if record.is_none() {
            debug!(name = %display_name, code = ?feature.numeric_code, "feature has no registry match");
        } else {
            summary.matched += 1;
        }

        world.spawn_country(NewCountry {
            numeric_code: feature.numeric_code,
            iso3: matched.iso3,
            display_name,
            record,
            outline: build_outline(&rings, opts.outline_radius),
            pick: build_pick_surface(&rings, opts.pick_radius),
        });
        summary.countries += 1;
    }

    summary
}

/// Resolves the named collection of `topology` and ingests it into `world`.
pub fn ingest_topology(
    world: &mut World,
    topology: &Topology,
    object: &str,
    registry: &CountryRegistry,
    opts: IngestOptions,
) -> Result<IngestSummary, TopologyError> {
    let features = topology.features(object)?;
    Ok(ingest_features(world, &features, registry, opts))
}
