use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use formats::{
    DEFAULT_TOPOLOGY_URL, IngestOptions, Topology, fetch_topology_text, ingest_topology,
    registry_from_json_str,
};
use foundation::math::Vec2;
use globe::{GlobeConfig, GlobeView};
use reqwest::Client;
use scene::World;
use scene::registry::CountryRegistry;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Boundary dataset tooling for the country globe")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the boundary topology and check that it decodes
    Fetch {
        #[arg(long, env = "GLOBE_TOPOLOGY_URL", default_value = DEFAULT_TOPOLOGY_URL)]
        url: String,

        /// Write the downloaded document here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build the globe scene from a local topology and list its countries
    Inspect {
        topology: PathBuf,

        /// Country registry JSON (array or {"countries": [...]})
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Globe config JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Resolve a surface pixel to the country under it
    Pick {
        topology: PathBuf,

        #[arg(long)]
        registry: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,

        #[arg(long, default_value_t = 900.0)]
        width: f64,

        #[arg(long, default_value_t = 520.0)]
        height: f64,

        /// Scene rotation about X in radians (defaults to the config's)
        #[arg(long, allow_hyphen_values = true)]
        rot_x: Option<f64>,

        /// Scene rotation about Y in radians (defaults to the config's)
        #[arg(long, allow_hyphen_values = true)]
        rot_y: Option<f64>,

        /// Camera distance (defaults to the config's)
        #[arg(long)]
        zoom: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Fetch { url, out } => fetch(&url, out.as_deref()).await?,
        Command::Inspect {
            topology,
            registry,
            config,
        } => inspect(&topology, registry.as_deref(), config.as_deref()).await?,
        Command::Pick {
            topology,
            registry,
            config,
            x,
            y,
            width,
            height,
            rot_x,
            rot_y,
            zoom,
        } => {
            let mut cfg = load_config(config.as_deref()).await?;
            if let Some(rot_x) = rot_x {
                cfg.initial_rotation[0] = rot_x;
            }
            if let Some(rot_y) = rot_y {
                cfg.initial_rotation[1] = rot_y;
            }
            if let Some(zoom) = zoom {
                cfg.initial_zoom = zoom;
            }
            let topology = load_topology(&topology).await?;
            let registry = load_registry(registry.as_deref()).await?;
            pick(cfg, registry, topology, Vec2::new(x, y), width, height)?;
        }
    }

    Ok(())
}

async fn fetch(url: &str, out: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let body = fetch_topology_text(&client, url).await?;
    let topology = Topology::from_json_str(&body)?;

    let objects: Vec<&str> = topology.objects.keys().map(String::as_str).collect();
    info!(url, arcs = topology.arcs.len(), ?objects, "topology decoded");

    if let Some(out) = out {
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(out, body.as_bytes()).await?;
        println!("wrote {}", out.display());
    }

    let summary = json!({
        "url": url,
        "arcs": topology.arcs.len(),
        "objects": topology
            .objects
            .iter()
            .map(|(name, geometries)| json!({"name": name, "geometries": geometries.len()}))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn inspect(
    topology: &Path,
    registry: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config(config).await?;
    let topology = load_topology(topology).await?;
    let registry = load_registry(registry).await?;

    let mut world = World::new();
    let opts = IngestOptions {
        outline_radius: cfg.outline_radius,
        pick_radius: cfg.pick_radius,
    };
    let summary = ingest_topology(&mut world, &topology, &cfg.topology_object, &registry, opts)?;
    info!(
        countries = world.len(),
        registry = registry.len(),
        matched = summary.matched,
        skipped = summary.skipped,
        "scene built"
    );

    for country in world.countries() {
        let line = json!({
            "id": country.id.index(),
            "name": country.display_name,
            "numeric": country.numeric_code,
            "iso3": country.iso3,
            "iso2": country.iso2(),
            "navigable": country.is_navigable(),
            "outline_segments": country.outline.segments.len(),
            "pick_triangles": country.pick.triangles.len(),
        });
        println!("{line}");
    }
    println!(
        "{}",
        json!({
            "countries": summary.countries,
            "matched": summary.matched,
            "skipped": summary.skipped,
        })
    );
    Ok(())
}

fn pick(
    cfg: GlobeConfig,
    registry: CountryRegistry,
    topology: Topology,
    pos_px: Vec2,
    width: f64,
    height: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = GlobeView::new(cfg, registry);
    view.show(width, height, None);
    if view
        .load_dataset::<String>(Ok(Arc::new(topology)))
        .is_none()
    {
        return Err(format!("{:?}", view.dataset_state()).into());
    }
    if view.world().is_empty() {
        return Err("topology produced no countries".into());
    }

    let hit = view.pick(pos_px).and_then(|id| view.world().country(id));
    let result = match hit {
        Some(country) => json!({
            "hit": true,
            "id": country.id.index(),
            "name": country.display_name,
            "iso3": country.iso3,
            "iso2": country.iso2(),
            "navigable": country.is_navigable(),
        }),
        None => json!({ "hit": false }),
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn load_topology(path: &Path) -> Result<Topology, Box<dyn std::error::Error>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read {}: {e}", path.display()))?;
    Ok(Topology::from_json_str(&text)?)
}

async fn load_registry(path: Option<&Path>) -> Result<CountryRegistry, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(CountryRegistry::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read {}: {e}", path.display()))?;
    Ok(registry_from_json_str(&text)?)
}

async fn load_config(path: Option<&Path>) -> Result<GlobeConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(GlobeConfig::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read {}: {e}", path.display()))?;
    Ok(GlobeConfig::from_json_str(&text)?)
}
