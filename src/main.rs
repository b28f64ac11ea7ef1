use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::DVec3;
use morton_octree::SparseOctree;

use pointprobe::ingest;
use pointprobe::probe;
use pointprobe::util::Timed;

/// Collect the points of an `.xyz` cloud lying near a query line.
#[derive(Parser, Debug)]
#[command(name = "pointprobe", version, about)]
struct Cli {
    /// Input point cloud, one `x y z` record per line
    input: PathBuf,

    /// First point of the query line, as `x,y,z`
    #[arg(long, value_parser = parse_point)]
    from: DVec3,

    /// Second point of the query line, as `x,y,z`
    #[arg(long, value_parser = parse_point)]
    to: DVec3,

    /// Collection distance around the line, in world units
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Grid cells per world unit, as a power-of-two exponent
    #[arg(long, default_value_t = 7)]
    resolution_bits: u8,

    /// Override the indexing cube's minimum corner, as `x,y,z`
    #[arg(long, value_parser = parse_point)]
    bounds_min: Option<DVec3>,

    /// Override the indexing cube's maximum corner, as `x,y,z`
    #[arg(long, value_parser = parse_point)]
    bounds_max: Option<DVec3>,
}

fn parse_point(s: &str) -> Result<DVec3, String> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = fields.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let coord = |v: &str| {
        v.parse::<f64>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(DVec3::new(coord(x)?, coord(y)?, coord(z)?))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if cli.from == cli.to {
        return Err("query line endpoints must differ".into());
    }

    let points = {
        let _t = Timed::start("ingest");
        let file =
            File::open(&cli.input).map_err(|e| format!("{}: {e}", cli.input.display()))?;
        ingest::parse_xyz(BufReader::new(file)).map_err(|e| e.to_string())?
    };
    if points.is_empty() {
        return Err("input contains no points".into());
    }
    log::info!("{} points read", points.len());

    let (min, max) = bounds(&points);
    let min = cli.bounds_min.unwrap_or(min);
    let max = cli.bounds_max.unwrap_or(max);
    let mut tree =
        SparseOctree::new(cli.resolution_bits, min, max).map_err(|e| e.to_string())?;
    {
        let _t = Timed::start("index");
        tree.add_all(points).map_err(|e| e.to_string())?;
    }
    log::info!("{} occupied voxels", tree.len());

    let hits = {
        let _t = Timed::start("probe");
        probe::collect_near_line(&tree, cli.from, cli.to, cli.threshold)
    };

    println!(
        "# {} points within {} of the line",
        hits.len(),
        cli.threshold
    );
    for p in hits {
        println!("{} {} {}", p.x, p.y, p.z);
    }
    Ok(())
}

/// Bounding box of the cloud, padded so the extreme corner and flat axes
/// stay strictly inside the cube.
fn bounds(points: &[DVec3]) -> (DVec3, DVec3) {
    let mut min = DVec3::splat(f64::INFINITY);
    let mut max = DVec3::splat(f64::NEG_INFINITY);
    for &p in points {
        min = min.min(p);
        max = max.max(p);
    }
    (min, max + DVec3::ONE)
}
