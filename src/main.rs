use std::process::ExitCode;

use clap::Parser;

use city_generator::city::{self, City};
use city_generator::config::CityConfig;
use city_generator::error::CityError;
use city_generator::export::{self, PreviewLayer};
use city_generator::mesh::{self, BuildingStyle, StlFormat};
use city_generator::{ascii, viewer};

#[derive(Parser, Debug)]
#[command(name = "city_generator")]
#[command(about = "Generate procedural city layouts and export them as STL meshes")]
struct Args {
    /// Grid side length in cells
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file; command-line values override it
    #[arg(short, long)]
    config: Option<String>,

    /// Cells advanced between branch decisions
    #[arg(long)]
    spacing: Option<usize>,

    /// Probability of spawning each side street
    #[arg(long)]
    bloom: Option<f64>,

    /// Probability that a street stops after a run
    #[arg(long)]
    stopping: Option<f64>,

    /// Probability that a stopping street ends instead of turning
    #[arg(long)]
    blind: Option<f64>,

    /// Probability that open land becomes a building
    #[arg(long)]
    density: Option<f64>,

    /// Building height at the city edge
    #[arg(long)]
    min_height: Option<f64>,

    /// Building height at the city center
    #[arg(long)]
    max_height: Option<f64>,

    /// Export the city mesh to an STL file (e.g., "city.stl")
    #[arg(long)]
    stl: Option<String>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii_stl: bool,

    /// Export a PNG preview of the grid
    #[arg(long)]
    png: Option<String>,

    /// Export a PNG of building heights
    #[arg(long)]
    heights_png: Option<String>,

    /// Export the grid as an ASCII text file
    #[arg(long)]
    ascii: Option<String>,

    /// Print the grid to the terminal
    #[arg(long)]
    print: bool,

    /// Open the interactive viewer instead of exporting
    #[arg(long, conflicts_with_all = ["stl", "ascii_stl", "png", "heights_png", "ascii", "print"])]
    view: bool,
}

impl Args {
    /// Build the run config: defaults, then the JSON file, then command-line values.
    fn to_config(&self) -> Result<CityConfig, CityError> {
        let mut config = match &self.config {
            Some(path) => CityConfig::from_json_file(path)?,
            None => CityConfig::default(),
        };

        if let Some(v) = self.size { config.city_size = v; }
        if let Some(v) = self.spacing { config.spacing = v; }
        if let Some(v) = self.bloom { config.bloom_factor = v; }
        if let Some(v) = self.stopping { config.stopping_factor = v; }
        if let Some(v) = self.blind { config.blind_factor = v; }
        if let Some(v) = self.density { config.city_density = v; }
        if let Some(v) = self.min_height { config.min_height = v; }
        if let Some(v) = self.max_height { config.max_height = v; }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        config.random_seed = Some(config.random_seed.unwrap_or_else(rand::random));

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.view {
        return match viewer::run_viewer(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Viewer error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &CityConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating city with seed: {}", config.random_seed.unwrap_or_default());
    println!("Grid size: {}x{}", config.city_size, config.city_size);

    let city = city::generate_city(config)?;
    report(&city);

    if args.print {
        print!("{}", ascii::render_city(&city));
    }

    if let Some(ref path) = args.ascii {
        ascii::export_ascii(&city, path)?;
        println!("Exported ASCII map to: {}", path);
    }

    // Heights are sampled once and shared by every consumer
    let needs_heights = args.heights_png.is_some() || args.stl.is_some();
    let heights = needs_heights.then(|| city.building_heights());

    if let Some(ref path) = args.png {
        export::export_city_png(&city, None, PreviewLayer::Roads, path)?;
        println!("Exported preview to: {}", path);
    }

    if let Some(ref path) = args.heights_png {
        export::export_city_png(&city, heights.as_ref(), PreviewLayer::Heights, path)?;
        println!("Exported height preview to: {}", path);
    }

    if let (Some(path), Some(heights)) = (&args.stl, &heights) {
        println!("Assembling city mesh...");
        let city_mesh = mesh::assemble_city_mesh(&city, heights, &BuildingStyle::default());
        println!("  {} vertices, {} triangles", city_mesh.vertices.len(), city_mesh.triangle_count());

        let format = if args.ascii_stl { StlFormat::Ascii } else { StlFormat::Binary };
        mesh::export_stl(&city_mesh, path, format)?;
        println!("Exported mesh to: {}", path);
    }

    Ok(())
}

fn report(city: &City) {
    let stats = city.stats();
    let total = (city.size() * city.size()) as f64;
    println!(
        "Street walk: {} branches ({} blocked, {} dead ends, {} turns)",
        city.walk.branches, city.walk.blocked, city.walk.dead_ends, city.walk.turns
    );
    println!(
        "Streets: {} ({:.1}%), buildings: {} ({:.1}%), open land: {}",
        stats.streets,
        100.0 * stats.streets as f64 / total,
        stats.buildings,
        100.0 * stats.buildings as f64 / total,
        stats.empty
    );
    let road_types: Vec<String> = city::count_road_types(&city.roads)
        .into_iter()
        .map(|(kind, n)| format!("{} {}", n, kind.display_name()))
        .collect();
    println!("Road types: {}", road_types.join(", "));
}
