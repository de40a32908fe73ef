use clap::{Parser, Subcommand};
use geoatlas::{
    algorithm::extraction::{sub_atlas_ops, EntitySelector},
    config::SubAtlasConfiguration,
    model::{
        atlas::{Atlas, PackedAtlas},
        codec::AtlasFormat,
        geometry::Polygon,
        multi::MultiAtlas,
        AtlasCliError,
    },
};
use geo::Geometry;
use std::{path::Path, sync::Arc};
use wkt::TryFromWkt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AtlasAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// print the metadata of an atlas file as JSON
    Info {
        #[arg(long, help = "path to .json or .json.gz atlas file")]
        atlas_file: String,
    },
    /// write the part of an atlas within an extent to a new atlas file
    Extract {
        #[arg(long, help = "path to .json or .json.gz atlas file")]
        atlas_file: String,
        #[arg(long, help = "path to file containing a WKT POLYGON used as the boundary")]
        extent_file: String,
        #[arg(long, help = "path to .toml or .json file with sub-atlas parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for the sub-atlas, .json or .json.gz")]
        output_file: String,
    },
    /// combine several atlas files into one
    Merge {
        #[arg(long, num_args = 1.., required = true, help = "paths to the atlas files to merge, earlier files win on shared identifiers")]
        atlas_file: Vec<String>,
        #[arg(long, help = "name of the merged atlas")]
        name: Option<String>,
        #[arg(long, help = "output path for the merged atlas, .json or .json.gz")]
        output_file: String,
    },
}

pub fn run(app: &App) -> Result<(), AtlasCliError> {
    env_logger::init();
    match app {
        App::Info { atlas_file } => {
            let atlas = PackedAtlas::load(Path::new(atlas_file))?;
            let metadata = serde_json::to_string_pretty(atlas.metadata())?;
            println!("{metadata}");
            Ok(())
        }
        App::Extract {
            atlas_file,
            extent_file,
            configuration_file,
            output_file,
        } => {
            let conf = match configuration_file {
                None => Ok(SubAtlasConfiguration::default()),
                Some(f) => {
                    log::info!("reading sub-atlas configuration from {f}");
                    SubAtlasConfiguration::try_from(f)
                }
            }?;
            let boundary = read_extent_wkt(extent_file)?;
            let out_path = Path::new(output_file);
            let format = AtlasFormat::try_from(out_path)?;
            let atlas = PackedAtlas::load(Path::new(atlas_file))?;
            match sub_atlas_ops::extract(&atlas, &EntitySelector::Boundary(&boundary), &conf)? {
                Some(sub_atlas) => {
                    sub_atlas.save(out_path, format)?;
                    eprintln!("finished.");
                }
                None => eprintln!("no entities of {atlas_file} fall within {extent_file}, nothing written."),
            }
            Ok(())
        }
        App::Merge {
            atlas_file,
            name,
            output_file,
        } => {
            let out_path = Path::new(output_file);
            let format = AtlasFormat::try_from(out_path)?;
            let atlases = atlas_file
                .iter()
                .map(|f| {
                    let atlas: Arc<dyn Atlas> = Arc::new(PackedAtlas::load(Path::new(f))?);
                    Ok(atlas)
                })
                .collect::<Result<Vec<_>, AtlasCliError>>()?;
            let mut multi = MultiAtlas::new(atlases);
            if let Some(name) = name {
                multi.set_name(name);
            }
            let merged = PackedAtlas::from_atlas(&multi)?;
            merged.save(out_path, format)?;
            eprintln!("finished.");
            Ok(())
        }
    }
}

/// reads the extraction boundary, which must be a single WKT polygon
fn read_extent_wkt(extent_file: &str) -> Result<Polygon, AtlasCliError> {
    let wkt_str = std::fs::read_to_string(extent_file).map_err(|e| {
        AtlasCliError::ConfigurationError(format!("unable to read file {extent_file}: {e}"))
    })?;
    let geometry: Geometry<f64> = Geometry::try_from_wkt_str(&wkt_str).map_err(|e| {
        AtlasCliError::ConfigurationError(format!("unable to read WKT in {extent_file}: {e}"))
    })?;
    match geometry {
        Geometry::Polygon(polygon) => Ok(polygon),
        Geometry::Rect(rect) => Ok(rect.to_polygon()),
        _ => Err(AtlasCliError::ConfigurationError(format!(
            "extent in {extent_file} must be a POLYGON"
        ))),
    }
}

fn main() {
    let args = AtlasAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("geoatlas failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
