use super::{AtlasFormat, PackedAtlasSerializable};
use crate::model::{
    atlas::{Atlas, PackedAtlas},
    AtlasError,
};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// writes an atlas to `path`, replacing any existing file
pub fn write_atlas<A: Atlas + ?Sized>(
    atlas: &A,
    path: &Path,
    format: AtlasFormat,
) -> Result<(), AtlasError> {
    let filename = path.to_string_lossy().to_string();
    log::info!(
        "writing atlas '{}' ({}) to {filename}",
        atlas.name(),
        atlas.size()
    );
    let serializable = PackedAtlasSerializable::from_atlas(atlas);
    let file = File::create(path).map_err(|e| AtlasError::IoError(filename.clone(), e))?;
    let writer = BufWriter::new(file);
    match format {
        AtlasFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &serializable)
                .map_err(|e| AtlasError::EncodeError(filename.clone(), e))?;
            writer
                .flush()
                .map_err(|e| AtlasError::IoError(filename.clone(), e))
        }
        AtlasFormat::JsonGz => {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer(&mut encoder, &serializable)
                .map_err(|e| AtlasError::EncodeError(filename.clone(), e))?;
            let mut writer = encoder
                .finish()
                .map_err(|e| AtlasError::IoError(filename.clone(), e))?;
            writer
                .flush()
                .map_err(|e| AtlasError::IoError(filename.clone(), e))
        }
    }
}

/// reads an atlas from `path`. the atlas is rebuilt through the builder so
/// integrity checks run again; spatial indices start unbuilt.
pub fn read_atlas(path: &Path, format: AtlasFormat) -> Result<PackedAtlas, AtlasError> {
    let filename = path.to_string_lossy().to_string();
    let file = File::open(path).map_err(|e| AtlasError::IoError(filename.clone(), e))?;
    let reader: Box<dyn std::io::Read> = match format {
        AtlasFormat::Json => Box::new(BufReader::new(file)),
        AtlasFormat::JsonGz => Box::new(BufReader::new(GzDecoder::new(file))),
    };
    let serializable: PackedAtlasSerializable = serde_json::from_reader(reader)
        .map_err(|e| AtlasError::DecodeError(filename.clone(), e))?;
    let atlas = serializable.into_atlas()?;
    log::info!(
        "read atlas '{}' ({}) from {filename}",
        atlas.name(),
        atlas.size()
    );
    Ok(atlas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{atlas::equality_ops, entity::EntityId, fixtures};
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("geoatlas-codec-tests");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir.join(name)
    }

    #[test]
    fn test_round_trip_both_formats() {
        let atlas = fixtures::neighborhood_atlas();
        for format in [AtlasFormat::Json, AtlasFormat::JsonGz] {
            let path = temp_file(&format!("neighborhood{}", format.extension()));
            atlas.save(&path, format).expect("save");
            let loaded = PackedAtlas::load(&path).expect("load");
            assert!(
                equality_ops::differences(&atlas, &loaded).is_empty(),
                "round trip through {format} changed the atlas"
            );
            assert_eq!(loaded.metadata(), atlas.metadata());
            assert_eq!(
                loaded.node_in_edge_ids(EntityId(2)),
                atlas.node_in_edge_ids(EntityId(2))
            );
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_file("does-not-exist.json");
        match PackedAtlas::load(&path) {
            Err(AtlasError::IoError(name, _)) => assert!(name.ends_with("does-not-exist.json")),
            other => panic!("expected io error, found {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_file_is_a_decode_error() {
        let path = temp_file("corrupt.json");
        std::fs::write(&path, "{ \"metadata\": 5 }").expect("write");
        assert!(matches!(
            PackedAtlas::load(&path),
            Err(AtlasError::DecodeError(_, _))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
