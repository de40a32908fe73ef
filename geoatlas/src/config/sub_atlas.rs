use crate::{
    algorithm::{extraction::CutType, ordering::DEFAULT_RELATION_PASS_CEILING},
    model::AtlasCliError,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a sub-atlas extraction
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SubAtlasConfiguration {
    pub cut_type: CutType,
    /// maximum number of passes when ordering relations lower-order first, and maximum
    /// number of levels climbed from a matched entity to its parent relations. walking
    /// down a kept relation's members is not bounded by it; each member is visited once.
    pub relation_pass_ceiling: usize,
}

impl Default for SubAtlasConfiguration {
    fn default() -> Self {
        Self {
            cut_type: CutType::default(),
            relation_pass_ceiling: DEFAULT_RELATION_PASS_CEILING,
        }
    }
}

impl From<CutType> for SubAtlasConfiguration {
    fn from(cut_type: CutType) -> Self {
        Self {
            cut_type,
            ..Default::default()
        }
    }
}

impl TryFrom<&String> for SubAtlasConfiguration {
    type Error = AtlasCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: SubAtlasConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                AtlasCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                AtlasCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                AtlasCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                AtlasCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(AtlasCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        if conf.relation_pass_ceiling == 0 {
            return Err(AtlasCliError::ConfigurationError(format!(
                "relation_pass_ceiling in {f} must be at least 1"
            )));
        }
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf = SubAtlasConfiguration::default();
        assert_eq!(conf.cut_type, CutType::SoftCut);
        assert_eq!(conf.relation_pass_ceiling, 500);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let conf: SubAtlasConfiguration =
            toml::from_str("cut_type = \"hard_cut_relations_only\"").expect("decode");
        assert_eq!(conf.cut_type, CutType::HardCutRelationsOnly);
        assert_eq!(conf.relation_pass_ceiling, DEFAULT_RELATION_PASS_CEILING);
    }

    #[test]
    fn test_read_from_file() {
        let dir = std::env::temp_dir().join("geoatlas-config-tests");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let json = dir.join("extract.json");
        std::fs::write(&json, r#"{ "cut_type": "hard_cut_all", "relation_pass_ceiling": 12 }"#)
            .expect("write");
        let conf =
            SubAtlasConfiguration::try_from(&json.to_string_lossy().to_string()).expect("read");
        assert_eq!(conf.cut_type, CutType::HardCutAll);
        assert_eq!(conf.relation_pass_ceiling, 12);

        let zero = dir.join("zero.toml");
        std::fs::write(&zero, "relation_pass_ceiling = 0").expect("write");
        assert!(matches!(
            SubAtlasConfiguration::try_from(&zero.to_string_lossy().to_string()),
            Err(AtlasCliError::ConfigurationError(_))
        ));
        assert!(matches!(
            SubAtlasConfiguration::try_from(&String::from("extract.yaml")),
            Err(AtlasCliError::ConfigurationError(_))
        ));
    }
}
