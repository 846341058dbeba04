//! Configuration types deserialized from `fabgen.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The top-level project configuration parsed from `fabgen.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectMeta,
    /// The three input documents.
    pub inputs: InputsConfig,
    /// Where and what to write.
    #[serde(default)]
    pub output: OutputConfig,
    /// I/O ring overrides.
    #[serde(default)]
    pub io: IoConfig,
    /// Generation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Project metadata.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectMeta {
    /// Project name, used as the output base name when `output.name` is unset.
    #[serde(default)]
    pub name: Option<String>,
}

/// Input document paths, relative to the directory holding `fabgen.toml`.
#[derive(Debug, Deserialize)]
pub struct InputsConfig {
    /// Technology library.
    pub technology: String,
    /// Tile library.
    pub tiles: String,
    /// Fabric specification.
    pub fabric: String,
}

/// Output settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory, relative to the project directory.
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Output base name.
    #[serde(default)]
    pub name: Option<String>,
    /// Formats to write (`"def"`, `["def", "lef"]` or `"all"`).
    ///
    /// Accepts either a single string or a list of strings. Empty means all.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub formats: Vec<String>,
    /// Layer carrying I/O pin shapes.
    #[serde(default = "default_pin_layer")]
    pub pin_layer: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            name: None,
            formats: Vec::new(),
            pin_layer: default_pin_layer(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_pin_layer() -> String {
    "met5".to_string()
}

/// I/O ring overrides.
#[derive(Debug, Default, Deserialize)]
pub struct IoConfig {
    /// Pin `[width, height]` in microns, replacing the fabric's pin size.
    #[serde(default)]
    pub pin_size: Option<[f64; 2]>,
}

/// Engine settings.
#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    /// Expand tiles in parallel.
    #[serde(default)]
    pub parallel: bool,
    /// Treat recoverable input oddities as errors.
    #[serde(default)]
    pub strict: bool,
}

/// Deserializes a field that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
