use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Drag-and-drop options from esdtoolconfig.json
///
/// A strict subset of the converter's command line: enough to pick the game,
/// locate the unpacked game files and pass a few extra flags through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default)]
    pub game: Option<String>,

    #[serde(rename = "basedir", default)]
    pub base_dir: Option<String>,

    #[serde(default)]
    pub backup: bool,

    /// Extra ESD files, emitted as `name=path` after `-extra`
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra: IndexMap<String, String>,

    /// Free-form options appended verbatim after tokenizing
    #[serde(rename = "other_options", default, deserialize_with = "null_as_default")]
    pub other_options: String,
}

impl OptionsConfig {
    /// Game flag name, if one is configured
    pub fn game(&self) -> Option<&str> {
        non_blank(self.game.as_deref())
    }

    /// Base game directory, if one is configured
    pub fn base_dir(&self) -> Option<&str> {
        non_blank(self.base_dir.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// Hand-edited configs sometimes carry `null` where a map or string belongs
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
