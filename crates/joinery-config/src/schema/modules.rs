use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModulesConfig {
    /// How each source file is wrapped inside its bundle
    #[serde(default)]
    pub wrapper: ModuleStyle,

    /// Which module loader definition is prepended to bundles
    #[serde(default)]
    pub definition: ModuleStyle,

    /// Modules required automatically once a bundle has loaded
    #[serde(default)]
    pub auto_require: IndexMap<String, Vec<String>>,
}

/// Module system used for wrapping and definitions. `false` disables it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleStyle {
    #[default]
    CommonJs,
    Amd,
    Disabled,
}

impl ModuleStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleStyle::CommonJs => "commonjs",
            ModuleStyle::Amd => "amd",
            ModuleStyle::Disabled => "false",
        }
    }
}

impl Serialize for ModuleStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModuleStyle::Disabled => serializer.serialize_bool(false),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for ModuleStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => Ok(ModuleStyle::Disabled),
            Repr::Flag(true) => Ok(ModuleStyle::CommonJs),
            Repr::Name(name) => match name.as_str() {
                "commonjs" => Ok(ModuleStyle::CommonJs),
                "amd" => Ok(ModuleStyle::Amd),
                other => Err(de::Error::custom(format!(
                    "unknown module style `{other}`, expected \"commonjs\", \"amd\" or false"
                ))),
            },
        }
    }
}
