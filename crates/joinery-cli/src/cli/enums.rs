use clap::ValueEnum;

/// Format of a configuration file written by `joinery init`
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ConfigFormat {
    /// joinery.toml
    #[value(name = "toml")]
    Toml,

    /// joinery.json
    #[value(name = "json")]
    Json,
}

impl ConfigFormat {
    /// File name the configuration is written to.
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "joinery.toml",
            ConfigFormat::Json => "joinery.json",
        }
    }
}
