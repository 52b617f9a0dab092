use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::DEFAULT_CHARSET;
use crate::error::CoreError;

/// Largest accepted resolution (characters per row).
pub const MAX_RESOLUTION: u32 = 1 << 14;

/// Configuration de démarrage du rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use at_core::config::{ArtConfig, RoundPolicy};
/// let config = ArtConfig::default();
/// assert_eq!(config.resolution, 2);
/// assert_eq!(config.round, RoundPolicy::NearestEither);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ArtConfig {
    /// Characters per output row. Must be a power of two.
    pub resolution: u32,
    /// Tie-break policy handed to the matcher on every render.
    pub round: RoundPolicy,
    /// Where `asciiArt` writes its result.
    pub output: OutputMethod,
    /// HTML output file.
    pub html_path: String,
    /// Font family used by the HTML writer.
    pub html_font: String,
    /// Initial character set.
    pub charset: String,
    /// Inverser la luminosité des tuiles (pour fond clair).
    pub invert: bool,
}

/// Tie-break rule used when no character matches a brightness exactly.
///
/// Parsed from the shell keywords `up`, `down` and `abs`.
///
/// # Example
/// ```
/// use at_core::config::RoundPolicy;
/// let p: RoundPolicy = "up".parse().unwrap();
/// assert_eq!(p, RoundPolicy::NearestAbove);
/// assert!("sideways".parse::<RoundPolicy>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum RoundPolicy {
    /// Closest character whose brightness is >= the target.
    #[serde(alias = "up")]
    NearestAbove,
    /// Closest character whose brightness is <= the target.
    #[serde(alias = "down")]
    NearestBelow,
    /// Smallest absolute difference, either side.
    #[default]
    #[serde(alias = "abs")]
    NearestEither,
}

impl FromStr for RoundPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::NearestAbove),
            "down" => Ok(Self::NearestBelow),
            "abs" => Ok(Self::NearestEither),
            other => Err(CoreError::Config(format!("round inconnu : {other}"))),
        }
    }
}

/// Output destination for rendered art.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputMethod {
    /// Print to stdout.
    #[default]
    #[serde(alias = "console")]
    Console,
    /// Write an HTML page.
    #[serde(alias = "html")]
    Html,
}

impl FromStr for OutputMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "html" => Ok(Self::Html),
            other => Err(CoreError::Config(format!("sortie inconnue : {other}"))),
        }
    }
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            resolution: 2,
            round: RoundPolicy::NearestEither,
            output: OutputMethod::Console,
            html_path: "out.html".to_string(),
            html_font: "Courier New".to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            invert: false,
        }
    }
}

impl ArtConfig {
    /// Clamp all fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let clamped = self.resolution.clamp(1, MAX_RESOLUTION).next_power_of_two();
        if clamped != self.resolution {
            log::warn!(
                "Résolution {} ajustée à {clamped} (puissance de deux requise)",
                self.resolution
            );
            self.resolution = clamped;
        }
        if self.html_font.trim().is_empty() {
            self.html_font = Self::default().html_font;
        }
        if self.html_path.trim().is_empty() {
            self.html_path = Self::default().html_path;
        }
        let legal: String = self
            .charset
            .chars()
            .filter(|&c| crate::charset::is_legal(c))
            .collect();
        if legal.len() != self.charset.len() {
            log::warn!("Caractères non imprimables retirés du charset");
            self.charset = legal;
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    art: Option<ArtSection>,
}

/// `[art]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct ArtSection {
    resolution: Option<u32>,
    round: Option<RoundPolicy>,
    output: Option<OutputMethod>,
    html_path: Option<String>,
    html_font: Option<String>,
    charset: Option<String>,
    invert: Option<bool>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use at_core::config::{parse_config, OutputMethod};
/// let config = parse_config("[art]\nresolution = 64\noutput = \"html\"\n").unwrap();
/// assert_eq!(config.resolution, 64);
/// assert_eq!(config.output, OutputMethod::Html);
/// ```
pub fn parse_config(content: &str) -> Result<ArtConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ArtConfig::default();
    if let Some(a) = file.art {
        if let Some(v) = a.resolution {
            config.resolution = v;
        }
        if let Some(v) = a.round {
            config.round = v;
        }
        if let Some(v) = a.output {
            config.output = v;
        }
        if let Some(v) = a.html_path {
            config.html_path = v;
        }
        if let Some(v) = a.html_font {
            config.html_font = v;
        }
        if let Some(v) = a.charset {
            config.charset = v;
        }
        if let Some(v) = a.invert {
            config.invert = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use at_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ArtConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}
