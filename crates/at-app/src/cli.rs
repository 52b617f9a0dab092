use std::path::PathBuf;

use at_core::config::{ArtConfig, OutputMethod, RoundPolicy};
use clap::Parser;

/// asciitone — conversion d'images en ASCII art par luminosité.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Résolution initiale (caractères par ligne, puissance de deux).
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Arrondi initial : up, down, abs.
    #[arg(long, value_parser = parse_round)]
    pub round: Option<RoundPolicy>,

    /// Sortie initiale : console, html.
    #[arg(long, value_parser = parse_output)]
    pub output: Option<OutputMethod>,

    /// Fichier HTML produit par `output html`.
    #[arg(long)]
    pub html_path: Option<String>,

    /// Inverser la luminosité (texte sombre sur fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn parse_round(s: &str) -> Result<RoundPolicy, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_output(s: &str) -> Result<OutputMethod, String> {
    s.parse().map_err(|e| format!("{e}"))
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut ArtConfig) {
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(round) = self.round {
            config.round = round;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(ref path) = self.html_path {
            config.html_path.clone_from(path);
        }
        if self.invert {
            config.invert = true;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_is_the_only_required_argument() {
        let cli = Cli::try_parse_from(["asciitone", "photo.png"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("photo.png"));
        assert_eq!(cli.log_level, "warn");
        assert!(cli.round.is_none());
        assert!(Cli::try_parse_from(["asciitone"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "asciitone",
            "photo.png",
            "--resolution",
            "20",
            "--round",
            "down",
            "--output",
            "html",
            "--html-path",
            "art.html",
            "--invert",
        ])
        .unwrap();
        let mut config = ArtConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.resolution, 32);
        assert_eq!(config.round, RoundPolicy::NearestBelow);
        assert_eq!(config.output, OutputMethod::Html);
        assert_eq!(config.html_path, "art.html");
        assert!(config.invert);
    }

    #[test]
    fn bad_round_keyword_is_rejected() {
        assert!(Cli::try_parse_from(["asciitone", "a.png", "--round", "sideways"]).is_err());
    }
}
