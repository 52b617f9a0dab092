use std::io;

use anyhow::Result;
use at_core::config::ArtConfig;
use clap::Parser;

pub mod cli;
pub mod shell;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Charger l'image
    let image = at_source::image::load_image(&cli.image)?;

    // 5. Boucle de commandes
    let mut shell = shell::Shell::new(image, &config)?;
    log::info!(
        "Shell prêt : résolution {}, {} caractères",
        shell.resolution(),
        shell.table().len()
    );
    shell.run(io::stdin().lock(), io::stdout().lock())
}

fn resolve_config(cli: &cli::Cli) -> Result<ArtConfig> {
    if cli.config.exists() {
        at_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ArtConfig::default())
    }
}
