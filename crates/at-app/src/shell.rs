use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use at_ascii::brightness_table::CharacterBrightnessTable;
use at_ascii::geometry::next_power_of_two;
use at_ascii::pipeline::RenderPipeline;
use at_core::charset::{MIN_CHARSET_SIZE, is_legal, legal_range, ordered_range};
use at_core::config::{ArtConfig, OutputMethod, RoundPolicy};
use at_core::error::CoreError;
use at_core::frame::FrameBuffer;
use at_export::ArtWriter;
use at_export::console::{ConsoleWriter, format_row};
use at_export::html::HtmlWriter;
use thiserror::Error;

/// Invite affichée avant chaque commande.
pub const PROMPT: &str = ">>> ";

/// Erreurs de commande : le message est affiché tel quel et le shell continue.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Did not add due to incorrect format.")]
    AddFormat,
    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,
    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,
    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBounds,
    #[error("Did not change rounding method due to incorrect format.")]
    RoundFormat,
    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,
    #[error("Did not execute. Charset is too small.")]
    CharsetTooSmall,
    #[error("Did not execute due to incorrect command.")]
    UnknownCommand,
    #[error(transparent)]
    Render(#[from] CoreError),
    #[error("Did not write output: {0}")]
    Output(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Outcome of one command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Legal resolution range `(min, max)` for an image of `width`×`height`.
///
/// Below `min` the tile edge of the padded image is taller than the padded
/// height and the art has no rows. `max` is the original width, or `min` when
/// the image is narrower than that.
#[must_use]
pub fn resolution_bounds(width: u32, height: u32) -> (u32, u32) {
    let min = (next_power_of_two(width) / next_power_of_two(height)).max(1);
    (min, width.max(min))
}

/// Parse an `add`/`remove` operand: a single legal char, `all`, `space`, or
/// a range `a-z` in either order.
fn parse_char_operand(operand: &str) -> Option<RangeInclusive<char>> {
    match operand {
        "all" => Some(legal_range()),
        "space" => Some(' '..=' '),
        _ => {
            let chars: Vec<char> = operand.chars().collect();
            match chars.as_slice() {
                &[a, '-', b] if is_legal(a) && is_legal(b) => Some(ordered_range(a, b)),
                &[c] if is_legal(c) => Some(c..=c),
                _ => None,
            }
        }
    }
}

/// Shell interactif : édite le charset et les réglages, puis rend l'image.
pub struct Shell {
    image: FrameBuffer,
    table: CharacterBrightnessTable,
    pipeline: RenderPipeline,
    resolution: u32,
    round: RoundPolicy,
    output: OutputMethod,
    html_path: String,
    html_font: String,
}

impl Shell {
    /// Shell over `image`, initialised from `config`.
    ///
    /// The configured resolution is halved or doubled until it lies within
    /// [`resolution_bounds`].
    ///
    /// # Errors
    /// Returns an error if a configured character has no glyph.
    pub fn new(image: FrameBuffer, config: &ArtConfig) -> Result<Self> {
        let mut table = CharacterBrightnessTable::new();
        table
            .add_all(config.charset.chars())
            .context("Charset de configuration invalide")?;

        let (min, max) = resolution_bounds(image.width, image.height);
        let mut resolution = config.resolution.max(1);
        while resolution > max && resolution > 1 {
            resolution /= 2;
        }
        while resolution < min {
            resolution *= 2;
        }
        if resolution != config.resolution {
            log::warn!(
                "Résolution {} hors de [{min}, {max}] pour une image {}×{}, ramenée à {resolution}",
                config.resolution,
                image.width,
                image.height
            );
        }

        Ok(Self {
            image,
            table,
            pipeline: RenderPipeline::new().with_invert(config.invert),
            resolution,
            round: config.round,
            output: config.output,
            html_path: config.html_path.clone(),
            html_font: config.html_font.clone(),
        })
    }

    /// Current characters per row.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Current character set.
    #[must_use]
    pub fn table(&self) -> &CharacterBrightnessTable {
        &self.table
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// Command errors are printed to `out` and the loop continues.
    ///
    /// # Errors
    /// Returns an error only if reading `input` or writing `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line.context("Lecture de la commande échouée")?;
            match self.execute(&line, &mut out) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Ok(())
    }

    /// Execute one command line. Words are separated by single spaces.
    ///
    /// # Errors
    /// The [`ShellError`] to report to the user.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, ShellError> {
        if line == "exit" {
            return Ok(Flow::Exit);
        }
        log::debug!("Commande : {line:?}");

        let mut words = line.split(' ');
        let command = words.next().unwrap_or_default();
        let operand = words.next();
        match command {
            "chars" => self.print_chars(out)?,
            "add" => {
                let range = operand
                    .and_then(parse_char_operand)
                    .ok_or(ShellError::AddFormat)?;
                self.table.add_range(range)?;
            }
            "remove" => {
                let range = operand
                    .and_then(parse_char_operand)
                    .ok_or(ShellError::RemoveFormat)?;
                self.table.remove_range(range);
            }
            "res" => self.change_resolution(operand, out)?,
            "round" => {
                self.round = match operand {
                    Some("up") => RoundPolicy::NearestAbove,
                    Some("down") => RoundPolicy::NearestBelow,
                    Some("abs") => RoundPolicy::NearestEither,
                    _ => return Err(ShellError::RoundFormat),
                };
            }
            "output" => {
                self.output = match operand {
                    Some("console") => OutputMethod::Console,
                    Some("html") => OutputMethod::Html,
                    _ => return Err(ShellError::OutputFormat),
                };
            }
            "asciiArt" => self.render(out)?,
            _ => return Err(ShellError::UnknownCommand),
        }
        Ok(Flow::Continue)
    }

    fn print_chars<W: Write>(&self, out: &mut W) -> Result<(), ShellError> {
        let chars: Vec<char> = self.table.chars().collect();
        writeln!(out, "{}", format_row(&chars)).map_err(|e| ShellError::Output(e.into()))
    }

    fn change_resolution<W: Write>(
        &mut self,
        operand: Option<&str>,
        out: &mut W,
    ) -> Result<(), ShellError> {
        let candidate = match operand {
            Some("up") => self.resolution.checked_mul(2),
            Some("down") => Some(self.resolution / 2),
            None => return Err(ShellError::ResolutionBounds),
            Some(_) => return Err(ShellError::ResolutionFormat),
        };
        let (min, max) = resolution_bounds(self.image.width, self.image.height);
        let resolution = candidate
            .filter(|r| (min..=max).contains(r))
            .ok_or(ShellError::ResolutionBounds)?;

        self.resolution = resolution;
        self.pipeline.invalidate_cache();
        log::info!("Résolution : {resolution}");
        writeln!(out, "Resolution set to {resolution}").map_err(|e| ShellError::Output(e.into()))
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<(), ShellError> {
        if self.table.len() < MIN_CHARSET_SIZE {
            return Err(ShellError::CharsetTooSmall);
        }
        let art = self
            .pipeline
            .render(&self.image, self.resolution, &self.table, self.round)?;
        let written = match self.output {
            OutputMethod::Console => ConsoleWriter::new(&mut *out).write_art(&art),
            OutputMethod::Html => {
                HtmlWriter::new(&self.html_path, &self.html_font).write_art(&art)
            }
        };
        written.map_err(|e| ShellError::Output(e.into()))
    }
}
