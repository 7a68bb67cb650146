//! Subcommands and their handlers

use crate::config::{Cli, OutputFormat};
use crate::error::CliError;
use anyhow::{Context, Result};
use blamsav_formats::profile::{
    Action, Button, ChecksumReport, Colour, ProfileCodec, ProfileLocator, ProfileRecord,
    VideoResolution, detect, list,
};
use clap::{Args, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Subcommands of the `blamsav` tool
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the settings held by a record
    Show {
        /// Record file
        file: PathBuf,
    },

    /// Compare the stored checksum with the record body
    Verify {
        /// Record file
        file: PathBuf,
    },

    /// Rewrite only the checksum of a record
    ///
    /// The body is not decoded, so bindings and unknown bytes stay as they are.
    Rehash {
        /// Record file
        file: PathBuf,
    },

    /// Show the profile named by lastprof.txt
    Detect {
        /// Game data directory
        #[arg(long, env = "BLAMSAV_HCE_DIR")]
        hce_dir: PathBuf,
    },

    /// List every profile under a directory
    List {
        /// Directory to search; defaults to the savegames directory of --hce-dir
        dir: Option<PathBuf>,

        /// Game data directory
        #[arg(long, env = "BLAMSAV_HCE_DIR")]
        hce_dir: Option<PathBuf>,
    },

    /// Edit fields of a record and save it
    Set(SetArgs),
}

/// Fields `set` can change
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Record file
    pub file: PathBuf,

    /// Profile name, at most 11 characters
    #[arg(long)]
    pub name: Option<String>,

    /// Multiplayer colour
    #[arg(long, value_parser = parse_colour)]
    pub colour: Option<Colour>,

    /// Display resolution as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<VideoResolution>,

    /// Refresh rate in Hz
    #[arg(long)]
    pub refresh_rate: Option<u8>,

    /// Server port
    #[arg(long)]
    pub server_port: Option<u16>,

    /// Client port
    #[arg(long)]
    pub client_port: Option<u16>,

    /// Bind an action to a button, as ACTION=BUTTON; repeatable
    #[arg(long = "bind", value_parser = parse_binding)]
    pub bindings: Vec<Binding>,

    /// Remove every binding before applying --bind
    #[arg(long)]
    pub clear_bindings: bool,
}

impl SetArgs {
    /// Apply the requested changes to `record`
    pub fn apply(&self, record: &mut ProfileRecord) {
        if let Some(name) = &self.name {
            record.details.name.clone_from(name);
        }
        if let Some(colour) = self.colour {
            record.details.colour = colour;
        }
        if let Some(resolution) = self.resolution {
            record.video.resolution = resolution;
        }
        if let Some(refresh_rate) = self.refresh_rate {
            record.video.refresh_rate = refresh_rate;
        }
        if let Some(port) = self.server_port {
            record.network.port.server = port;
        }
        if let Some(port) = self.client_port {
            record.network.port.client = port;
        }
        if self.clear_bindings {
            record.input.clear();
        }
        for binding in &self.bindings {
            record.input.bind(binding.action, binding.button);
        }
    }
}

/// One `ACTION=BUTTON` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Action to bind
    pub action: Action,
    /// Button it goes on
    pub button: Button,
}

/// Parse `ACTION=BUTTON`
pub fn parse_binding(value: &str) -> Result<Binding, CliError> {
    let (action, button) = value
        .split_once('=')
        .ok_or_else(|| CliError::InvalidBinding(value.to_string()))?;
    let action = Action::from_name(action.trim())
        .ok_or_else(|| CliError::UnknownAction(action.to_string()))?;
    let button = Button::from_name(button.trim())
        .ok_or_else(|| CliError::UnknownButton(button.to_string()))?;
    Ok(Binding { action, button })
}

/// Parse a colour name
pub fn parse_colour(value: &str) -> Result<Colour, CliError> {
    Colour::from_name(value).ok_or_else(|| CliError::UnknownColour(value.to_string()))
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_resolution(value: &str) -> Result<VideoResolution, CliError> {
    let invalid = || CliError::InvalidResolution(value.to_string());
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    Ok(VideoResolution {
        width: width.trim().parse().map_err(|_| invalid())?,
        height: height.trim().parse().map_err(|_| invalid())?,
    })
}

/// Run the selected subcommand, writing results to `out`
pub fn handle<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let codec = ProfileCodec::new(cli.codec_options());

    match &cli.command {
        Commands::Show { file } => {
            let record = load(&codec, file)?;
            write_record(&record, cli.format, out)
        }
        Commands::Verify { file } => verify(&codec, file, cli.format, out),
        Commands::Rehash { file } => {
            let checksum = codec
                .rehash(file)
                .with_context(|| format!("Failed to rehash {}", file.display()))?;
            writeln!(out, "{checksum}")?;
            Ok(())
        }
        Commands::Detect { hce_dir } => {
            let detected = detect(&ProfileLocator::new(hce_dir), &codec)?;
            match cli.format {
                OutputFormat::Text => {
                    writeln!(out, "{}\t{}", detected.name, detected.path.display())?;
                }
                OutputFormat::Json => {
                    let value = json!({
                        "name": detected.name,
                        "path": detected.path,
                        "record": detected.record,
                    });
                    serde_json::to_writer_pretty(&mut *out, &value)?;
                    writeln!(out)?;
                }
            }
            Ok(())
        }
        Commands::List { dir, hce_dir } => {
            let dir = match (dir, hce_dir) {
                (Some(dir), _) => dir.clone(),
                (None, Some(hce_dir)) => ProfileLocator::new(hce_dir).profiles_dir(),
                (None, None) => return Err(CliError::MissingDirectory.into()),
            };
            let records = list(&dir, &codec)?;
            match cli.format {
                OutputFormat::Text => {
                    for record in &records {
                        writeln!(
                            out,
                            "{}\t{}\t{}",
                            record.details.name, record.details.colour, record.video.resolution
                        )?;
                    }
                }
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut *out, &records)?;
                    writeln!(out)?;
                }
            }
            Ok(())
        }
        Commands::Set(args) => {
            let mut record = load(&codec, &args.file)?;
            args.apply(&mut record);
            let checksum = codec
                .save(&record, &args.file)
                .with_context(|| format!("Failed to save {}", args.file.display()))?;
            info!("Updated {}", args.file.display());
            writeln!(out, "{checksum}")?;
            Ok(())
        }
    }
}

fn load(codec: &ProfileCodec, file: &Path) -> Result<ProfileRecord> {
    codec
        .load(file)
        .with_context(|| format!("Failed to load {}", file.display()))
}

fn verify<W: Write>(
    codec: &ProfileCodec,
    file: &Path,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let ChecksumReport { stored, computed } = codec.verify(file)?;
    let valid = stored == computed;

    match format {
        OutputFormat::Text => {
            writeln!(out, "stored:   {stored}")?;
            writeln!(out, "computed: {computed}")?;
            writeln!(out, "{}", if valid { "OK" } else { "MISMATCH" })?;
        }
        OutputFormat::Json => {
            let value = json!({
                "stored": stored.to_hex(),
                "computed": computed.to_hex(),
                "valid": valid,
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
    }

    if !valid {
        return Err(CliError::ChecksumMismatch {
            path: file.to_path_buf(),
            stored,
            computed,
        }
        .into());
    }
    Ok(())
}

fn write_record<W: Write>(record: &ProfileRecord, format: OutputFormat, out: &mut W) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, record)?;
        writeln!(out)?;
        return Ok(());
    }

    let details = &record.details;
    let video = &record.video;
    let audio = &record.audio;
    let mouse = &record.mouse;
    let network = &record.network;

    writeln!(out, "Profile")?;
    writeln!(out, "  name:         {}", details.name)?;
    writeln!(out, "  colour:       {}", details.colour)?;
    writeln!(out, "Video")?;
    writeln!(
        out,
        "  resolution:   {} @ {} Hz",
        video.resolution, video.refresh_rate
    )?;
    writeln!(out, "  frame rate:   {:?}", video.frame_rate)?;
    writeln!(out, "  gamma:        {}", video.gamma)?;
    writeln!(
        out,
        "  quality:      particles {:?}, textures {:?}",
        video.particles, video.texture_quality
    )?;
    writeln!(
        out,
        "  effects:      specular {}, shadows {}, decals {}",
        video.effects.specular, video.effects.shadows, video.effects.decals
    )?;
    writeln!(out, "Audio")?;
    writeln!(
        out,
        "  volume:       master {}, effects {}, music {}",
        audio.volume.master, audio.volume.effects, audio.volume.music
    )?;
    writeln!(
        out,
        "  quality:      {:?}, variety {:?}",
        audio.quality, audio.variety
    )?;
    writeln!(out, "  eax/hwa:      {}/{}", audio.eax, audio.hwa)?;
    writeln!(out, "Mouse")?;
    writeln!(
        out,
        "  sensitivity:  {}/{}, inverted {}",
        mouse.sensitivity.horizontal, mouse.sensitivity.vertical, mouse.invert_vertical_axis
    )?;
    writeln!(out, "Network")?;
    writeln!(out, "  connection:   {:?}", network.connection)?;
    writeln!(
        out,
        "  ports:        server {}, client {}",
        network.port.server, network.port.client
    )?;
    writeln!(out, "Bindings")?;
    for (action, button) in record.input.iter() {
        writeln!(out, "  {action:<16} {button}")?;
    }
    Ok(())
}
