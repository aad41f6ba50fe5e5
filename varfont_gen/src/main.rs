// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command line front end: compiles a glyph-set description into a blob, C
//! source or debug dump, and prints the glyphs of an existing blob.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use varfont::FontReader;
use varfont_gen::{build_glyph_set, debug_dump, Description, OutputTarget};

#[derive(Parser, Debug)]
#[command(version, about = "Compiles glyph sets into VAR1 bitmap fonts")]
struct Args {
    /// Log each glyph as it is encoded (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a glyph-set description.
    Compile {
        /// The description, a JSON file.
        description: PathBuf,
        /// `VariableFont` (C source), `binary` or `debug`. Overrides the
        /// description's `output_type`.
        #[arg(short = 't', long)]
        output_type: Option<OutputTarget>,
        /// Output path; the extension is replaced to suit the output type.
        /// Defaults to the description's path. Debug dumps go to stdout
        /// unless this is given.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print every glyph of a compiled `.bin` font.
    Inspect {
        /// The blob.
        blob: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match args.command {
        Command::Compile {
            description,
            output_type,
            output,
        } => compile(&description, output_type, output.as_deref()),
        Command::Inspect { blob } => inspect(&blob),
    }
}

fn compile(path: &Path, output_type: Option<OutputTarget>, output: Option<&Path>) -> Result<()> {
    let description =
        Description::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    let Some(target) = output_type.or(description.output) else {
        bail!(
            "{} has no output_type and none was given on the command line",
            path.display()
        );
    };
    let set = build_glyph_set(&description)
        .with_context(|| format!("failed to compile {}", path.display()))?;
    let artifacts = target
        .emit(&set, output.unwrap_or(path))
        .with_context(|| format!("failed to compile {}", path.display()))?;

    if target == OutputTarget::Debug && output.is_none() {
        let mut stdout = io::stdout().lock();
        for artifact in &artifacts {
            stdout.write_all(&artifact.contents)?;
        }
        return Ok(());
    }
    for artifact in &artifacts {
        fs::write(&artifact.path, &artifact.contents)
            .with_context(|| format!("failed to write {}", artifact.path.display()))?;
        log::info!("wrote {}", artifact.path.display());
    }
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let reader = FontReader::new(&bytes)
        .with_context(|| format!("{} is not a VAR1 font", path.display()))?;
    let glyphs = reader
        .entries()
        .map(|entry| Ok((entry.code, reader.glyph(entry.code)?)))
        .collect::<Result<Vec<_>, varfont::Error>>()
        .with_context(|| format!("{} is corrupt", path.display()))?;

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}: {} glyphs, {} px tall, {} bytes",
        path.display(),
        reader.len(),
        u32::from(reader.rows()) * 8,
        bytes.len()
    )?;
    stdout.write_all(debug_dump(glyphs.iter().map(|(code, bitmap)| (*code, bitmap))).as_bytes())?;
    Ok(())
}
