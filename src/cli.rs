//! Command-line surface.
//!
//! One source of music per run: an explicit song list, a directory, or the
//! removable-media mountpoint. `--shuffle` and `--halt` modify behavior;
//! bad usage is a configuration error reported before the control loop
//! ever starts.

use std::path::PathBuf;

use crate::error::{JukeError, Result};

pub const USAGE: &str = "\
Usage: lcdjuke [OPTION]
  --dir DIR          play every audio file in DIR
  --recursive        with --dir, descend into subdirectories
  --usb              mount and play the removable-media music directory
  --shuffle          start with the playlist shuffled
  --halt             halt the host after the quit button is pressed
  --songs FILE...    play exactly these files, in order (must be last)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Explicit ordered file list.
    Files(Vec<PathBuf>),
    /// Scan a directory.
    Dir(PathBuf),
    /// Mount-check the configured device and scan its mountpoint.
    Usb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub source: Source,
    pub shuffle: bool,
    pub halt: bool,
    /// Set only when `--recursive` was given; otherwise the config decides.
    pub recursive: Option<bool>,
}

/// Parse the process arguments (without the program name).
pub fn parse<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut source: Option<Source> = None;
    let mut shuffle = false;
    let mut halt = false;
    let mut recursive = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        // The original player used single-dash long options; accept both.
        match arg.trim_start_matches('-') {
            "dir" => {
                let dir = it
                    .next()
                    .ok_or_else(|| JukeError::Config("--dir needs a directory".into()))?;
                set_source(&mut source, Source::Dir(PathBuf::from(dir)))?;
            }
            "usb" => set_source(&mut source, Source::Usb)?,
            "songs" => {
                let files: Vec<PathBuf> = it.by_ref().map(PathBuf::from).collect();
                if files.is_empty() {
                    return Err(JukeError::Config("--songs needs at least one file".into()));
                }
                set_source(&mut source, Source::Files(files))?;
            }
            "recursive" => recursive = Some(true),
            "shuffle" => shuffle = true,
            "halt" => halt = true,
            _ => {
                return Err(JukeError::Config(format!("unknown argument: {arg}")));
            }
        }
    }

    let source =
        source.ok_or_else(|| JukeError::Config("one of --dir, --usb or --songs is required".into()))?;

    Ok(Args {
        source,
        shuffle,
        halt,
        recursive,
    })
}

fn set_source(slot: &mut Option<Source>, source: Source) -> Result<()> {
    if slot.is_some() {
        return Err(JukeError::Config(
            "--dir, --usb and --songs are mutually exclusive".into(),
        ));
    }
    *slot = Some(source);
    Ok(())
}

#[cfg(test)]
mod tests;
