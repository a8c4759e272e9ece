use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sketchbook::{
    load_config_from, now_suffix_time, recent_sketches, save_as, timestamp_suffix,
    to_valid_cloud_sketch_folder_name, to_valid_sketch_folder_name, Locations, NamePolicy,
    SaveAsOptions, SaveAsOutcome, UnsavedBuffer,
};

use crate::open::open_in_editor;
use crate::prompt::{FixedPrompter, LinePrompter};

#[derive(Parser)]
#[command(name = "sketchbook", version, about = "sketch folder names and save-as")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check a sketch folder name.
    Validate {
        name: String,
        #[arg(long)]
        cloud: bool,
    },
    /// Turn any string into a valid sketch folder name.
    Sanitize {
        name: String,
        #[arg(long)]
        cloud: bool,
        /// Append a timestamp suffix as if the name were taken.
        #[arg(long)]
        exists: bool,
    },
    /// Print the timestamp suffix for the current time.
    Suffix,
    /// Save a sketch under a new name.
    SaveAs {
        sketch: PathBuf,
        #[arg(long)]
        dest: Option<PathBuf>,
        #[arg(long)]
        only_if_temp: bool,
        #[arg(long)]
        no_open: bool,
        #[arg(long)]
        wipe_original: bool,
        #[arg(long)]
        mark_recent: bool,
        /// Unsaved contents for a sketch file, as `RELATIVE_PATH=CONTENTS_FILE`.
        #[arg(long = "buffer", value_name = "FILE=CONTENTS")]
        buffers: Vec<String>,
    },
    /// List recently opened sketches.
    Recent,
}

pub(crate) fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Validate { name, cloud } => {
            let policy = if cloud {
                NamePolicy::Cloud
            } else {
                NamePolicy::Local
            };
            policy
                .validate(&name)
                .map_err(|reason| format!("invalid sketch folder name '{name}': {reason}"))?;
            println!("valid");
        }
        Commands::Sanitize {
            name,
            cloud,
            exists,
        } => {
            let sanitized = if cloud {
                to_valid_cloud_sketch_folder_name(&name, exists.then(now_suffix_time))
            } else {
                to_valid_sketch_folder_name(&name, exists, None)
            };
            println!("{sanitized}");
        }
        Commands::Suffix => {
            println!("{}", timestamp_suffix(now_suffix_time()));
        }
        Commands::SaveAs {
            sketch,
            dest,
            only_if_temp,
            no_open,
            wipe_original,
            mark_recent,
            buffers,
        } => {
            let locations = Locations::resolve()?;
            let config = load_config_from(&locations.config_path())?;
            let options = SaveAsOptions {
                exec_only_if_temp: only_if_temp,
                open_after_move: !no_open,
                wipe_original,
                mark_as_recently_opened: mark_recent || config.mark_recent_enabled(),
            };
            let buffers = read_buffers(&sketch, &buffers)?;

            let outcome = match dest {
                Some(dest) => {
                    let mut prompter = FixedPrompter::new(dest);
                    let outcome = save_as(&sketch, options, &buffers, &locations, &mut prompter)?;
                    if let Some((name, reason)) = prompter.rejected() {
                        return Err(
                            format!("invalid sketch folder name '{name}': {reason}").into()
                        );
                    }
                    outcome
                }
                None => {
                    let stdin = io::stdin();
                    let mut prompter = LinePrompter::new(stdin.lock(), io::stdout());
                    save_as(&sketch, options, &buffers, &locations, &mut prompter)?
                }
            };

            report_outcome(&sketch, outcome, config.editor_command())?;
        }
        Commands::Recent => {
            let locations = Locations::resolve()?;
            let recent = recent_sketches(&locations)?;
            if recent.is_empty() {
                println!("no recent sketches");
            } else {
                for path in recent {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn report_outcome(
    original: &Path,
    outcome: SaveAsOutcome,
    editor: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        SaveAsOutcome::Skipped => {
            println!("skipped {}: not a temporary sketch", original.display());
        }
        SaveAsOutcome::Cancelled => println!("cancelled"),
        SaveAsOutcome::Saved {
            sketch,
            reopen,
            deleted_original,
            restored,
        } => {
            println!("saved {} to {}", sketch.name, sketch.path.display());
            for path in restored {
                println!("restored {}", path.display());
            }
            if deleted_original {
                println!("deleted {}", original.display());
            }
            if reopen {
                if let Some(editor) = editor {
                    open_in_editor(editor, &sketch.path)?;
                    println!("opened {} in editor", sketch.name);
                }
            }
        }
    }
    Ok(())
}

fn read_buffers(
    sketch: &Path,
    specs: &[String],
) -> Result<Vec<UnsavedBuffer>, Box<dyn std::error::Error>> {
    let mut buffers = Vec::with_capacity(specs.len());
    for spec in specs {
        let (relative, contents_path) = spec
            .split_once('=')
            .ok_or_else(|| format!("invalid buffer '{spec}': expected FILE=CONTENTS"))?;
        let contents = fs::read_to_string(contents_path.trim())?;
        buffers.push(UnsavedBuffer::new(sketch.join(relative.trim()), contents));
    }
    Ok(buffers)
}
