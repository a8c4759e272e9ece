pub mod buffers;
pub mod config;
pub mod error;
pub mod model;
pub mod names;
pub mod paths;
pub mod recent;
pub mod save_as;
pub mod sketches;
pub mod validate;

pub use buffers::{save_onto_copied_sketch, UnsavedBuffer};
pub use config::{load_config_from, Config};
pub use error::{Result, SketchError};
pub use model::Sketch;
pub use names::{
    now_suffix_time, timestamp_suffix, to_valid_cloud_sketch_folder_name,
    to_valid_sketch_folder_name, DEFAULT_CLOUD_SKETCH_FOLDER_NAME, DEFAULT_FALLBACK_CHAR,
    DEFAULT_FALLBACK_FIRST_CHAR, DEFAULT_SKETCH_FOLDER_NAME,
};
pub use paths::Locations;
pub use recent::{mark_as_recently_opened, recent_sketches};
pub use save_as::{save_as, Prompter, SaveAsOptions, SaveAsOutcome};
pub use sketches::{copy_sketch, delete_sketch, is_cloud, is_temp};
pub use validate::{
    validate_cloud_sketch_folder_name, validate_sketch_folder_name, InvalidName, NamePolicy,
};
