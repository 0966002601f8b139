pub mod toml_loader;

pub use toml_loader::{
    load_all_attempt_scripts, load_attempt_script, load_catalog, load_question_set,
};
