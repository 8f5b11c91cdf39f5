//! Host settings for the GraphiQL workbench.
//!
//! The host page tells the workbench where its GraphQL endpoint lives and
//! how to authenticate. Those settings come from a `.graphiqlrc` file (YAML
//! or JSON) found by walking up from a start directory.

mod error;
mod loader;
mod settings;

pub use error::{ConfigError, Result};
pub use loader::{find_config, load_settings, load_settings_from_str};
pub use settings::Settings;
