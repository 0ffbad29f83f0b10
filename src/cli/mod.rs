//! Command-line interface.

pub mod args;

pub use args::{Cli, Commands, MigrateAction, MigrateArgs, SeedArgs, ServeArgs};
