//! CLI command implementations

pub mod init;
pub mod list;
pub mod transform;

pub use init::InitArgs;
pub use list::ListArgs;
pub use transform::TransformArgs;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite an ESTree JSON document with the enabled transforms
    Transform(TransformArgs),

    /// List available transforms
    List(ListArgs),

    /// Initialize modshift configuration in current directory
    Init(InitArgs),
}
