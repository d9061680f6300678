pub mod embed;
pub mod lookup;
pub mod search;

pub use embed::*;
pub use lookup::*;
pub use search::*;

/// Branch used when a request does not name one.
pub const DEFAULT_BRANCH: &str = "stable";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}
