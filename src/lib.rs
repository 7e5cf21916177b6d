pub use crate::analytics::*;
pub use crate::bipartite::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::feed::*;
pub use crate::game::*;
pub use crate::node::*;
pub use crate::record::*;
pub use crate::search::*;

pub mod analytics;
pub mod bipartite;
pub mod config;
pub mod error;
pub mod feed;
pub mod game;
pub mod logger;
pub mod menu;
pub mod node;
pub mod record;
pub mod search;
