// Adapters layer: concrete implementations of the domain ports (game sources, projection, output).

pub mod game_source;
pub mod projector;
pub mod writer;
