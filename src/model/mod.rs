mod game;
mod league;
mod location;
mod team;

pub use game::*;
pub use league::*;
pub use location::*;
pub use team::*;
