mod game;
pub use game::*;

mod draft;
pub use draft::*;

mod filters;
pub use filters::*;

mod stats;
pub use stats::*;
