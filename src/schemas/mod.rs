pub mod computer;
pub mod profile;
pub mod step;
pub mod technician;

pub use computer::*;
pub use profile::*;
pub use step::*;
pub use technician::*;
