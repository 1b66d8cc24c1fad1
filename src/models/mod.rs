pub mod computer;
pub mod computer_attribute;
pub mod computer_step;
pub mod computer_technician;
pub mod profile;
pub mod profile_attribute;
pub mod profile_step;
pub mod setup_step;
pub mod technician;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::computer::{self, Entity as Computer};
    pub use super::computer_attribute::{self, Entity as ComputerAttribute};
    pub use super::computer_step::{self, Entity as ComputerStep};
    pub use super::computer_technician::{self, Entity as ComputerTechnician};
    pub use super::profile::{self, Entity as Profile};
    pub use super::profile_attribute::{self, Entity as ProfileAttribute};
    pub use super::profile_step::{self, Entity as ProfileStep};
    pub use super::setup_step::{self, Entity as SetupStep};
    pub use super::technician::{self, Entity as Technician};
}
