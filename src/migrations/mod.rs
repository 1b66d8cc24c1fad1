pub use sea_orm_migration::prelude::*;

mod m20250512_000001_create_technicians;
mod m20250512_000002_create_setup_steps;
mod m20250512_000003_create_profiles;
mod m20250512_000004_create_computers;
mod m20250512_000005_create_profile_steps;
mod m20250512_000006_create_computer_steps;
mod m20250512_000007_create_computer_technicians;
mod m20250512_000008_create_profile_attributes;
mod m20250512_000009_create_computer_attributes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_000001_create_technicians::Migration),
            Box::new(m20250512_000002_create_setup_steps::Migration),
            Box::new(m20250512_000003_create_profiles::Migration),
            Box::new(m20250512_000004_create_computers::Migration),
            Box::new(m20250512_000005_create_profile_steps::Migration),
            Box::new(m20250512_000006_create_computer_steps::Migration),
            Box::new(m20250512_000007_create_computer_technicians::Migration),
            Box::new(m20250512_000008_create_profile_attributes::Migration),
            Box::new(m20250512_000009_create_computer_attributes::Migration),
        ]
    }
}
