pub mod ip_block;
pub mod seed_run;

pub use ip_block::Entity as IpBlockEntity;
pub use seed_run::Entity as SeedRunEntity;
