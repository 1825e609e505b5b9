mod config_gen;
mod convert;
mod lookup;
mod seed;

pub use config_gen::config_generate;
pub use convert::run_convert;
pub use lookup::run_lookup;
pub use seed::run_seed;
