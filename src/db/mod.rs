pub mod initialize;
pub mod job_runs;
pub mod log;
pub mod migrate;
pub mod mileage;
pub mod pool;
pub mod profiles;
pub mod reference;
pub mod sessions;
pub mod stats;
pub mod users;
