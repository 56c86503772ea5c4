pub mod accounts;
pub mod backup;
pub mod calendar;
pub mod export;
pub mod job_runs;
pub mod log;
pub mod media;
pub mod mileage;
pub mod password;
pub mod profile;
pub mod session;
