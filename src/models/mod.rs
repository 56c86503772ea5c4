pub mod job_run;
pub mod mileage;
pub mod profile;
pub mod reference;
pub mod role;
pub mod user;
