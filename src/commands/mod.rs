mod audit;
mod capture;

pub use audit::run_audit;
pub use capture::run_capture;
