pub mod constants;
pub mod engine;
pub mod ephemeris;
pub mod luna_errors;
pub mod lunar;
pub mod numeric;
pub mod observer;
pub mod rate;
pub mod scheduler;
pub mod solar;
pub mod time;
pub mod topocentric;
