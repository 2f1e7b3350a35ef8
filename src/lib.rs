pub mod aws;
pub mod config;
pub mod ec2;
pub mod error;
pub mod exclusion;
pub mod logging;
pub mod notify;
pub mod stopper;
pub mod types;
