pub mod check;
pub mod healthcheck;
pub mod run;
