pub mod config;
pub mod deploy;
pub mod measure;
pub mod routes;
pub mod run;
pub mod sample;
pub mod timeline;
