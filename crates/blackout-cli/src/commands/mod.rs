pub mod completions;
pub mod generate;
pub mod init_config;
pub mod kpi;
pub mod likelihood;
pub mod report;
pub mod telemetry;
