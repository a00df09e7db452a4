pub mod browse;
pub mod recommendations;
