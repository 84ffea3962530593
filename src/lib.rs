pub mod constants;
pub mod coord;
pub mod error;
pub mod pile;
pub mod sampler;
pub mod cascade;
pub mod record;
pub mod stats;
pub mod sim;
pub mod ensemble;

// renderers for the final grid and the cascade-size totals
pub mod chart;
pub mod gif_exporter;
pub mod png_exporter;
