pub mod alpha_compositor;
pub mod background_stats;
pub mod border_sampler;
pub mod config;
pub mod hole_filler;
pub mod mask;
pub mod mask_builder;
pub mod mask_refiner;
pub mod pipeline;
pub mod threshold;
