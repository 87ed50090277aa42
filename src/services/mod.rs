pub mod recommendations;

pub use recommendations::RecommendationEngine;
