mod draft_service;
mod recommendation_engine;

pub use draft_service::DraftService;
pub use recommendation_engine::RecommendationEngine;
