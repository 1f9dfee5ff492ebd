pub mod city_photo_service;
pub mod narration_service;
pub mod place_enrichment_service;
pub mod route_generation_service;
pub mod route_parser;
pub mod sanitizer;
pub mod tour_persistence_service;
pub mod tour_pipeline;
