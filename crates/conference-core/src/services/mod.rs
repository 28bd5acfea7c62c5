//! Application services

pub mod resolver;
pub mod conference_service;
pub mod seed_defaults;
pub mod seed_service;

pub use resolver::Resolver;
pub use conference_service::{CategoryPricing, ConferenceService, ConferenceStatus, PricingSource};
pub use seed_defaults::{default_writes, SeedWrite};
pub use seed_service::{SeedAction, SeedMode, SeedOutcome, SeedReport, SeedService};
