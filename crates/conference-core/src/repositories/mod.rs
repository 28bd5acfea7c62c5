//! Repository traits (ports)

pub mod configuration_repository;

pub use configuration_repository::ConfigurationRepository;

#[cfg(test)]
pub use configuration_repository::MockConfigurationRepository;
