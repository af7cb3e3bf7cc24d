//! Generator configuration

pub mod generator;

pub use generator::{GeneratorConfig, Neo4jDefaults, PostgresDefaults, RedisDefaults, CONFIG_ENV};
