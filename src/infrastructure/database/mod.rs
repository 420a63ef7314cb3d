mod memory_repository;
mod redis_repository;
mod seed;

#[cfg(test)]
mod tests;

pub use memory_repository::create_memory_repository;
pub use redis_repository::create_redis_repository;
pub use seed::seed_services;
