use crate::shared::error::CollectionError;

/// A source that gathers one complete value of `T` per call.
pub trait DataCollector<T> {
    fn collect(&mut self) -> Result<T, CollectionError>;
    fn validate(&self) -> Result<(), CollectionError>;
    fn health_check(&mut self) -> bool;
}

pub trait Validatable {
    fn validate(&self) -> Result<(), String>;
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
