use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Booking, RecordId, Repository, RepositoryPtr, ServiceRecord};

pub fn create_memory_repository() -> RepositoryPtr {
    // ---
    Arc::new(MemoryRepository::default())
}

/// Process-local document store. Lists come back in insertion order.
#[derive(Default)]
pub struct MemoryRepository {
    // ---
    services: RwLock<Vec<ServiceRecord>>,
    bookings: RwLock<Vec<Booking>>,
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        // ---
        Ok(self.services.read().await.clone())
    }

    async fn get_service(&self, id: RecordId) -> Result<Option<ServiceRecord>> {
        // ---
        let services = self.services.read().await;
        Ok(services.iter().find(|s| s.id == id).cloned())
    }

    async fn upsert_service(&self, service: ServiceRecord) -> Result<()> {
        // ---
        let mut services = self.services.write().await;
        match services.iter_mut().find(|s| s.id == service.id) {
            Some(existing) => *existing = service,
            None => services.push(service),
        }
        Ok(())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<()> {
        // ---
        let mut bookings = self.bookings.write().await;
        anyhow::ensure!(
            bookings.iter().all(|b| b.id != booking.id),
            "duplicate booking id {}",
            booking.id
        );
        bookings.push(booking);
        Ok(())
    }

    async fn list_bookings(&self, email: Option<&str>) -> Result<Vec<Booking>> {
        // ---
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| email.map_or(true, |e| b.is_owned_by(e)))
            .cloned()
            .collect())
    }

    async fn get_booking(&self, id: RecordId) -> Result<Option<Booking>> {
        // ---
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn replace_booking(&self, booking: &Booking) -> Result<bool> {
        // ---
        let mut bookings = self.bookings.write().await;
        match bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => {
                *existing = booking.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_booking(&self, id: RecordId) -> Result<u64> {
        // ---
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok((before - bookings.len()) as u64)
    }
}
