//! Redis-backed document store.
//!
//! Each document is a JSON string under `<kind>:<id>`. Set indexes track
//! membership so listings never need `KEYS`:
//!
//! - `services` / `bookings`: every id of that kind
//! - `bookings:email:<email>`: ids of one owner's bookings
//!
//! Writes touching a document and its indexes go through a `MULTI` pipeline.

use anyhow::{Context, Result};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::{Booking, RecordId, Repository, RepositoryPtr, ServiceRecord};

const SERVICES_INDEX: &str = "services";
const BOOKINGS_INDEX: &str = "bookings";

fn service_key(id: RecordId) -> String {
    format!("service:{id}")
}

fn booking_key(id: RecordId) -> String {
    format!("booking:{id}")
}

fn owner_index(email: &str) -> String {
    format!("bookings:email:{email}")
}

/// Opens a client for `url`. No connection is made until first use.
pub fn create_redis_repository(url: &str) -> Result<RepositoryPtr> {
    // ---
    let client = Client::open(url).context("Invalid Redis connection string")?;
    Ok(Arc::new(RedisRepository::new(client)))
}

pub struct RedisRepository {
    // ---
    client: Client,
}

impl RedisRepository {
    // ---
    pub fn new(client: Client) -> Self {
        // ---
        Self { client }
    }

    async fn conn(&self) -> Result<MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }

    async fn load<T: DeserializeOwned>(
        conn: &mut MultiplexedConnection,
        key: &str,
    ) -> Result<Option<T>> {
        // ---
        let doc: Option<String> = conn.get(key).await?;
        doc.map(|d| serde_json::from_str(&d).with_context(|| format!("Corrupt document at {key}")))
            .transpose()
    }

    /// Loads every document whose id is a member of `index`.
    async fn load_indexed<T: DeserializeOwned>(
        conn: &mut MultiplexedConnection,
        index: &str,
        key_of: fn(RecordId) -> String,
    ) -> Result<Vec<T>> {
        // ---
        let ids: Vec<String> = conn.smembers(index).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys = ids
            .iter()
            .map(|id| RecordId::parse(id).map(key_of))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Corrupt index {index}: {e}"))?;

        // Ids whose document vanished between SMEMBERS and MGET come back nil.
        let docs: Vec<Option<String>> = redis::cmd("MGET").arg(&keys).query_async(conn).await?;
        docs.into_iter()
            .flatten()
            .map(|d| serde_json::from_str(&d).with_context(|| format!("Corrupt document in {index}")))
            .collect()
    }
}

#[async_trait::async_trait]
impl Repository for RedisRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        // ---
        let mut conn = self.conn().await?;
        Self::load_indexed(&mut conn, SERVICES_INDEX, service_key).await
    }

    async fn get_service(&self, id: RecordId) -> Result<Option<ServiceRecord>> {
        // ---
        let mut conn = self.conn().await?;
        Self::load(&mut conn, &service_key(id)).await
    }

    async fn upsert_service(&self, service: ServiceRecord) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let doc = serde_json::to_string(&service)?;

        redis::pipe()
            .atomic()
            .set(service_key(service.id), doc)
            .ignore()
            .sadd(SERVICES_INDEX, service.id.to_string())
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let doc = serde_json::to_string(&booking)?;
        let id = booking.id.to_string();

        redis::pipe()
            .atomic()
            .set(booking_key(booking.id), doc)
            .ignore()
            .sadd(BOOKINGS_INDEX, &id)
            .ignore()
            .sadd(owner_index(&booking.email), &id)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        tracing::debug!("Stored booking {} for {}", id, booking.email);
        Ok(())
    }

    async fn list_bookings(&self, email: Option<&str>) -> Result<Vec<Booking>> {
        // ---
        let mut conn = self.conn().await?;
        let index = match email {
            Some(email) => owner_index(email),
            None => BOOKINGS_INDEX.to_string(),
        };
        Self::load_indexed(&mut conn, &index, booking_key).await
    }

    async fn get_booking(&self, id: RecordId) -> Result<Option<Booking>> {
        // ---
        let mut conn = self.conn().await?;
        Self::load(&mut conn, &booking_key(id)).await
    }

    /// The owner email is never changed by a replace, so indexes stay put.
    async fn replace_booking(&self, booking: &Booking) -> Result<bool> {
        // ---
        let mut conn = self.conn().await?;
        let doc = serde_json::to_string(booking)?;

        // SET .. XX only writes over an existing key.
        let reply: Option<String> = redis::cmd("SET")
            .arg(booking_key(booking.id))
            .arg(doc)
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    async fn delete_booking(&self, id: RecordId) -> Result<u64> {
        // ---
        let mut conn = self.conn().await?;
        let Some(booking) = Self::load::<Booking>(&mut conn, &booking_key(id)).await? else {
            return Ok(0);
        };

        let id_str = id.to_string();
        let (deleted,): (u64,) = redis::pipe()
            .atomic()
            .del(booking_key(id))
            .srem(BOOKINGS_INDEX, &id_str)
            .ignore()
            .srem(owner_index(&booking.email), &id_str)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(deleted)
    }
}
