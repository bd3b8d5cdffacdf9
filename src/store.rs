use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite, Transaction,
};
use std::{fs, path::Path, str::FromStr};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Booking, JourneyResponse, Pricelist, SimplifiedProvider};
use crate::planets::Planet;

/// Identity and expiry of a stored price list
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPricelist {
    pub id: String,
    pub valid_until: DateTime<Utc>,
}

impl StoredPricelist {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until > now
    }
}

/// Flights offered on one hop of the latest price list
#[derive(Debug, Clone, Default)]
pub struct HopOffers {
    pub distance: i64,
    pub offers: Vec<SimplifiedProvider>,
}

/// Shareable SQLite-backed store for price lists, cached searches and bookings
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

/// Timestamps are stored as fixed-width UTC RFC 3339 text so they order lexically.
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Failed to parse stored timestamp '{}'", raw))?
        .with_timezone(&Utc))
}

impl Store {
    /// Open the database named in the configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::connect(&config.database_url).await
    }

    /// Open (creating if needed) the SQLite database and apply the schema
    pub async fn connect(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid DATABASE_URL '{}'", database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .context("Failed to open SQLite database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply database schema")?;

        tracing::info!("Connected to database: {}", database_url);
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// The price list that expires last, if any has been stored
    pub async fn latest_pricelist(&self) -> Result<Option<StoredPricelist>> {
        let row = sqlx::query(
            "SELECT id, valid_until FROM pricelists ORDER BY valid_until DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest price list")?;

        match row {
            Some(row) => {
                let id: String = row.try_get("id")?;
                let valid_until: String = row.try_get("valid_until")?;
                Ok(Some(StoredPricelist {
                    id,
                    valid_until: decode_timestamp(&valid_until)?,
                }))
            }
            None => Ok(None),
        }
    }

    pub async fn pricelist_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricelists WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to look up price list")?;
        Ok(count > 0)
    }

    /// Store a price list with its legs and providers
    ///
    /// Inserting a list that is already stored is a no-op and returns `false`.
    /// Otherwise the oldest lists are pruned until fewer than `max_pricelists`
    /// remain, then the new one is written in a single transaction.
    pub async fn insert_pricelist(&self, pricelist: &Pricelist, max_pricelists: u32) -> Result<bool> {
        if self.pricelist_exists(&pricelist.id).await? {
            tracing::debug!("Price list {} already stored", pricelist.id);
            return Ok(false);
        }

        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        loop {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricelists")
                .fetch_one(&mut *tx)
                .await?;
            if count < i64::from(max_pricelists) {
                break;
            }
            let oldest: Option<String> =
                sqlx::query_scalar("SELECT id FROM pricelists ORDER BY valid_until ASC LIMIT 1")
                    .fetch_optional(&mut *tx)
                    .await?;
            match oldest {
                Some(id) => {
                    delete_pricelist(&mut tx, &id).await?;
                    tracing::info!("Pruned price list {}", id);
                }
                None => break,
            }
        }

        for leg in &pricelist.legs {
            let route = &leg.route_info;
            sqlx::query(
                "INSERT INTO legs (id, pricelist_id, route_info_id, from_id, from_name, to_id, to_name, distance)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&leg.id)
            .bind(&pricelist.id)
            .bind(&route.id)
            .bind(&route.from.id)
            .bind(&route.from.name)
            .bind(&route.to.id)
            .bind(&route.to.name)
            .bind(route.distance)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert leg {}", leg.id))?;

            for provider in &leg.providers {
                sqlx::query(
                    "INSERT INTO providers (id, pricelist_id, leg_id, company_id, company_name, price, flight_start, flight_end)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&provider.id)
                .bind(&pricelist.id)
                .bind(&leg.id)
                .bind(&provider.company.id)
                .bind(&provider.company.name)
                .bind(provider.price)
                .bind(encode_timestamp(provider.flight_start))
                .bind(encode_timestamp(provider.flight_end))
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert provider {}", provider.id))?;
            }
        }

        sqlx::query("INSERT INTO pricelists (id, valid_until) VALUES (?, ?)")
            .bind(&pricelist.id)
            .bind(encode_timestamp(pricelist.valid_until))
            .execute(&mut *tx)
            .await
            .context("Failed to insert price list")?;

        tx.commit().await.context("Failed to commit price list")?;

        tracing::info!(
            "Stored price list {} ({} legs, valid until {})",
            pricelist.id,
            pricelist.legs.len(),
            pricelist.valid_until
        );
        Ok(true)
    }

    /// Distance and provider offers for a direct hop, ordered by departure
    pub async fn hop_offers(&self, pricelist_id: &str, from: Planet, to: Planet) -> Result<HopOffers> {
        let distance: Option<i64> = sqlx::query_scalar(
            "SELECT distance FROM legs WHERE pricelist_id = ? AND from_name = ? AND to_name = ? LIMIT 1",
        )
        .bind(pricelist_id)
        .bind(from.name())
        .bind(to.name())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query leg")?;

        let Some(distance) = distance else {
            return Ok(HopOffers::default());
        };

        let rows = sqlx::query(
            "SELECT p.company_id, p.company_name, p.price, p.flight_start, p.flight_end
             FROM legs l
             JOIN providers p ON p.pricelist_id = l.pricelist_id AND p.leg_id = l.id
             WHERE l.pricelist_id = ? AND l.from_name = ? AND l.to_name = ?
             ORDER BY p.flight_start ASC",
        )
        .bind(pricelist_id)
        .bind(from.name())
        .bind(to.name())
        .fetch_all(&self.pool)
        .await
        .context("Failed to query providers")?;

        let mut offers = Vec::with_capacity(rows.len());
        for row in rows {
            let flight_start: String = row.try_get("flight_start")?;
            let flight_end: String = row.try_get("flight_end")?;
            offers.push(SimplifiedProvider {
                company_id: row.try_get("company_id")?,
                company_name: row.try_get("company_name")?,
                price: row.try_get("price")?,
                flight_start: decode_timestamp(&flight_start)?,
                flight_end: decode_timestamp(&flight_end)?,
            });
        }

        tracing::debug!("{} offers for {} -> {} in {}", offers.len(), from, to, pricelist_id);
        Ok(HopOffers { distance, offers })
    }

    pub async fn cached_journeys(
        &self,
        pricelist_id: &str,
        from: Planet,
        to: Planet,
    ) -> Result<Option<JourneyResponse>> {
        let cached: Option<String> = sqlx::query_scalar(
            "SELECT response FROM cached_routes WHERE pricelist_id = ? AND from_planet = ? AND to_planet = ?",
        )
        .bind(pricelist_id)
        .bind(from.name())
        .bind(to.name())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query cached routes")?;

        cached
            .map(|raw| serde_json::from_str(&raw).context("Failed to deserialize cached routes"))
            .transpose()
    }

    pub async fn cache_journeys(
        &self,
        pricelist_id: &str,
        from: Planet,
        to: Planet,
        response: &JourneyResponse,
    ) -> Result<()> {
        let raw = serde_json::to_string(response).context("Failed to serialize routes")?;

        sqlx::query(
            "INSERT OR REPLACE INTO cached_routes (pricelist_id, from_planet, to_planet, response)
             VALUES (?, ?, ?, ?)",
        )
        .bind(pricelist_id)
        .bind(from.name())
        .bind(to.name())
        .bind(raw)
        .execute(&self.pool)
        .await
        .context("Failed to cache routes")?;
        Ok(())
    }

    /// Drop cached searches of every price list except `keep_pricelist_id`
    pub async fn clean_cache(&self, keep_pricelist_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cached_routes WHERE pricelist_id != ?")
            .bind(keep_pricelist_id)
            .execute(&self.pool)
            .await
            .context("Failed to clean route cache")?;
        Ok(result.rows_affected())
    }

    /// Store a booking against a stored price list
    ///
    /// Returns `None` when the price list is not stored. The existence check
    /// and the insert run as one statement.
    pub async fn add_booking(&self, booking: &Booking) -> Result<Option<Uuid>> {
        let id = Uuid::new_v4();
        let company_names =
            serde_json::to_string(&booking.company_names).context("Failed to serialize company names")?;

        let result = sqlx::query(
            "INSERT INTO bookings (
                id, pricelist_id, company_names, start_time, first_name, last_name,
                total_price, total_duration, from_planet, destination, valid_until
             )
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE EXISTS (SELECT 1 FROM pricelists WHERE id = ?)",
        )
        .bind(id.to_string())
        .bind(&booking.pricelist_id)
        .bind(company_names)
        .bind(&booking.start_time)
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(booking.total_price)
        .bind(&booking.total_duration)
        .bind(&booking.routes.from)
        .bind(&booking.routes.destination)
        .bind(&booking.valid_until)
        .bind(&booking.pricelist_id)
        .execute(&self.pool)
        .await
        .context("Failed to insert booking")?;

        if result.rows_affected() == 0 {
            tracing::debug!("Price list {} not stored, booking rejected", booking.pricelist_id);
            return Ok(None);
        }

        tracing::debug!("Inserted booking {} for price list {}", id, booking.pricelist_id);
        Ok(Some(id))
    }
}

/// Remove a price list together with everything that refers to it
async fn delete_pricelist(tx: &mut Transaction<'_, Sqlite>, pricelist_id: &str) -> Result<()> {
    for statement in [
        "DELETE FROM providers WHERE pricelist_id = ?",
        "DELETE FROM legs WHERE pricelist_id = ?",
        "DELETE FROM cached_routes WHERE pricelist_id = ?",
        "DELETE FROM bookings WHERE pricelist_id = ?",
        "DELETE FROM pricelists WHERE id = ?",
    ] {
        sqlx::query(statement)
            .bind(pricelist_id)
            .execute(&mut **tx)
            .await
            .with_context(|| format!("Failed to delete price list {}", pricelist_id))?;
    }
    Ok(())
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }
    Ok(())
}
