use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::error;

use crate::error::AppError;
use crate::ingest::factory;
use crate::models::Property;
use crate::storage::rows::{BedroomRow, PhotoRow, PropertyRow};

/// Store for validated [`Property`] aggregates.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Inserts a property with its bedrooms and photos in one transaction.
    ///
    /// Returns the generated property id. On any failure nothing is
    /// written and the error is returned to the caller.
    async fn insert(&self, run: DateTime<Utc>, property: &Property) -> Result<i64, AppError>;

    /// Reads a property and its bedrooms and photos back.
    ///
    /// Returns [`AppError::NotFound`] when no property row has this id.
    async fn get_by_id(&self, property_id: i64) -> Result<Property, AppError>;

    /// Reads every stored property, ordered by id.
    async fn get_all(&self) -> Result<Vec<Property>, AppError>;

    /// Inserts each property in its own transaction, stopping at the first
    /// failure. Properties committed before the failure stay committed.
    async fn upsert_batch(
        &self,
        run: DateTime<Utc>,
        properties: &[Property],
    ) -> Result<Vec<i64>, AppError> {
        let mut ids = Vec::with_capacity(properties.len());
        for property in properties {
            ids.push(self.insert(run, property).await?);
        }
        Ok(ids)
    }
}

/// SQLite-backed [`PropertyStore`] over the `Property`, `Bedroom` and
/// `Photo` tables.
///
/// # Examples
///
/// ```no_run
/// use rental_ingest::config::DbConfig;
/// use rental_ingest::storage::{schema, PropertiesRepository, PropertyStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = schema::connect(&DbConfig::default()).await?;
/// let repo = PropertiesRepository::new(pool);
/// let property = repo.get_by_id(1).await?;
/// println!("{} in {}", property.property_type(), property.country());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PropertiesRepository {
    pool: SqlitePool,
}

impl PropertiesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_in_transaction(
        &self,
        run: DateTime<Utc>,
        property: &Property,
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let property_id = sqlx::query(
            r#"
            INSERT INTO Property (PropertyType, Country, IngestRunId)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(property.property_type().code())
        .bind(property.country().name())
        .bind(run)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        insert_bedrooms(&mut tx, property_id, property).await?;
        insert_photos(&mut tx, property_id, property).await?;

        tx.commit().await?;

        Ok(property_id)
    }

    async fn fetch_property_row(&self, property_id: i64) -> Result<Option<PropertyRow>, AppError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT Id, PropertyType, Country, IngestRunId
            FROM Property
            WHERE Id = ?
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch_bedroom_rows(&self, property_id: i64) -> Result<Vec<BedroomRow>, AppError> {
        let rows = sqlx::query_as::<_, BedroomRow>(
            r#"
            SELECT BedroomId, PropertyId, Available, RoomSize, BedSize, Rent, Deposit
            FROM Bedroom
            WHERE PropertyId = ?
            ORDER BY BedroomId
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_photo_rows(&self, property_id: i64) -> Result<Vec<PhotoRow>, AppError> {
        let rows = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT PhotoId, PropertyId, Uri
            FROM Photo
            WHERE PropertyId = ?
            ORDER BY PhotoId
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn load(&self, row: PropertyRow) -> Result<Property, AppError> {
        let (bedrooms, photos) = tokio::try_join!(
            self.fetch_bedroom_rows(row.id),
            self.fetch_photo_rows(row.id)
        )?;

        Ok(factory::reconstitute(&row, &bedrooms, &photos)?)
    }
}

async fn insert_bedrooms(
    tx: &mut Transaction<'_, Sqlite>,
    property_id: i64,
    property: &Property,
) -> Result<(), AppError> {
    for bedroom in property.bedrooms() {
        sqlx::query(
            r#"
            INSERT INTO Bedroom (PropertyId, Available, RoomSize, BedSize, Rent, Deposit)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(property_id)
        .bind(bedroom.available())
        .bind(bedroom.room_size().as_str())
        .bind(bedroom.bed_size().as_str())
        .bind(i64::from(bedroom.rent()))
        .bind(i64::from(bedroom.deposit()))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_photos(
    tx: &mut Transaction<'_, Sqlite>,
    property_id: i64,
    property: &Property,
) -> Result<(), AppError> {
    for photo in property.photos() {
        sqlx::query("INSERT INTO Photo (PropertyId, Uri) VALUES (?, ?)")
            .bind(property_id)
            .bind(photo.uri())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl PropertyStore for PropertiesRepository {
    async fn insert(&self, run: DateTime<Utc>, property: &Property) -> Result<i64, AppError> {
        self.insert_in_transaction(run, property)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to insert property."))
    }

    async fn get_by_id(&self, property_id: i64) -> Result<Property, AppError> {
        let row = self
            .fetch_property_row(property_id)
            .await
            .inspect_err(|e| error!(property_id, error = %e, "Failed to retrieve property"))?
            .ok_or(AppError::NotFound(property_id))?;

        self.load(row)
            .await
            .inspect_err(|e| error!(property_id, error = %e, "Failed to retrieve property"))
    }

    async fn get_all(&self) -> Result<Vec<Property>, AppError> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT Id, PropertyType, Country, IngestRunId
            FROM Property
            ORDER BY Id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut properties = Vec::with_capacity(rows.len());
        for row in rows {
            properties.push(self.load(row).await?);
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::{BedSize, Bedroom, Country, Photo, PropertyType, RoomSize};
    use crate::storage::schema::memory_pool;
    use chrono::TimeZone;

    type Listing = (
        PropertyType,
        Country,
        Vec<(bool, RoomSize, BedSize, u32, u32)>,
        Vec<String>,
    );

    /// Everything about a property except the ids the store assigns.
    fn listing(property: &Property) -> Listing {
        (
            property.property_type(),
            property.country(),
            property
                .bedrooms()
                .iter()
                .map(|b| (b.available(), b.room_size(), b.bed_size(), b.rent(), b.deposit()))
                .collect(),
            property.photos().iter().map(|p| p.uri().to_string()).collect(),
        )
    }

    fn run() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 6, 30, 0).unwrap()
    }

    fn property(property_type: PropertyType, bedrooms: usize, photos: &[&str]) -> Property {
        let bedrooms = (0..bedrooms)
            .map(|i| {
                let size = ["small", "medium", "large"][i % 3];
                Bedroom::new(i % 2 == 0, size, "King Size", 400 + i as i32, 900).unwrap()
            })
            .collect();
        let photos = photos.iter().map(|uri| Photo::new(uri).unwrap()).collect();
        Property::new(
            property_type,
            bedrooms,
            photos,
            Country::resolve(Country::ROI).unwrap(),
        )
        .unwrap()
    }

    async fn repository() -> PropertiesRepository {
        PropertiesRepository::new(memory_pool().await)
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let repo = repository().await;
        let input = property(
            PropertyType::House,
            5,
            &["https://aws.com/images/1", "https://aws.com/images/2"],
        );

        let id = repo.insert(run(), &input).await.unwrap();
        let stored = repo.get_by_id(id).await.unwrap();

        assert_eq!(listing(&stored), listing(&input));
        assert_eq!(stored.id(), Some(id));
        assert_eq!(stored.last_updated(), Some(run()));
        assert!(stored.bedrooms().iter().all(|b| b.property_id() == Some(id)));
        assert!(stored.bedrooms().iter().all(|b| b.id().is_some()));
        assert!(stored.photos().iter().all(|p| p.property_id() == Some(id)));
    }

    #[tokio::test]
    async fn test_round_trip_every_variant() {
        let repo = repository().await;
        let inputs = [
            property(PropertyType::Studio, 1, &[]),
            property(PropertyType::Flat, 14, &["https://aws.com/flat"]),
            property(PropertyType::House, 1, &["https://aws.com/house"]),
        ];

        for input in &inputs {
            let id = repo.insert(run(), input).await.unwrap();
            let stored = repo.get_by_id(id).await.unwrap();
            assert_eq!(listing(&stored), listing(input));
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let repo = repository().await;

        let result = repo.get_by_id(42).await;

        assert!(matches!(result, Err(AppError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_bedroom_failure_rolls_back_property() {
        let pool = memory_pool().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_bedroom BEFORE INSERT ON Bedroom
            BEGIN
                SELECT RAISE(ABORT, 'bedroom insert rejected');
            END
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        let repo = PropertiesRepository::new(pool);

        let result = repo
            .insert(run(), &property(PropertyType::Flat, 2, &["https://aws.com/1"]))
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        // The rolled back insert would have been the first row.
        assert!(matches!(repo.get_by_id(1).await, Err(AppError::NotFound(1))));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_photo_rolls_back_everything() {
        let repo = repository().await;
        let input = property(
            PropertyType::House,
            3,
            &["https://aws.com/same", "https://aws.com/same"],
        );

        let result = repo.insert(run(), &input).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(repo.get_all().await.unwrap().is_empty());

        let (bedrooms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Bedroom")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(bedrooms, 0);
    }

    #[tokio::test]
    async fn test_same_photo_on_different_properties() {
        let repo = repository().await;
        let photos = ["https://aws.com/shared"];

        let first = repo
            .insert(run(), &property(PropertyType::Studio, 1, &photos))
            .await
            .unwrap();
        let second = repo
            .insert(run(), &property(PropertyType::Studio, 1, &photos))
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_get_all_in_id_order() {
        let repo = repository().await;
        let studio = property(PropertyType::Studio, 1, &["https://aws.com/s"]);
        let flat = property(PropertyType::Flat, 3, &["https://aws.com/f"]);

        let studio_id = repo.insert(run(), &studio).await.unwrap();
        let flat_id = repo.insert(run(), &flat).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![Some(studio_id), Some(flat_id)]);
        assert_eq!(listing(&all[1]), listing(&flat));
    }

    #[tokio::test]
    async fn test_unknown_id_children_are_empty() {
        let repo = repository().await;

        assert!(repo.fetch_bedroom_rows(7).await.unwrap().is_empty());
        assert!(repo.fetch_photo_rows(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_rejected_on_read() {
        let repo = repository().await;
        sqlx::query("INSERT INTO Property (PropertyType, Country, IngestRunId) VALUES (1, 'Atlantis', ?)")
            .bind(run())
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.get_by_id(1).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::InvalidCountry(_)))
        ));
    }

    #[tokio::test]
    async fn test_upsert_batch_stops_at_first_failure() {
        let repo = repository().await;
        let batch = vec![
            property(PropertyType::Studio, 1, &["https://aws.com/a"]),
            property(PropertyType::Flat, 2, &["https://aws.com/b", "https://aws.com/b"]),
            property(PropertyType::House, 2, &["https://aws.com/c"]),
        ];

        let result = repo.upsert_batch(run(), &batch).await;

        assert!(result.is_err());
        let stored = repo.get_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(listing(&stored[0]), listing(&batch[0]));
    }

    #[tokio::test]
    async fn test_upsert_batch_returns_ids_in_order() {
        let repo = repository().await;
        let batch = vec![
            property(PropertyType::Studio, 1, &[]),
            property(PropertyType::House, 4, &[]),
        ];

        let ids = repo.upsert_batch(run(), &batch).await.unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert_eq!(
            repo.get_by_id(ids[1]).await.unwrap().property_type(),
            PropertyType::House
        );
    }
}
