use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::models::{Avanue, Message, NewShow, Show, ShowAdd, ShowDetail, ShowUpdate};
use crate::store::{Enrollments, Store};
use crate::validation::Validator;

/// Show lifecycle bound to one unit of work.
pub struct ShowService<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ShowService<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    fn shows(&mut self) -> Store<'_, Show> {
        Store::new(&mut *self.conn)
    }

    async fn find(&mut self, id: i64) -> Result<Show, ServiceError> {
        self.shows()
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Show {} does not exist", id)))
    }

    pub async fn list_shows(&mut self) -> Result<Vec<Show>, ServiceError> {
        Ok(self.shows().get_all().await?)
    }

    /// The show with its roster and venue.
    pub async fn get_show(&mut self, id: i64) -> Result<ShowDetail, ServiceError> {
        let show = self.find(id).await?;
        let customer_list = Enrollments::new(&mut *self.conn).customers_of(id).await?;
        let avanue = match show.avanue_id {
            Some(avanue_id) => Store::<Avanue>::new(&mut *self.conn).get(avanue_id).await?,
            None => None,
        };
        Ok(ShowDetail {
            show,
            customer_list,
            avanue,
        })
    }

    /// Create a show. All three fields are required; a present zero is a value.
    ///
    /// Only the lower bound applies here; the upper bounds are enforced by
    /// `update_show`.
    pub async fn enroll_show(&mut self, payload: ShowAdd) -> Result<Show, ServiceError> {
        let title = Validator::require("title", payload.title)?;
        let age_limit = Validator::require("age_limit", payload.age_limit)?;
        let head_count = Validator::require("head_count", payload.head_count)?;
        Validator::validate_name("title", &title)?;
        Validator::validate_non_negative("age_limit", age_limit)?;
        Validator::validate_non_negative("head_count", head_count)?;

        let show = self
            .shows()
            .add(&NewShow {
                title,
                age_limit,
                head_count,
            })
            .await?;
        tracing::info!("Show {} created with {} seats", show.id, show.head_count);
        Ok(show)
    }

    pub async fn delete_show(&mut self, id: i64) -> Result<Message, ServiceError> {
        let show = self.find(id).await?;
        self.shows().delete(show.id).await?;

        tracing::info!("Show {} deleted", show.id);
        Ok(Message::new(format!("Show {} has been deleted", show.id)))
    }

    /// Apply the fields present in `payload`.
    ///
    /// Out-of-range `age_limit` or `head_count` values fail the whole update;
    /// nothing is written.
    pub async fn update_show(&mut self, id: i64, payload: ShowUpdate) -> Result<Show, ServiceError> {
        let mut show = self.find(id).await?;

        if let Some(title) = payload.title {
            Validator::validate_name("title", &title)?;
            show.title = title;
        }
        if let Some(age_limit) = payload.age_limit {
            Validator::validate_age_limit(age_limit)?;
            show.age_limit = age_limit;
        }
        if let Some(head_count) = payload.head_count {
            Validator::validate_head_count(head_count)?;
            show.head_count = head_count;
        }

        self.shows().save(&show).await?;
        tracing::info!("Show {} updated", show.id);
        Ok(show)
    }
}
