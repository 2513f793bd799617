use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::models::{Avanue, AvanueAdd, AvanueDetail, AvanueUpdate, Message, NewAvanue, Show};
use crate::store::Store;
use crate::validation::Validator;

/// Venue lifecycle bound to one unit of work.
pub struct AvanueService<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> AvanueService<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    fn avanues(&mut self) -> Store<'_, Avanue> {
        Store::new(&mut *self.conn)
    }

    async fn find(&mut self, id: i64) -> Result<Avanue, ServiceError> {
        self.avanues()
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Avanue {} does not exist", id)))
    }

    pub async fn list_avanues(&mut self) -> Result<Vec<Avanue>, ServiceError> {
        Ok(self.avanues().get_all().await?)
    }

    pub async fn get_avanue(&mut self, id: i64) -> Result<AvanueDetail, ServiceError> {
        let avanue = self.find(id).await?;
        let show_list = Store::<Show>::new(&mut *self.conn).hosted_by(id).await?;
        Ok(AvanueDetail { avanue, show_list })
    }

    pub async fn enroll_avanue(&mut self, payload: AvanueAdd) -> Result<Avanue, ServiceError> {
        let name = Validator::require("name", payload.name)?;
        let availability = Validator::require("availability", payload.availability)?;
        Validator::validate_name("name", &name)?;

        let avanue = self.avanues().add(&NewAvanue { name, availability }).await?;
        tracing::info!("Avanue {} created", avanue.id);
        Ok(avanue)
    }

    /// Delete a venue. Its shows are kept with their venue reference cleared.
    pub async fn delete_avanue(&mut self, id: i64) -> Result<Message, ServiceError> {
        let avanue = self.find(id).await?;
        self.avanues().delete(avanue.id).await?;

        tracing::info!("Avanue {} deleted", avanue.id);
        Ok(Message::new(format!("Avanue {} has been deleted", avanue.id)))
    }

    pub async fn update_avanue(
        &mut self,
        id: i64,
        payload: AvanueUpdate,
    ) -> Result<Avanue, ServiceError> {
        let mut avanue = self.find(id).await?;

        if let Some(name) = payload.name {
            Validator::validate_name("name", &name)?;
            avanue.name = name;
        }
        if let Some(availability) = payload.availability {
            avanue.availability = availability;
        }

        self.avanues().save(&avanue).await?;
        tracing::info!("Avanue {} updated", avanue.id);
        Ok(avanue)
    }
}
