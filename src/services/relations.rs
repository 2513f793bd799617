//! Cross-entity operations: customer enrollment in shows and show
//! assignment to venues.
//!
//! These work on raw rows through the stores and skip lifecycle validation.
//! Each operation resolves both ids first, checks its invariants, and only
//! then mutates, so a rejected call leaves nothing to roll back.

use sqlx::SqliteConnection;

use crate::error::{ServiceError, ValidationError};
use crate::models::{Avanue, Customer, Message, Show};
use crate::store::{Enrollments, Store};

pub struct RelationManager<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> RelationManager<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    async fn customer(&mut self, id: i64) -> Result<Customer, ServiceError> {
        Store::<Customer>::new(&mut *self.conn)
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} does not exist", id)))
    }

    async fn show(&mut self, id: i64) -> Result<Show, ServiceError> {
        Store::<Show>::new(&mut *self.conn)
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Show {} does not exist", id)))
    }

    async fn avanue(&mut self, id: i64) -> Result<Avanue, ServiceError> {
        Store::<Avanue>::new(&mut *self.conn)
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Avanue {} does not exist", id)))
    }

    /// Admit a customer to a show, taking one open seat.
    ///
    /// Checked in order: both exist, the customer is at least the show's age
    /// limit, the customer is not already on the roster, a seat is open.
    pub async fn enroll_customer_to_show(
        &mut self,
        customer_id: i64,
        show_id: i64,
    ) -> Result<Message, ServiceError> {
        let customer = self.customer(customer_id).await?;
        let mut show = self.show(show_id).await?;

        if customer.age < show.age_limit {
            return Err(ValidationError::AgeBelowLimit {
                customer_id: customer.id,
                age: customer.age,
                show_id: show.id,
                age_limit: show.age_limit,
            }
            .into());
        }

        let mut roster = Enrollments::new(&mut *self.conn);
        if roster.contains(customer.id, show.id).await? {
            return Err(ServiceError::Conflict(format!(
                "Customer {} is already admitted to show {}",
                customer.id, show.id
            )));
        }

        if show.head_count <= 0 {
            return Err(ServiceError::Capacity(format!(
                "Show {} is full",
                show.id
            )));
        }

        roster.insert(customer.id, show.id).await?;
        show.head_count -= 1;
        Store::<Show>::new(&mut *self.conn).save(&show).await?;

        tracing::info!(
            "Customer {} admitted to show {} ({} seats left)",
            customer.id,
            show.id,
            show.head_count
        );
        Ok(Message::new(format!(
            "Customer {} admitted to show {}",
            customer.id, show.id
        )))
    }

    /// Take a customer off a show's roster, freeing their seat.
    pub async fn remove_customer_from_show(
        &mut self,
        customer_id: i64,
        show_id: i64,
    ) -> Result<Message, ServiceError> {
        let customer = self.customer(customer_id).await?;
        let mut show = self.show(show_id).await?;

        if !Enrollments::new(&mut *self.conn)
            .remove(customer.id, show.id)
            .await?
        {
            return Err(ServiceError::Conflict(format!(
                "Customer {} is not admitted to show {}",
                customer.id, show.id
            )));
        }

        show.head_count += 1;
        Store::<Show>::new(&mut *self.conn).save(&show).await?;

        tracing::info!("Customer {} removed from show {}", customer.id, show.id);
        Ok(Message::new(format!(
            "Customer {} removed from show {}",
            customer.id, show.id
        )))
    }

    /// Host a show at a venue. A show has at most one venue.
    pub async fn enroll_show_to_avanue(
        &mut self,
        show_id: i64,
        avanue_id: i64,
    ) -> Result<Message, ServiceError> {
        let mut show = self.show(show_id).await?;
        let avanue = self.avanue(avanue_id).await?;

        if show.avanue_id == Some(avanue.id) {
            return Err(ServiceError::Conflict(format!(
                "Show {} is already admitted to avanue {}",
                show.id, avanue.id
            )));
        }

        if !avanue.availability {
            return Err(ServiceError::Conflict(format!(
                "Avanue {} is not available",
                avanue.id
            )));
        }

        if let Some(current) = show.avanue_id {
            return Err(ServiceError::Conflict(format!(
                "Show {} is already assigned to avanue {}",
                show.id, current
            )));
        }

        show.avanue_id = Some(avanue.id);
        Store::<Show>::new(&mut *self.conn).save(&show).await?;

        tracing::info!("Show {} admitted to avanue {}", show.id, avanue.id);
        Ok(Message::new(format!(
            "Show {} is admitted to avanue {}",
            show.id, avanue.id
        )))
    }

    /// Detach a show from the venue hosting it.
    pub async fn delete_show_from_avanue(
        &mut self,
        show_id: i64,
        avanue_id: i64,
    ) -> Result<Message, ServiceError> {
        let mut show = self.show(show_id).await?;
        let avanue = self.avanue(avanue_id).await?;

        if show.avanue_id != Some(avanue.id) {
            return Err(ServiceError::Conflict(format!(
                "Show {} is not hosted by avanue {}",
                show.id, avanue.id
            )));
        }

        show.avanue_id = None;
        Store::<Show>::new(&mut *self.conn).save(&show).await?;

        tracing::info!("Show {} removed from avanue {}", show.id, avanue.id);
        Ok(Message::new(format!(
            "Show {} is removed from avanue {}",
            show.id, avanue.id
        )))
    }
}
