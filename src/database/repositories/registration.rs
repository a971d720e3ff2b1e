//! Registration repository implementation
//!
//! Writes that touch the event participant counter run inside a single
//! transaction so a crash between the two statements cannot leave the
//! counter out of step with the registration rows.

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationFilter, RegistrationLookup,
};
use crate::utils::errors::ZenFlowError;
use crate::utils::helpers::calculate_offset;

use super::event::ADJUST_PARTICIPANTS_SQL;

const REGISTRATION_COLUMNS: &str = "id, event_id, event_title, full_name, email, phone, country, \
     state, city, batch, language, receive_info, agree_terms, notes, confirmation_code, status, \
     confirmed_at, cancelled_at, registered_at, updated_at";

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending registration and bump the event counter atomically
    pub async fn create(
        &self,
        event_id: i64,
        event_title: &str,
        request: &CreateRegistrationRequest,
        confirmation_code: &str,
    ) -> Result<Registration, ZenFlowError> {
        let mut tx = self.pool.begin().await?;

        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (
                event_id, event_title, full_name, email, phone, country, state, city,
                batch, language, receive_info, agree_terms, notes, confirmation_code,
                status, registered_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    'pending', $15, $16)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(event_title)
        .bind(&request.full_name)
        .bind(request.email.to_lowercase())
        .bind(&request.phone)
        .bind(&request.country)
        .bind(&request.state)
        .bind(&request.city)
        .bind(&request.batch)
        .bind(request.language.as_deref().unwrap_or("English"))
        .bind(request.receive_info.unwrap_or(true))
        .bind(request.agree_terms)
        .bind(&request.notes)
        .bind(confirmation_code)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(ADJUST_PARTICIPANTS_SQL)
            .bind(event_id)
            .bind(1i32)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Resolve a registration through either access path
    pub async fn find(
        &self,
        lookup: &RegistrationLookup,
    ) -> Result<Option<Registration>, ZenFlowError> {
        let registration = match lookup {
            RegistrationLookup::ById(id) => {
                sqlx::query_as::<_, Registration>(&format!(
                    "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            RegistrationLookup::ByCode(code) => {
                sqlx::query_as::<_, Registration>(&format!(
                    "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE confirmation_code = $1"
                ))
                .bind(code.to_uppercase())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(registration)
    }

    pub async fn find_by_event_and_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> Result<Option<Registration>, ZenFlowError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND email = $2"
        ))
        .bind(event_id)
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Admin listing with filters and pagination
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Registration>, i64), ZenFlowError> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM registrations WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE 1=1"
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY registered_at DESC");

        let limit = limit.clamp(1, 100);
        let offset = calculate_offset(page, limit);
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let registrations = query
            .build_query_as::<Registration>()
            .fetch_all(&self.pool)
            .await?;

        Ok((registrations, total))
    }

    /// Mark a pending registration confirmed
    pub async fn confirm(&self, id: i64) -> Result<Registration, ZenFlowError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET status = 'confirmed', confirmed_at = $2, updated_at = $2
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Cancel a registration. A confirmed one releases its seat in the same
    /// transaction.
    pub async fn cancel(&self, registration: &Registration) -> Result<Registration, ZenFlowError> {
        let mut tx = self.pool.begin().await?;

        if registration.is_confirmed() {
            sqlx::query(ADJUST_PARTICIPANTS_SQL)
                .bind(registration.event_id)
                .bind(-1i32)
                .execute(&mut *tx)
                .await?;
        }

        let cancelled = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET status = 'cancelled', cancelled_at = $2, updated_at = $2
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(cancelled)
    }

    /// Hard delete, releasing the seat when the registration was confirmed
    pub async fn delete(&self, registration: &Registration) -> Result<(), ZenFlowError> {
        let mut tx = self.pool.begin().await?;

        if registration.is_confirmed() {
            sqlx::query(ADJUST_PARTICIPANTS_SQL)
                .bind(registration.event_id)
                .bind(-1i32)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(registration.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &RegistrationFilter) {
    if let Some(event_id) = filter.event_id {
        query.push(" AND event_id = ");
        query.push_bind(event_id);
    }
    if let Some(status) = &filter.status {
        query.push(" AND status = ");
        query.push_bind(status.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query.push(" AND (full_name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR email ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR phone ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
