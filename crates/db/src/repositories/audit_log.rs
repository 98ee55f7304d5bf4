//! Audit log repository.
//!
//! Rows are insert-only; this repository has no update or delete path.

use chrono::Utc;
use muniledger_core::audit::{AuditLog, AuditLogInput};
use muniledger_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::audit_logs;

/// Audit log repository.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one audit row on `conn`, normally the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn append<C>(conn: &C, input: AuditLogInput) -> Result<AuditLog, DbErr>
    where
        C: ConnectionTrait,
    {
        let row = audit_logs::ActiveModel {
            audit_id: Set(Uuid::new_v4()),
            entity_id: Set(input.entity_id),
            entity_type: Set(input.entity_type),
            action: Set(input.action),
            user_id: Set(input.user_id),
            tenant_id: Set(input.tenant_id),
            timestamp: Set(Utc::now().into()),
            details: Set(input.details),
            old_value: Set(input.old_value),
            new_value: Set(input.new_value),
            reason: Set(input.reason),
        };

        let model = row.insert(conn).await?;
        Ok(to_domain(model))
    }

    /// Lists the audit trail of one record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_entity(
        &self,
        tenant_id: Uuid,
        entity_id: Uuid,
    ) -> Result<Vec<AuditLog>, DbErr> {
        let rows = audit_logs::Entity::find()
            .filter(audit_logs::Column::TenantId.eq(tenant_id))
            .filter(audit_logs::Column::EntityId.eq(entity_id))
            .order_by_asc(audit_logs::Column::Timestamp)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(to_domain).collect())
    }

    /// Lists a tenant's audit trail, newest first, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<AuditLog>, DbErr> {
        let query = audit_logs::Entity::find().filter(audit_logs::Column::TenantId.eq(tenant_id));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(audit_logs::Column::Timestamp)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            rows.into_iter().map(to_domain).collect(),
            page,
            total,
        ))
    }
}

fn to_domain(model: audit_logs::Model) -> AuditLog {
    AuditLog {
        audit_id: model.audit_id,
        entity_id: model.entity_id,
        entity_type: model.entity_type,
        action: model.action,
        user_id: model.user_id,
        tenant_id: model.tenant_id,
        timestamp: model.timestamp.with_timezone(&Utc),
        details: model.details,
        old_value: model.old_value,
        new_value: model.new_value,
        reason: model.reason,
    }
}
