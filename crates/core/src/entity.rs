//! Ledger owner identities.
//!
//! The municipality's sub-ledger is owned by a pseudo-entity whose id is a
//! name-based UUID of `"MUNICIPALITY-" + tenant_id`. Any component can derive
//! it without a registry lookup. This is a known simplification; a production
//! deployment would resolve the municipality from tenant configuration.

use uuid::Uuid;

/// Default name prefix hashed with the tenant id.
pub const MUNICIPALITY_PREFIX: &str = "MUNICIPALITY-";

/// Returns the municipality pseudo-entity id for a tenant.
#[must_use]
pub fn municipality_entity_id(tenant_id: Uuid) -> Uuid {
    municipality_entity_id_with(MUNICIPALITY_PREFIX, tenant_id)
}

/// Same as [`municipality_entity_id`] with a configured name prefix.
#[must_use]
pub fn municipality_entity_id_with(prefix: &str, tenant_id: Uuid) -> Uuid {
    let name = format!("{prefix}{tenant_id}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}
