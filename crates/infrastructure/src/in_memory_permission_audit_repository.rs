use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use aegis_application::{PermissionAuditQuery, PermissionAuditRepository, PermissionUsage};
use aegis_core::AppResult;
use aegis_domain::{Action, PermissionAuditLog, Resource};

/// Append-only in-memory decision log.
#[derive(Debug, Default)]
pub struct InMemoryPermissionAuditRepository {
    entries: RwLock<Vec<PermissionAuditLog>>,
}

impl InMemoryPermissionAuditRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionAuditRepository for InMemoryPermissionAuditRepository {
    async fn append_entry(&self, entry: PermissionAuditLog) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list_entries(
        &self,
        query: PermissionAuditQuery,
    ) -> AppResult<Vec<PermissionAuditLog>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .filter(|entry| query.matches(entry))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn count_allowed_since(
        &self,
        user_id: &str,
        resource: Resource,
        action: Action,
        since: DateTime<Utc>,
    ) -> AppResult<u32> {
        let count = self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| {
                entry.counts_toward_limits()
                    && entry.timestamp >= since
                    && entry.user_id == user_id
                    && entry.resource == resource
                    && entry.action == action
            })
            .count();

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn usage_summary(&self, limit: usize) -> AppResult<Vec<PermissionUsage>> {
        let entries = self.entries.read().await;
        let mut usage: BTreeMap<(Resource, Action), PermissionUsage> = BTreeMap::new();

        for entry in entries.iter() {
            let summary = usage
                .entry((entry.resource, entry.action))
                .or_insert_with(|| PermissionUsage {
                    resource: entry.resource,
                    action: entry.action,
                    total_uses: 0,
                    allowed_count: 0,
                    denied_count: 0,
                    last_used_at: entry.timestamp,
                });

            summary.total_uses += 1;
            if entry.allowed {
                summary.allowed_count += 1;
            } else {
                summary.denied_count += 1;
            }
            summary.last_used_at = summary.last_used_at.max(entry.timestamp);
        }

        let mut summaries: Vec<_> = usage.into_values().collect();
        summaries.sort_by(|left, right| right.total_uses.cmp(&left.total_uses));
        summaries.truncate(limit);

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    use aegis_application::{PermissionAuditQuery, PermissionAuditRepository};
    use aegis_domain::{Action, PermissionAuditLog, Resource};

    use super::InMemoryPermissionAuditRepository;

    fn entry(
        user_id: &str,
        resource: Resource,
        action: Action,
        allowed: bool,
        timestamp: DateTime<Utc>,
    ) -> PermissionAuditLog {
        PermissionAuditLog {
            id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            resource,
            action,
            resource_id: None,
            matched_permission: None,
            allowed,
            reason: None,
            ip_address: None,
            user_agent: None,
            requested_by: None,
            timestamp,
        }
    }

    async fn seeded(now: DateTime<Utc>) -> InMemoryPermissionAuditRepository {
        let repository = InMemoryPermissionAuditRepository::new();
        let rows = [
            entry("u1", Resource::Deployment, Action::Execute, true, now - Duration::hours(3)),
            entry("u1", Resource::Deployment, Action::Execute, false, now - Duration::minutes(50)),
            entry("u1", Resource::Deployment, Action::Execute, true, now - Duration::minutes(30)),
            entry("u2", Resource::Deployment, Action::Execute, true, now - Duration::minutes(20)),
            entry("u1", Resource::Blueprint, Action::Read, true, now - Duration::minutes(10)),
        ];
        for row in rows {
            assert!(repository.append_entry(row).await.is_ok());
        }
        repository
    }

    #[tokio::test]
    async fn counts_only_matching_allowed_entries_in_window() {
        let now = Utc::now();
        let repository = seeded(now).await;

        let last_hour = repository
            .count_allowed_since(
                "u1",
                Resource::Deployment,
                Action::Execute,
                now - Duration::hours(1),
            )
            .await
            .unwrap_or_default();
        let last_day = repository
            .count_allowed_since(
                "u1",
                Resource::Deployment,
                Action::Execute,
                now - Duration::days(1),
            )
            .await
            .unwrap_or_default();

        assert_eq!(last_hour, 1);
        assert_eq!(last_day, 2);
    }

    #[tokio::test]
    async fn on_behalf_decisions_do_not_count_toward_limits() {
        let now = Utc::now();
        let repository = InMemoryPermissionAuditRepository::new();
        let mut inspected = entry(
            "u3",
            Resource::Deployment,
            Action::Execute,
            true,
            now - Duration::minutes(5),
        );
        inspected.requested_by = Some("admin".to_owned());
        assert!(repository.append_entry(inspected).await.is_ok());
        assert!(
            repository
                .append_entry(entry(
                    "u3",
                    Resource::Deployment,
                    Action::Execute,
                    true,
                    now - Duration::minutes(1),
                ))
                .await
                .is_ok()
        );

        let counted = repository
            .count_allowed_since(
                "u3",
                Resource::Deployment,
                Action::Execute,
                now - Duration::hours(1),
            )
            .await
            .unwrap_or_default();

        assert_eq!(counted, 1);
    }

    #[tokio::test]
    async fn list_filters_newest_first() {
        let repository = seeded(Utc::now()).await;

        let listed = repository
            .list_entries(PermissionAuditQuery {
                user_id: Some("u1".to_owned()),
                resource: None,
                allowed: Some(true),
                limit: 10,
                offset: 0,
            })
            .await
            .unwrap_or_default();

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].resource, Resource::Blueprint);
        assert!(listed.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[tokio::test]
    async fn usage_summary_orders_by_total() {
        let repository = seeded(Utc::now()).await;

        let usage = repository.usage_summary(50).await.unwrap_or_default();

        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].resource, Resource::Deployment);
        assert_eq!(usage[0].total_uses, 4);
        assert_eq!(usage[0].allowed_count, 3);
        assert_eq!(usage[0].denied_count, 1);
        assert_eq!(usage[1].total_uses, 1);

        let truncated = repository.usage_summary(1).await.unwrap_or_default();
        assert_eq!(truncated.len(), 1);
    }
}
