use std::sync::Arc;

use aegis_application::{AuthorizationService, PermissionAdminService};
use aegis_core::AppError;
use aegis_infrastructure::{
    InMemoryPermissionAuditRepository, InMemoryPermissionCatalogRepository,
    InMemoryPermissionGrantRepository, InMemoryUserRoleRepository,
};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let role_repository = Arc::new(InMemoryUserRoleRepository::new());
    let grant_repository = Arc::new(InMemoryPermissionGrantRepository::new());
    let catalog_repository = Arc::new(InMemoryPermissionCatalogRepository::seeded());
    let audit_repository = Arc::new(InMemoryPermissionAuditRepository::new());

    let authorization_service = AuthorizationService::new(
        role_repository.clone(),
        grant_repository.clone(),
        catalog_repository.clone(),
        audit_repository.clone(),
    );
    let permission_admin_service = PermissionAdminService::new(
        authorization_service,
        role_repository,
        grant_repository,
        catalog_repository,
        audit_repository,
    );

    for subject in &config.bootstrap_admins {
        if permission_admin_service
            .bootstrap_admin(subject.as_str())
            .await?
        {
            info!(%subject, "granted admin role from AEGIS_BOOTSTRAP_ADMINS");
        }
    }

    Ok(AppState {
        permission_admin_service,
    })
}
