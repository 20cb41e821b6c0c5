use tracing::info;
use warden_core::AppResult;
use warden_domain::Permission;

use crate::PermissionRepository;

/// Seeds permissions in the given order. Existing names are left as they are.
///
/// Returns the seeded names.
pub async fn bootstrap_permissions(
    repository: &dyn PermissionRepository,
    names: &[String],
) -> AppResult<Vec<String>> {
    let permissions = names
        .iter()
        .map(|name| Permission::new(name.as_str()))
        .collect::<AppResult<Vec<_>>>()?;

    let mut seeded = Vec::with_capacity(permissions.len());
    for permission in permissions {
        repository.save(&permission).await?;
        info!(permission = %permission.name(), "seeded permission");
        seeded.push(permission.name().to_owned());
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use warden_domain::well_known_permissions;

    use super::bootstrap_permissions;
    use crate::test_fakes::FakePermissionRepository;

    #[tokio::test]
    async fn seeds_well_known_permissions_in_order() {
        let repository = FakePermissionRepository::default();

        let seeded = bootstrap_permissions(&repository, &well_known_permissions()).await;

        assert!(matches!(seeded, Ok(ref names) if names == &well_known_permissions()));
        let stored: Vec<String> = repository
            .permissions
            .lock()
            .await
            .iter()
            .map(|permission| permission.name().to_owned())
            .collect();
        assert_eq!(stored, well_known_permissions());
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let repository = FakePermissionRepository::default();
        let names = vec!["report.read".to_owned()];

        assert!(bootstrap_permissions(&repository, &names).await.is_ok());
        assert!(bootstrap_permissions(&repository, &names).await.is_ok());

        assert_eq!(repository.permissions.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn blank_names_abort_before_any_write() {
        let repository = FakePermissionRepository::default();
        let names = vec!["report.read".to_owned(), " ".to_owned()];

        assert!(bootstrap_permissions(&repository, &names).await.is_err());
        assert!(repository.permissions.lock().await.is_empty());
    }
}
