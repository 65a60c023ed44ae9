use crate::models::role::{Permission, Role};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un rol con su conjunto de permisos en una sola transacción
    pub async fn create_with_permissions(
        &self,
        name: String,
        permission_ids: Vec<Uuid>,
    ) -> Result<Role, AppError> {
        let mut tx = self.pool.begin().await?;

        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for permission_id in permission_ids {
            sqlx::query(
                "INSERT INTO role_permissions (id, role_id, permission_id) VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(role.id)
            .bind(permission_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(role)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    pub async fn list(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(roles)
    }

    /// Verificar si el nombre ya pertenece a otro rol (`exclude` omite al
    /// propio rol al renombrar)
    pub async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM roles WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn rename(&self, id: Uuid, name: String) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    /// Claves canónicas de permisos otorgadas a un rol (vía join table)
    pub async fn permission_names_for_role(&self, role_id: Uuid) -> Result<Vec<String>, AppError> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT p.name
            FROM permissions p
            INNER JOIN role_permissions rp ON rp.permission_id = p.id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(n,)| n).collect())
    }

    /// Reemplazo total del conjunto de permisos de un rol:
    /// delete-all seguido de insert-new, atómico para el llamador.
    pub async fn replace_permissions(
        &self,
        role_id: Uuid,
        permission_ids: Vec<Uuid>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        for permission_id in permission_ids {
            sqlx::query(
                "INSERT INTO role_permissions (id, role_id, permission_id) VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(role_id)
            .bind(permission_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Eliminar un rol y sus vínculos. La guarda "sin usuarios asignados"
    /// la aplica el controller antes de llamar aquí.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rol no encontrado".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    // --- Catálogo de permisos ---

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions =
            sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(permissions)
    }

    pub async fn find_permission_by_id(&self, id: Uuid) -> Result<Option<Permission>, AppError> {
        let permission =
            sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(permission)
    }

    /// Resolver claves canónicas a ids del catálogo
    pub async fn permission_ids_by_names(&self, names: &[String]) -> Result<Vec<Uuid>, AppError> {
        let ids: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM permissions WHERE name = ANY($1)")
                .bind(names)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    pub async fn count_role_links_for_permission(&self, permission_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM role_permissions WHERE permission_id = $1")
                .bind(permission_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn delete_permission(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Permiso no encontrado".to_string()));
        }

        Ok(())
    }
}
