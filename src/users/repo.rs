use sqlx::PgPool;

use super::dto::{ActiveUser, UserPayload};
use crate::error::ApiError;

/// Insert a user and its empty clinical profile in one transaction.
/// Returns the new user id. The uncommitted transaction rolls back on drop
/// if either insert fails.
pub async fn create_with_profile(
    db: &PgPool,
    user: &UserPayload,
    id_rol: i32,
) -> Result<i32, ApiError> {
    let mut tx = db.begin().await?;

    // estado lands as 'Activo' via the column default
    let new_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO usuarios (cedula, nombre_completo, email, telefono, genero, password_hash, id_rol)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id_usuario
        "#,
    )
    .bind(&user.cedula)
    .bind(&user.nombre_completo)
    .bind(&user.email)
    .bind(&user.telefono)
    .bind(&user.genero)
    .bind(&user.password_hash)
    .bind(id_rol)
    .fetch_one(&mut *tx)
    .await
    .map_err(unique_conflict)?;

    // empty profile, filled in later by the classifier
    sqlx::query("INSERT INTO perfiles_clinicos (id_usuario) VALUES ($1)")
        .bind(new_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(new_id)
}

/// Active users with their role name and biotype, profile joined loosely
/// since it may still be empty.
pub async fn list_active(db: &PgPool) -> Result<Vec<ActiveUser>, ApiError> {
    let rows = sqlx::query_as::<_, ActiveUser>(
        r#"
        SELECT u.id_usuario AS id, u.cedula, u.nombre_completo AS nombre,
               u.email, u.telefono, u.genero, r.nombre_rol AS rol,
               p.biotipo, u.estado
        FROM usuarios u
        JOIN roles r ON u.id_rol = r.id_rol
        LEFT JOIN perfiles_clinicos p ON u.id_usuario = p.id_usuario
        WHERE u.estado = 'Activo'
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Soft delete: flip estado to 'Inactivo', never remove the row.
pub async fn deactivate(db: &PgPool, user_id: i32) -> Result<(), ApiError> {
    let res = sqlx::query("UPDATE usuarios SET estado = 'Inactivo' WHERE id_usuario = $1")
        .bind(user_id)
        .execute(db)
        .await?;

    if res.rows_affected() == 0 {
        return Err(ApiError::UserNotFound);
    }
    Ok(())
}

/// Overwrite the mutable user fields. cedula and estado are never touched
/// on this path.
pub async fn update(
    db: &PgPool,
    user_id: i32,
    user: &UserPayload,
    id_rol: i32,
) -> Result<(), ApiError> {
    let res = sqlx::query(
        r#"
        UPDATE usuarios
        SET nombre_completo = $1, email = $2, telefono = $3, genero = $4,
            password_hash = $5, id_rol = $6
        WHERE id_usuario = $7
        "#,
    )
    .bind(&user.nombre_completo)
    .bind(&user.email)
    .bind(&user.telefono)
    .bind(&user.genero)
    .bind(&user.password_hash)
    .bind(id_rol)
    .bind(user_id)
    .execute(db)
    .await?;

    if res.rows_affected() == 0 {
        return Err(ApiError::UserNotFound);
    }
    Ok(())
}

/// Classifier callback target. No existence check: a missing profile row
/// affects zero rows and still reports success.
pub async fn update_biotype(
    db: &PgPool,
    user_id: i32,
    biotipo: &str,
    confianza_ia: f64,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        UPDATE perfiles_clinicos
        SET biotipo = $1, confianza_ia = $2
        WHERE id_usuario = $3
        "#,
    )
    .bind(biotipo)
    .bind(confianza_ia)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(())
}

fn unique_conflict(e: sqlx::Error) -> ApiError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        ApiError::DuplicateUser
    } else {
        ApiError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_unique_errors_stay_generic() {
        let err = unique_conflict(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
