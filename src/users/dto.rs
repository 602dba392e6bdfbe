use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request body for creating or overwriting a user. The password arrives
/// already hashed from the upstream validation layer and is stored opaquely.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub cedula: String,
    pub nombre_completo: String,
    pub email: String,
    pub telefono: String,
    pub genero: String,
    pub password_hash: String,
    #[serde(default)]
    pub id_rol: Option<i32>,
}

/// Request body for the classifier's biotype callback.
#[derive(Debug, Deserialize)]
pub struct BiotypeUpdate {
    pub biotipo: String,
    pub confianza_ia: f64,
}

/// Flattened row returned by the active-user listing: usuarios joined with
/// roles and perfiles_clinicos. `biotipo` is null until the classifier runs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActiveUser {
    pub id: i32,
    pub cedula: String,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub genero: String,
    pub rol: String,
    pub biotipo: Option<String>,
    pub estado: String,
}

/// Response for user creation.
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub resultado: String,
    pub id: i32,
}

/// Response wrapping the active-user listing.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub resultado: Vec<ActiveUser>,
}

/// Response for the id-keyed mutations (update, deactivate, biotype).
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub resultado: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_payload_defaults_role_to_none() {
        let payload: UserPayload = serde_json::from_str(
            r#"{
                "cedula": "1102233445",
                "nombre_completo": "Ana Torres",
                "email": "ana@example.com",
                "telefono": "0991234567",
                "genero": "F",
                "password_hash": "$argon2id$..."
            }"#,
        )
        .unwrap();
        assert_eq!(payload.id_rol, None);
        assert_eq!(payload.cedula, "1102233445");
    }

    #[test]
    fn user_payload_accepts_explicit_role() {
        let payload: UserPayload = serde_json::from_str(
            r#"{
                "cedula": "1102233445",
                "nombre_completo": "Ana Torres",
                "email": "ana@example.com",
                "telefono": "0991234567",
                "genero": "F",
                "password_hash": "$argon2id$...",
                "id_rol": 2
            }"#,
        )
        .unwrap();
        assert_eq!(payload.id_rol, Some(2));
    }

    #[test]
    fn biotype_update_deserializes() {
        let body: BiotypeUpdate =
            serde_json::from_str(r#"{"biotipo": "Ectomorfo", "confianza_ia": 0.93}"#).unwrap();
        assert_eq!(body.biotipo, "Ectomorfo");
        assert!((body.confianza_ia - 0.93).abs() < f64::EPSILON);
    }

    #[test]
    fn active_user_serializes_null_biotipo() {
        let user = ActiveUser {
            id: 7,
            cedula: "1102233445".into(),
            nombre: "Ana Torres".into(),
            email: "ana@example.com".into(),
            telefono: "0991234567".into(),
            genero: "F".into(),
            rol: "Paciente".into(),
            biotipo: None,
            estado: "Activo".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""biotipo":null"#));
        assert!(json.contains(r#""estado":"Activo""#));
        assert!(json.contains(r#""rol":"Paciente""#));
    }

    #[test]
    fn created_response_carries_id() {
        let res = CreatedUserResponse {
            resultado: "Usuario y Perfil creados con éxito".into(),
            id: 42,
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains(r#""id":42"#));
        assert!(json.contains("resultado"));
    }
}
