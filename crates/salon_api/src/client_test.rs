#[cfg(test)]
mod tests {
    use crate::error::{ApiError, DEFAULT_AUTH_MESSAGE};
    use crate::gateways::parse_confirmation;
    use salon_common::{HttpStatusCode, SalonError};

    #[test]
    fn test_confirmation_reads_nested_appointment() {
        let confirmation = parse_confirmation(
            r#"{"message": "Rendez-vous créé avec succès", "appointment": {"id": 42, "status": "pending"}}"#,
        );
        assert_eq!(confirmation.appointment_id, Some(42));
        assert_eq!(
            confirmation.message.as_deref(),
            Some("Rendez-vous créé avec succès")
        );
    }

    #[test]
    fn test_confirmation_tolerates_unexpected_body() {
        let confirmation = parse_confirmation("");
        assert_eq!(confirmation.appointment_id, None);
        assert_eq!(confirmation.message, None);
    }

    #[test]
    fn test_unauthorized_maps_to_auth_error() {
        let err = ApiError::from_status(401, None);
        assert_eq!(err.status_code(), 401);
        assert_eq!(
            SalonError::from(err),
            SalonError::AuthError(DEFAULT_AUTH_MESSAGE.to_string())
        );

        let forbidden = ApiError::from_status(403, Some("Accès non autorisé".to_string()));
        assert_eq!(
            SalonError::from(forbidden),
            SalonError::AuthError("Accès non autorisé".to_string())
        );
    }

    #[test]
    fn test_other_statuses_keep_backend_message() {
        let err = SalonError::from(ApiError::from_status(
            400,
            Some("Ce créneau n'est pas disponible".to_string()),
        ));
        assert_eq!(err.backend_message(), Some("Ce créneau n'est pas disponible"));
        assert_eq!(err.status_code(), 400);
    }
}
