#[cfg(test)]
mod tests {
    use crate::draft::{BookingDraft, RosterOption};
    use crate::guard::Route;
    use crate::pending::{PendingBooking, PendingBookingStore};
    use chrono::NaiveDate;
    use salon_common::models::{Employee, EmployeeSelection, Service, SlotTime};
    use salon_common::storage::keys;
    use salon_common::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn pending() -> PendingBooking {
        PendingBooking {
            booking_data: BookingDraft {
                service_id: Some(1),
                employee: Some(EmployeeSelection::Specific(2)),
                date: NaiveDate::from_ymd_opt(2025, 6, 10),
                time: SlotTime::from_hm(9, 30),
                notes: "Cheveux longs".to_string(),
            },
            selected_service: Service {
                id: 1,
                name: "Coupe Femme".to_string(),
                description: None,
                duration: 45,
                price: 45.0,
                category: Some("Coupe".to_string()),
                is_active: true,
            },
            selected_employee: RosterOption {
                selection: EmployeeSelection::Specific(2),
                label: "Julie Martin".to_string(),
                position: Some("Coloriste".to_string()),
                employee: Some(Employee {
                    id: 2,
                    first_name: Some("Julie".to_string()),
                    last_name: Some("Martin".to_string()),
                    position: Some("Coloriste".to_string()),
                    specialties: Some("Balayage".to_string()),
                    years_experience: Some(8),
                    photo_url: Some("/uploads/julie.jpg".to_string()),
                }),
            },
        }
    }

    fn store() -> (Arc<MemoryStore>, PendingBookingStore) {
        let raw = Arc::new(MemoryStore::new());
        (raw.clone(), PendingBookingStore::new(raw))
    }

    #[test]
    fn test_saved_draft_reloads_identically_once() {
        let (_, store) = store();
        store.save(&pending()).unwrap();

        let reloaded = store.load_and_clear().unwrap();
        assert_eq!(reloaded, pending());
        let employee = reloaded.selected_employee.employee.unwrap();
        assert_eq!(employee.specialties.as_deref(), Some("Balayage"));
        assert_eq!(employee.years_experience, Some(8));
        assert_eq!(employee.photo_url.as_deref(), Some("/uploads/julie.jpg"));
        assert_eq!(store.load_and_clear(), None);
    }

    #[test]
    fn test_save_overwrites_previous_draft() {
        let (_, store) = store();
        store.save(&pending()).unwrap();
        let mut newer = pending();
        newer.booking_data.notes = "Frange".to_string();
        store.save(&newer).unwrap();

        assert_eq!(store.load_and_clear().unwrap().booking_data.notes, "Frange");
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let (raw, store) = store();
        store.save(&pending()).unwrap();

        let stored = raw.get(keys::PENDING_BOOKING).unwrap().unwrap();
        assert!(stored.contains("\"bookingData\""));
        assert!(stored.contains("\"selectedService\""));
        assert!(stored.contains("\"selectedEmployee\""));
    }

    #[test]
    fn test_corrupt_or_incomplete_records_are_dropped() {
        let (raw, store) = store();
        raw.set(keys::PENDING_BOOKING, "not json").unwrap();
        assert_eq!(store.load_and_clear(), None);
        assert_eq!(raw.get(keys::PENDING_BOOKING).unwrap(), None);

        let mut incomplete = pending();
        incomplete.booking_data.time = None;
        store.save(&incomplete).unwrap();
        assert_eq!(store.load_and_clear(), None);
    }

    #[test]
    fn test_return_destination_is_consumed_once() {
        let (_, store) = store();
        store.set_return_destination(&Route::MyAppointments).unwrap();

        assert_eq!(store.post_login_destination(), Route::MyAppointments);
        assert_eq!(store.post_login_destination(), Route::Home);
    }
}
