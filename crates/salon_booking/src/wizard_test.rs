#[cfg(test)]
mod tests {
    use crate::calendar::DateWindow;
    use crate::draft::RosterOption;
    use crate::error::WizardError;
    use crate::session::Session;
    use crate::wizard::*;
    use chrono::NaiveDate;
    use salon_common::models::{
        BookingConfirmation, Employee, EmployeeSelection, Role, Service, SlotTime, UserProfile,
    };
    use salon_common::SalonError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(h: u32, m: u32) -> SlotTime {
        SlotTime::from_hm(h, m).unwrap()
    }

    fn service(id: u32, name: &str) -> Service {
        Service {
            id,
            name: name.to_string(),
            description: None,
            duration: 45,
            price: 45.0,
            category: None,
            is_active: true,
        }
    }

    fn employee(id: u32) -> Employee {
        Employee {
            id,
            first_name: Some(format!("Employee{}", id)),
            last_name: None,
            position: None,
            specialties: (id == 1).then(|| "Balayage".to_string()),
            years_experience: (id == 1).then_some(8),
            photo_url: None,
        }
    }

    fn session() -> Session {
        Session {
            profile: UserProfile {
                id: 7,
                email: "marie@example.fr".to_string(),
                first_name: "Marie".to_string(),
                last_name: "Dupont".to_string(),
                phone: None,
                role: Role::Client,
            },
            token: "jwt".to_string(),
        }
    }

    fn tickets(requests: &[FetchRequest]) -> Vec<Ticket> {
        requests.iter().map(FetchRequest::ticket).collect()
    }

    /// A wizard whose catalog holds services 1 and 2, window 2025-06-02..=2025-07-02.
    fn wizard() -> BookingWizard {
        let mut wizard = BookingWizard::new(
            DateWindow::starting_after(date(2025, 6, 1), 30),
            "No preference",
        );
        let request = wizard.load_catalog();
        wizard.apply(
            request.ticket(),
            FetchOutcome::Catalog(Ok(vec![service(1, "Coupe Femme"), service(2, "Coloration")])),
        );
        wizard
    }

    /// Selects service 1 and applies its roster and day set.
    fn with_service(wizard: &mut BookingWizard, days: Vec<NaiveDate>) {
        let requests = wizard.select_service(1).unwrap();
        let tickets = tickets(&requests);
        wizard.apply(tickets[0], FetchOutcome::Roster(Ok(vec![employee(1), employee(2)])));
        wizard.apply(tickets[1], FetchOutcome::Days(Ok(days)));
    }

    /// Drives the wizard to Confirm with (service 1, no preference, 2025-06-10, 09:30).
    fn at_confirm() -> BookingWizard {
        let mut wizard = wizard();
        with_service(&mut wizard, vec![date(2025, 6, 10)]);
        wizard.select_employee(EmployeeSelection::NoPreference).unwrap();
        let requests = wizard.select_date(date(2025, 6, 10)).unwrap();
        wizard.apply(
            requests[0].ticket(),
            FetchOutcome::Slots(Ok(vec![slot(9, 0), slot(9, 30), slot(10, 0)])),
        );
        wizard.select_time(slot(9, 30)).unwrap();
        wizard
    }

    #[test]
    fn test_select_service_requests_roster_and_days() {
        let mut wizard = wizard();

        let requests = wizard.select_service(1).unwrap();

        assert_eq!(wizard.step(), Step::SelectEmployee);
        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], FetchRequest::Roster { service_id: 1, .. }));
        assert!(matches!(
            requests[1],
            FetchRequest::Days { service_id: 1, window, .. }
                if window.start == date(2025, 6, 2) && window.end == date(2025, 7, 2)
        ));
        assert!(wizard.roster().is_loading());
        assert!(!wizard.is_calendar_interactive());
    }

    #[test]
    fn test_roster_gets_no_preference_first() {
        let mut wizard = wizard();
        with_service(&mut wizard, Vec::new());

        let roster = wizard.roster().loaded().unwrap();
        assert_eq!(roster[0], RosterOption::no_preference("No preference"));
        assert_eq!(roster[0].employee, None);
        assert_eq!(roster[1].selection, EmployeeSelection::Specific(1));
        let first = roster[1].employee.as_ref().unwrap();
        assert_eq!(first.specialties.as_deref(), Some("Balayage"));
        assert_eq!(first.years_experience, Some(8));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_stale_roster_for_previous_service_is_dropped() {
        let mut wizard = wizard();
        let first = tickets(&wizard.select_service(1).unwrap());
        wizard.back();
        let second = tickets(&wizard.select_service(2).unwrap());

        assert!(wizard.apply(second[0], FetchOutcome::Roster(Ok(vec![employee(2)]))));
        assert!(!wizard.apply(first[0], FetchOutcome::Roster(Ok(vec![employee(1)]))));
        assert!(!wizard.apply(first[1], FetchOutcome::Days(Ok(vec![date(2025, 6, 3)]))));

        let roster = wizard.roster().loaded().unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].selection, EmployeeSelection::Specific(2));
        assert!(wizard.days().is_loading());
    }

    #[test]
    fn test_result_on_wrong_channel_is_ignored() {
        let mut wizard = wizard();
        let requests = wizard.select_service(1).unwrap();

        assert!(!wizard.apply(requests[0].ticket(), FetchOutcome::Days(Ok(Vec::new()))));
        assert!(wizard.roster().is_loading());
    }

    #[test]
    fn test_changing_service_clears_downstream_choices() {
        let mut wizard = at_confirm();
        for _ in 0..3 {
            wizard.back();
        }

        wizard.select_service(2).unwrap();

        let draft = wizard.draft();
        assert_eq!(draft.service_id, Some(2));
        assert_eq!(draft.employee, None);
        assert_eq!(draft.date, None);
        assert_eq!(draft.time, None);
        assert_eq!(wizard.slots(), &Loadable::NotRequested);
    }

    #[test]
    fn test_reselecting_same_service_refetches_without_clearing() {
        let mut wizard = at_confirm();
        for _ in 0..3 {
            wizard.back();
        }
        let before = wizard.generation(Channel::Roster);

        let requests = wizard.select_service(1).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(wizard.generation(Channel::Roster), before + 1);
        assert_eq!(wizard.draft().employee, Some(EmployeeSelection::NoPreference));
        assert_eq!(wizard.draft().time, Some(slot(9, 30)));
    }

    #[test]
    fn test_employee_change_clears_time_and_refetches_slots() {
        let mut wizard = at_confirm();
        wizard.back();
        wizard.back();

        let requests = wizard.select_employee(EmployeeSelection::Specific(2)).unwrap();

        assert_eq!(wizard.draft().time, None);
        assert!(matches!(
            requests.as_slice(),
            [FetchRequest::Slots { employee: EmployeeSelection::Specific(2), .. }]
        ));
        assert!(wizard.slots().is_loading());
    }

    #[test]
    fn test_employee_must_be_in_roster() {
        let mut wizard = wizard();
        with_service(&mut wizard, Vec::new());

        assert_eq!(
            wizard.select_employee(EmployeeSelection::Specific(99)),
            Err(WizardError::UnknownEmployee(EmployeeSelection::Specific(99)))
        );
        assert_eq!(wizard.step(), Step::SelectEmployee);
    }

    #[test]
    fn test_failed_roster_offers_nobody() {
        let mut wizard = wizard();
        let requests = wizard.select_service(1).unwrap();
        wizard.apply(
            requests[0].ticket(),
            FetchOutcome::Roster(Err(SalonError::HttpError("timeout".to_string()))),
        );

        assert!(wizard.roster().error().is_some());
        assert!(wizard
            .select_employee(EmployeeSelection::NoPreference)
            .is_err());
    }

    #[test]
    fn test_date_must_be_in_loaded_day_set() {
        let mut wizard = wizard();
        with_service(&mut wizard, vec![date(2025, 6, 10)]);
        wizard.select_employee(EmployeeSelection::Specific(1)).unwrap();

        assert_eq!(
            wizard.select_date(date(2025, 6, 11)),
            Err(WizardError::DateUnavailable(date(2025, 6, 11)))
        );
        assert!(wizard.select_date(date(2025, 6, 10)).is_ok());
    }

    #[test]
    fn test_empty_day_set_leaves_window_open() {
        let mut wizard = wizard();
        with_service(&mut wizard, Vec::new());
        wizard.select_employee(EmployeeSelection::Specific(1)).unwrap();

        assert!(wizard.select_date(date(2025, 6, 25)).is_ok());
        assert_eq!(wizard.selectable_dates().len(), 31);
    }

    #[test]
    fn test_calendar_refuses_dates_while_days_load() {
        let mut wizard = wizard();
        let requests = wizard.select_service(1).unwrap();
        wizard.apply(requests[0].ticket(), FetchOutcome::Roster(Ok(vec![employee(1)])));
        wizard.select_employee(EmployeeSelection::Specific(1)).unwrap();

        assert_eq!(
            wizard.select_date(date(2025, 6, 10)),
            Err(WizardError::DaysLoading)
        );
        assert!(wizard.selectable_dates().is_empty());
    }

    #[test]
    fn test_date_change_clears_time_before_slots_arrive() {
        let mut wizard = at_confirm();
        wizard.back();

        let requests = wizard.select_date(date(2025, 6, 10)).unwrap();

        assert_eq!(wizard.draft().time, None);
        assert!(wizard.slots().is_loading());
        assert_eq!(
            wizard.select_time(slot(9, 30)),
            Err(WizardError::UnavailableSlot(slot(9, 30)))
        );
        wizard.apply(requests[0].ticket(), FetchOutcome::Slots(Ok(vec![slot(9, 30)])));
        assert!(wizard.select_time(slot(9, 30)).is_ok());
    }

    #[test]
    fn test_failed_slots_differ_from_loading() {
        let mut wizard = at_confirm();
        wizard.back();
        let requests = wizard.select_date(date(2025, 6, 10)).unwrap();

        wizard.apply(
            requests[0].ticket(),
            FetchOutcome::Slots(Err(SalonError::HttpError("reset".to_string()))),
        );

        assert!(!wizard.slots().is_loading());
        assert!(wizard.slots().error().is_some());
    }

    #[test]
    fn test_operations_are_bound_to_their_step() {
        let mut wizard = wizard();

        assert!(matches!(
            wizard.select_date(date(2025, 6, 10)),
            Err(WizardError::WrongStep { operation: "select_date", step: Step::SelectService })
        ));
        assert!(matches!(
            wizard.set_notes("hello"),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(matches!(
            wizard.confirm(Some(&session())),
            Err(WizardError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_confirm_builds_create_request() {
        let mut wizard = at_confirm();
        wizard.set_notes("  Première visite ").unwrap();

        let outcome = wizard.confirm(Some(&session())).unwrap();

        let ConfirmOutcome::Submit(request) = outcome else {
            panic!("expected a submission, got {:?}", outcome);
        };
        assert_eq!(request.appointment_date, "2025-06-10T09:30");
        assert_eq!(request.employee_id, 0);
        assert_eq!(request.notes.as_deref(), Some("Première visite"));
        assert_eq!(wizard.submission(), &Submission::InFlight);
    }

    #[test]
    fn test_second_confirm_is_refused_while_in_flight() {
        let mut wizard = at_confirm();
        wizard.confirm(Some(&session())).unwrap();

        assert_eq!(
            wizard.confirm(Some(&session())),
            Err(WizardError::SubmissionInFlight)
        );
    }

    #[test]
    fn test_anonymous_confirm_returns_pending_record() {
        let mut wizard = at_confirm();

        let outcome = wizard.confirm(None).unwrap();

        let ConfirmOutcome::RedirectToLogin(pending) = outcome else {
            panic!("expected a login redirect, got {:?}", outcome);
        };
        assert_eq!(pending.booking_data, *wizard.draft());
        assert_eq!(pending.selected_service.name, "Coupe Femme");
        assert_eq!(pending.selected_employee.selection, EmployeeSelection::NoPreference);
        assert_eq!(wizard.submission(), &Submission::Idle);
    }

    #[test]
    fn test_successful_submission_discards_draft() {
        let mut wizard = at_confirm();
        wizard.confirm(Some(&session())).unwrap();

        wizard.apply_submission(Ok(BookingConfirmation {
            appointment_id: Some(12),
            message: None,
        }));

        assert_eq!(wizard.step(), Step::Completed);
        assert!(!wizard.draft().is_complete());
        assert!(wizard.service().is_none());

        let booked = wizard.booked().unwrap();
        assert_eq!(booked.selected_service.name, "Coupe Femme");
        assert_eq!(booked.selected_employee.selection, EmployeeSelection::NoPreference);
        assert_eq!(booked.booking_data.date, Some(date(2025, 6, 10)));
        assert_eq!(booked.booking_data.time, Some(slot(9, 30)));
    }

    #[test]
    fn test_rejected_submission_keeps_confirm_and_message() {
        let mut wizard = at_confirm();
        wizard.confirm(Some(&session())).unwrap();

        wizard.apply_submission(Err(SalonError::Rejected {
            status_code: 400,
            message: Some("Ce créneau n'est pas disponible".to_string()),
        }));

        assert_eq!(wizard.step(), Step::Confirm);
        assert_eq!(
            wizard.submission(),
            &Submission::Failed("Ce créneau n'est pas disponible".to_string())
        );
        assert!(wizard.draft().is_complete());
    }

    #[test]
    fn test_submission_result_without_request_is_ignored() {
        let mut wizard = at_confirm();

        wizard.apply_submission(Ok(BookingConfirmation::default()));

        assert_eq!(wizard.step(), Step::Confirm);
        assert!(wizard.booked().is_none());
    }

    #[test]
    fn test_resume_goes_straight_to_confirm() {
        let mut original = at_confirm();
        let ConfirmOutcome::RedirectToLogin(pending) = original.confirm(None).unwrap() else {
            panic!("expected a login redirect");
        };

        let mut resumed = wizard();
        let requests = resumed.resume(pending.clone()).unwrap();

        assert_eq!(resumed.step(), Step::Confirm);
        assert_eq!(resumed.draft(), &pending.booking_data);
        assert_eq!(requests.len(), 3);
        assert!(matches!(
            resumed.confirm(Some(&session())),
            Ok(ConfirmOutcome::Submit(_))
        ));
    }

    #[test]
    fn test_resume_refuses_a_date_that_left_the_window() {
        let mut original = at_confirm();
        let ConfirmOutcome::RedirectToLogin(mut pending) = original.confirm(None).unwrap() else {
            panic!("expected a login redirect");
        };
        pending.booking_data.date = Some(date(2025, 5, 20));

        let mut resumed = wizard();
        let generation = resumed.generation(Channel::Slots);

        assert_eq!(
            resumed.resume(pending),
            Err(WizardError::DateOutsideWindow(date(2025, 5, 20)))
        );
        assert_eq!(resumed.step(), Step::SelectService);
        assert!(resumed.draft().date.is_none());
        assert_eq!(resumed.generation(Channel::Slots), generation);
    }
}
