use crate::airline::tests::utils::{airline, date};
use crate::error::AirlineError;

#[test]
fn test_complete_marks_all_tickets() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-01"), "R500", 2)
        .unwrap();
    airline
        .sell_tickets("ACME", date("2024-03-01"), "R500", 1)
        .unwrap();

    assert_eq!(3, airline.complete_flight(date("2024-03-01"), "R500"));
    assert!(airline.tickets().all(|t| t.is_used()));
    assert_eq!(0, airline.pending_balance("ana").unwrap());
    assert_eq!(0, airline.pending_balance("ACME").unwrap());
    assert_eq!(2 * 384_000, airline.total_spent("ana").unwrap());
}

#[test]
fn test_complete_twice() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-01"), "R500", 2)
        .unwrap();

    assert_eq!(2, airline.complete_flight(date("2024-03-01"), "R500"));
    assert_eq!(0, airline.complete_flight(date("2024-03-01"), "R500"));
    assert!(airline.tickets().all(|t| t.is_used()));
}

#[test]
fn test_complete_unknown_flight_is_not_an_error() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-01"), "R500", 1)
        .unwrap();

    assert_eq!(0, airline.complete_flight(date("2024-03-02"), "R500"));
    assert_eq!(384_000, airline.pending_balance("ana").unwrap());
}

#[test]
fn test_complete_only_touches_that_flight() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    airline
        .schedule_flight(date("2024-03-02"), "R500", "PLANE_2")
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-01"), "R500", 1)
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-02"), "R500", 1)
        .unwrap();

    airline.complete_flight(date("2024-03-01"), "R500");
    assert_eq!(384_000, airline.pending_balance("ana").unwrap());
    assert_eq!(2 * 384_000, airline.total_spent("ana").unwrap());
}

#[test]
fn test_client_path_and_flight_path_converge() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    airline
        .sell_tickets("ana", date("2024-03-01"), "R500", 1)
        .unwrap();
    airline
        .sell_tickets("ACME", date("2024-03-01"), "R500", 2)
        .unwrap();

    assert_eq!(
        2,
        airline
            .use_client_tickets("ACME", date("2024-03-01"), "R500")
            .unwrap()
    );
    // ACME's tickets are visible as used from the flight side
    let flight = airline.flight("R500", date("2024-03-01")).unwrap();
    let used = flight
        .tickets()
        .iter()
        .filter(|code| airline.ledger().get(code).unwrap().is_used())
        .count();
    assert_eq!(2, used);
    assert_eq!(384_000, airline.pending_balance("ana").unwrap());

    // completing the flight only has ana's ticket left to mark
    assert_eq!(1, airline.complete_flight(date("2024-03-01"), "R500"));
}

#[test]
fn test_use_client_tickets_errors() {
    let mut airline = airline();
    airline
        .schedule_flight(date("2024-03-01"), "R500", "PLANE_2")
        .unwrap();
    assert!(matches!(
        airline.use_client_tickets("nobody", date("2024-03-01"), "R500"),
        Err(AirlineError::ClientNotFound(_))
    ));
    assert!(matches!(
        airline.use_client_tickets("ana", date("2024-04-01"), "R500"),
        Err(AirlineError::FlightNotFound(_))
    ));
    assert!(matches!(
        airline.pending_balance("nobody"),
        Err(AirlineError::ClientNotFound(_))
    ));
}
