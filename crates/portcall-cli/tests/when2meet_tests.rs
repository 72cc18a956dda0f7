//! Tests for when2meet event-page parsing against synthetic page text.

use portcall_cli::when2meet::parse_event_page;
use portcall_core::error::PortcallError;

/// A trimmed-down event page: two participants, two 15-minute slots.
const PAGE: &str = r#"
<html><head><script type="text/javascript">
PeopleNames = []; PeopleIDs = [];
PeopleNames[0] = 'Hae';PeopleIDs[0] = 101;
PeopleNames[1] = 'Lee, Jun';PeopleIDs[1] = 202;
AvailableAtSlot = []; TimeOfSlot = [];
AvailableAtSlot[0] = []; AvailableAtSlot[0].push(101);
AvailableAtSlot[0].push(202);
AvailableAtSlot[1] = []; AvailableAtSlot[1].push(101);
TimeOfSlot[0] = 1610312400;
TimeOfSlot[1] = 1610313300;
</script></head>
<body>
<div id="GroupTime1610312400" onmouseover='ShowSlot(1610312400,"Sunday 9:00:00 AM");' onmouseout='HideSlot();' class="slot"></div>
<div id="GroupTime1610313300" onmouseover='ShowSlot(1610313300,"Sunday 9:15:00 AM");' onmouseout='HideSlot();' class="slot"></div>
</body></html>
"#;

#[test]
fn parses_participants_in_page_order() {
    let table = parse_event_page(PAGE, "port-alpha").unwrap();
    assert_eq!(
        table.people(),
        ["Hae".to_string(), "Lee, Jun".to_string()]
    );
}

#[test]
fn parses_per_slot_availability() {
    let table = parse_event_page(PAGE, "port-alpha").unwrap();
    assert_eq!(table.rows().len(), 2);

    assert_eq!(table.rows()[0].slot.label(), "Sunday 09:00:00 AM");
    assert_eq!(table.rows()[0].flags, vec![true, true]);

    // Only participant 101 pushed into slot 1.
    assert_eq!(table.rows()[1].slot.label(), "Sunday 09:15:00 AM");
    assert_eq!(table.rows()[1].flags, vec![true, false]);
}

#[test]
fn unescapes_quoted_names() {
    let page = PAGE.replace(
        "PeopleNames[1] = 'Lee, Jun';",
        r"PeopleNames[1] = 'O\'Brien';",
    );
    let table = parse_event_page(&page, "port-alpha").unwrap();
    assert_eq!(table.people()[1], "O'Brien");
}

#[test]
fn empty_participant_list_is_no_participants() {
    let page = "<html><script>TimeOfSlot[0] = 1610312400;</script></html>";
    let err = parse_event_page(page, "port-ghost").unwrap_err();
    assert!(matches!(err, PortcallError::NoParticipants(ref g) if g == "port-ghost"));
}

#[test]
fn page_without_slots_is_an_acquisition_error() {
    let page = "<html><script>PeopleNames[0] = 'Hae';PeopleIDs[0] = 101;</script></html>";
    let err = parse_event_page(page, "port-alpha").unwrap_err();
    assert!(matches!(err, PortcallError::Acquisition { .. }));
}

#[test]
fn slot_without_a_label_is_an_acquisition_error() {
    // TimeOfSlot references a time id with no GroupTime div.
    let page = PAGE.replace("GroupTime1610313300", "GroupTimeX");
    let err = parse_event_page(&page, "port-alpha").unwrap_err();
    assert!(matches!(err, PortcallError::Acquisition { .. }));
}

#[test]
fn malformed_slot_label_fails_fast() {
    let page = PAGE.replace("Sunday 9:15:00 AM", "whenever works");
    let err = parse_event_page(&page, "port-alpha").unwrap_err();
    assert!(matches!(err, PortcallError::MalformedTimeLabel(_)));
}

#[test]
fn participant_never_available_gets_all_false() {
    let page = PAGE.replace("AvailableAtSlot[0].push(202);\n", "");
    let table = parse_event_page(&page, "port-alpha").unwrap();
    assert_eq!(table.rows()[0].flags, vec![true, false]);
    assert_eq!(table.rows()[1].flags, vec![true, false]);
}
