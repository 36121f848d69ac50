//! Full console sessions, including persistence across "runs".

use railnet::console;
use railnet::domain::{ClockTime, TrainId};
use railnet::network::Network;
use railnet::persist;

fn run_session(network: &mut Network, script: &str) -> String {
    let mut out = Vec::new();
    console::run(network, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn build_query_and_tear_down() {
    let mut network = Network::new();
    let script = "\
insert-line Coastal
Ostend
Bruges
Ghent

insert-schedule Coastal
100
Ostend 08:00
Bruges 08:20
Ghent 08:40

insert-schedule Coastal
200
Ostend 08:10
Bruges 08:25
Ghent 08:50

best-schedule Coastal
Ostend
Ghent
09:00
station-trains Bruges
remove-line Coastal
consult-station Bruges
quit
";
    let out = run_session(&mut network, script);
    assert_eq!(
        out,
        "Line inserted.\n\
         Schedule inserted.\n\
         Schedule inserted.\n\
         200\nOstend 08:10\nBruges 08:25\nGhent 08:50\n\
         Train 100 08:20\nTrain 200 08:25\n\
         Line removed.\n\
         Nonexistent station.\n\
         Bye.\n"
    );
    assert_eq!(network.station_count(), 0);
}

#[test]
fn multi_word_station_names_in_session() {
    let mut network = Network::new();
    let script = "\
insert-line Night Express
Porto Campanha
Vila Nova de Gaia
Lisboa Oriente

insert-schedule Night Express
77
Porto Campanha 22:30
Lisboa Oriente 23:55

consult-schedules Night Express
Porto Campanha
";
    let out = run_session(&mut network, script);
    assert_eq!(
        out,
        "Line inserted.\nSchedule inserted.\n\
         77\nPorto Campanha 22:30\nLisboa Oriente 23:55\n"
    );
}

#[test]
fn session_state_survives_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    // First run: build the network, then persist it
    let mut network = persist::load_or_default(&path);
    run_session(
        &mut network,
        "insert-line A\nX\nY\nZ\n\ninsert-schedule A\n100\nX 08:00\nY 08:20\nZ 08:40\n\n",
    );
    persist::save(&path, &network).unwrap();

    // Second run: the restored network answers the same queries
    let mut restored = persist::load_or_default(&path);
    assert_eq!(restored.consult_line("A").unwrap(), ["X", "Y", "Z"]);
    let out = run_session(&mut restored, "consult-schedules A\nX\nstation-trains Y\n");
    assert_eq!(out, "100\nX 08:00\nY 08:20\nZ 08:40\nTrain 100 08:20\n");

    // Schedules restored from the snapshot still guard against overtakes
    let err = restored
        .insert_schedule(
            "A",
            TrainId::new(300),
            &[
                ("X", ClockTime::parse_hhmm("08:05").unwrap()),
                ("Y", ClockTime::parse_hhmm("08:15").unwrap()),
            ],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        railnet::domain::NetworkError::InvalidSchedule(_)
    ));
}
