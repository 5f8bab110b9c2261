use autolobby_core::{Command, Control, Event, FileKind, MapClassifier, PlayerSlot, Race, SlotKind};
use autolobby_engine::{AutoMenuEngine, HostView};
use autolobby_sim::{FixedClassifier, MemoryConfig, MemoryLister, SimHost};

fn view<'a>(host: &'a SimHost, files: &'a dyn MapClassifier) -> HostView<'a> {
    HostView {
        clock: &host.clock,
        widgets: host,
        slots: host,
        maps: host,
        commands: host,
        files,
    }
}

fn hosting_store() -> MemoryConfig {
    let mut store = MemoryConfig::default();
    store.set("auto_menu", "auto_menu", "LAN");
    store.set("auto_menu", "map", "maps/*.scx");
    store.set("auto_menu", "race", "ZERG");
    store
}

fn engine_for(store: &MemoryConfig, instance: u32) -> AutoMenuEngine {
    AutoMenuEngine::new(
        store,
        &MemoryLister::new(&["a.scx"]),
        &FixedClassifier(FileKind::Playable),
        instance,
        77,
    )
}

/// Chat dialog with the start button (7) and the countdown label (24).
fn chat_host() -> SimHost {
    let mut host = SimHost::new();
    host.show("Chat", 25);
    host.set_local_player(Some(0));
    host
}

fn fill_ready_humans(host: &mut SimHost, count: usize, race: Race) {
    for index in 0..count {
        host.set_slot(index, PlayerSlot::human(race, 100));
    }
}

/// Walk the engine through the game browser so it decides it is hosting.
fn become_host(engine: &mut AutoMenuEngine, files: &dyn MapClassifier) {
    let mut host = SimHost::new();
    host.show("GameSel", 16);
    host.clock.set(500);
    engine.on_frame(&view(&host, files));
    assert!(engine.is_host());
}

#[test]
fn full_lobby_auto_starts_exactly_once() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    become_host(&mut engine, &files);

    let mut host = chat_host();
    fill_ready_humans(&mut host, 4, Race::Zerg);
    host.clock.set(40_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);

    for frame in 0..30u64 {
        host.clock.set(41_000 + frame * 16);
        engine.on_frame(&view(&host, &files));
    }
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);
    assert!(host.commands().is_empty());
}

#[test]
fn stragglers_hold_the_start_back() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    become_host(&mut engine, &files);

    let mut host = chat_host();
    fill_ready_humans(&mut host, 3, Race::Zerg);
    host.set_slot(3, PlayerSlot::human(Race::Zerg, 60));
    host.clock.set(40_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 0);

    // The last download finishes and the start goes through.
    host.set_slot(3, PlayerSlot::human(Race::Zerg, 100));
    host.clock.set(40_500);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);
}

#[test]
fn open_slots_wait_for_the_configured_timeout() {
    let mut store = hosting_store();
    store.set("auto_menu", "wait_for_min_players", "2");
    store.set("auto_menu", "wait_for_max_players", "8");
    store.set("auto_menu", "wait_for_time", "30000");
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    become_host(&mut engine, &files);

    // Lobby created at t=10_000.
    let mut create = SimHost::new();
    create.show("Create", 36);
    create.clock.set(10_000);
    engine.on_frame(&view(&create, &files));

    let mut host = chat_host();
    fill_ready_humans(&mut host, 3, Race::Zerg);
    let mut open = PlayerSlot::vacant();
    open.kind = SlotKind::EitherPreferHuman;
    host.set_slot(5, open);

    // Min met but a slot is still open and the timeout has not elapsed.
    host.clock.set(20_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 0);

    // Timeout elapsed: stop holding the door.
    host.clock.set(40_100);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);
}

#[test]
fn disabled_start_control_defers_the_launch() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    become_host(&mut engine, &files);

    let mut host = chat_host();
    fill_ready_humans(&mut host, 2, Race::Zerg);
    host.sim_control("Chat", 7).unwrap().script_disabled(true);
    host.clock.set(40_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 0);

    host.sim_control("Chat", 7).unwrap().script_disabled(false);
    host.clock.set(40_400);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);
}

#[test]
fn lobby_error_clears_pending_start_and_cools_down() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    become_host(&mut engine, &files);

    let mut host = chat_host();
    fill_ready_humans(&mut host, 2, Race::Zerg);
    host.clock.set(40_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);

    // Host reports an error: dismiss it and invalidate the pending start.
    host.show("gluPOk", 2);
    host.clock.set(41_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("gluPOk", 1).unwrap().presses(), 1);
    host.hide("gluPOk");

    // Within the cooldown nothing restarts.
    host.clock.set(42_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 1);

    // After the cooldown the start is issued again.
    host.clock.set(43_500);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Chat", 7).unwrap().activations(), 2);
}

#[test]
fn composite_token_is_confirmed_without_a_command() {
    let mut store = hosting_store();
    store.set("auto_menu", "race", "RANDOMTP");
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);

    let mut host = chat_host();
    host.set_slot(0, PlayerSlot::human(Race::Protoss, 100));
    host.clock.set(1_000);
    engine.on_frame(&view(&host, &files));

    assert!(host.commands().is_empty());
    let events: Vec<Event> = engine.events.drain().collect();
    assert!(events.contains(&Event::RaceConfirmed {
        slot: 0,
        race: Race::Protoss
    }));

    for frame in 0..10u64 {
        host.clock.set(2_000 + frame * 400);
        engine.on_frame(&view(&host, &files));
    }
    assert!(host.commands().is_empty());
}

#[test]
fn race_requests_are_debounced() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);

    let mut host = chat_host();
    host.set_slot(0, PlayerSlot::human(Race::Terran, 100));

    host.clock.set(1_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.commands().len(), 1);
    assert_eq!(
        host.commands()[0],
        Command::RequestRaceChange {
            slot: 0,
            race: Race::Zerg
        }
    );

    // Inside the debounce window nothing new goes out.
    host.clock.set(1_100);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.commands().len(), 1);

    // Past the window the request repeats, the host still not having obliged.
    host.clock.set(1_400);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.commands().len(), 2);

    // The host applies the race: confirmed, no further traffic.
    host.set_slot(0, PlayerSlot::human(Race::Zerg, 100));
    host.clock.set(1_800);
    engine.on_frame(&view(&host, &files));
    host.clock.set(2_200);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.commands().len(), 2);
}

#[test]
fn countdown_below_two_blocks_race_requests() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);

    let mut host = chat_host();
    host.sim_control("Chat", 24).unwrap().script_text("1");
    engine.change_race(&view(&host, &files), 0, Race::Zerg);
    assert!(host.commands().is_empty());

    host.sim_control("Chat", 24).unwrap().script_text("3");
    engine.change_race(&view(&host, &files), 0, Race::Zerg);
    assert_eq!(host.commands().len(), 1);
}

#[test]
fn single_player_roster_write_is_idempotent() {
    let store = hosting_store();
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);

    let mut host = SimHost::new();
    host.show("Create", 36);
    engine.change_race(&view(&host, &files), 2, Race::Protoss);
    engine.change_race(&view(&host, &files), 2, Race::Protoss);

    let ctrl = host.sim_control("Create", 30).unwrap();
    assert_eq!(ctrl.selected_value(), Some(Race::Protoss.wire_value()));
    assert_eq!(ctrl.writes(), 1);
    assert!(host.commands().is_empty());
}

#[test]
fn unknown_race_token_never_touches_the_roster() {
    let mut store = hosting_store();
    store.set("auto_menu", "auto_menu", "SINGLE_PLAYER");
    store.set("auto_menu", "race", "XENO");
    store.set("auto_menu", "enemy_count", "0");
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);

    let mut host = SimHost::new();
    host.show("Create", 36);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("Create", 28).unwrap().writes(), 0);
}

#[test]
fn join_wait_staggers_by_instance_then_hosts() {
    let mut store = hosting_store();
    store.set("auto_menu", "game", "TargetGame");
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 1);

    let mut host = SimHost::new();
    host.show("GameSel", 16);
    host.sim_control("GameSel", 5)
        .unwrap()
        .script_options(&["SomeoneElse"]);

    // Instance 1 waits 6 seconds for the named session to appear.
    host.clock.set(1_000);
    engine.on_frame(&view(&host, &files));
    host.clock.set(5_000);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("GameSel", 15).unwrap().presses(), 0);

    host.clock.set(7_100);
    engine.on_frame(&view(&host, &files));
    assert_eq!(host.sim_control("GameSel", 15).unwrap().presses(), 1);
    assert!(engine.is_host());

    let events: Vec<Event> = engine.events.drain().collect();
    assert!(events.contains(&Event::HostingGame));
}

#[test]
fn matched_session_joins_and_drops_the_map_selection() {
    let mut store = hosting_store();
    store.set("auto_menu", "game", "TargetGame");
    let files = FixedClassifier(FileKind::Playable);
    let mut engine = engine_for(&store, 0);
    assert_eq!(engine.last_chosen_map(), "maps/a.scx");

    let mut host = SimHost::new();
    host.show("GameSel", 16);
    host.sim_control("GameSel", 5)
        .unwrap()
        .script_options(&["SomeoneElse", "TargetGame"]);
    host.clock.set(1_000);
    engine.on_frame(&view(&host, &files));

    assert_eq!(
        host.sim_control("GameSel", 5).unwrap().selected_index(),
        Some(1)
    );
    assert_eq!(host.sim_control("GameSel", 13).unwrap().presses(), 1);
    assert_eq!(host.sim_control("GameSel", 15).unwrap().presses(), 0);
    assert!(!engine.is_host());
    assert_eq!(engine.last_chosen_map(), "");

    let events: Vec<Event> = engine.events.drain().collect();
    assert!(events.contains(&Event::JoiningGame {
        name: "TargetGame".to_string()
    }));
}
