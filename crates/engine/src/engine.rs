use crate::{join_map_path, AutoMenuConfig, MapPool, MAX_OPPONENTS};
use autolobby_core::{
    Clock, Command, CommandDispatcher, ConfigStore, Event, EventBus, FileKind, LobbySnapshot,
    MapClassifier, MapLister, MapListing, MenuFault, MenuMode, Race, RngState, Screen, SlotTable,
    WidgetTree, MAP_RECORD_SCAN_LIMIT, PLAYABLE_SLOTS,
};
use log::warn;
use std::path::Path;

/// Consecutive map-load rejections tolerated before the automation disables
/// itself for the remainder of the process.
pub const MAX_MAP_RETRIES: u32 = 50;

const RACE_SELECT_DEBOUNCE_MS: u64 = 300;
const ERROR_COOLDOWN_MS: u64 = 2_000;
const JOIN_WAIT_STEP_MS: u64 = 3_000;
const PLACEHOLDER_IDENTITY: &str = "AUTOLOBBY";

/// Per-frame borrow of the host collaborators. The engine keeps nothing out
/// of it across frames.
pub struct HostView<'a> {
    pub clock: &'a dyn Clock,
    pub widgets: &'a dyn WidgetTree,
    pub slots: &'a dyn SlotTable,
    pub maps: &'a dyn MapListing,
    pub commands: &'a dyn CommandDispatcher,
    pub files: &'a dyn MapClassifier,
}

/// The per-frame menu state machine. Single-threaded and non-blocking; all
/// waiting is a timestamp comparison on a later poll.
pub struct AutoMenuEngine {
    config: AutoMenuConfig,
    pool: MapPool,
    last_chosen_map: String,
    retry_count: u32,
    exhaustion_reported: bool,
    created_at: u64,
    join_wait_since: u64,
    last_race_attempt: u64,
    last_error_dismiss: u64,
    race_confirmed: bool,
    start_issued: bool,
    is_host: bool,
    prev_screen: Screen,
    instance: u32,
    rng: RngState,
    pub events: EventBus,
}

impl AutoMenuEngine {
    /// `instance` is this process's ordinal among local automation instances;
    /// it staggers join attempts against the same session.
    pub fn new(
        store: &dyn ConfigStore,
        lister: &dyn MapLister,
        classifier: &dyn MapClassifier,
        instance: u32,
        seed: u64,
    ) -> Self {
        let mut engine = Self {
            config: AutoMenuConfig::default(),
            pool: MapPool::default(),
            last_chosen_map: String::new(),
            retry_count: 0,
            exhaustion_reported: false,
            created_at: 0,
            join_wait_since: 0,
            last_race_attempt: 0,
            last_error_dismiss: 0,
            race_confirmed: false,
            start_issued: false,
            is_host: false,
            prev_screen: Screen::None,
            instance,
            rng: RngState::from_seed(seed),
            events: EventBus::default(),
        };
        engine.reload_config(store, lister, classifier);
        engine
    }

    pub fn config(&self) -> &AutoMenuConfig {
        &self.config
    }

    /// Full path of the current selection, empty when none exists.
    pub fn last_chosen_map(&self) -> &str {
        &self.last_chosen_map
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn is_host(&self) -> bool {
        self.is_host
    }

    pub fn pool(&self) -> &MapPool {
        &self.pool
    }

    /// Re-read configuration; called at process start and at match end. The
    /// map pool and iteration cursor survive unless the resolved pattern or
    /// the iteration policy actually changed.
    pub fn reload_config(
        &mut self,
        store: &dyn ConfigStore,
        lister: &dyn MapLister,
        classifier: &dyn MapClassifier,
    ) {
        let next = AutoMenuConfig::load(store);
        let map_changed = next.map_pattern != self.config.map_pattern;
        let policy_changed = next.map_iteration != self.config.map_iteration;

        if map_changed {
            self.pool
                .reload(lister, classifier, &next.map_dir, &next.map_pattern);
            self.last_chosen_map.clear();
            self.events.push(Event::MapPoolReloaded {
                entries: self.pool.len(),
            });
        } else if policy_changed {
            self.pool.reset_cursor();
            self.last_chosen_map.clear();
        }

        self.config = next;
        if map_changed || policy_changed {
            self.choose_next_map();
        }
    }

    /// Drive one frame. Never blocks; a missing dialog or control anywhere
    /// below means the frame is an idle retry, not an error.
    pub fn on_frame(&mut self, host: &HostView<'_>) {
        if !self.config.mode.enabled() {
            return;
        }
        if self.retry_count > MAX_MAP_RETRIES {
            if !self.exhaustion_reported {
                self.exhaustion_reported = true;
                warn!("map retry budget exhausted, automation disabled");
                self.events.push(Event::FaultRaised {
                    fault: MenuFault::RetriesExhausted {
                        attempts: self.retry_count,
                    },
                });
            }
            return;
        }

        let screen = Screen::classify(host.widgets);
        if screen != Screen::LobbyChat {
            self.race_confirmed = false;
            self.start_issued = false;
        }
        if screen != self.prev_screen {
            self.events.push(Event::ScreenChanged {
                from: self.prev_screen,
                to: screen,
            });
            self.prev_screen = screen;
        }

        match screen {
            Screen::MainMenu => self.on_main_menu(host),
            Screen::CampaignSelect => self.on_campaign_select(host),
            Screen::CreateGame => self.on_create_game(host),
            Screen::Connect => self.on_connect(host),
            Screen::GameBrowser => self.on_game_browser(host),
            Screen::LobbyChat => self.on_lobby_chat(host),
            Screen::Login => self.on_login(host),
            Screen::Score { .. } => self.on_score(host),
            Screen::MissionReady { race } => self.on_mission_ready(host, race),
            Screen::None => {}
        }
    }

    fn on_main_menu(&mut self, host: &HostView<'_>) {
        // Title splash still up: the host is loading.
        if host.widgets.dialog("TitleDlg").is_some() {
            return;
        }
        let branch = if self.config.mode == MenuMode::SinglePlayer {
            3
        } else {
            4
        };
        self.press(host, "MainMenu", branch);
        // Expansion-vs-classic prompt: always the expansion content.
        if host.widgets.dialog("Delete").is_some() {
            self.press(host, "Delete", 7);
        }
    }

    fn on_campaign_select(&mut self, host: &HostView<'_>) {
        // "Custom", bypassing the campaign flow.
        self.press(host, "RaceSelection", 10);
    }

    fn on_create_game(&mut self, host: &HostView<'_>) {
        self.created_at = host.clock.now_ms();
        if self.last_chosen_map.is_empty() {
            return;
        }

        if host.files.classify(Path::new(&self.last_chosen_map)) == FileKind::Playable {
            self.apply_game_type(host);
            if self.config.mode == MenuMode::SinglePlayer {
                let local = self.config.race;
                if let Some(race) = local.resolve(&mut self.rng) {
                    self.change_race(host, 0, race);
                }
                for slot in 1..=usize::from(self.config.enemy_count) {
                    let token = self.config.enemy_token(slot);
                    if let Some(race) = token.resolve(&mut self.rng) {
                        self.change_race(host, slot as u8, race);
                    }
                }
                self.close_extra_slots(host);
            }
        }

        // The host's map browser only offers what its own listing holds, so
        // every record is pointed at the selection. Kept in one place; a
        // broader-host port can gate it.
        self.overwrite_map_listing(host);

        if host.widgets.dialog("gluPOk").is_some() {
            self.fail_map_attempt(host);
        }
        self.press(host, "Create", 12);
    }

    fn on_connect(&mut self, host: &HostView<'_>) {
        let advance = match self.config.mode {
            MenuMode::BattleNet => true,
            _ => {
                let matched = host
                    .widgets
                    .dialog("ConnSel")
                    .and_then(|dialog| dialog.control(5))
                    .map(|list| list.is_visible() && list.select_text(&self.config.lan_mode))
                    .unwrap_or(false);
                if matched {
                    self.events.push(Event::LanProviderSelected {
                        provider: self.config.lan_mode.clone(),
                    });
                }
                matched
            }
        };
        if advance {
            self.press(host, "ConnSel", 9);
        }
        self.join_wait_since = 0;
    }

    fn on_game_browser(&mut self, host: &HostView<'_>) {
        let now = host.clock.now_ms();
        if self.join_wait_since == 0 {
            self.join_wait_since = now;
        }
        let Some(dialog) = host.widgets.dialog("GameSel") else {
            return;
        };

        let joining = self.config.joining_intent();
        let matched = joining
            && dialog
                .control(5)
                .map(|list| list.select_text(&self.config.game_name))
                .unwrap_or(false);

        // Stagger the wait per local instance so several automated clients
        // don't storm the same session.
        let deadline = self.join_wait_since + JOIN_WAIT_STEP_MS * u64::from(self.instance + 1);
        if joining && !matched && now < deadline {
            return;
        }
        self.join_wait_since = now;
        self.is_host = !matched;

        if self.config.creating_intent() && self.is_host {
            if self.press(host, "GameSel", 15) {
                self.events.push(Event::HostingGame);
            }
        } else {
            // A joiner does not need a map selection of its own.
            self.last_chosen_map.clear();
            if self.press(host, "GameSel", 13) {
                self.events.push(Event::JoiningGame {
                    name: self.config.game_name.clone(),
                });
            }
        }
    }

    fn on_lobby_chat(&mut self, host: &HostView<'_>) {
        let now = host.clock.now_ms();
        self.join_wait_since = 0;

        self.confirm_lobby_race(host, now);

        if host.widgets.dialog("gluPOk").is_some() {
            self.press(host, "gluPOk", 1);
            // An error invalidates any pending start.
            self.start_issued = false;
            self.last_error_dismiss = now;
            self.events.push(Event::ErrorDismissed {
                screen: Screen::LobbyChat,
            });
        }

        self.try_auto_start(host, now);
    }

    fn on_login(&mut self, host: &HostView<'_>) {
        if let Some(edit) = host.widgets.dialog("gluPEdit") {
            if let Some(field) = edit.control(4) {
                field.set_text(PLACEHOLDER_IDENTITY);
            }
            self.press(host, "gluPEdit", 1);
        } else {
            self.press(host, "Login", 4);
        }
    }

    fn on_score(&mut self, host: &HostView<'_>) {
        if self.config.auto_restart {
            self.press(host, "End", 7);
        }
    }

    fn on_mission_ready(&mut self, host: &HostView<'_>, race: Race) {
        let dialog = match race {
            Race::Zerg => "ReadyZ",
            Race::Terran => "ReadyT",
            _ => "ReadyP",
        };
        self.press(host, dialog, 13);
    }

    /// Change a roster slot's race, idempotently. On the single-player
    /// roster this is a direct widget write; in a multiplayer lobby it goes
    /// through the host's command channel, and never once the start
    /// countdown has dropped below 2.
    pub fn change_race(&mut self, host: &HostView<'_>, slot: u8, race: Race) {
        if let Some(dialog) = host.widgets.dialog("Create") {
            let slot = slot.min(MAX_OPPONENTS as u8);
            let Some(ctrl) = dialog.control(28 + i16::from(slot)) else {
                return;
            };
            if ctrl.selected_value() != Some(race.wire_value()) {
                ctrl.set_selected_value(race.wire_value());
            }
            return;
        }

        let Some(chat) = host.widgets.dialog("Chat") else {
            return;
        };
        let Some(countdown) = chat.control(24) else {
            return;
        };
        if let Some(text) = countdown.text() {
            if let Some(first) = text.chars().next() {
                if first < '2' {
                    return;
                }
            }
        }
        host.commands.enqueue(Command::RequestRaceChange { slot, race });
        self.events.push(Event::RaceChangeRequested { slot, race });
    }

    fn confirm_lobby_race(&mut self, host: &HostView<'_>, now: u64) {
        if self.race_confirmed || host.widgets.dialog("Chat").is_none() {
            return;
        }
        let Some(local) = host.slots.local_player() else {
            return;
        };
        if local >= PLAYABLE_SLOTS || now < self.last_race_attempt + RACE_SELECT_DEBOUNCE_MS {
            return;
        }
        self.last_race_attempt = now;

        let token = self.config.race;
        let Some(resolved) = token.resolve(&mut self.rng) else {
            return;
        };
        if let Some(current) = host.slots.slot(local).race {
            if token.admits(current) {
                self.race_confirmed = true;
                self.events.push(Event::RaceConfirmed {
                    slot: local as u8,
                    race: current,
                });
                return;
            }
        }
        self.change_race(host, local as u8, resolved);
    }

    fn try_auto_start(&mut self, host: &HostView<'_>, now: u64) {
        if !self.config.creating_intent()
            || self.start_issued
            || !self.is_host
            || now < self.last_error_dismiss + ERROR_COOLDOWN_MS
        {
            return;
        }

        let lobby = LobbySnapshot::new(host.slots);
        let ready = lobby.ready_human_count();
        let humans = lobby.human_count();
        let open = lobby.open_slot_count();

        if ready == 0 || ready != humans {
            return;
        }
        if ready < self.config.min_players as usize && open != 0 {
            return;
        }
        let waited_out = now > self.created_at + self.config.wait_time_ms;
        if ready >= self.config.max_players as usize || open == 0 || waited_out {
            let Some(start) = host
                .widgets
                .dialog("Chat")
                .and_then(|dialog| dialog.control(7))
            else {
                return;
            };
            if !start.is_disabled() {
                self.start_issued = true;
                start.activate();
                self.events.push(Event::StartActivated { ready_humans: ready });
            }
        }
    }

    fn apply_game_type(&mut self, host: &HostView<'_>) {
        let Some(game_type) = self.config.game_type else {
            return;
        };
        let Some(dropdown) = host
            .widgets
            .dialog("Create")
            .and_then(|dialog| dialog.control(17))
        else {
            return;
        };
        if dropdown.selected_value() != Some(game_type.wire_value()) {
            dropdown.set_selected_value(game_type.wire_value());
            self.events.push(Event::GameTypeSet { game_type });
        }
    }

    fn close_extra_slots(&mut self, host: &HostView<'_>) {
        let Some(dialog) = host.widgets.dialog("Create") else {
            return;
        };
        for extra in usize::from(self.config.enemy_count)..MAX_OPPONENTS {
            let Some(ctrl) = dialog.control(21 + extra as i16) else {
                continue;
            };
            if ctrl.selected_index() != Some(0) {
                ctrl.set_selected_index(0);
                self.events.push(Event::SlotClosed {
                    slot: extra as u8 + 1,
                });
            }
        }
    }

    fn overwrite_map_listing(&mut self, host: &HostView<'_>) {
        let path = self.last_chosen_map.clone();
        let (dir, file) = split_map_path(&path);
        for index in 0..MAP_RECORD_SCAN_LIMIT {
            let Some(record) = host.maps.record(index) else {
                break;
            };
            record.open_all_slots();
            record.set_entry_name(file);
            record.set_file_name(file);
            record.set_full_path(&path);
        }
        host.maps.set_current_folder(dir);
    }

    fn fail_map_attempt(&mut self, host: &HostView<'_>) {
        self.choose_next_map();
        self.retry_count += 1;
        self.events.push(Event::FaultRaised {
            fault: MenuFault::HostRejection {
                screen: Screen::CreateGame,
            },
        });
        self.press(host, "gluPOk", 1);
        self.events.push(Event::ErrorDismissed {
            screen: Screen::CreateGame,
        });
    }

    fn choose_next_map(&mut self) {
        let Some(name) = self
            .pool
            .select_next(self.config.map_iteration, &mut self.rng)
            .map(str::to_string)
        else {
            return;
        };
        self.last_chosen_map = join_map_path(&self.config.map_dir, &name);
        self.events.push(Event::MapChosen {
            path: self.last_chosen_map.clone(),
        });
    }

    fn press(&self, host: &HostView<'_>, dialog: &str, index: i16) -> bool {
        let Some(ctrl) = host
            .widgets
            .dialog(dialog)
            .and_then(|dialog| dialog.control(index))
        else {
            return false;
        };
        ctrl.press();
        true
    }
}

fn split_map_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(at) => (&path[..at], &path[at + 1..]),
        None => ("", path),
    }
}
