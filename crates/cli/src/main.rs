//! Dry-run driver: loads a JSON settings file, walks the automation engine
//! through a scripted host and prints the event stream as JSON lines.

use anyhow::{bail, Context};
use autolobby_core::{MenuMode, PlayerSlot, Race};
use autolobby_engine::{AutoMenuEngine, HostView};
use autolobby_sim::{DirMapLister, ExtensionClassifier, MemoryConfig, SimHost};
use std::fs;

#[derive(Debug)]
struct CliOptions {
    config: Option<String>,
    frames: u64,
    instance: u32,
    seed: u64,
}

fn print_usage() {
    println!("usage: autolobby-cli [--config settings.json] [--frames N] [--instance N] [--seed N]");
    println!();
    println!("Drives the menu automation against a scripted host and prints");
    println!("every engine event as a JSON line. The settings file is a JSON");
    println!("object of config sections, e.g.");
    println!("  {{ \"auto_menu\": {{ \"auto_menu\": \"LAN\", \"map\": \"maps/*.scx\" }} }}");
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        config: None,
        frames: 600,
        instance: 0,
        seed: 0xC0FFEE,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(args.next().context("--config needs a path")?),
            "--frames" => {
                options.frames = args
                    .next()
                    .context("--frames needs a count")?
                    .parse()
                    .context("--frames needs a number")?;
            }
            "--instance" => {
                options.instance = args
                    .next()
                    .context("--instance needs an ordinal")?
                    .parse()
                    .context("--instance needs a number")?;
            }
            "--seed" => {
                options.seed = args
                    .next()
                    .context("--seed needs a value")?
                    .parse()
                    .context("--seed needs a number")?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

fn default_store() -> MemoryConfig {
    let mut store = MemoryConfig::default();
    store.set("auto_menu", "auto_menu", "LAN");
    store.set("auto_menu", "map", "maps/*.scx");
    store.set("auto_menu", "race", "RANDOM");
    store
}

/// Where the scripted host currently is; advanced by watching which
/// controls the engine pressed during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Title,
    MainMenu,
    Connect,
    Browser,
    Create,
    Lobby,
    Started,
}

fn advance_stage(stage: Stage, host: &mut SimHost, lan_mode: &str, single: bool, frame: u64) -> Stage {
    match stage {
        Stage::Title => {
            if frame >= 5 {
                host.hide("TitleDlg");
                return Stage::MainMenu;
            }
            stage
        }
        Stage::MainMenu => {
            if pressed(host, "MainMenu", 3) {
                host.hide_all();
                host.show("Create", 36);
                for _ in 0..3 {
                    host.add_map_record();
                }
                return Stage::Create;
            }
            if pressed(host, "MainMenu", 4) {
                host.hide_all();
                host.show("ConnSel", 12);
                if let Some(list) = host.sim_control("ConnSel", 5) {
                    list.script_options(&[lan_mode]);
                }
                return Stage::Connect;
            }
            stage
        }
        Stage::Connect => {
            if pressed(host, "ConnSel", 9) {
                host.hide_all();
                host.show("GameSel", 16);
                return Stage::Browser;
            }
            stage
        }
        Stage::Browser => {
            if pressed(host, "GameSel", 15) {
                host.hide_all();
                host.show("Create", 36);
                for _ in 0..3 {
                    host.add_map_record();
                }
                return Stage::Create;
            }
            if pressed(host, "GameSel", 13) {
                host.hide_all();
                enter_lobby(host);
                return Stage::Lobby;
            }
            stage
        }
        Stage::Create => {
            if pressed(host, "Create", 12) {
                host.hide_all();
                // Single player launches straight into the game; a host
                // waits in the lobby instead.
                if single {
                    return Stage::Started;
                }
                enter_lobby(host);
                return Stage::Lobby;
            }
            stage
        }
        Stage::Lobby => {
            let started = host
                .sim_control("Chat", 7)
                .map(|ctrl| ctrl.activations() > 0)
                .unwrap_or(false);
            if started {
                return Stage::Started;
            }
            stage
        }
        Stage::Started => stage,
    }
}

fn pressed(host: &SimHost, dialog: &str, index: usize) -> bool {
    host.sim_control(dialog, index)
        .map(|ctrl| ctrl.presses() > 0)
        .unwrap_or(false)
}

fn enter_lobby(host: &mut SimHost) {
    host.show("Chat", 25);
    host.set_local_player(Some(0));
    host.set_slot(0, PlayerSlot::human(Race::Terran, 100));
    host.set_slot(1, PlayerSlot::human(Race::Zerg, 100));
}

fn main() -> anyhow::Result<()> {
    let options = parse_args()?;
    let store = match &options.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            MemoryConfig::from_json(&raw).with_context(|| format!("parse {path}"))?
        }
        None => default_store(),
    };

    let lister = DirMapLister;
    let files = ExtensionClassifier;
    let mut engine = AutoMenuEngine::new(&store, &lister, &files, options.instance, options.seed);
    if !engine.config().mode.enabled() {
        bail!("auto_menu is OFF, nothing to drive");
    }
    let lan_mode = engine.config().lan_mode.clone();
    let single = engine.config().mode == MenuMode::SinglePlayer;

    let mut host = SimHost::new();
    host.show("MainMenu", 8);
    host.show("TitleDlg", 1);
    let mut stage = Stage::Title;

    for frame in 0..options.frames {
        host.clock.set(1_000 + frame * 100);
        {
            let frame_view = HostView {
                clock: &host.clock,
                widgets: &host,
                slots: &host,
                maps: &host,
                commands: &host,
                files: &files,
            };
            engine.on_frame(&frame_view);
        }
        for event in engine.events.drain() {
            println!("{}", serde_json::to_string(&event)?);
        }
        stage = advance_stage(stage, &mut host, &lan_mode, single, frame);
        if stage == Stage::Started {
            break;
        }
    }

    for command in host.drain_commands() {
        println!("{}", serde_json::to_string(&command)?);
    }
    if stage == Stage::Started {
        println!("game launch reached");
    } else {
        println!("stopped at stage {stage:?}");
    }
    Ok(())
}
