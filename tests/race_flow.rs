use racehud::backends::virtual_input::VirtualDevice;
use racehud::gauges::HudMaterials;
use racehud::*;

#[derive(Default)]
struct Karts {
    slots: EntitySlots,
    calls: Vec<(EntityId, KartAction, i32)>,
}

impl KartControls for Karts {
    fn is_alive(&self, id: EntityId) -> bool {
        self.slots.is_alive(id)
    }

    fn action(&mut self, id: EntityId, action: KartAction, value: i32) {
        self.calls.push((id, action, value));
    }
}

#[derive(Default)]
struct Replay {
    saves: usize,
}

impl ReplaySink for Replay {
    fn save(&mut self) {
        self.saves += 1;
    }
}

#[derive(Default)]
struct Host {
    paused: usize,
    menus: usize,
    fullscreen_toggles: usize,
    wireframe: bool,
    cursor_visible: Option<bool>,
    missiles: usize,
    replay: Replay,
}

impl Platform for Host {
    fn pause_race(&mut self) {
        self.paused += 1;
    }
    fn open_race_menu(&mut self) {
        self.menus += 1;
    }
    fn toggle_fullscreen(&mut self) {
        self.fullscreen_toggles += 1;
    }
    fn set_wireframe(&mut self, on: bool) {
        self.wireframe = on;
    }
    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = Some(visible);
    }
    fn give_debug_missile(&mut self) {
        self.missiles += 1;
    }
    fn history(&mut self) -> &mut dyn ReplaySink {
        &mut self.replay
    }
}

struct World {
    phase: RacePhase,
    countdown: Option<Countdown>,
    clock: f32,
    players: Vec<EntityId>,
    karts: Vec<KartStatus>,
    debug: Vec<String>,
}

impl RaceView for World {
    fn phase(&self) -> RacePhase {
        self.phase
    }
    fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }
    fn clock(&self) -> f32 {
        self.clock
    }
    fn num_laps(&self) -> i32 {
        3
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
    fn player_kart(&self, index: usize) -> Option<EntityId> {
        self.players.get(index).copied()
    }
    fn karts(&self) -> &[KartStatus] {
        &self.karts
    }
    fn debug_text(&self) -> &[String] {
        &self.debug
    }
    fn minimap_point(&self, id: EntityId) -> Option<(f32, f32)> {
        Some((id.index as f32 * 10.0, 5.0))
    }
}

/// Records text draws only.
#[derive(Default)]
struct TextLog {
    texts: Vec<String>,
}

impl Renderer for TextLog {
    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _style: TextStyle) {
        self.texts.push(text.to_string());
    }
    fn draw_textured_quad(&mut self, _material: MaterialId, _rect: Rect, _rotation_deg: f32) {}
    fn draw_filled_polygon(&mut self, _points: &[(i32, i32)], _colors: &[Rgb]) {}
    fn bind_material(&mut self, _material: MaterialId, _force: bool) {}
}

impl TextLog {
    fn count(&self, text: &str) -> usize {
        self.texts.iter().filter(|t| *t == text).count()
    }
}

const MATS: HudMaterials = HudMaterials {
    steering_wheel: MaterialId(100),
    speed_back: MaterialId(101),
    speed_fore: MaterialId(102),
};

fn status(id: EntityId, position: u32, player: bool) -> KartStatus {
    KartStatus {
        id,
        position,
        lap: 0,
        time_at_lap: 0.0,
        speed: 12.0,
        max_speed: 30.0,
        wheelie_speed_ratio: 0.8,
        steer_percent: 0.25,
        on_ground: true,
        energy: 0.5,
        collectable_count: 0,
        collectable_icon: None,
        icon: MaterialId(id.index),
        color: Rgb::YELLOW,
        player_controlled: player,
        early_start_penalty: false,
    }
}

fn race(karts: &mut Karts, players: usize) -> World {
    let ids: Vec<_> = (0..players).map(|_| karts.slots.spawn()).collect();
    let ai = karts.slots.spawn();
    let mut statuses: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| status(*id, i as u32 + 1, true))
        .collect();
    statuses.push(status(ai, players as u32 + 1, false));
    World {
        phase: RacePhase::Race,
        countdown: None,
        clock: 10.0,
        players: ids,
        karts: statuses,
        debug: Vec::new(),
    }
}

#[test]
fn player_keys_route_and_system_keys_fall_back() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    assert_eq!(hud.rebuild_bindings(&world, &BindingProfile::default_profile()), 1);

    let left = DeviceEvent::new(DeviceCoord::key(keys::LEFT), 1);
    assert_eq!(hud.input(&left, &mut karts, &mut host), InputOutcome::Routed);
    assert_eq!(karts.calls, vec![(world.players[0], KartAction::Left, 1)]);

    let esc = DeviceEvent::new(DeviceCoord::key(keys::ESCAPE), 1);
    assert_eq!(hud.input(&esc, &mut karts, &mut host), InputOutcome::System(SystemCommand::Pause));
    assert_eq!((host.paused, host.menus), (1, 1));

    let esc_up = DeviceEvent::new(DeviceCoord::key(keys::ESCAPE), 0);
    assert_eq!(hud.input(&esc_up, &mut karts, &mut host), InputOutcome::Ignored);

    let f10 = DeviceEvent::new(DeviceCoord::key(keys::F10), 1);
    hud.input(&f10, &mut karts, &mut host);
    assert_eq!(host.replay.saves, 1);

    let f7 = DeviceEvent::new(DeviceCoord::key(keys::F7), 1);
    hud.input(&f7, &mut karts, &mut host);
    assert_eq!(host.missiles, 1);
}

#[test]
fn unbound_non_keyboard_events_are_dropped() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&world, &BindingProfile::default_profile());

    // Player 1 is keyboard-only; stick 3 is nobody's.
    let ev = DeviceEvent::new(DeviceCoord::stick_button(3, 0), 1);
    assert_eq!(hud.input(&ev, &mut karts, &mut host), InputOutcome::Ignored);
    assert!(karts.calls.is_empty());
    assert_eq!(host.paused, 0);
}

#[test]
fn shrinking_player_count_drops_old_bindings() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let two = race(&mut karts, 2);
    let profile = BindingProfile::default_profile();
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&two, &profile);

    let w_key = DeviceEvent::new(DeviceCoord::key(keys::W), 1);
    assert_eq!(hud.input(&w_key, &mut karts, &mut host), InputOutcome::Routed);

    let one = race(&mut karts, 1);
    hud.rebuild_bindings(&one, &profile);
    assert_eq!(hud.input(&w_key, &mut karts, &mut host), InputOutcome::Ignored);
    // Debug missile is single-player only and now allowed.
    hud.input(&DeviceEvent::new(DeviceCoord::key(keys::F7), 1), &mut karts, &mut host);
    assert_eq!(host.missiles, 1);
}

#[test]
fn one_shot_go_message_is_drawn_once() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    hud.add_message("GO", None, -1.0, 90, Rgb::RED);
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("GO"), 1);
    assert!(hud.messages().is_empty());

    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("GO"), 0);
}

#[test]
fn one_shot_waits_for_a_racing_frame() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let mut world = race(&mut karts, 1);
    world.phase = RacePhase::Start;
    world.countdown = Some(Countdown::Set);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    hud.add_message("Early!", None, -1.0, 40, Rgb::WHITE);
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("Set!"), 1);
    assert_eq!(log.count("Early!"), 0);
    assert_eq!(hud.messages().len(), 1);

    world.phase = RacePhase::Race;
    world.countdown = None;
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("Early!"), 1);
    assert!(hud.messages().is_empty());
}

#[test]
fn split_screen_messages_respect_owner() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 2);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    hud.add_message("lap record", Some(world.players[1]), 2.0, 30, Rgb::GREEN);
    hud.add_message("final lap", None, 2.0, 30, Rgb::WHITE);

    let mut log = TextLog::default();
    hud.update(0.5, &world, &mut log);
    assert_eq!(log.count("lap record"), 1);
    assert_eq!(log.count("final lap"), 2);

    let mut log = TextLog::default();
    hud.update(2.0, &world, &mut log);
    assert_eq!(log.count("final lap"), 2);
    assert!(hud.messages().is_empty());
}

#[test]
fn forgetting_a_kart_mid_race() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 2);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&world, &BindingProfile::default_profile());
    hud.add_message("for p2", Some(world.players[1]), 5.0, 30, Rgb::WHITE);

    let gone = world.players[1];
    karts.slots.despawn(gone);
    hud.forget_entity(gone);

    let ev = DeviceEvent::new(DeviceCoord::key(keys::A), 1);
    assert_eq!(hud.input(&ev, &mut karts, &mut host), InputOutcome::Ignored);
    assert!(hud.messages().is_empty());
}

#[test]
fn fullscreen_hides_and_restores_cursor() {
    let mut host = Host::default();
    let cfg = HudConfig {
        fullscreen: true,
        ..HudConfig::default()
    };
    let hud = RaceHud::new(cfg, MATS, &mut host);
    assert_eq!(host.cursor_visible, Some(false));
    hud.finish(&mut host);
    assert_eq!(host.cursor_visible, Some(true));
}

#[test]
fn toggles_flip_state() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&world, &BindingProfile::default_profile());

    let f12 = DeviceEvent::new(DeviceCoord::key(keys::F12), 1);
    hud.input(&f12, &mut karts, &mut host);
    assert!(hud.config().display_fps);

    let f11 = DeviceEvent::new(DeviceCoord::key(keys::F11), 1);
    hud.input(&f11, &mut karts, &mut host);
    assert!(host.wireframe);
    hud.input(&f11, &mut karts, &mut host);
    assert!(!host.wireframe);

    let f9 = DeviceEvent::new(DeviceCoord::key(keys::F9), 1);
    hud.input(&f9, &mut karts, &mut host);
    assert_eq!((host.fullscreen_toggles, host.paused), (1, 1));
}

#[test]
fn profile_mode_routes_nothing() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let cfg = HudConfig {
        profile_mode: true,
        ..HudConfig::default()
    };
    let mut hud = RaceHud::new(cfg, MATS, &mut host);
    assert_eq!(hud.rebuild_bindings(&world, &BindingProfile::default_profile()), 0);
    assert_eq!(hud.router().bound_count(), 0);
}

#[test]
fn pump_drains_a_scripted_device() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&world, &BindingProfile::default_profile());

    let mut dev = VirtualDevice::new("script");
    dev.press_key(keys::UP);
    dev.press_key(keys::ESCAPE);
    dev.release_key(keys::UP);
    dev.move_axis(0, 0, 500);

    assert_eq!(hud.pump(&mut dev, &mut karts, &mut host), 2);
    assert_eq!(host.paused, 1);
    assert_eq!(
        karts.calls,
        vec![
            (world.players[0], KartAction::Accel, 1),
            (world.players[0], KartAction::Accel, 0),
        ]
    );
}

#[test]
fn racing_frame_draws_gauges_and_icons() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("0:10:00"), 1);
    assert_eq!(log.count("Lap"), 1);
    assert_eq!(log.count("1/3"), 1);
    // Big position digit plus the icon column entry.
    assert_eq!(log.count("1"), 2);
    assert_eq!(log.count("st"), 2);
}

#[test]
fn early_start_penalty_is_announced_during_countdown() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let mut world = race(&mut karts, 2);
    world.phase = RacePhase::Start;
    world.countdown = Some(Countdown::Ready);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("Penalty time!!"), 0);

    world.karts[1].early_start_penalty = true;
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("Penalty time!!"), 1);
    assert_eq!(log.count("Ready!"), 1);

    // Only player karts count.
    world.karts[1].early_start_penalty = false;
    world.karts[2].early_start_penalty = true;
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("Penalty time!!"), 0);
}

#[test]
fn game_over_text_depends_on_finishing_position() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let mut world = race(&mut karts, 1);
    world.phase = RacePhase::Finish;
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("CONGRATULATIONS"), 1);
    assert_eq!(log.count("YOU WON THE RACE!"), 1);
    assert_eq!(log.count("0:10:00"), 0);

    world.karts[0].position = 2;
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("YOU FINISHED 2nd"), 1);
    assert_eq!(log.count("CONGRATULATIONS"), 0);
}

#[test]
fn world_debug_text_draws_first_ten_non_empty_lines() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let mut world = race(&mut karts, 1);
    world.debug = (0..12).map(|i| if i == 3 { String::new() } else { format!("dbg {i}") }).collect();
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    let drawn: Vec<_> = log.texts.iter().filter(|t| t.starts_with("dbg ")).cloned().collect();
    assert_eq!(drawn, ["dbg 0", "dbg 1", "dbg 2", "dbg 4", "dbg 5", "dbg 6", "dbg 7", "dbg 8", "dbg 9"]);
}

#[test]
fn fps_label_is_drawn_after_toggle() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);
    hud.rebuild_bindings(&world, &BindingProfile::default_profile());

    let f12 = DeviceEvent::new(DeviceCoord::key(keys::F12), 1);
    assert_eq!(hud.input(&f12, &mut karts, &mut host), InputOutcome::System(SystemCommand::ToggleFps));

    for _ in 0..49 {
        let mut log = TextLog::default();
        hud.update(1.0 / 64.0, &world, &mut log);
        assert_eq!(log.count("64"), 0);
    }
    let mut log = TextLog::default();
    hud.update(1.0 / 64.0, &world, &mut log);
    assert_eq!(log.count("64"), 1);

    hud.input(&f12, &mut karts, &mut host);
    let mut log = TextLog::default();
    hud.update(1.0 / 64.0, &world, &mut log);
    assert_eq!(log.count("64"), 0);
}

#[test]
fn one_shot_for_kart_without_viewport_is_discarded() {
    let mut karts = Karts::default();
    let mut host = Host::default();
    let world = race(&mut karts, 1);
    let ai = world.karts[1].id;
    let mut hud = RaceHud::new(HudConfig::default(), MATS, &mut host);

    hud.add_message("ai only", Some(ai), -1.0, 30, Rgb::WHITE);
    let mut log = TextLog::default();
    hud.update(0.016, &world, &mut log);
    assert_eq!(log.count("ai only"), 0);
    assert!(hud.messages().is_empty());
}
