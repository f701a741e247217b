use racehud::backends::virtual_input::VirtualDevice;
use racehud::gauges::HudMaterials;
use racehud::*;
use tracing_subscriber::EnvFilter;

/// Prints text draws; everything else is counted.
#[derive(Default)]
struct ConsoleRenderer {
    quads: usize,
    polygons: usize,
}

impl Renderer for ConsoleRenderer {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) {
        println!("  text {:>4},{:<4} size {:>3} {:?}", x, y, style.size, text);
    }

    fn draw_textured_quad(&mut self, _material: MaterialId, _rect: Rect, _rotation_deg: f32) {
        self.quads += 1;
    }

    fn draw_filled_polygon(&mut self, _points: &[(i32, i32)], _colors: &[Rgb]) {
        self.polygons += 1;
    }

    fn bind_material(&mut self, _material: MaterialId, _force: bool) {}
}

struct NoReplay;

impl ReplaySink for NoReplay {
    fn save(&mut self) {
        println!("(replay saved)");
    }
}

struct Shell {
    replay: NoReplay,
}

impl Platform for Shell {
    fn pause_race(&mut self) {
        println!("(paused)");
    }
    fn open_race_menu(&mut self) {}
    fn toggle_fullscreen(&mut self) {}
    fn set_wireframe(&mut self, _on: bool) {}
    fn set_cursor_visible(&mut self, _visible: bool) {}
    fn give_debug_missile(&mut self) {}
    fn history(&mut self) -> &mut dyn ReplaySink {
        &mut self.replay
    }
}

struct Karts(EntitySlots);

impl KartControls for Karts {
    fn is_alive(&self, id: EntityId) -> bool {
        self.0.is_alive(id)
    }

    fn action(&mut self, id: EntityId, action: KartAction, value: i32) {
        println!("kart {id}: {action} = {value}");
    }
}

struct Track {
    player: EntityId,
    karts: Vec<KartStatus>,
    clock: f32,
}

impl RaceView for Track {
    fn phase(&self) -> RacePhase {
        RacePhase::Race
    }
    fn countdown(&self) -> Option<Countdown> {
        (self.clock < 1.0).then_some(Countdown::Go)
    }
    fn clock(&self) -> f32 {
        self.clock
    }
    fn num_laps(&self) -> i32 {
        3
    }
    fn num_players(&self) -> usize {
        1
    }
    fn player_kart(&self, index: usize) -> Option<EntityId> {
        (index == 0).then_some(self.player)
    }
    fn karts(&self) -> &[KartStatus] {
        &self.karts
    }
    fn minimap_point(&self, _id: EntityId) -> Option<(f32, f32)> {
        Some((40.0, 60.0))
    }
}

fn main() -> racehud::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("racehud=debug")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => HudConfig::load(path)?,
        None => HudConfig::default(),
    };
    let profile = BindingProfile::default_profile();

    let mut slots = EntitySlots::new();
    let player = slots.spawn();
    let mut karts = Karts(slots);
    let track = Track {
        player,
        clock: 0.5,
        karts: vec![KartStatus {
            id: player,
            position: 1,
            lap: 0,
            time_at_lap: 0.0,
            speed: 18.0,
            max_speed: 30.0,
            wheelie_speed_ratio: 0.8,
            steer_percent: -0.3,
            on_ground: true,
            energy: 0.4,
            collectable_count: 2,
            collectable_icon: Some(MaterialId(7)),
            icon: MaterialId(1),
            color: Rgb::YELLOW,
            player_controlled: true,
            early_start_penalty: false,
        }],
    };

    let mut shell = Shell { replay: NoReplay };
    let materials = HudMaterials {
        steering_wheel: MaterialId(100),
        speed_back: MaterialId(101),
        speed_fore: MaterialId(102),
    };
    let mut hud = RaceHud::new(config, materials, &mut shell);
    hud.rebuild_bindings(&track, &profile);

    let mut device = VirtualDevice::new("script");
    device.press_key(keys::UP);
    device.press_key(keys::LEFT);
    device.press_key(keys::F10);

    hud.add_message("Final lap", None, 2.0, 40, Rgb::WHITE);
    hud.add_message("GO", None, -1.0, 90, Rgb::RED);

    let mut renderer = ConsoleRenderer::default();
    for frame in 0..3 {
        println!("frame {frame}");
        hud.pump(&mut device, &mut karts, &mut shell);
        hud.update(1.0 / 60.0, &track, &mut renderer);
    }
    println!("{} quads, {} polygons", renderer.quads, renderer.polygons);

    hud.finish(&mut shell);
    Ok(())
}
