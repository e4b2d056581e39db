mod config;
mod control;
mod display;
mod export;
mod geometry;
mod mandala;
mod oscillation;
mod planets;
mod sacred;
mod util;

use config::MandalaConfig;
use control::{ControlMessage, Controller};
use display::{Display, InputEvent, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mandala::{draw_hex_lattice, draw_mandala, draw_mandala_over, BACKGROUND};
use oscillation::{pulse_scale, DEFAULT_PULSE_AMPLITUDE};
use planets::{PlanetConfig, PLANETS};
use sacred::{nearest_fibonacci, FIBONACCI};
use sdl2::keyboard::Keycode;
use std::time::{SystemTime, UNIX_EPOCH};
use util::FpsCounter;

const CONFIG_PATH: &str = "mandala.json";
const EXPORT_SIZE: u32 = 2048;

/// Parsed command line options
struct Args {
    width: u32,
    height: u32,
    vsync: bool,
    mqtt_host: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        mqtt_host: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => parsed.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        parsed.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        parsed.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1200x1200)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            parsed.width = w;
                            parsed.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--mqtt" => {
                if i + 1 < args.len() {
                    parsed.mqtt_host = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: mandala [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W           Set window width (default: {})", DEFAULT_WIDTH);
                println!("  --height H, -h H          Set window height (default: {})", DEFAULT_HEIGHT);
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1200x1200)");
                println!("  --no-vsync                Disable VSync for uncapped framerate");
                println!("  --mqtt HOST               Enable remote control via MQTT broker");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    parsed
}

/// Mutable host state around the immutable render config
struct App {
    config: MandalaConfig,
    breathing: bool,
    breath_frequency_hz: f32,
    auto_rotate: bool,
    hex_lattice: bool,
}

impl App {
    fn new(config: MandalaConfig) -> Self {
        Self {
            config,
            breathing: false,
            breath_frequency_hz: 0.5,
            auto_rotate: false,
            hex_lattice: false,
        }
    }

    fn apply_planet(&mut self, planet: &PlanetConfig) {
        self.config.base_hue = planet.base_hue_deg;
        self.breath_frequency_hz = planet.frequency_hz;
        self.breathing = true;
        println!(
            "Preset: {} (hue {}, {} Hz)",
            planet.name, planet.base_hue_deg, planet.frequency_hz
        );
    }

    /// Step the petal count to the adjacent Fibonacci value
    fn step_petals(&mut self, up: bool) {
        let current = nearest_fibonacci(self.config.petals as i64);
        let idx = FIBONACCI.iter().position(|&f| f == current).unwrap_or(0);
        let next = if up {
            FIBONACCI[(idx + 1).min(FIBONACCI.len() - 1)]
        } else {
            FIBONACCI[idx.saturating_sub(1)]
        };
        self.config.petals = next;
    }

    fn apply_control(&mut self, msg: &ControlMessage) {
        if let Some(p) = msg.petals {
            self.config.petals = nearest_fibonacci(p as i64);
        }
        if let Some(l) = msg.layers {
            self.config.layers = l.clamp(1, 12);
        }
        if let Some(h) = msg.base_hue {
            self.config.base_hue = h;
        }
        if let Some(c) = msg.complexity {
            self.config.complexity = c;
        }
        if let Some(r) = msg.rotation {
            self.config.rotation = r;
        }
        if let Some(name) = &msg.planet {
            match planets::planet_config(name) {
                Some(planet) => self.apply_planet(planet),
                None => eprintln!("Unknown planet preset: {}", name),
            }
        }
        if let Some(v) = msg.flower_of_life {
            self.config.flower_of_life = v;
        }
        if let Some(v) = msg.golden_spiral {
            self.config.golden_spiral = v;
        }
        if let Some(v) = msg.fractal_mode {
            self.config.fractal_mode = v;
        }
        if let Some(v) = msg.breathing {
            self.breathing = v;
        }
        if let Some(path) = &msg.export {
            match export::export_png(&self.config, EXPORT_SIZE, EXPORT_SIZE, path) {
                Ok(()) => println!("Exported {}x{} PNG to {}", EXPORT_SIZE, EXPORT_SIZE, path),
                Err(e) => eprintln!("Export failed: {}", e),
            }
        }
        self.config = self.config.sanitized();
    }
}

fn export_filename() -> String {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("mandala_{}.png", stamp)
}

fn print_banner(args: &Args) {
    println!("=== mandala ===");
    println!("Resolution: {}x{}", args.width, args.height);
    if args.vsync {
        println!("VSync: ON (60fps locked). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  Up/Down     - Petal count (Fibonacci steps)");
    println!("  Left/Right  - Layer count");
    println!("  H / N       - Base hue +/- 15 degrees");
    println!("  C / Z       - Complexity +/- 0.1");
    println!("  W / Q       - Rotate +/- 5 degrees");
    println!("  F           - Flower of Life overlay");
    println!("  G           - Golden spiral overlay");
    println!("  D           - Fractal circles overlay");
    println!("  B           - Breathing animation");
    println!("  A           - Auto-rotate");
    println!("  T           - Hexagonal lattice backdrop");
    println!("  1-9, 0      - Planet presets (Sun..Neptune)");
    println!("  E           - Export {0}x{0} PNG", EXPORT_SIZE);
    println!("  S / L       - Save / load {}", CONFIG_PATH);
    println!("  P           - Toggle FPS in title");
    println!("  Escape      - Quit");
}

fn main() -> Result<(), String> {
    let args = parse_args();

    let (mut display, texture_creator) =
        Display::with_options("mandala", args.width, args.height, args.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, args.width, args.height)?;
    let mut buffer = PixelBuffer::with_size(args.width, args.height);

    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;

    let controller = match &args.mqtt_host {
        Some(host) => match Controller::new(host, Controller::default_topic()) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("{}", e);
                None
            },
        },
        None => None,
    };

    let initial = MandalaConfig::load(CONFIG_PATH)
        .map(|c| {
            println!("Loaded {}", CONFIG_PATH);
            c.sanitized()
        })
        .unwrap_or_else(|_| MandalaConfig {
            width: args.width,
            height: args.height,
            ..Default::default()
        });
    let mut app = App::new(initial);

    print_banner(&args);

    // Animation clock, owned by the loop: the renderer itself is stateless
    let mut time_ms: f32 = 0.0;
    let mut auto_angle: f32 = 0.0;

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();
        time_ms += dt * 1000.0;
        if app.auto_rotate {
            auto_angle = (auto_angle + dt * 10.0) % 360.0;
        }

        for event in display.poll_events() {
            let key = match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(k) => k,
            };
            match key {
                Keycode::Escape => break 'main,
                Keycode::Up => app.step_petals(true),
                Keycode::Down => app.step_petals(false),
                Keycode::Right => app.config.layers = (app.config.layers + 1).min(12),
                Keycode::Left => app.config.layers = app.config.layers.saturating_sub(1).max(1),
                Keycode::H => app.config.base_hue = (app.config.base_hue + 15.0).rem_euclid(360.0),
                Keycode::N => app.config.base_hue = (app.config.base_hue - 15.0).rem_euclid(360.0),
                Keycode::C => {
                    app.config.complexity = (app.config.complexity + 0.1).min(3.0);
                },
                Keycode::Z => {
                    app.config.complexity = (app.config.complexity - 0.1).max(1.0);
                },
                Keycode::W => app.config.rotation += 5.0,
                Keycode::Q => app.config.rotation -= 5.0,
                Keycode::F => app.config.flower_of_life = !app.config.flower_of_life,
                Keycode::G => app.config.golden_spiral = !app.config.golden_spiral,
                Keycode::D => app.config.fractal_mode = !app.config.fractal_mode,
                Keycode::B => app.breathing = !app.breathing,
                Keycode::A => app.auto_rotate = !app.auto_rotate,
                Keycode::T => app.hex_lattice = !app.hex_lattice,
                Keycode::P => show_fps = !show_fps,
                Keycode::E => {
                    let path = export_filename();
                    match export::export_png(&app.config, EXPORT_SIZE, EXPORT_SIZE, &path) {
                        Ok(()) => println!("Exported {0}x{0} PNG to {1}", EXPORT_SIZE, path),
                        Err(e) => eprintln!("Export failed: {}", e),
                    }
                },
                Keycode::S => match app.config.save(CONFIG_PATH) {
                    Ok(()) => println!("Saved {}", CONFIG_PATH),
                    Err(e) => eprintln!("Failed to save: {}", e),
                },
                Keycode::L => match MandalaConfig::load(CONFIG_PATH) {
                    Ok(cfg) => {
                        app.config = cfg.sanitized();
                        println!("Loaded {}", CONFIG_PATH);
                    },
                    Err(e) => eprintln!("Failed to load: {}", e),
                },
                Keycode::Num1 => app.apply_planet(&PLANETS[0]),
                Keycode::Num2 => app.apply_planet(&PLANETS[1]),
                Keycode::Num3 => app.apply_planet(&PLANETS[2]),
                Keycode::Num4 => app.apply_planet(&PLANETS[3]),
                Keycode::Num5 => app.apply_planet(&PLANETS[4]),
                Keycode::Num6 => app.apply_planet(&PLANETS[5]),
                Keycode::Num7 => app.apply_planet(&PLANETS[6]),
                Keycode::Num8 => app.apply_planet(&PLANETS[7]),
                Keycode::Num9 => app.apply_planet(&PLANETS[8]),
                Keycode::Num0 => app.apply_planet(&PLANETS[9]),
                _ => {},
            }
        }

        if let Some(controller) = &controller {
            for msg in controller.poll() {
                app.apply_control(&msg);
            }
        }

        // Per-frame config: breathing and auto-rotate are threaded through
        // the immutable value, never stored in the renderer
        let pulse = if app.breathing {
            pulse_scale(time_ms, app.breath_frequency_hz, DEFAULT_PULSE_AMPLITUDE)
        } else {
            1.0
        };
        let frame_config = MandalaConfig {
            pulse_scale: pulse,
            rotation: app.config.rotation + auto_angle,
            ..app.config.clone()
        };

        if app.hex_lattice {
            // Backdrop order: clear, lattice, then the composition on top
            buffer.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
            draw_hex_lattice(&mut buffer, 24.0);
            draw_mandala_over(&mut buffer, &frame_config);
        } else {
            draw_mandala(&mut buffer, &frame_config);
        }

        if show_fps {
            display.set_title(&format!(
                "mandala - {:.0} fps ({:.1} ms)",
                avg_fps,
                fps_counter.avg_frame_time_ms()
            ));
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}
