//! Tank Duel entry point
//!
//! Native text front end: asks for the player and tank counts (unless given
//! on the command line or in a JSON config), then reads one command per
//! line from stdin. A command is the set of buttons to hold plus an
//! optional `xN` repeat count, e.g. `move-right x20`, `aim-left x5`, `fire`.
//! An empty line runs one tick with nothing held.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use glam::Vec2;

use tank_duel::input::Button;
use tank_duel::settings::{parse_players, parse_tanks};
use tank_duel::sim::Outcome;
use tank_duel::{Color, ConfigError, Match, MatchConfig, Surface};

const ASCII_COLS: usize = 80;
const ASCII_ROWS: usize = 30;

/// Coarse character-cell rendering of the field
struct AsciiSurface {
    scale: Vec2,
    cells: Vec<Vec<char>>,
}

impl AsciiSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            scale: Vec2::new(
                ASCII_COLS as f32 / width as f32,
                ASCII_ROWS as f32 / height as f32,
            ),
            cells: vec![vec![' '; ASCII_COLS]; ASCII_ROWS],
        }
    }

    fn plot(&mut self, p: Vec2, c: char) {
        let cell = p * self.scale;
        if cell.x < 0.0 || cell.y < 0.0 {
            return;
        }
        let (col, row) = (cell.x as usize, cell.y as usize);
        if row < ASCII_ROWS && col < ASCII_COLS {
            self.cells[row][col] = c;
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity((ASCII_COLS + 1) * ASCII_ROWS);
        for row in &self.cells {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn colour_char(color: Color) -> char {
    match color {
        Color::Black => 'K',
        other => other.as_str().chars().next().map_or('?', |c| c.to_ascii_uppercase()),
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    fn polyline(&mut self, points: &[Vec2], _color: Color) {
        for pair in points.windows(2) {
            let steps = ((pair[1] - pair[0]) * self.scale).abs().max_element().ceil() as usize;
            for i in 0..=steps.max(1) {
                let t = i as f32 / steps.max(1) as f32;
                self.plot(pair[0].lerp(pair[1], t), '_');
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = if color == Color::Orange && radius > tank_duel::sim::TANK_RADIUS {
            '*'
        } else if radius <= tank_duel::sim::PROJECTILE_RADIUS {
            'o'
        } else {
            colour_char(color)
        };
        self.plot(center, c);
    }

    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}

    fn fill_rect(&mut self, _top_left: Vec2, _size: Vec2, _color: Color) {}

    fn stroke_rect(&mut self, _top_left: Vec2, _size: Vec2, _color: Color) {}

    fn arrow(&mut self, top_left: Vec2) {
        self.plot(top_left + Vec2::new(8.0, 30.0), 'v');
    }
}

/// Command-line options
#[derive(Default)]
struct Args {
    config: Option<String>,
    players: Option<String>,
    tanks: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("missing value for {}", arg));
        match arg.as_str() {
            "--config" => args.config = Some(value()?),
            "--players" => args.players = Some(value()?),
            "--tanks" => args.tanks = Some(value()?),
            "--seed" => {
                let seed = value()?;
                args.seed = Some(seed.parse().map_err(|_| format!("bad seed: {}", seed))?);
            }
            "--help" | "-h" => {
                return Err(
                    "usage: tank-duel [--config FILE] [--players N] [--tanks N] [--seed N]"
                        .to_string(),
                );
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

/// Ask until the answer passes `validate`
fn prompt<T>(
    question: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    validate: impl Fn(&str) -> Result<T, ConfigError>,
) -> io::Result<Option<T>> {
    loop {
        println!("{}", question);
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match validate(&line?) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("{}", e),
        }
    }
}

/// Buttons to hold and how many ticks to hold them for
fn parse_command(line: &str) -> Result<(Vec<Button>, u32), String> {
    let mut buttons = Vec::new();
    let mut repeat = 1;
    for word in line.split_whitespace() {
        if let Some(n) = word.strip_prefix('x') {
            repeat = n.parse().map_err(|_| format!("bad repeat count: {}", word))?;
        } else if let Some(button) = Button::from_str(word) {
            buttons.push(button);
        } else {
            return Err(format!("unknown button: {}", word));
        }
    }
    Ok((buttons, repeat))
}

fn print_status(game: &Match) {
    let field = game.field();
    let current = field.current_tank_id();
    for (id, tank) in field.tanks().iter().enumerate() {
        let marker = if id == current { '>' } else { ' ' };
        let state = if tank.destroyed {
            "destroyed".to_string()
        } else {
            format!(
                "x={:.0} health={:.0} fuel={} angle={:.0}°",
                tank.x,
                tank.health,
                tank.fuel,
                tank.barrel_angle.to_degrees()
            )
        };
        println!(
            "{} tank {} ({}): {}",
            marker,
            id,
            Color::for_player(tank.player).as_str(),
            state
        );
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path).map_err(|e| e.to_string())?,
        None => MatchConfig::default(),
    };
    if args.config.is_none() || args.players.is_some() {
        config.players = match &args.players {
            Some(text) => parse_players(text).map_err(|e| e.to_string())?,
            None => match prompt("How many players? Enter at least 2.", &mut lines, parse_players)
                .map_err(|e| e.to_string())?
            {
                Some(players) => players,
                None => return Ok(()),
            },
        };
    }
    if args.config.is_none() || args.tanks.is_some() {
        config.tanks_per_player = match &args.tanks {
            Some(text) => parse_tanks(text).map_err(|e| e.to_string())?,
            None => match prompt("How many tanks each?", &mut lines, parse_tanks)
                .map_err(|e| e.to_string())?
            {
                Some(tanks) => tanks,
                None => return Ok(()),
            },
        };
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut game = Match::new(config, |_: Outcome, message: &str| println!("{}", message))
        .map_err(|e| e.to_string())?;
    let mut surface = AsciiSurface::new(game.config().width, game.config().height);
    println!(
        "Seed {}. Buttons: move-left move-right aim-left aim-right fire (add xN to repeat)",
        game.config().seed.unwrap_or_default()
    );
    game.step(&mut surface);
    print!("{}", surface.render());
    print_status(&game);

    for line in lines {
        let line = line.map_err(|e| e.to_string())?;
        let (held, repeat) = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let buttons = game.buttons_mut();
        for button in Button::ALL {
            if held.contains(&button) {
                buttons.press(button);
            } else {
                buttons.release(button);
            }
        }
        for _ in 0..repeat {
            game.step(&mut surface);
            if game.is_finished() {
                break;
            }
        }

        print!("{}", surface.render());
        print_status(&game);
        if game.is_finished() {
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tank Duel (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
