//! Interactive foreground timer.
//!
//! The loop is the tick source: it waits for input with a one-second
//! deadline while the clock runs. On a terminal, single key presses are read
//! in raw mode. Piped input is read as one command per line; once it runs
//! out, a running clock is ticked until it stops.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::{execute, queue};

use focusbuddy_core::{format_remaining, DebugUnlock, Event, FocusApp, SessionKind};

use super::today;

const TICK: Duration = Duration::from_secs(1);
const HELP: &str = "FocusBuddy -- [enter]/s start/pause, r reset, q quit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Toggle,
    Reset,
    TitleClick,
    Skip,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" | "s" => Input::Toggle,
        "r" => Input::Reset,
        "t" => Input::TitleClick,
        "x" => Input::Skip,
        "q" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

fn key_input(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Toggle),
        KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char(c) => Some(parse_input(&c.to_string())),
        _ => None,
    }
}

#[derive(Debug)]
enum Wake {
    Input(Input),
    Tick,
    Closed,
}

/// Where commands come from while the timer runs.
trait InputSource {
    /// Block until the next command or the tick deadline, whichever is first.
    fn wait(&mut self, deadline: Option<Instant>) -> io::Result<Wake>;
}

/// Key presses from the controlling terminal. Raw mode lasts as long as
/// this value.
struct Keys;

impl Keys {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for Keys {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl InputSource for Keys {
    fn wait(&mut self, deadline: Option<Instant>) -> io::Result<Wake> {
        loop {
            if let Some(deadline) = deadline {
                if !event::poll(deadline.saturating_duration_since(Instant::now()))? {
                    return Ok(Wake::Tick);
                }
            }
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(input) = key_input(key.code, key.modifiers) {
                    return Ok(Wake::Input(input));
                }
            }
        }
    }
}

/// One command per line from a pipe or file.
struct Script<R> {
    lines: R,
    open: bool,
}

impl<R: BufRead> Script<R> {
    fn new(lines: R) -> Self {
        Self { lines, open: true }
    }
}

impl<R: BufRead> InputSource for Script<R> {
    fn wait(&mut self, deadline: Option<Instant>) -> io::Result<Wake> {
        if self.open {
            let mut line = String::new();
            if self.lines.read_line(&mut line)? > 0 {
                return Ok(Wake::Input(parse_input(&line)));
            }
            self.open = false;
        }
        match deadline {
            Some(deadline) => {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                Ok(Wake::Tick)
            }
            None => Ok(Wake::Closed),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = FocusApp::open_configured(today())?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if stdin.is_tty() {
        let mut keys = Keys::enable()?;
        drive(&mut app, &mut keys, &mut stdout)
    } else {
        drive(&mut app, &mut Script::new(stdin.lock()), &mut stdout)
    }
}

fn drive(
    app: &mut FocusApp,
    source: &mut impl InputSource,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut unlock = DebugUnlock::new();
    let mut next_tick: Option<Instant> = None;

    say(out, HELP)?;
    say_progress(out, app)?;
    render(out, app)?;

    loop {
        match source.wait(next_tick)? {
            Wake::Closed => break,
            Wake::Tick => {
                next_tick = next_tick.map(|t| t + TICK);
                let events = app.tick(today());
                if events
                    .iter()
                    .any(|e| matches!(e, Event::SessionExpired { .. }))
                {
                    notify(out, app, &events)?;
                }
                if !app.clock().is_running() {
                    next_tick = None;
                }
            }
            Wake::Input(input) => match input {
                Input::Toggle => {
                    app.toggle();
                    next_tick = app.clock().is_running().then(|| Instant::now() + TICK);
                }
                Input::Reset => {
                    app.reset();
                    next_tick = None;
                }
                Input::TitleClick => {
                    if let Some(enabled) = unlock.register_click() {
                        tracing::info!(enabled, "debug mode toggled");
                        let state = if enabled { "activated" } else { "deactivated" };
                        say(out, &format!("Debug mode {state}"))?;
                    }
                }
                Input::Skip if unlock.is_enabled() => {
                    let events = app.debug_skip(today());
                    notify(out, app, &events)?;
                    next_tick = None;
                }
                Input::Quit => break,
                Input::Skip => {
                    say(out, "unknown command: x")?;
                    say(out, HELP)?;
                }
                Input::Unknown(cmd) => {
                    say(out, &format!("unknown command: {cmd}"))?;
                    say(out, HELP)?;
                }
            },
        }
        render(out, app)?;
    }

    queue!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Replace the status line with `text` and move to a fresh line.
fn say(out: &mut impl Write, text: &str) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text),
        Print("\r\n")
    )
}

fn say_progress(out: &mut impl Write, app: &FocusApp) -> io::Result<()> {
    let ledger = app.ledger();
    let rec = ledger.record();
    say(
        out,
        &format!(
            "Level {}  XP {}/{}  Streak {} days",
            rec.level,
            ledger.xp_into_level(),
            ledger.xp_per_level(),
            rec.streak
        ),
    )
}

fn render(out: &mut impl Write, app: &FocusApp) -> io::Result<()> {
    let clock = app.clock();
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "{:<14} {}  [{}]",
            clock.label(),
            clock.formatted(),
            clock.button_label()
        ))
    )?;
    out.flush()
}

fn notify(out: &mut impl Write, app: &FocusApp, events: &[Event]) -> io::Result<()> {
    for event in events {
        match event {
            Event::SessionExpired {
                kind: SessionKind::Focus,
                ..
            } => {
                let break_secs = app.clock().durations().break_secs;
                say(
                    out,
                    &format!("Great job! Take a break ({}).", format_remaining(break_secs)),
                )?;
            }
            Event::SessionExpired {
                kind: SessionKind::Break,
                ..
            } => say(out, "Break's over. Ready for the next focus session?")?,
            Event::FocusCompleted { persisted, .. } => {
                if !persisted {
                    say(out, "warning: progress could not be saved")?;
                }
                say_progress(out, app)?;
            }
            Event::LevelUp { level, .. } => say(
                out,
                &format!("Level up! Congratulations, you reached level {level}!"),
            )?,
            Event::StreakMilestone { streak, .. } => say(
                out,
                &format!("Streak milestone! You've kept your focus for {streak} days in a row!"),
            )?,
            _ => {}
        }
    }
    Ok(())
}
