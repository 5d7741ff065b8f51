//! menu_flow: a gameplay / pause menu / confirm dialog walkthrough.
//!
//! Gameplay runs for a few frames, then opens the pause menu over itself.
//! The pause menu asks for confirmation with a dialog; when the dialog
//! closes, the menu reads the answer and closes too, and gameplay resumes.
//! Each frame prints the stack as a debug overlay would show it.
//!
//! Run with `RUST_LOG=debug` to see every push / pop / begin / interrupt.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};

use focus_behavior::{Behavior, EntryRef, StackContext};
use focus_core::StackConfig;
use focus_host::{HostState, StackRegistry};
use focus_stack::{LogObserver, StackEventKind, TraceLog, TraceObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAMES:          u64 = 10;
const PAUSE_AT_FRAME:  u32 = 3;
const MENU_IDLE_TICKS: u32 = 1;
const DIALOG_TICKS:    u32 = 2;

/// Stack configuration as it would ship in a settings file.  Omitted fields
/// fall back to their defaults.
const STACK_CONFIG_JSON: &str = r#"{
    "name": "ui",
    "max_iterations": 32,
    "persistence": "scene_scoped"
}"#;

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// The always-present bottom entry.
struct Gameplay {
    frames: u32,
    menu:   EntryRef,
}

impl Behavior for Gameplay {
    fn on_initialize(&mut self, _ctx: &mut StackContext<'_>) {
        log::info!("gameplay: level loaded");
    }

    fn on_begin(&mut self, _ctx: &mut StackContext<'_>) {
        log::info!("gameplay: running (frame {})", self.frames);
    }

    fn on_interrupt(&mut self, _ctx: &mut StackContext<'_>) {
        log::info!("gameplay: paused");
    }

    fn on_update(&mut self, ctx: &mut StackContext<'_>) {
        self.frames += 1;
        if self.frames == PAUSE_AT_FRAME {
            ctx.push(self.menu.clone());
        }
    }

    fn is_done(&self) -> bool {
        false
    }
}

/// Opens the confirm dialog, then closes once it has an answer.
struct PauseMenu {
    idle:   u32,
    dialog: EntryRef,
    answer: Rc<Cell<Option<bool>>>,
    closed: bool,
}

impl Behavior for PauseMenu {
    fn on_begin(&mut self, _ctx: &mut StackContext<'_>) {
        if let Some(quit) = self.answer.get() {
            log::info!("pause menu: dialog answered quit={quit}");
            self.closed = true;
        }
    }

    fn on_update(&mut self, ctx: &mut StackContext<'_>) {
        if self.answer.get().is_some() {
            return;
        }
        self.idle += 1;
        if self.idle > MENU_IDLE_TICKS && !ctx.contains(&self.dialog) {
            ctx.push(self.dialog.clone());
        }
    }

    fn on_finish(&mut self, _ctx: &mut StackContext<'_>) {
        log::info!("pause menu: closed");
    }

    fn is_done(&self) -> bool {
        self.closed
    }
}

/// Waits a couple of ticks, then answers "keep playing".
struct ConfirmDialog {
    ticks_left: u32,
    answer:     Rc<Cell<Option<bool>>>,
}

impl Behavior for ConfirmDialog {
    fn on_update(&mut self, _ctx: &mut StackContext<'_>) {
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    fn on_finish(&mut self, _ctx: &mut StackContext<'_>) {
        self.answer.set(Some(false));
    }

    fn is_done(&self) -> bool {
        self.ticks_left == 0
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: StackConfig =
        serde_json::from_str(STACK_CONFIG_JSON).context("parsing stack config")?;
    let name = config.name.clone();
    println!(
        "stack '{name}': max_iterations={}, max_pending_commands={}, {}",
        config.max_iterations, config.max_pending_commands, config.persistence,
    );

    let answer = Rc::new(Cell::new(None));
    let dialog = EntryRef::new(ConfirmDialog { ticks_left: DIALOG_TICKS, answer: Rc::clone(&answer) });
    let menu = EntryRef::new(PauseMenu { idle: 0, dialog, answer, closed: false });
    let gameplay = EntryRef::new(Gameplay { frames: 0, menu });

    let trace = TraceLog::new();
    let mut registry = StackRegistry::new(HostState::running());
    let stack = registry
        .named_with(&name, config)?
        .context("host is not running")?;
    stack.subscribe(TraceObserver::new(trace.clone()));
    stack.subscribe(LogObserver::new(name.clone()));
    stack.push(gameplay)?;

    for _ in 0..FRAMES {
        let report = registry.run_frame()?;
        let snapshot = registry.get(&name).map(|s| s.snapshot()).unwrap_or_default();
        println!(
            "── {} ── {} pass(es), {} push, {} pop\n{snapshot}",
            report.frame, report.update.iterations, report.update.pushed, report.update.popped,
        );
    }

    println!("\nevents:");
    for label in trace.labels() {
        println!("  {label}");
    }
    println!(
        "totals: {} pushed, {} popped, {} begun, {} interrupted",
        trace.count(StackEventKind::Pushed),
        trace.count(StackEventKind::Popped),
        trace.count(StackEventKind::Begun),
        trace.count(StackEventKind::Interrupted),
    );

    let dropped = registry.load_scene()?;
    println!("scene unloaded: {dropped} stack(s) dropped, {} remaining", registry.len());
    Ok(())
}
