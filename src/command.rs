/*
 * Command Module
 *
 * This module defines the closed command vocabulary and the CommandBus, a
 * single-slot broadcast channel. Publishing a command overwrites the slot and
 * synchronously notifies every registered listener in registration order.
 *
 * A listener that publishes while a fan-out is in progress does not recurse:
 * its command is queued and dispatched to every listener once the current
 * fan-out has finished, before the outermost publish returns.
 */

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use log::trace;

// The closed set of commands understood by the bus listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    Run,
    Reset,
    GrowPopulation,
    ShrinkPopulation,
    UseColor,
    UseGradient,
    Redraw,
    #[default]
    None,
}

impl Command {
    // Short action name, as bound to the control buttons
    pub fn action_name(self) -> &'static str {
        match self {
            Command::Run => "run",
            Command::Reset => "reset",
            Command::GrowPopulation => "plus",
            Command::ShrinkPopulation => "minus",
            Command::UseColor => "color",
            Command::UseGradient => "gradient",
            Command::Redraw => "redraw",
            Command::None => "none",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

// Anything that wants to hear about published commands
pub trait CommandListener {
    fn on_command(&mut self, command: Command);
}

impl<F: FnMut(Command)> CommandListener for F {
    fn on_command(&mut self, command: Command) {
        self(command)
    }
}

pub type SharedListener = Rc<RefCell<dyn CommandListener>>;

#[derive(Default)]
pub struct CommandBus {
    current: Cell<Command>,
    listeners: RefCell<Vec<SharedListener>>,
    pending: RefCell<VecDeque<Command>>,
    dispatching: Cell<bool>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    // Add a listener. Registering the same listener twice notifies it twice.
    pub fn register(&self, listener: SharedListener) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    // The most recently dispatched command, None before the first publish
    pub fn current(&self) -> Command {
        self.current.get()
    }

    // Set the slot and notify every listener, in registration order
    pub fn publish(&self, command: Command) {
        self.pending.borrow_mut().push_back(command);

        if self.dispatching.get() {
            trace!("queued re-entrant command '{}'", command);
            return;
        }

        self.dispatching.set(true);
        let _guard = DispatchGuard(self);
        while let Some(next) = self.next_pending() {
            self.current.set(next);

            // Snapshot so listeners may register others while being notified
            let listeners: Vec<SharedListener> = self.listeners.borrow().clone();
            for listener in &listeners {
                listener.borrow_mut().on_command(next);
            }
        }
    }

    fn next_pending(&self) -> Option<Command> {
        self.pending.borrow_mut().pop_front()
    }
}

// Ends a fan-out even when a listener panics, dropping whatever it queued
struct DispatchGuard<'a>(&'a CommandBus);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.pending.borrow_mut().clear();
        self.0.dispatching.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<(usize, Command)>>>, id: usize) -> SharedListener {
        let log = log.clone();
        Rc::new(RefCell::new(move |command: Command| log.borrow_mut().push((id, command))))
    }

    #[test]
    fn current_is_none_before_first_publish() {
        let bus = CommandBus::new();
        assert_eq!(bus.current(), Command::None);
    }

    #[test]
    fn publish_without_listeners_updates_slot() {
        let bus = CommandBus::new();
        bus.publish(Command::UseColor);
        assert_eq!(bus.current(), Command::UseColor);
        bus.publish(Command::Redraw);
        assert_eq!(bus.current(), Command::Redraw);
    }

    #[test]
    fn listeners_are_notified_once_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bus = CommandBus::new();
        for id in 0..3 {
            bus.register(recorder(&log, id));
        }

        bus.publish(Command::GrowPopulation);

        assert_eq!(
            *log.borrow(),
            vec![
                (0, Command::GrowPopulation),
                (1, Command::GrowPopulation),
                (2, Command::GrowPopulation),
            ]
        );
    }

    #[test]
    fn same_listener_registered_twice_hears_twice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bus = CommandBus::new();
        let listener = recorder(&log, 7);
        bus.register(listener.clone());
        bus.register(listener);

        bus.publish(Command::Reset);

        assert_eq!(*log.borrow(), vec![(7, Command::Reset), (7, Command::Reset)]);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn re_entrant_publish_runs_after_current_fan_out() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bus = Rc::new(CommandBus::new());

        let inner_bus = Rc::downgrade(&bus);
        let inner_log = log.clone();
        bus.register(Rc::new(RefCell::new(move |command: Command| {
            inner_log.borrow_mut().push((0, command));
            if command == Command::Run {
                if let Some(bus) = inner_bus.upgrade() {
                    bus.publish(Command::Reset);
                }
            }
        })));
        bus.register(recorder(&log, 1));

        bus.publish(Command::Run);

        assert_eq!(
            *log.borrow(),
            vec![
                (0, Command::Run),
                (1, Command::Run),
                (0, Command::Reset),
                (1, Command::Reset),
            ]
        );
        assert_eq!(bus.current(), Command::Reset);
    }

    #[test]
    fn slot_matches_the_command_being_delivered() {
        let bus = Rc::new(CommandBus::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak_bus = Rc::downgrade(&bus);
        let slot_seen = seen.clone();
        bus.register(Rc::new(RefCell::new(move |command: Command| {
            let slot = weak_bus.upgrade().map(|bus| bus.current());
            slot_seen.borrow_mut().push((command, slot));
        })));

        bus.publish(Command::UseGradient);
        bus.publish(Command::Redraw);

        assert_eq!(
            *seen.borrow(),
            vec![
                (Command::UseGradient, Some(Command::UseGradient)),
                (Command::Redraw, Some(Command::Redraw)),
            ]
        );
    }

    #[test]
    fn bus_recovers_after_a_listener_panics() {
        let bus = CommandBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.register(Rc::new(RefCell::new(|command: Command| {
            if command == Command::Reset {
                panic!("listener failed on reset");
            }
        })));
        bus.register(recorder(&log, 1));

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            bus.publish(Command::Reset);
        }));
        assert!(outcome.is_err());

        bus.publish(Command::Redraw);
        assert_eq!(*log.borrow(), vec![(1, Command::Redraw)]);
        assert_eq!(bus.current(), Command::Redraw);
    }

    #[test]
    fn action_names_match_the_buttons() {
        assert_eq!(Command::GrowPopulation.to_string(), "plus");
        assert_eq!(Command::ShrinkPopulation.to_string(), "minus");
        assert_eq!(Command::default(), Command::None);
    }
}
