/*
 * Animation Controller Module
 *
 * The AnimationController owns the periodic timer and the command bus. It
 * turns timer ticks and control events into commands, and after every tick
 * reads back the statistics shown in the status labels.
 *
 * State machine:
 * - Stopped --Run--> Running --Run--> Stopped
 * - Reset and resize restart the timer phase without touching run state
 * - Population and style events are forwarded to the bus uninterpreted
 */

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::command::{Command, CommandBus};
use crate::histogram::VelocityHistogram;
use crate::model::{ParticleModel, SharedModel};
use crate::params::SimulationParams;
use crate::rate::UpdateRate;
use crate::stats::{RenderStats, StatusLabels};
use crate::surface::{RenderStyle, RenderSurface};
use crate::timer::Timer;

pub const RUN_LABEL_RUNNING: &str = "Stop";
pub const RUN_LABEL_STOPPED: &str = "Start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationDelta {
    Grow,
    Shrink,
}

// Discrete triggers from the control panel and keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    ToggleRun,
    Reset,
    Population(PopulationDelta),
    Style(RenderStyle),
    Rate(u32),
}

pub struct AnimationController {
    bus: Rc<CommandBus>,
    timer: Timer,
    rate: UpdateRate,
    run_label: &'static str,
    labels: StatusLabels,
    model: SharedModel,
    surface: Rc<RefCell<RenderSurface>>,
    histogram: Rc<RefCell<dyn VelocityHistogram>>,
    ticks: u64,
    over_budget: bool,
}

impl AnimationController {
    // Wire model and surface onto a fresh bus and start the timer
    pub fn new<M>(
        params: &SimulationParams,
        model: Rc<RefCell<M>>,
        surface: Rc<RefCell<RenderSurface>>,
        histogram: Rc<RefCell<dyn VelocityHistogram>>,
        now: Instant,
    ) -> Self
    where
        M: ParticleModel + 'static,
    {
        let bus = Rc::new(CommandBus::new());
        bus.register(model.clone());
        bus.register(surface.clone());

        let rate = UpdateRate::snapped(params.update_rate_hz);
        let timer = Timer::new(rate.period(), params.initial_delay);

        let mut controller = Self {
            bus,
            timer,
            rate,
            run_label: RUN_LABEL_STOPPED,
            labels: StatusLabels::default(),
            model,
            surface,
            histogram,
            ticks: 0,
            over_budget: false,
        };
        controller.toggle(now);
        controller
    }

    pub fn bus(&self) -> &Rc<CommandBus> {
        &self.bus
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn run_label(&self) -> &'static str {
        self.run_label
    }

    pub fn rate(&self) -> UpdateRate {
        self.rate
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Host loop entry point: runs a tick when the timer is due. Returns whether one ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.on_tick();
            true
        } else {
            false
        }
    }

    pub fn dispatch(&mut self, event: ControlEvent, now: Instant) {
        match event {
            ControlEvent::ToggleRun => self.on_run_toggle(now),
            ControlEvent::Reset => self.on_reset(now),
            ControlEvent::Population(delta) => self.on_population_delta(delta),
            ControlEvent::Style(style) => self.on_style_change(style),
            ControlEvent::Rate(hz) => self.on_rate_change(hz),
        }
    }

    // One timer tick: redraw, then refresh the readouts
    pub fn on_tick(&mut self) {
        self.ticks += 1;
        self.bus.publish(Command::Redraw);

        self.histogram.borrow_mut().refresh();
        let stats = {
            let model = self.model.borrow();
            RenderStats {
                render_duration_ms: self.surface.borrow().render_duration_ms(),
                particle_count: model.particle_count(),
                collision_rate: model.collision_rate(),
                average_velocity: self.histogram.borrow().average(),
            }
        };
        self.labels.update(&stats);

        self.check_frame_budget(stats.render_duration_ms);
        trace!("tick {}: {:?}", self.ticks, stats);
    }

    pub fn on_run_toggle(&mut self, now: Instant) {
        self.toggle(now);
        info!("animation {}", if self.is_running() { "running" } else { "stopped" });
        self.bus.publish(Command::Run);
    }

    // Restart the timer phase; run state and population are untouched
    pub fn on_reset(&mut self, now: Instant) {
        if self.timer.is_running() {
            self.timer.restart(now);
        }
        self.bus.publish(Command::Reset);
    }

    pub fn on_population_delta(&mut self, delta: PopulationDelta) {
        self.bus.publish(match delta {
            PopulationDelta::Grow => Command::GrowPopulation,
            PopulationDelta::Shrink => Command::ShrinkPopulation,
        });
    }

    pub fn on_style_change(&mut self, style: RenderStyle) {
        self.bus.publish(match style {
            RenderStyle::Color => Command::UseColor,
            RenderStyle::Gradient => Command::UseGradient,
        });
    }

    // Applied to the running timer without restarting it
    pub fn on_rate_change(&mut self, hz: u32) {
        let rate = UpdateRate::try_from(hz).unwrap_or_else(|err| {
            let snapped = UpdateRate::snapped(hz);
            warn!("{}, using {} Hz", err, snapped.hz());
            snapped
        });
        self.rate = rate;
        self.timer.set_period(rate.period());
        debug!("update rate {} Hz, period {:?}", rate.hz(), rate.period());
    }

    // Catch a breath while the window is being resized
    pub fn on_resize(&mut self, now: Instant) {
        if self.timer.is_running() {
            self.timer.restart(now);
        }
    }

    // Warn once when frames start overrunning the tick period, not every tick.
    // Returns whether a warning was logged.
    fn check_frame_budget(&mut self, render_duration_ms: u64) -> bool {
        let budget = self.timer.period().as_millis() as u64;
        let over = render_duration_ms > budget;
        let first = over && !self.over_budget;
        if first {
            warn!(
                "frame took {} ms, over the {} ms tick budget",
                render_duration_ms, budget
            );
        } else if !over && self.over_budget {
            debug!("frames back within the {} ms tick budget", budget);
        }
        self.over_budget = over;
        first
    }

    fn toggle(&mut self, now: Instant) {
        if self.timer.is_running() {
            self.timer.stop();
            self.run_label = RUN_LABEL_STOPPED;
        } else {
            self.timer.start(now);
            self.run_label = RUN_LABEL_RUNNING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandListener;
    use crate::model::{Bounds, Shape};
    use crate::particle::Particle;
    use std::time::Duration;

    // Fixed statistics and a log of the commands it heard
    #[derive(Default)]
    struct FixedModel {
        particles: Vec<Particle>,
        heard: Vec<Command>,
    }

    impl CommandListener for FixedModel {
        fn on_command(&mut self, command: Command) {
            self.heard.push(command);
        }
    }

    impl ParticleModel for FixedModel {
        fn particles(&self) -> &[Particle] {
            &self.particles
        }
        fn advance(&mut self, _index: usize) {}
        fn shape_of(&self, index: usize) -> Shape {
            self.particles[index].shape()
        }
        fn set_walls(&mut self, _walls: Bounds) {}
        fn initialize_population(&mut self) {}
        fn collision_rate(&self) -> f32 {
            0.256
        }
        fn particle_count(&self) -> usize {
            42
        }
    }

    #[derive(Default)]
    struct FixedHistogram {
        refreshes: usize,
    }

    impl VelocityHistogram for FixedHistogram {
        #[allow(clippy::approx_constant)]
        fn average(&self) -> f32 {
            3.14159
        }
        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }

    struct Rig {
        model: Rc<RefCell<FixedModel>>,
        surface: Rc<RefCell<RenderSurface>>,
        histogram: Rc<RefCell<FixedHistogram>>,
        controller: AnimationController,
        t0: Instant,
    }

    fn rig() -> Rig {
        let params = SimulationParams::default();
        let model = Rc::new(RefCell::new(FixedModel::default()));
        let surface = Rc::new(RefCell::new(RenderSurface::new(model.clone(), &params)));
        let histogram = Rc::new(RefCell::new(FixedHistogram::default()));
        let t0 = Instant::now();
        let controller =
            AnimationController::new(&params, model.clone(), surface.clone(), histogram.clone(), t0);
        Rig { model, surface, histogram, controller, t0 }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn starts_running_after_initial_delay() {
        let mut rig = rig();
        assert!(rig.controller.is_running());
        assert_eq!(rig.controller.run_label(), "Stop");
        assert_eq!(rig.controller.bus().listener_count(), 2);

        assert!(!rig.controller.poll(rig.t0 + ms(199)));
        assert!(rig.controller.poll(rig.t0 + ms(200)));
        assert_eq!(rig.controller.ticks(), 1);
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn tick_publishes_redraw_then_updates_labels() {
        let mut rig = rig();
        rig.controller.on_tick();

        assert_eq!(rig.model.borrow().heard, vec![Command::Redraw]);
        assert!(rig.surface.borrow().repaint_pending());
        assert_eq!(rig.histogram.borrow().refreshes, 1);

        let labels = rig.controller.labels();
        assert_eq!(labels.paint, "Paint: ~1");
        assert_eq!(labels.count, "Atoms: 42");
        assert_eq!(labels.collide, "Collide: 26%");
        assert_eq!(labels.velocity, "Velocity: 3.14");
    }

    #[test]
    fn double_toggle_returns_to_running() {
        let mut rig = rig();
        let now = rig.t0 + ms(50);

        rig.controller.on_run_toggle(now);
        assert!(!rig.controller.is_running());
        assert_eq!(rig.controller.run_label(), "Start");
        assert!(!rig.controller.poll(rig.t0 + ms(10_000)));

        rig.controller.on_run_toggle(now);
        assert!(rig.controller.is_running());
        assert_eq!(rig.controller.run_label(), "Stop");
        assert_eq!(rig.model.borrow().heard, vec![Command::Run, Command::Run]);
    }

    #[test]
    fn reset_only_moves_the_phase() {
        let mut rig = rig();
        let now = rig.t0 + ms(120);
        rig.controller.on_reset(now);
        assert!(rig.controller.is_running());
        assert_eq!(rig.controller.timer().next_fire(), Some(now + ms(200)));

        rig.controller.on_run_toggle(now);
        rig.controller.on_reset(now);
        assert!(!rig.controller.is_running());
        assert_eq!(rig.controller.run_label(), "Start");

        assert_eq!(
            rig.model.borrow().heard,
            vec![Command::Reset, Command::Run, Command::Reset]
        );
    }

    #[test]
    fn population_and_style_events_are_forwarded() {
        let mut rig = rig();
        let now = rig.t0;
        rig.controller.dispatch(ControlEvent::Population(PopulationDelta::Grow), now);
        rig.controller.dispatch(ControlEvent::Population(PopulationDelta::Shrink), now);
        rig.controller.dispatch(ControlEvent::Style(RenderStyle::Color), now);

        assert_eq!(
            rig.model.borrow().heard,
            vec![Command::GrowPopulation, Command::ShrinkPopulation, Command::UseColor]
        );
        assert_eq!(rig.surface.borrow().style(), RenderStyle::Color);
        assert_eq!(rig.controller.bus().current(), Command::UseColor);
    }

    #[test]
    fn rate_change_keeps_timer_running_and_phase() {
        let mut rig = rig();
        let scheduled = rig.controller.timer().next_fire();

        rig.controller.on_rate_change(50);
        assert_eq!(rig.controller.rate().hz(), 50);
        assert_eq!(rig.controller.timer().period(), ms(20));
        assert!(rig.controller.is_running());
        assert_eq!(rig.controller.timer().next_fire(), scheduled);

        rig.controller.on_rate_change(0);
        assert_eq!(rig.controller.rate().hz(), 5);
        assert_eq!(rig.controller.timer().period(), ms(200));
    }

    #[test]
    fn budget_overrun_is_reported_once_per_episode() {
        let mut rig = rig();
        // 25 Hz gives a 40 ms budget
        assert!(!rig.controller.check_frame_budget(40));
        assert!(rig.controller.check_frame_budget(41));
        assert!(!rig.controller.check_frame_budget(90));
        assert!(!rig.controller.check_frame_budget(60));

        assert!(!rig.controller.check_frame_budget(12));
        assert!(rig.controller.check_frame_budget(45));
    }

    #[test]
    fn resize_restarts_only_a_running_timer() {
        let mut rig = rig();
        let now = rig.t0 + ms(90);
        rig.controller.on_resize(now);
        assert_eq!(rig.controller.timer().next_fire(), Some(now + ms(200)));

        rig.controller.on_run_toggle(now);
        rig.controller.on_resize(now + ms(10));
        assert!(!rig.controller.is_running());
        assert_eq!(rig.controller.timer().next_fire(), None);
    }
}
