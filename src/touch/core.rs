use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::{EarlyContactPolicy, ReleasePolicy, TouchConfig};

use super::types::{TapEvent, TouchSample, TouchState};

#[derive(Clone, Copy, Debug)]
enum TouchHsmEvent {
    Sample { now_ms: u64, sample: TouchSample },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    tap: Option<TapEvent>,
    entered: Option<TouchState>,
}

/// Debounces raw panel samples into at most one [`TapEvent`] per press.
pub struct TouchEngine {
    machine: statig::blocking::StateMachine<TouchHsm>,
    state: TouchState,
}

impl Default for TouchEngine {
    fn default() -> Self {
        Self::new(TouchConfig::default())
    }
}

impl TouchEngine {
    pub fn new(config: TouchConfig) -> Self {
        Self {
            machine: TouchHsm::new(config).state_machine(),
            state: TouchState::Idle,
        }
    }

    pub fn tick(&mut self, now_ms: u64, sample: TouchSample) -> Option<TapEvent> {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&TouchHsmEvent::Sample { now_ms, sample }, &mut context);
        if let Some(next) = context.entered {
            if next != self.state {
                log::debug!("touch: {:?} -> {:?} t={}", self.state, next, now_ms);
            }
            self.state = next;
        }
        context.tap
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn last_tap_ms(&self) -> Option<u64> {
        self.machine.inner().last_tap_ms
    }
}

struct TouchHsm {
    debounce_ms: u64,
    release_policy: ReleasePolicy,
    early_contact: EarlyContactPolicy,
    last_tap_ms: Option<u64>,
}

impl TouchHsm {
    fn new(config: TouchConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            release_policy: config.release_policy,
            early_contact: config.early_contact,
            last_tap_ms: None,
        }
    }

    fn debounce_elapsed(&self, now_ms: u64) -> bool {
        match self.last_tap_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.debounce_ms,
            None => true,
        }
    }

    fn release(&self, context: &mut DispatchContext) -> Outcome<State> {
        match self.release_policy {
            ReleasePolicy::Immediate => enter(context, TouchState::Idle, State::idle()),
            ReleasePolicy::SettleTick => {
                enter(context, TouchState::WaitRelease, State::wait_release())
            }
        }
    }
}

fn enter(context: &mut DispatchContext, next: TouchState, state: State) -> Outcome<State> {
    context.entered = Some(next);
    Transition(state)
}

#[state_machine(initial = "State::idle()")]
impl TouchHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &TouchHsmEvent) -> Outcome<State> {
        match event {
            TouchHsmEvent::Sample { now_ms, sample } => {
                if !sample.valid {
                    return Handled;
                }
                if !self.debounce_elapsed(*now_ms) {
                    return match self.early_contact {
                        EarlyContactPolicy::WaitForLift => {
                            enter(context, TouchState::WaitRelease, State::wait_release())
                        }
                        EarlyContactPolicy::StayIdle => Handled,
                    };
                }
                self.last_tap_ms = Some(*now_ms);
                context.tap = Some(TapEvent {
                    t_ms: *now_ms,
                    x: sample.x,
                    y: sample.y,
                    pressure: sample.pressure,
                });
                enter(context, TouchState::Pressed, State::pressed())
            }
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &TouchHsmEvent) -> Outcome<State> {
        match event {
            TouchHsmEvent::Sample { sample, .. } => {
                if sample.valid {
                    enter(context, TouchState::Held, State::held())
                } else {
                    self.release(context)
                }
            }
        }
    }

    #[state]
    fn held(&mut self, context: &mut DispatchContext, event: &TouchHsmEvent) -> Outcome<State> {
        match event {
            TouchHsmEvent::Sample { sample, .. } => {
                if sample.valid {
                    Handled
                } else {
                    self.release(context)
                }
            }
        }
    }

    #[state]
    fn wait_release(
        &mut self,
        context: &mut DispatchContext,
        event: &TouchHsmEvent,
    ) -> Outcome<State> {
        match event {
            TouchHsmEvent::Sample { sample, .. } => {
                if sample.valid {
                    Handled
                } else {
                    enter(context, TouchState::Idle, State::idle())
                }
            }
        }
    }
}
