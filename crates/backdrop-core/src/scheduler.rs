//! Running/stopped state of the render loop.
//!
//! `Suspended` is a stop caused by the page being hidden. Only a suspended
//! loop comes back on `resume`; a host `stop` always wins.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    Suspended,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoopControl {
    state: LoopState,
}

impl LoopControl {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Host start. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// Host stop, from Running or Suspended. Returns `false` if already
    /// stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        true
    }

    /// Running -> Suspended. Returns `true` only when a running loop was
    /// paused.
    pub fn suspend(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.state = LoopState::Suspended;
        true
    }

    /// Suspended -> Running. A loop the host stopped stays stopped.
    pub fn resume(&mut self) -> bool {
        if self.state != LoopState::Suspended {
            return false;
        }
        self.state = LoopState::Running;
        true
    }
}
