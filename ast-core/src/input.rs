/// Keyboard state sampled once per frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

impl Controls {
    pub const IDLE: Controls = Controls {
        thrust: false,
        rotate_left: false,
        rotate_right: false,
        fire: false,
    };

    pub fn thrusting() -> Self {
        Controls {
            thrust: true,
            ..Self::IDLE
        }
    }

    pub fn firing() -> Self {
        Controls {
            fire: true,
            ..Self::IDLE
        }
    }
}
