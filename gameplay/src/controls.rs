/// Snapshot of the keys that drive the player, taken once per frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub sprint: bool,
}

impl Controls {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.turn_left || self.turn_right)
    }
}
