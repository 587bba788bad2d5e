use std::fmt;

/// State of a single grid cell.
///
/// Every cell starts as a wall and is carved into a passage by a generator.
/// `Start` and `Finish` are passages with a designated role.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Wall,
    Passage,
    Start,
    Finish,
}

impl CellState {
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// Anything that is not a wall can be walked through, including start and finish.
    pub fn is_passage(self) -> bool {
        !self.is_wall()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Wall => "wall",
            CellState::Passage => "passage",
            CellState::Start => "start",
            CellState::Finish => "finish",
        };
        write!(f, "{}", name)
    }
}
