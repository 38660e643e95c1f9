use super::config::{AbsoluteActionCodes, RelativeActionCodes};

/// Turn relative to the snake's current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeTurn {
    Left,
    Straight,
    Right,
}

impl RelativeTurn {
    pub const ALL: [RelativeTurn; 3] = [RelativeTurn::Left, RelativeTurn::Straight, RelativeTurn::Right];

    /// Engine code for this turn
    pub fn code(self, codes: &RelativeActionCodes) -> i32 {
        match self {
            RelativeTurn::Left => codes.left,
            RelativeTurn::Straight => codes.straight,
            RelativeTurn::Right => codes.right,
        }
    }
}

/// Direction in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Engine code for this direction
    pub fn code(self, codes: &AbsoluteActionCodes) -> i32 {
        match self {
            Direction::Up => codes.up,
            Direction::Right => codes.right,
            Direction::Down => codes.down,
            Direction::Left => codes.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_codes() {
        let codes = RelativeActionCodes::default();
        let mapped: Vec<i32> = RelativeTurn::ALL.iter().map(|t| t.code(&codes)).collect();
        assert_eq!(mapped, vec![0, 1, 2]);
    }

    #[test]
    fn test_absolute_codes_follow_config() {
        let codes = AbsoluteActionCodes {
            up: 10,
            right: 11,
            down: 12,
            left: 13,
        };
        assert_eq!(Direction::Up.code(&codes), 10);
        assert_eq!(Direction::Left.code(&codes), 13);
    }
}
