use std::fmt::Display;

use bitcode::{Decode, Encode};

/// Side of a breakend on which the retained reference sequence lies.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Direction {
    /// Reference is kept up to the breakend, the novel adjacency starts to its right.
    #[default]
    Left,
    /// Reference is kept from the breakend on, the novel adjacency ends to its left.
    Right,
}

impl Direction {
    pub fn flipped(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Direction {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '<' => Ok(Direction::Left),
            '>' => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flipped() {
        assert_eq!(Direction::Left.flipped(), Direction::Right);
        assert_eq!(Direction::Right.flipped(), Direction::Left);
    }

    #[test]
    fn test_direction_symbol() {
        for dir in [Direction::Left, Direction::Right] {
            assert_eq!(Direction::try_from(dir.symbol()), Ok(dir));
        }
        assert_eq!(Direction::try_from('+'), Err(()));
    }
}
