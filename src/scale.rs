use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const MAJOR_STEPS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("scale has no steps")]
    Empty,

    #[error("scale step {index} is zero, steps must be positive")]
    ZeroStep { index: usize },

    #[error("{0} scale has no interval pattern yet")]
    Unimplemented(ScaleKind),

    #[error("scale type not recognized: {0}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Major,
    Minor,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleKind::Major => write!(f, "major"),
            ScaleKind::Minor => write!(f, "minor"),
        }
    }
}

impl FromStr for ScaleKind {
    type Err = ScaleError;

    /// Accepts names or the numeric scale codes (0 major, 1 minor).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "0" => Ok(ScaleKind::Major),
            "minor" | "1" => Ok(ScaleKind::Minor),
            other => Err(ScaleError::Unrecognized(other.to_string())),
        }
    }
}

/// Cyclic sequence of semitone steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleDefinition {
    steps: Vec<u8>,
}

impl ScaleDefinition {
    pub fn new(steps: Vec<u8>) -> Result<Self, ScaleError> {
        if steps.is_empty() {
            return Err(ScaleError::Empty);
        }
        if let Some(index) = steps.iter().position(|&step| step == 0) {
            return Err(ScaleError::ZeroStep { index });
        }
        Ok(Self { steps })
    }

    pub fn from_kind(kind: ScaleKind) -> Result<Self, ScaleError> {
        match kind {
            ScaleKind::Major => Ok(Self::major()),
            ScaleKind::Minor => Err(ScaleError::Unimplemented(kind)),
        }
    }

    pub fn major() -> Self {
        Self {
            steps: MAJOR_STEPS.to_vec(),
        }
    }

    pub fn steps(&self) -> &[u8] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn octave_span(&self) -> i32 {
        self.steps.iter().map(|&step| step as i32).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Position of a walk over a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub note: i32,
    pub step_index: usize,
}

impl Cursor {
    pub fn at(note: i32) -> Self {
        Self {
            note,
            step_index: 0,
        }
    }
}

/// Moves one scale step. Going up consumes the step at the current index
/// and then advances; going down retreats first and then subtracts, so an
/// up followed by a down (or the reverse) lands on the starting cursor.
pub fn advance(cursor: Cursor, direction: Direction, scale: &ScaleDefinition) -> Cursor {
    let len = scale.len();
    match direction {
        Direction::Up => {
            let note = cursor.note + scale.steps[cursor.step_index] as i32;
            Cursor {
                note,
                step_index: (cursor.step_index + 1) % len,
            }
        }
        Direction::Down => {
            let step_index = if cursor.step_index == 0 {
                len - 1
            } else {
                cursor.step_index - 1
            };
            Cursor {
                note: cursor.note - scale.steps[step_index] as i32,
                step_index,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScaleWalker {
    root_note: i32,
    cursor: Cursor,
    scale: ScaleDefinition,
}

impl ScaleWalker {
    pub fn new(root_note: i32, scale: ScaleDefinition) -> Self {
        Self {
            root_note,
            cursor: Cursor::at(root_note),
            scale,
        }
    }

    pub fn step_up(&mut self) -> i32 {
        self.cursor = advance(self.cursor, Direction::Up, &self.scale);
        self.cursor.note
    }

    pub fn step_down(&mut self) -> i32 {
        self.cursor = advance(self.cursor, Direction::Down, &self.scale);
        self.cursor.note
    }

    pub fn reset(&mut self) {
        self.cursor = Cursor::at(self.root_note);
    }

    pub fn get_note(&self) -> i32 {
        self.cursor.note
    }

    pub fn step_index(&self) -> usize {
        self.cursor.step_index
    }

    pub fn root_note(&self) -> i32 {
        self.root_note
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn scale(&self) -> &ScaleDefinition {
        &self.scale
    }
}
