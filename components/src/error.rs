use std::error::Error;
use std::fmt::{self, Display, Formatter};

use base::BitValueError;

use super::component::{ComponentId, ComponentKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    UnknownComponent(ComponentId),
    DuplicateComponent(ComponentId),
    NotARegister {
        id: ComponentId,
        kind: ComponentKind,
    },
    NotAFlag {
        id: ComponentId,
        kind: ComponentKind,
    },
    SliceOutOfRange {
        parent: ComponentId,
        parent_width: usize,
        start_bit: usize,
        size: usize,
    },
    Value(BitValueError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BoardError::UnknownComponent(id) => write!(f, "there is no component {id}"),
            BoardError::DuplicateComponent(id) => {
                write!(f, "component {id} has already been added")
            }
            BoardError::NotARegister { id, kind } => {
                write!(f, "component {id} is a {kind}, not a register")
            }
            BoardError::NotAFlag { id, kind } => {
                write!(f, "component {id} is a {kind}, not a flag")
            }
            BoardError::SliceOutOfRange {
                parent,
                parent_width,
                start_bit,
                size,
            } => write!(
                f,
                "a slice of {size} bits starting at bit {start_bit} does not fit in the {parent_width}-bit register {parent}"
            ),
            BoardError::Value(e) => write!(f, "bad register value: {e}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BoardError::Value(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BitValueError> for BoardError {
    fn from(e: BitValueError) -> BoardError {
        BoardError::Value(e)
    }
}
