use thiserror::Error;

/// A program image that can't be placed in memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("program is {size} bytes, but only {capacity} bytes fit above 0x200")]
    TooLarge { size: usize, capacity: usize },
}

/// A condition that stops the machine. Programs are assumed never to
/// trigger these, so the host is expected to abort when one occurs.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("stack overflow: call at {pc:#05x} nests deeper than {depth} levels")]
    StackOverflow { pc: u16, depth: usize },

    #[error("stack underflow: return at {pc:#05x} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("could not read from the entropy source")]
    Entropy(#[source] rand::Error),
}
