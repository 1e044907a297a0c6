mod core;
mod keyboard;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::InputState;
