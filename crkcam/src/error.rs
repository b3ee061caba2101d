use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[error("crank wheel needs at least one tooth")]
    NoTeeth,
    #[error("{missing} missing teeth leave no tooth on a {teeth} tooth wheel")]
    TooManyMissingTeeth { teeth: u8, missing: u8 },
    #[error("half pitch of a {teeth} tooth wheel is not a whole number of deci-degrees")]
    UnevenPitch { teeth: u8 },
    #[error("{events} events exceed the capacity of {capacity}")]
    TooManyEvents { events: usize, capacity: usize },
    #[error("cam configuration has no events")]
    NoCamEvents,
    #[error("cam events span {total} deci-degrees instead of {expected}")]
    CamCycleMismatch { total: u64, expected: u32 },
}
