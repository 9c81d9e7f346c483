use crate::capabilities::FactError;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum NumberAction {
    /// Ignored while a fact request is in flight. Never goes below zero.
    DecrementTapped,
    FactResponse(Result<String, FactError>),
    /// Ignored while a fact request is in flight.
    IncrementTapped,
    RetrieveFactTapped,
    SetTimer(bool),
    TimerTick,
}

impl Action for NumberAction {}
