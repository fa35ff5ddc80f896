//! Requests for the data service and their completions

use super::flow::Ticket;
use super::submission::SubmissionPatch;
use crate::error::ServiceError;
use serde_json::Value;
use std::fmt;

/// A call to make against the data service
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Fetch { ticket: Ticket },
    Update {
        ticket: Ticket,
        id: String,
        patch: SubmissionPatch,
    },
    Delete { ticket: Ticket, id: String },
}

impl Operation {
    pub fn ticket(&self) -> Ticket {
        match self {
            Operation::Fetch { ticket }
            | Operation::Update { ticket, .. }
            | Operation::Delete { ticket, .. } => *ticket,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Fetch { ticket } => write!(f, "fetch #{}", ticket),
            Operation::Update { ticket, id, .. } => write!(f, "update({}) #{}", id, ticket),
            Operation::Delete { ticket, id } => write!(f, "delete({}) #{}", id, ticket),
        }
    }
}

/// Result of a settled operation
#[derive(Debug)]
pub enum Outcome {
    Fetched(Result<Value, ServiceError>),
    Updated(Result<(), ServiceError>),
    Deleted(Result<(), ServiceError>),
}

/// An outcome tagged with the ticket of the operation that produced it
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

impl Completion {
    pub fn new(ticket: Ticket, outcome: Outcome) -> Self {
        Self { ticket, outcome }
    }
}
