//! Observable query pipeline events
//!
//! Query lifecycle (`QUERY_BEGIN` / `QUERY_COMPLETE` / `QUERY_FAILED`)
//! is logged by [`ObservationScope`](super::ObservationScope); these are
//! the steps in between.

use std::fmt;

use super::logger::Severity;

/// Observable events in the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Query text parsed into a request
    QueryParsed,
    /// Aggregate function used without GROUP BY
    UngroupedAggregate,
    /// Request refused by engine policy
    QueryRejected,
    /// Table rows loaded from the row source
    TableLoaded,
    /// Join produced the working row set
    JoinApplied,
    /// WHERE conditions applied
    FilterApplied,
    /// ORDER BY applied
    SortApplied,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryParsed => "QUERY_PARSED",
            Event::UngroupedAggregate => "QUERY_UNGROUPED_AGGREGATE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::TableLoaded => "TABLE_LOADED",
            Event::JoinApplied => "JOIN_APPLIED",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::SortApplied => "SORT_APPLIED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::UngroupedAggregate => Severity::Warn,
            Event::QueryRejected => Severity::Error,
            Event::QueryParsed => Severity::Info,
            Event::TableLoaded | Event::JoinApplied | Event::FilterApplied | Event::SortApplied => {
                Severity::Trace
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
