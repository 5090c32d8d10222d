//! Search errors.

use kestrel_core::Move;

use crate::search::picker::Stage;

/// Contract violations that abort a search run.
///
/// Running out of time is not an error: the search unwinds and reports the
/// last completed depth.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The move picker produced a move the position rejects as pseudo-legal.
    #[error("move picker yielded {mv}, which is not pseudo-legal in stage {stage}; position: {position}")]
    IllegalMove {
        /// Picker stage that produced the move.
        stage: Stage,
        /// The offending move.
        mv: Move,
        /// Snapshot of the position it was asked about.
        position: String,
    },
}
