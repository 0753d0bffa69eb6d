use crate::error::Result;
use crate::models::FeedbackEntry;

/// Port for the append-only feedback store
pub trait FeedbackLog: Send + Sync {
    /// Append one entry as a single write; on error nothing is recorded
    fn append(&self, entry: &FeedbackEntry) -> Result<()>;

    /// All entries in submission order
    fn entries(&self) -> Result<Vec<FeedbackEntry>>;
}
