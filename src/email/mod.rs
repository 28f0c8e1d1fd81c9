pub mod dispatch;
pub mod format;
pub mod transport;

pub use dispatch::{DispatchState, EmailDispatcher};
pub use format::{format_summary, summary_subject, EventLine, QuoteLine, SummaryDraft, WeatherLine};
pub use transport::{EmailCredentials, EmailJsTransport, EmailTransport, OutgoingEmail};
