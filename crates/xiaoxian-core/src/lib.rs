pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use config::{AttachmentConfig, ChatConfig, GeneralConfig, SessionOrder, XiaoxianConfig};
pub use error::{Result, XiaoxianError};
pub use ids::IdGenerator;
pub use types::*;
