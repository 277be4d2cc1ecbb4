//! Browser page access for turnmark over the Chrome DevTools Protocol.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │    turnmark     │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │  (user's browser)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Start Chrome with remote debugging enabled so the tab keeps the user's
//! ChatGPT and Gemini logins:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! Then:
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = CdpPage::new(client.active_page().await?);
//! let location = page.location().await?;
//! ```

mod client;
mod error;
mod page;
mod protocol;
pub mod script;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use page::CdpPage;
pub use protocol::*;
pub use session::PageSession;
