//! Wire types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConversionRequest`] | Validated `/api/convert` request |
//! | [`ConversionResult`] | Success or error body returned to the caller |
//! | [`Message`] | Chat message sent to the completion service |
//! | [`MessageRole`] | Message role (system, user) |
//!
//! ## Example
//!
//! ```rust
//! use tone_relay::types::{Message, MessageRole};
//!
//! let system = Message::system("Rewrite the text for a customer.");
//! let user = Message::user("배송이 늦어집니다");
//! assert!(matches!(system.role, MessageRole::System));
//! assert_eq!(user.content, "배송이 늦어집니다");
//! ```

pub mod conversion;
pub mod message;

pub use conversion::{ConversionRequest, ConversionResult};
pub use message::{Message, MessageRole};
