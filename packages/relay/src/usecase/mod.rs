//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層（ConnectionRegistry）を操作します。

pub mod connect_subscriber;
pub mod disconnect_subscriber;
pub mod error;
pub mod get_conversations;
pub mod submit_update;

pub use connect_subscriber::ConnectSubscriberUseCase;
pub use disconnect_subscriber::{DisconnectOutcome, DisconnectSubscriberUseCase};
pub use error::{ConnectError, SubmitError};
pub use get_conversations::GetConversationsUseCase;
pub use submit_update::SubmitUpdateUseCase;
