//! Domain layer: game state, value objects and the interfaces the game needs
//! from the outside world.

pub mod announcement;
pub mod duration;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod repository;
pub mod value_object;

pub use duration::format_duration;
pub use entity::{ChatContext, GameState, Participant};
pub use error::{ChatGatewayError, ModerationError, RepositoryError, ValueObjectError};
pub use gateway::{ChatGateway, ModerationService};
#[cfg(test)]
pub use gateway::{MockChatGateway, MockModerationService};
pub use repository::GameRepository;
#[cfg(test)]
pub use repository::MockGameRepository;
pub use value_object::{GameId, RoomId, RoomType, Timestamp, UserId, UserName};
