pub mod r#trait;
pub use r#trait::{CallbackSink, RenderSink};

pub mod blend;
pub use self::blend::{BlendFunc, BlendSettings};

pub mod sprite_bank;
pub use self::sprite_bank::{Sprite, SpriteBank, SpriteInstance};
